use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("price must be between {} and {}", PRICE_MIN, PRICE_MAX)]
pub struct PriceOutOfRange;

/// Single price rule shared by the HTTP boundary and row construction.
pub fn validate_price(price: i32) -> Result<i32, PriceOutOfRange> {
    if (PRICE_MIN..=PRICE_MAX).contains(&price) {
        Ok(price)
    } else {
        Err(PriceOutOfRange)
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

impl NewRestaurantPizza {
    /// Fails before anything touches the store when the price is out of range.
    pub fn new(
        price: i32,
        restaurant_id: i32,
        pizza_id: i32,
    ) -> Result<NewRestaurantPizza, PriceOutOfRange> {
        Ok(NewRestaurantPizza {
            price: validate_price(price)?,
            restaurant_id,
            pizza_id,
        })
    }
}
