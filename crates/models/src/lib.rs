pub mod db;
pub mod errors;
pub mod serialize;

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;
