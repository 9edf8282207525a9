pub mod cart;
pub mod impact;
pub mod orders;
pub mod posts;
pub mod products;
pub mod users;
