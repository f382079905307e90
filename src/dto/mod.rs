pub mod auth;
pub mod cart;
pub mod contact;
pub mod currency;
pub mod delivery;
pub mod orders;
pub mod products;
pub mod wishlist;
