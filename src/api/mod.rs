pub mod auth;
pub mod health;
pub mod reservations;
pub mod swagger;
pub mod users;
