pub mod reservation;
pub mod user;

pub use reservation::*;
pub use user::*;
