pub mod property;
pub mod reservation;
pub mod user;

pub use property::{NewProperty, Property, PropertyFilter};
pub use reservation::GuestReservation;
pub use user::{NewUser, User};
