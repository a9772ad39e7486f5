//! Database entities module

pub mod schedule;
pub mod time_off;
pub mod user;

pub use schedule::Entity as Schedule;
pub use time_off::Entity as TimeOff;
pub use user::Entity as User;
