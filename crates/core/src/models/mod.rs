//! Record kinds served by the service.

pub mod patient;
pub mod user;

mod text;

pub use patient::Patient;
pub use user::User;
