pub mod cars;
pub mod users;

pub use cars::{CarStore, Cars};
pub use users::{UserStore, Users};
