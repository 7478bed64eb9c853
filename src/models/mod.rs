pub mod activity;
pub mod request;
pub mod user;

pub use activity::*;
pub use request::*;
pub use user::*;
