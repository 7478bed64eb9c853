pub mod activity_service;
pub mod request_service;
pub mod user_service;
pub mod vote_service;

pub use activity_service::*;
