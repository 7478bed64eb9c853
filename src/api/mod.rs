pub mod health;
pub mod hooks;
pub mod metrics;
pub mod requests;
pub mod swagger;
pub mod users;
