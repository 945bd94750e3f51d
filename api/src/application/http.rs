pub mod analysis;
pub mod authentication;
pub mod health;
pub mod server;
