pub mod analysis;
pub mod authentication;
pub mod common;
pub mod health;
