pub mod analysis;
pub mod authentication;
pub mod db;
pub mod health;
pub mod llm;
pub mod ocr;
