pub mod label_analyses;
