pub mod analyze_label;
pub mod get_analyses;
pub mod get_analysis;
