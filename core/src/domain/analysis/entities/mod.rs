pub mod analysis_result;
pub mod persisted_analysis;

pub use analysis_result::*;
pub use persisted_analysis::*;
