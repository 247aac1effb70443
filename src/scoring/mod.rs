pub mod engine;
pub mod labels;
pub mod validation;

pub use engine::{calculate_result, CategoryResult, CategoryResults, TestResult, CATEGORY_WEIGHTS};
pub use labels::{Leaning, OverallLabel};
pub use validation::validate_questions;
