use crate::quiz::types::{Category, Question};
use std::collections::{HashMap, HashSet};

/// Scores an option may carry
pub const ALLOWED_OPTION_SCORES: [i32; 4] = [-2, -1, 1, 2];

/// Option labels, in display order
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Questions each category must hold for the fixed ±12 normalization
pub const QUESTIONS_PER_CATEGORY: usize = 6;

/// Validate a question set before a session is started.
/// Returns all validation errors at once (not just the first).
pub fn validate_questions(questions: &[Question]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut per_category: HashMap<Category, usize> = HashMap::new();

    for (i, question) in questions.iter().enumerate() {
        if !seen_ids.insert(question.question_id.as_str()) {
            errors.push(format!(
                "questions[{}]: duplicate id '{}'",
                i, question.question_id
            ));
        }

        *per_category.entry(question.category).or_default() += 1;

        if question.options.is_empty() {
            errors.push(format!("questions[{}] ({}): has no options", i, question.question_id));
        }

        for (j, option) in question.options.iter().enumerate() {
            if !ALLOWED_OPTION_SCORES.contains(&option.score) {
                errors.push(format!(
                    "questions[{}].options[{}].score: {} is not one of -2, -1, 1, 2",
                    i, j, option.score
                ));
            }
            if !OPTION_LABELS.contains(&option.label.as_str()) {
                errors.push(format!(
                    "questions[{}].options[{}].label: '{}' is not one of A-D",
                    i, j, option.label
                ));
            }
        }
    }

    for category in Category::ALL {
        let count = per_category.get(&category).copied().unwrap_or(0);
        if count != QUESTIONS_PER_CATEGORY {
            errors.push(format!(
                "category {}: expected {} questions, found {}",
                category.key(),
                QUESTIONS_PER_CATEGORY,
                count
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
