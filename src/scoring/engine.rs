use super::labels::{Leaning, OverallLabel};
use crate::quiz::types::{AnswerSet, Category, Question};
use serde::Serialize;

/// Largest raw sum a category can reach (6 questions x 2 points).
pub const RAW_CATEGORY_MAX: i64 = 12;

/// Category weights for the overall score, in percent.
pub const CATEGORY_WEIGHTS: [(Category, i64); 4] = [
    (Category::Economy, 25),
    (Category::Society, 20),
    (Category::Government, 25),
    (Category::Security, 30),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub score: i32, // -100..=100
    pub label: Leaning,
}

impl CategoryResult {
    fn from_score(score: i32) -> Self {
        Self {
            score,
            label: Leaning::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryResults {
    pub economy: CategoryResult,
    pub society: CategoryResult,
    pub government: CategoryResult,
    pub security: CategoryResult,
}

impl CategoryResults {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Economy => &self.economy,
            Category::Society => &self.society,
            Category::Government => &self.government,
            Category::Security => &self.security,
        }
    }

    /// Results in fixed category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub category_results: CategoryResults,
    pub total_score: i32,
    pub total_label: OverallLabel,
}

/// Score a (possibly incomplete) answer set against the question list.
///
/// Answers keyed by ids that are not in `questions` are ignored, and
/// unanswered questions contribute nothing to their category.
pub fn calculate_result(answers: &AnswerSet, questions: &[Question]) -> TestResult {
    let mut sums = [0i64; 4];
    for question in questions {
        if let Some(score) = answers.get(&question.question_id) {
            sums[category_index(question.category)] += i64::from(score);
        }
    }

    let normalized = sums.map(normalize);

    let weighted: i64 = CATEGORY_WEIGHTS
        .iter()
        .map(|(category, weight)| weight * i64::from(normalized[category_index(*category)]))
        .sum();
    let total_score = round_half_away_from_zero(weighted, 100) as i32;

    let positive = normalized.iter().filter(|s| **s > 0).count();
    let negative = normalized.iter().filter(|s| **s < 0).count();
    let total_label = if positive == 2 && negative == 2 {
        OverallLabel::Mixed
    } else {
        OverallLabel::Leaning(Leaning::from_score(total_score))
    };

    TestResult {
        category_results: CategoryResults {
            economy: CategoryResult::from_score(normalized[0]),
            society: CategoryResult::from_score(normalized[1]),
            government: CategoryResult::from_score(normalized[2]),
            security: CategoryResult::from_score(normalized[3]),
        },
        total_score,
        total_label,
    }
}

fn category_index(category: Category) -> usize {
    match category {
        Category::Economy => 0,
        Category::Society => 1,
        Category::Government => 2,
        Category::Security => 3,
    }
}

/// Rescale a raw category sum to [-100, 100].
///
/// The scale assumes 6 questions per category. Larger categories are clamped
/// instead of running past ±100, which also caps their share of the total.
fn normalize(sum: i64) -> i32 {
    round_half_away_from_zero(sum * 100, RAW_CATEGORY_MAX).clamp(-100, 100) as i32
}

/// Exact `round(numerator / denominator)` with halves rounded away from zero.
/// `denominator` must be positive.
fn round_half_away_from_zero(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if 2 * remainder.abs() >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
