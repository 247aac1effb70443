use super::types::{AnswerSet, Question};
use crate::scoring::{calculate_result, TestResult};
use serde::{Deserialize, Serialize};

/// Progress through one questionnaire: the question list, the cursor and the
/// answers given so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub current_question_index: usize,
    #[serde(default)]
    pub answers: AnswerSet,
    pub questions: Vec<Question>,
}

impl QuizSession {
    /// Start a fresh session at the first question
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            current_question_index: 0,
            answers: AnswerSet::new(),
            questions,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// Score recorded for the current question, if answered
    pub fn current_answer(&self) -> Option<i32> {
        self.current_question()
            .and_then(|q| self.answers.get(&q.question_id))
    }

    /// Record an answer. Returns false when no question has that id.
    pub fn select_answer(&mut self, question_id: &str, score: i32) -> bool {
        if !self.questions.iter().any(|q| q.question_id == question_id) {
            return false;
        }
        self.answers.insert(question_id, score);
        true
    }

    /// Answer the current question with the option carrying `label`.
    /// Returns false if there is no current question or no such option.
    pub fn select_option(&mut self, label: &str) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let Some(option) = question.option_by_label(label) else {
            return false;
        };
        let (id, score) = (question.question_id.clone(), option.score);
        self.answers.insert(id, score);
        true
    }

    /// Move to the next question; stays on the last one.
    pub fn next(&mut self) -> bool {
        if self.current_question_index + 1 < self.questions.len() {
            self.current_question_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question; stays on the first one.
    pub fn previous(&mut self) -> bool {
        if self.current_question_index > 0 {
            self.current_question_index -= 1;
            true
        } else {
            false
        }
    }

    /// Index of the first unanswered question, if any
    pub fn first_unanswered(&self) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| self.answers.get(&q.question_id).is_none())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_completed(&self) -> bool {
        !self.questions.is_empty() && self.answers.len() == self.questions.len()
    }

    /// Percentage of questions answered, rounded to the nearest integer
    pub fn progress(&self) -> u32 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        let answered = self.answers.len().min(total);
        ((answered * 200 + total) / (total * 2)) as u32
    }

    /// Score the answers given so far
    pub fn result(&self) -> TestResult {
        calculate_result(&self.answers, &self.questions)
    }
}
