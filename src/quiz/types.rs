use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Policy domain a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Economy,
    Society,
    Government,
    Security,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Economy,
        Category::Society,
        Category::Government,
        Category::Security,
    ];

    /// Korean display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Economy => "경제",
            Category::Society => "사회",
            Category::Government => "정부 역할",
            Category::Security => "안보",
        }
    }

    /// Wire key, as used in question payloads
    pub fn key(&self) -> &'static str {
        match self {
            Category::Economy => "economy",
            Category::Society => "society",
            Category::Government => "government",
            Category::Security => "security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String, // "A".."D"
    pub text: String,
    pub score: i32, // -2, -1, +1, +2
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String, // "Q1".."Q24"
    pub order: u32,
    pub category: Category,
    pub question_text: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Find an option by its label, ignoring case ("a" matches "A")
    pub fn option_by_label(&self, label: &str) -> Option<&QuestionOption> {
        self.options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label.trim()))
    }
}

/// Chosen score per question id. At most one entry per question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, i32>);

impl AnswerSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a score, replacing any earlier answer to the same question.
    pub fn insert(&mut self, question_id: impl Into<String>, score: i32) {
        self.0.insert(question_id.into(), score);
    }

    pub fn get(&self, question_id: &str) -> Option<i32> {
        self.0.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_parse_from_backend_payload() {
        let json = r#"{
            "questionId": "Q1",
            "order": 1,
            "category": "economy",
            "questionText": "최저임금은 인상되어야 한다",
            "options": [
                {"label": "A", "text": "매우 동의", "score": -2},
                {"label": "B", "text": "동의", "score": -1},
                {"label": "C", "text": "반대", "score": 1},
                {"label": "D", "text": "매우 반대", "score": 2}
            ]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_id, "Q1");
        assert_eq!(q.category, Category::Economy);
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.option_by_label("c").unwrap().score, 1);
    }

    #[test]
    fn test_question_without_category_is_rejected() {
        let json = r#"{"questionId": "Q1", "order": 1, "questionText": "x", "options": []}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json =
            r#"{"questionId": "Q1", "order": 1, "category": "culture", "questionText": "x", "options": []}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn test_answer_set_overwrites() {
        let mut answers = AnswerSet::new();
        answers.insert("Q1", -2);
        answers.insert("Q1", 1);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("Q1"), Some(1));
    }

    #[test]
    fn test_answer_set_serializes_as_plain_map() {
        let answers: AnswerSet = [("Q2", 1), ("Q1", -2)].into_iter().collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"Q1":-2,"Q2":1}"#);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Government.display_name(), "정부 역할");
        assert_eq!(Category::Security.key(), "security");
        assert_eq!(Category::ALL.len(), 4);
    }
}
