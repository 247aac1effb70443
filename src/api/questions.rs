use super::client::BackendClient;
use super::error::ApiError;
use crate::quiz::types::Question;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    questions: Vec<Question>,
}

impl BackendClient {
    /// Load the questionnaire, ordered by each question's `order`.
    ///
    /// `success: false` or an empty list is reported as [`ApiError::NoData`].
    pub async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        let url = self.url(&["api", "political-test", "questions"], &[])?;
        let response: QuestionsResponse = self.get_json(url, false).await?;

        if !response.success || response.questions.is_empty() {
            return Err(ApiError::NoData("질문을 불러올 수 없습니다.".to_string()));
        }

        let mut questions = response.questions;
        questions.sort_by_key(|q| q.order);
        log::debug!("Loaded {} questions", questions.len());
        Ok(questions)
    }
}
