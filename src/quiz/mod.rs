pub mod session;
pub mod storage;
pub mod types;

pub use session::QuizSession;
pub use storage::{FileProgressStore, MemoryProgressStore, ProgressStore, STORAGE_KEY};
pub use types::{AnswerSet, Category, Question, QuestionOption};

use anyhow::Result;
use std::future::Future;

/// A quiz session bound to the store that persists it.
///
/// Every change made through `Quiz` is written to the store immediately.
pub struct Quiz<S: ProgressStore> {
    store: S,
    session: QuizSession,
}

impl<S: ProgressStore> Quiz<S> {
    /// Resume saved progress, or fetch questions and start over when nothing
    /// usable was saved.
    ///
    /// Saved progress without questions counts as nothing saved.
    pub async fn resume_or_start<F, Fut>(store: S, fetch: F) -> Result<Self>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Question>>>,
    {
        match store.load() {
            Ok(Some(session)) if !session.questions.is_empty() => {
                log::debug!(
                    "Resuming quiz at question {} with {} answers",
                    session.current_question_index + 1,
                    session.answered_count()
                );
                return Ok(Self { store, session });
            }
            Ok(_) => {}
            Err(e) => log::warn!("Ignoring unreadable quiz progress: {:#}", e),
        }

        Self::start(store, fetch).await
    }

    /// Discard saved progress and start again with freshly fetched questions.
    ///
    /// When the fetch fails the stored progress is already gone but the
    /// in-memory session is left as it was.
    pub async fn restart<F, Fut>(&mut self, fetch: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Question>>>,
    {
        self.store.clear()?;
        self.session = Self::fresh_session(fetch().await?);
        self.persist()
    }

    async fn start<F, Fut>(store: S, fetch: F) -> Result<Self>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Question>>>,
    {
        let quiz = Self {
            store,
            session: Self::fresh_session(fetch().await?),
        };
        quiz.persist()?;
        Ok(quiz)
    }

    fn fresh_session(questions: Vec<Question>) -> QuizSession {
        if let Err(errors) = crate::scoring::validate_questions(&questions) {
            for error in &errors {
                log::warn!("Question set: {}", error);
            }
        }
        QuizSession::new(questions)
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) -> Result<()> {
        if self.session.questions.is_empty() {
            return Ok(());
        }
        self.store.save(&self.session)
    }

    /// Returns false (and saves nothing) for an unknown question id
    pub fn select_answer(&mut self, question_id: &str, score: i32) -> Result<bool> {
        let changed = self.session.select_answer(question_id, score);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    pub fn select_option(&mut self, label: &str) -> Result<bool> {
        let changed = self.session.select_option(label);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    pub fn next(&mut self) -> Result<bool> {
        let moved = self.session.next();
        if moved {
            self.persist()?;
        }
        Ok(moved)
    }

    pub fn previous(&mut self) -> Result<bool> {
        let moved = self.session.previous();
        if moved {
            self.persist()?;
        }
        Ok(moved)
    }

    /// Jump to the first unanswered question, if any
    pub fn go_to_first_unanswered(&mut self) -> Result<bool> {
        match self.session.first_unanswered() {
            Some(index) if index != self.session.current_question_index => {
                self.session.current_question_index = index;
                self.persist()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Forget saved progress without starting over
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| Question {
                question_id: format!("Q{}", i),
                order: i as u32,
                category: Category::ALL[(i - 1) % 4],
                question_text: format!("질문 {}", i),
                options: vec![
                    QuestionOption { label: "A".to_string(), text: "매우 동의".to_string(), score: -2 },
                    QuestionOption { label: "D".to_string(), text: "매우 반대".to_string(), score: 2 },
                ],
            })
            .collect()
    }

    async fn fetch_four() -> Result<Vec<Question>> {
        Ok(questions(4))
    }

    #[tokio::test]
    async fn test_start_fetches_and_persists() {
        let quiz = Quiz::resume_or_start(MemoryProgressStore::new(), fetch_four).await.unwrap();
        assert_eq!(quiz.session().questions.len(), 4);
        assert_eq!(quiz.store().load().unwrap().unwrap(), *quiz.session());
    }

    #[tokio::test]
    async fn test_resume_skips_fetch() {
        let store = MemoryProgressStore::new();
        let mut saved = QuizSession::new(questions(2));
        saved.select_answer("Q1", 2);
        saved.next();
        store.save(&saved).unwrap();

        let quiz = Quiz::resume_or_start(store, || async {
            Err::<Vec<Question>, _>(anyhow::anyhow!("fetch should not be called"))
        })
        .await
        .unwrap();

        assert_eq!(quiz.session().current_question_index, 1);
        assert_eq!(quiz.session().answers.get("Q1"), Some(2));
    }

    #[tokio::test]
    async fn test_saved_session_without_questions_refetches() {
        let store = MemoryProgressStore::new();
        store.save(&QuizSession::new(Vec::new())).unwrap();

        let quiz = Quiz::resume_or_start(store, fetch_four).await.unwrap();
        assert_eq!(quiz.session().questions.len(), 4);
    }

    #[tokio::test]
    async fn test_every_mutation_is_saved() {
        let mut quiz = Quiz::resume_or_start(MemoryProgressStore::new(), fetch_four).await.unwrap();

        assert!(quiz.select_option("d").unwrap());
        assert!(quiz.next().unwrap());
        assert!(quiz.select_answer("Q2", -2).unwrap());
        assert!(!quiz.select_answer("Q99", 1).unwrap());

        let saved = quiz.store().load().unwrap().unwrap();
        assert_eq!(saved.current_question_index, 1);
        assert_eq!(saved.answers.get("Q1"), Some(2));
        assert_eq!(saved.answers.get("Q2"), Some(-2));

        assert!(quiz.go_to_first_unanswered().unwrap());
        assert_eq!(quiz.store().load().unwrap().unwrap().current_question_index, 2);
    }

    #[tokio::test]
    async fn test_restart_clears_answers() {
        let mut quiz = Quiz::resume_or_start(MemoryProgressStore::new(), fetch_four).await.unwrap();
        quiz.select_answer("Q1", 2).unwrap();
        quiz.next().unwrap();

        quiz.restart(fetch_four).await.unwrap();
        assert!(quiz.session().answers.is_empty());
        assert_eq!(quiz.session().current_question_index, 0);
        assert!(quiz.store().load().unwrap().unwrap().answers.is_empty());
    }

    #[tokio::test]
    async fn test_failed_restart_keeps_session() {
        let mut quiz = Quiz::resume_or_start(MemoryProgressStore::new(), fetch_four).await.unwrap();
        quiz.select_answer("Q1", 2).unwrap();

        let result = quiz
            .restart(|| async { Err::<Vec<Question>, _>(anyhow::anyhow!("backend down")) })
            .await;
        assert!(result.is_err());
        assert_eq!(quiz.session().answers.get("Q1"), Some(2));
        assert!(quiz.store().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let result = Quiz::resume_or_start(MemoryProgressStore::new(), || async {
            Err::<Vec<Question>, _>(anyhow::anyhow!("backend down"))
        })
        .await;
        assert_eq!(result.err().unwrap().to_string(), "backend down");
    }

    #[tokio::test]
    async fn test_file_store_survives_restart_of_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut quiz = Quiz::resume_or_start(FileProgressStore::new(&path), fetch_four).await.unwrap();
        quiz.select_answer("Q3", -2).unwrap();
        drop(quiz);

        let quiz = Quiz::resume_or_start(FileProgressStore::new(&path), || async {
            Err::<Vec<Question>, _>(anyhow::anyhow!("should resume from disk"))
        })
        .await
        .unwrap();
        assert_eq!(quiz.session().answers.get("Q3"), Some(-2));
    }
}
