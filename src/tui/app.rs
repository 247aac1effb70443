use crate::quiz::{ProgressStore, Quiz};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Question,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    ConfirmRestart,
}

pub struct App<S: ProgressStore> {
    pub quiz: Quiz<S>,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub restart_requested: bool,
    pub should_quit: bool,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub theme: ThemeColors,
}

impl<S: ProgressStore> App<S> {
    /// A finished quiz opens on its result
    pub fn new(quiz: Quiz<S>, theme: ThemeColors) -> Self {
        let screen = if quiz.session().is_completed() {
            Screen::Result
        } else {
            Screen::Question
        };

        Self {
            quiz,
            screen,
            input_mode: InputMode::Normal,
            flash_message: None,
            restart_requested: false,
            should_quit: false,
            is_loading: false,
            spinner_frame: 0,
            theme,
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    fn report_save_error(&mut self, result: anyhow::Result<bool>) -> bool {
        match result {
            Ok(changed) => changed,
            Err(e) => {
                self.show_flash(format!("진행 상황 저장 실패: {}", e));
                false
            }
        }
    }

    /// Answer the current question by option label. Answering the last open
    /// question moves to the result screen.
    pub fn select_option(&mut self, label: &str) {
        let result = self.quiz.select_option(label);
        if self.report_save_error(result) && self.quiz.session().is_completed() {
            self.screen = Screen::Result;
        }
    }

    /// Number keys 1-4 map to the options in display order
    pub fn select_nth_option(&mut self, n: usize) {
        let label = self
            .quiz
            .session()
            .current_question()
            .and_then(|q| q.options.get(n))
            .map(|o| o.label.clone());
        if let Some(label) = label {
            self.select_option(&label);
        }
    }

    /// Past the last question this shows the result when everything is
    /// answered, otherwise jumps back to the first gap.
    pub fn next_question(&mut self) {
        let result = self.quiz.next();
        if self.report_save_error(result) {
            return;
        }
        if self.quiz.session().is_completed() {
            self.screen = Screen::Result;
        } else {
            self.go_to_first_unanswered();
        }
    }

    pub fn previous_question(&mut self) {
        let result = self.quiz.previous();
        self.report_save_error(result);
    }

    fn go_to_first_unanswered(&mut self) {
        let session = self.quiz.session();
        let remaining = session.questions.len().saturating_sub(session.answered_count());
        let result = self.quiz.go_to_first_unanswered();
        self.report_save_error(result);
        self.show_flash(format!("아직 {}개 문항에 답하지 않았습니다", remaining));
    }

    /// Result screen, or the first unanswered question if the quiz isn't done
    pub fn show_result(&mut self) {
        if self.quiz.session().is_completed() {
            self.screen = Screen::Result;
        } else {
            self.go_to_first_unanswered();
        }
    }

    pub fn review_answers(&mut self) {
        self.screen = Screen::Question;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn request_restart(&mut self) {
        self.input_mode = InputMode::ConfirmRestart;
    }

    pub fn confirm_restart(&mut self) {
        self.input_mode = InputMode::Normal;
        self.restart_requested = true;
    }

    pub fn cancel_restart(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Called by the event loop once a requested restart has run
    pub fn finish_restart(&mut self, result: anyhow::Result<()>) {
        self.restart_requested = false;
        self.is_loading = false;
        match result {
            Ok(()) => {
                self.screen = Screen::Question;
                self.show_flash("새 테스트를 시작합니다".to_string());
            }
            Err(e) => self.show_flash(format!("다시 시작하지 못했습니다: {:#}", e)),
        }
    }

    /// Advance the loading spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
