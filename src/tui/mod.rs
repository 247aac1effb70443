pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::api::BackendClient;
use crate::quiz::ProgressStore;

/// Give up on a restart fetch after this long
const RESTART_TIMEOUT: Duration = Duration::from_secs(20);

pub async fn run_tui<S: ProgressStore>(mut app: App<S>, client: &BackendClient) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result: anyhow::Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
        }

        if app.restart_requested && !app.is_loading {
            app.is_loading = true;
            if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
                break Err(e.into());
            }

            let restarted = tokio::time::timeout(
                RESTART_TIMEOUT,
                app.quiz
                    .restart(|| async { client.fetch_questions().await.map_err(anyhow::Error::from) }),
            )
            .await
            .unwrap_or_else(|_| Err(anyhow::anyhow!("시간 초과 ({}초)", RESTART_TIMEOUT.as_secs())));
            app.finish_restart(restarted);
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    result
}

fn handle_key_event<S: ProgressStore>(app: &mut App<S>, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match (app.screen, key.code) {
            (_, KeyCode::Char('q')) => app.should_quit = true,
            (_, KeyCode::Char('?')) => app.show_help(),
            (_, KeyCode::Char('r')) => app.request_restart(),

            (app::Screen::Question, KeyCode::Char(c @ '1'..='4')) => {
                app.select_nth_option(c as usize - '1' as usize)
            }
            (app::Screen::Question, KeyCode::Char(c @ ('a'..='d' | 'A'..='D'))) => {
                app.select_option(&c.to_string())
            }
            (app::Screen::Question, KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n')) => {
                app.next_question()
            }
            (app::Screen::Question, KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p')) => {
                app.previous_question()
            }
            (app::Screen::Question, KeyCode::Enter) => app.show_result(),

            (app::Screen::Result, KeyCode::Char('b') | KeyCode::Esc) => app.review_answers(),

            _ => {}
        },
        app::InputMode::ConfirmRestart => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_restart(),
            _ => app.cancel_restart(),
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
