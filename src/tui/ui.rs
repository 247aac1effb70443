use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

use crate::output::display_width;
use crate::quiz::ProgressStore;
use crate::scoring::TestResult;
use crate::tui::app::{App, InputMode, Screen};
use crate::tui::theme::ThemeColors;

const TITLE: &str = "정치성향 테스트";

pub fn draw<S: ProgressStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("터미널 창이 너무 작습니다").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Progress gauge
        Constraint::Fill(1),   // Question or result
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_progress(frame, chunks[1], app);
    match app.screen {
        Screen::Question => render_question(frame, chunks[2], app),
        Screen::Result => render_result(frame, chunks[2], &app.quiz.session().result(), &app.theme),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ConfirmRestart => render_confirm_popup(frame, &app.theme),
        InputMode::Normal => {}
    }

    if app.is_loading {
        render_loading_overlay(frame, app);
    }
}

fn render_title<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let session = app.quiz.session();
    let mut spans = vec![Span::styled(TITLE, Style::default().fg(theme.title_color).bold())];

    let answered = format!("{}/{} 답변", session.answered_count(), session.questions.len());
    let padding_len =
        (area.width as usize).saturating_sub(display_width(TITLE) + display_width(&answered));
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(answered, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let percent = app.quiz.session().progress().min(100) as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.gauge).bg(app.theme.bar_empty))
        .percent(percent)
        .label(format!("{}%", percent));
    frame.render_widget(gauge, area);
}

fn render_question<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let session = app.quiz.session();
    let Some(question) = session.current_question() else {
        let empty = Paragraph::new("불러온 문항이 없습니다").alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    };

    let block = Block::bordered()
        .border_style(Style::default().fg(theme.muted))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", question.category.display_name()),
                Style::default().fg(theme.category).bold(),
            ),
            Span::styled(
                format!("{}/{} ", session.current_question_index + 1, session.questions.len()),
                Style::default().fg(theme.muted),
            ),
        ]));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chosen = session.current_answer();
    let mut lines = vec![
        Line::from(Span::styled(question.question_text.clone(), theme.title_style)),
        Line::from(""),
    ];
    for (i, option) in question.options.iter().enumerate() {
        let key = format!(" {} ", i + 1);
        let text = format!(" {}. {} ", option.label, option.text);
        if chosen == Some(option.score) {
            lines.push(Line::from(vec![
                Span::styled(key, Style::default().fg(theme.option_key).bold()),
                Span::styled(text, theme.option_selected),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled(key, Style::default().fg(theme.option_key).bold()),
                Span::raw(text),
            ]));
        }
        lines.push(Line::from(""));
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(body, inner);
}

/// Bar centred on zero, colored by the category's leaning
fn score_bar(score: i32, half_width: usize, filled: Color, empty: Color) -> Vec<Span<'static>> {
    let magnitude = score.unsigned_abs().min(100) as usize;
    let cells = (magnitude * half_width + 50) / 100;
    let (left, right) = if score < 0 { (cells, 0) } else { (0, cells) };

    vec![
        Span::styled("░".repeat(half_width - left), Style::default().fg(empty)),
        Span::styled("█".repeat(left), Style::default().fg(filled)),
        Span::styled("│", Style::default().fg(empty)),
        Span::styled("█".repeat(right), Style::default().fg(filled)),
        Span::styled("░".repeat(half_width - right), Style::default().fg(empty)),
    ]
}

fn render_result(frame: &mut Frame, area: Rect, result: &TestResult, theme: &ThemeColors) {
    let block = Block::bordered()
        .border_style(Style::default().fg(theme.muted))
        .title(Span::styled(" 결과 ", Style::default().fg(theme.title_color).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let overall_color = theme.overall_color(result.total_label);
    let mut lines = vec![
        Line::from(vec![
            Span::raw("종합 성향  "),
            Span::styled(
                format!("{} ({:+})", result.total_label.korean(), result.total_score),
                Style::default().fg(overall_color).bold(),
            ),
        ]),
    ];
    if result.total_label.is_mixed() {
        lines.push(Line::from(Span::styled(
            "분야별 성향이 진보와 보수로 고르게 나뉩니다.",
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::from(""));

    let half_width = ((inner.width as usize).saturating_sub(30) / 2).clamp(5, 20);
    for (category, category_result) in result.category_results.iter() {
        let color = theme.leaning_color(category_result.label);
        let name = category.display_name();
        let pad = 10usize.saturating_sub(display_width(name));

        let mut spans = vec![Span::raw(format!("{}{} ", name, " ".repeat(pad)))];
        spans.extend(score_bar(category_result.score, half_width, color, theme.bar_empty));
        spans.push(Span::styled(
            format!(" {:>4}  ", format!("{:+}", category_result.score)),
            Style::default().fg(color),
        ));
        spans.push(Span::styled(
            category_result.label.korean(),
            Style::default().fg(color).bold(),
        ));
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "왼쪽은 진보, 오른쪽은 보수 성향입니다.",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar<S: ProgressStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let line = if let Some((ref msg, _)) = app.flash_message {
        let color = if msg.contains("실패") || msg.contains("못했습니다") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(color)))
    } else {
        let hints: &[(&str, &str)] = match app.screen {
            Screen::Question => &[
                ("1-4", ":선택 "),
                ("←/→", ":이동 "),
                ("Enter", ":결과 "),
                ("r", ":다시 "),
                ("?", ":도움말 "),
                ("q", ":종료"),
            ],
            Screen::Result => &[
                ("b", ":답변 보기 "),
                ("r", ":다시 "),
                ("?", ":도움말 "),
                ("q", ":종료"),
            ],
        };
        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color).bold()));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(line).style(Style::default().bg(theme.status_bar_bg));
    frame.render_widget(bar, area);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .border_style(Style::default().fg(theme.popup_border))
        .title(Span::styled(" 단축키 ", theme.popup_title));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("1-4 / A-D     ", "답변 선택"),
        ("→ / l / n     ", "다음 문항"),
        ("← / h / p     ", "이전 문항"),
        ("Enter         ", "결과 보기"),
        ("b             ", "결과에서 답변으로 돌아가기"),
        ("r             ", "처음부터 다시 하기"),
        ("?             ", "도움말 열기/닫기"),
        ("q / Ctrl-c    ", "종료 (진행 상황은 저장됨)"),
    ];
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, text)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*text)]))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "아무 키나 누르면 닫힙니다",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(44, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .border_style(Style::default().fg(theme.popup_border))
        .title(Span::styled(" 다시 시작 ", theme.popup_title));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from("모든 답변을 지우고 처음부터 시작할까요?"),
        Line::from(""),
        Line::from(Span::styled("y: 확인 | 그 외: 취소", Style::default().fg(theme.muted))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_loading_overlay<S: ProgressStore>(frame: &mut Frame, app: &App<S>) {
    let popup_area = centered_rect_fixed(30, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered();
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Braille spinner animation
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % 10];

    let loading_text = Paragraph::new(format!("{} 문항을 불러오는 중...", spinner))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.title_color));
    frame.render_widget(loading_text, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bar_fills_toward_sign() {
        let spans = score_bar(-60, 5, Color::Blue, Color::Gray);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "░░███│░░░░░");

        let spans = score_bar(100, 5, Color::Red, Color::Gray);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "░░░░░│█████");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect_fixed(30, 3, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 3));
    }
}
