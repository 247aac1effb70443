use std::io::IsTerminal;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use owo_colors::OwoColorize;
use ratatui::text::Span;
use terminal_size::{terminal_size, Width};

use crate::board::{page_numbers, Comment, FieldError, PageItem, Post, PostsResponse, MAX_VISIBLE_PAGES};
use crate::fetch::GovernorPledges;
use crate::quiz::QuizSession;
use crate::roster::{Bill, MemberDetail, RegionRoster, REGIONS};
use crate::scoring::{Leaning, OverallLabel, TestResult};

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Columns the string occupies on screen (Hangul counts as two)
pub fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

fn pad_to(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Truncate to fit `max_width` display columns, marking the cut with "..."
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = display_width(c.encode_utf8(&mut [0u8; 4]));
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}

/// Render a timestamp in Korean local time
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    match FixedOffset::east_opt(KST_OFFSET_SECS) {
        Some(kst) => at.with_timezone(&kst).format("%Y-%m-%d %H:%M").to_string(),
        None => at.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Format a duration into a human-readable age string
/// "3시간 전" for hours, "2일 전" for days, "1주 전" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}주 전", weeks)
    } else if days >= 1 {
        format!("{}일 전", days)
    } else if hours >= 1 {
        format!("{}시간 전", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}분 전", minutes)
        } else {
            "방금 전".to_string()
        }
    }
}

fn paint_leaning(text: &str, leaning: Leaning) -> String {
    match leaning {
        Leaning::VeryProgressive | Leaning::Progressive => text.blue().to_string(),
        Leaning::Moderate => text.green().to_string(),
        Leaning::Conservative | Leaning::VeryConservative => text.red().to_string(),
    }
}

fn paint_overall(text: &str, label: OverallLabel) -> String {
    match label {
        OverallLabel::Leaning(leaning) => paint_leaning(text, leaning),
        OverallLabel::Mixed => text.yellow().to_string(),
    }
}

/// Bar centred on zero: negative scores fill leftwards, positive rightwards.
/// `half_width` cells per side.
pub fn format_score_bar(score: i32, half_width: usize) -> String {
    let magnitude = score.unsigned_abs().min(100) as usize;
    let filled = (magnitude * half_width + 50) / 100;
    let (left, right) = if score < 0 { (filled, 0) } else { (0, filled) };

    format!(
        "{}{}│{}{}",
        "░".repeat(half_width - left),
        "█".repeat(left),
        "█".repeat(right),
        "░".repeat(half_width - right)
    )
}

/// Quiz result: overall line, then one bar per category
pub fn format_result(result: &TestResult, use_colors: bool) -> String {
    let overall = format!(
        "{} ({:+})",
        result.total_label.korean(),
        result.total_score
    );
    let mut lines = vec![if use_colors {
        format!("종합 성향: {}", paint_overall(&overall, result.total_label).bold())
    } else {
        format!("종합 성향: {}", overall)
    }];
    if result.total_label.is_mixed() {
        lines.push("  분야별 성향이 진보와 보수로 고르게 나뉩니다.".to_string());
    }
    lines.push(String::new());

    for (category, category_result) in result.category_results.iter() {
        let bar = format_score_bar(category_result.score, 10);
        let label = category_result.label.korean();
        let (bar, label) = if use_colors {
            (
                paint_leaning(&bar, category_result.label),
                paint_leaning(label, category_result.label),
            )
        } else {
            (bar, label.to_string())
        };
        lines.push(format!(
            "  {} {} {:>4}  {}",
            pad_to(category.display_name(), 10),
            bar,
            format!("{:+}", category_result.score),
            label
        ));
    }

    lines.join("\n")
}

/// Quiz result as pretty JSON (category keys, Korean labels)
pub fn format_result_json(result: &TestResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// One question for line-by-line (non-TTY) quiz mode
pub fn format_question(session: &QuizSession) -> String {
    let Some(question) = session.current_question() else {
        return "질문이 없습니다.".to_string();
    };
    let chosen = session.current_answer();

    let mut lines = vec![
        format!(
            "[{}/{}] {} · 진행률 {}%",
            session.current_question_index + 1,
            session.questions.len(),
            question.category.display_name(),
            session.progress()
        ),
        question.question_text.clone(),
    ];
    for option in &question.options {
        let marker = if chosen == Some(option.score) { "*" } else { " " };
        lines.push(format!(" {} {}. {}", marker, option.label, option.text));
    }
    lines.join("\n")
}

/// Plain-text table with a leading "#" column; columns padded by display width
pub fn format_table(columns: &[&str], rows: &[Vec<String>], use_colors: bool) -> String {
    let mut widths: Vec<usize> = std::iter::once("#")
        .chain(columns.iter().copied())
        .map(display_width)
        .collect();
    for (i, row) in rows.iter().enumerate() {
        widths[0] = widths[0].max(display_width(&(i + 1).to_string()));
        for (j, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(j + 1) {
                *w = (*w).max(display_width(cell));
            }
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad_to(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header = render(
        std::iter::once("#")
            .chain(columns.iter().copied())
            .map(str::to_string)
            .collect(),
    );
    let mut lines = vec![if use_colors { header.bold().to_string() } else { header }];
    for (i, row) in rows.iter().enumerate() {
        let mut cells = vec![(i + 1).to_string()];
        cells.extend(row.iter().cloned());
        lines.push(render(cells));
    }
    lines.join("\n")
}

/// Region roster: a heading, then one table per section
pub fn format_roster(roster: &RegionRoster, use_colors: bool) -> String {
    let mut out = vec![if use_colors {
        roster.title().bold().to_string()
    } else {
        roster.title().to_string()
    }];

    for section in roster.sections() {
        out.push(String::new());
        let heading = format!("{} ({}명)", section.title(), section.rows.len());
        out.push(if use_colors { heading.cyan().to_string() } else { heading });
        if section.rows.is_empty() {
            out.push("데이터 없음".to_string());
            continue;
        }
        let rows: Vec<Vec<String>> = section.rows.iter().map(|r| r.cells()).collect();
        out.push(format_table(section.kind.columns(), &rows, use_colors));
    }

    out.join("\n")
}

/// The 17 regions with their English keys
pub fn format_regions() -> String {
    REGIONS
        .iter()
        .map(|r| format!("{}  {}", pad_to(r.name, 8), r.key))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bill_rows(bills: &[Bill]) -> Vec<Vec<String>> {
    let dash = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string());
    bills
        .iter()
        .map(|b| {
            vec![
                b.display_date(),
                dash(&b.bill_name),
                dash(&b.committee),
                dash(&b.process_result),
            ]
        })
        .collect()
}

const BILL_COLUMNS: [&str; 4] = ["발의일", "의안명", "소관위원회", "처리결과"];

/// Legislator page: summary, counts, and both bill tables
pub fn format_member_detail(detail: &MemberDetail, use_colors: bool) -> String {
    let member = &detail.member;
    let stats = &detail.statistics;
    let title = format!("{} ({})", member.name, member.party);

    let mut out = vec![
        if use_colors { title.bold().to_string() } else { title },
        format!("지역구: {}", member.region),
        String::new(),
        detail.summary(),
        String::new(),
        format!(
            "총 발의 {}건 · 대표발의 {}건 · 공동발의 {}건",
            stats.total_count, stats.representative_count, stats.joint_count
        ),
    ];

    for (heading, bills, count) in [
        ("대표발의안", &detail.representative_bills, stats.representative_count),
        ("공동발의안", &detail.joint_bills, stats.joint_count),
    ] {
        out.push(String::new());
        out.push(format!("{} ({}건)", heading, count));
        if bills.is_empty() {
            out.push("발의한 법안이 없습니다.".to_string());
        } else {
            out.push(format_table(&BILL_COLUMNS, &bill_rows(bills), use_colors));
        }
    }

    if let Some(updated) = &detail.last_updated {
        out.push(String::new());
        out.push(format!("최종 업데이트: {}", updated));
    }

    out.join("\n")
}

/// Governor pledges, with a notice when an acting head holds the office
pub fn format_pledges(result: &GovernorPledges, use_colors: bool) -> String {
    let p = &result.pledges;
    let title = format!("{}의 공약", p.kr_name);
    let region = match &p.sgg_name {
        Some(sgg) if !sgg.is_empty() => format!("{} {}", p.sido_name, sgg),
        _ => p.sido_name.clone(),
    };

    let mut out = vec![
        if use_colors { title.bold().to_string() } else { title },
        format!("정당: {}  지역: {}  총 공약 수: {}개", p.party_name, region, p.prms_cnt),
    ];

    if let Some(previous) = &result.previous {
        let notice = format!(
            "안내: 현재 권한대행 중입니다. 원래 단체장은 {}({})입니다.",
            previous.name, previous.jd_name
        );
        out.push(if use_colors { notice.yellow().to_string() } else { notice });
    }

    if p.pledges.is_empty() {
        out.push(String::new());
        out.push("등록된 공약이 없습니다.".to_string());
    }

    for pledge in &p.pledges {
        out.push(String::new());
        let heading = if pledge.prms_realm_name.is_empty() {
            format!("{}. {}", pledge.prms_ord, pledge.prms_title)
        } else {
            format!("{}. [{}] {}", pledge.prms_ord, pledge.prms_realm_name, pledge.prms_title)
        };
        out.push(if use_colors { heading.bold().to_string() } else { heading });
        for line in pledge.prms_cont.lines().filter(|l| !l.trim().is_empty()) {
            out.push(format!("    {}", line.trim()));
        }
    }

    out.join("\n")
}

/// Pager line, e.g. "‹ 이전  1 ... 3 [4] 5 ... 10  다음 ›"
pub fn format_pager(current: u32, total: u32) -> String {
    if total <= 1 {
        return String::new();
    }
    let pages = page_numbers(current, total, MAX_VISIBLE_PAGES)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == current => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut parts = Vec::new();
    if current > 1 {
        parts.push("‹ 이전".to_string());
    }
    parts.push(pages);
    if current < total {
        parts.push("다음 ›".to_string());
    }
    parts.join("  ")
}

/// Board page: one line per post, then the pager
pub fn format_post_list(response: &PostsResponse, now: DateTime<Utc>, use_colors: bool) -> String {
    if response.posts.is_empty() {
        return "게시글이 없습니다.".to_string();
    }

    let term_width = get_terminal_width();
    let pagination = &response.pagination;
    let first_index = (pagination.current_page.max(1) - 1) as u64 * pagination.limit as u64;

    let mut lines: Vec<String> = response
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let index = format!("{:>3}.", first_index + i as u64 + 1);
            let comments = match post.comment_count {
                Some(n) if n > 0 => format!(" [{}]", n),
                _ => String::new(),
            };
            let meta = format!(
                "{} · {} · 조회 {}",
                post.nickname,
                format_age(now - post.created_at),
                post.view_count
            );

            let fixed = display_width(&index) + display_width(&comments) + display_width(&meta) + 6;
            let title = match term_width {
                Some(width) if width > fixed + 10 => truncate_to_width(&post.title, width - fixed),
                Some(_) => truncate_to_width(&post.title, 20),
                None => post.title.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}  {}  {}",
                    index.dimmed(),
                    title.bold(),
                    comments.cyan(),
                    meta.dimmed(),
                    post.id.dimmed()
                )
            } else {
                format!("{} {}{}  {}  {}", index, title, comments, meta, post.id)
            }
        })
        .collect();

    let pager = format_pager(pagination.current_page, pagination.total_pages);
    lines.push(String::new());
    lines.push(format!("총 {}개의 게시글", pagination.total_posts));
    if !pager.is_empty() {
        lines.push(pager);
    }
    lines.join("\n")
}

/// A post followed by its comments
pub fn format_post_detail(post: &Post, comments: &[Comment], use_colors: bool) -> String {
    let mut meta = format!(
        "작성자 {} · {} · 조회 {}",
        post.nickname,
        format_timestamp(&post.created_at),
        post.view_count
    );
    if post.is_edited() {
        if let Some(updated) = &post.updated_at {
            meta.push_str(&format!(" · 수정 {}", format_timestamp(updated)));
        }
    }

    let mut out = vec![
        if use_colors { post.title.bold().to_string() } else { post.title.clone() },
        if use_colors { meta.dimmed().to_string() } else { meta },
        String::new(),
        post.content.clone(),
        String::new(),
        format!("댓글 {}개", comments.len()),
    ];

    for comment in comments {
        let header = format!(
            "{} · {}  ({})",
            comment.nickname,
            format_timestamp(&comment.created_at),
            comment.id
        );
        out.push(String::new());
        out.push(if use_colors { header.dimmed().to_string() } else { header });
        for line in comment.content.lines() {
            out.push(format!("  {}", line));
        }
    }

    out.join("\n")
}

/// Client-side validation failures, one per line
pub fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
