use clap::{Parser, Subcommand};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use minsim::api::{ApiError, BackendClient, CacheConfig};
use minsim::board::{
    validate_authorization, validate_comment_edit, validate_comment_form, validate_post_edit,
    validate_post_form, Authorization, CommentForm, FieldError, PostForm,
};
use minsim::config::Config;
use minsim::credentials::{self, confirm, prompt_line, prompt_line_with_default, prompt_secret, prompt_text};
use minsim::output;
use minsim::quiz::{FileProgressStore, ProgressStore, Question, Quiz};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_REJECTED: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_INVALID_INPUT: i32 = 5;
const EXIT_IO: i32 = 6;

/// Bad user input; reported with EXIT_INVALID_INPUT
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct InvalidInput(String);

impl InvalidInput {
    fn from_fields(errors: &[FieldError]) -> Self {
        InvalidInput(format!("입력값을 확인하세요:\n{}", output::format_field_errors(errors)))
    }
}

#[derive(Subcommand, Debug)]
enum QuizAction {
    /// Show the result of the finished quiz
    Result {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Discard saved answers
    Reset,
}

#[derive(Subcommand, Debug)]
enum BoardAction {
    /// List posts, newest first
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Posts per page (defaults to page_size from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show a post with its comments
    Show { id: String },
    /// Write a new post
    Write,
    /// Edit a post (author password, or admin password with --admin)
    Edit {
        id: String,
        #[arg(long)]
        admin: bool,
    },
    /// Delete a post
    Delete {
        id: String,
        #[arg(long)]
        admin: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Comment on a post
    Comment { post_id: String },
    /// Edit a comment
    EditComment {
        id: String,
        #[arg(long)]
        admin: bool,
    },
    /// Delete a comment
    DeleteComment {
        id: String,
        #[arg(long)]
        admin: bool,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Remove cached roster and pledge responses
    Clear,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the political orientation quiz (default if no subcommand)
    Quiz {
        /// Line-by-line prompts instead of the full-screen interface
        #[arg(long)]
        plain: bool,
        #[command(subcommand)]
        action: Option<QuizAction>,
    },
    /// List the 17 regions and their English keys
    Regions,
    /// Legislators and local government heads for a region (nationwide if omitted)
    Roster { region: Option<String> },
    /// Bills proposed by a National Assembly member
    Member { name: String },
    /// Election pledges of a governor, as shown in the roster
    Pledges { name: String },
    /// Community board
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Create a config file interactively
    Init,
    /// Manage the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Parser, Debug)]
#[command(name = "minsim")]
#[command(about = "Korean political data in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/minsim/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Bypass the response cache for this run
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else if verbose {
        builder.filter_module("minsim", log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    let _ = builder.try_init();
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<InvalidInput>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Network(_)) => EXIT_NETWORK,
        Some(ApiError::InvalidUrl(_)) => EXIT_CONFIG,
        Some(_) => EXIT_REJECTED,
        None if error.chain().any(|cause| cause.is::<std::io::Error>()) => EXIT_IO,
        None => EXIT_FAILURE,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        log::debug!("rustls crypto provider was already installed");
    }

    let command = cli.command.unwrap_or(Commands::Quiz {
        plain: false,
        action: None,
    });
    let config_path = cli.config.map(PathBuf::from);

    // Commands that need neither config nor network
    match &command {
        Commands::Init => {
            if let Err(e) = minsim::config::init::run_init_wizard(config_path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Cache {
            action: CacheAction::Clear,
        } => {
            if let Err(e) = minsim::api::clear_cache() {
                eprintln!("Failed to clear cache: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Cache cleared");
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Regions => {
            println!("{}", output::format_regions());
            std::process::exit(EXIT_SUCCESS);
        }
        _ => {}
    }

    let config = match minsim::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = minsim::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let cache_config = if cli.no_cache || !config.cache.enabled {
        CacheConfig::disabled()
    } else {
        CacheConfig {
            enabled: true,
            ttl: config.cache.ttl(),
        }
    };

    let client = match BackendClient::new(&config, &cache_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create backend client: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    log::debug!("Backend: {} (cache {})", client.base_url(), if cache_config.enabled { "on" } else { "off" });

    let start_time = Instant::now();
    let code = match run(command, &client, &config).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };
    log::debug!("Finished in {:?}", start_time.elapsed());

    std::process::exit(code);
}

async fn run(command: Commands, client: &BackendClient, config: &Config) -> anyhow::Result<()> {
    let use_colors = output::should_use_colors();

    match command {
        Commands::Quiz { plain, action } => run_quiz(plain, action, client, config).await,
        Commands::Roster { region } => {
            let region = match region.as_deref() {
                Some(input) => Some(minsim::roster::normalize_region(input).ok_or_else(|| {
                    InvalidInput(format!(
                        "알 수 없는 지역입니다: '{}' (`minsim regions`로 목록을 확인하세요)",
                        input
                    ))
                })?),
                None => None,
            };
            let roster = minsim::fetch::fetch_region_roster(client, region.map(|r| r.name)).await?;
            println!("{}", output::format_roster(&roster, use_colors));
            Ok(())
        }
        Commands::Member { name } => {
            let detail = client.fetch_member_detail(name.trim()).await?;
            println!("{}", output::format_member_detail(&detail, use_colors));
            Ok(())
        }
        Commands::Pledges { name } => {
            let pledges = minsim::fetch::fetch_governor_pledges(client, name.trim()).await?;
            println!("{}", output::format_pledges(&pledges, use_colors));
            Ok(())
        }
        Commands::Board { action } => run_board(action, client, config, use_colors).await,
        // Handled before config is loaded
        Commands::Regions | Commands::Init | Commands::Cache { .. } => Ok(()),
    }
}

async fn fetch_questions(client: &BackendClient) -> anyhow::Result<Vec<Question>> {
    Ok(client.fetch_questions().await?)
}

async fn run_quiz(
    plain: bool,
    action: Option<QuizAction>,
    client: &BackendClient,
    config: &Config,
) -> anyhow::Result<()> {
    let store = FileProgressStore::default();

    match action {
        Some(QuizAction::Reset) => {
            store.clear()?;
            println!("저장된 답변을 삭제했습니다.");
            Ok(())
        }
        Some(QuizAction::Result { json }) => {
            let session = store
                .load()?
                .filter(|s| s.is_completed())
                .ok_or_else(|| InvalidInput("완료된 테스트가 없습니다. `minsim quiz`로 먼저 테스트를 진행하세요.".to_string()))?;
            let result = session.result();
            if json {
                println!("{}", output::format_result_json(&result)?);
            } else {
                println!("{}", output::format_result(&result, output::should_use_colors()));
            }
            Ok(())
        }
        None => {
            let mut quiz = Quiz::resume_or_start(store, || fetch_questions(client)).await?;
            if plain || !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
                run_plain_quiz(&mut quiz, std::io::stdin().lock())
            } else {
                let theme = minsim::tui::resolve_theme(config.theme);
                minsim::tui::run_tui(minsim::tui::App::new(quiz, theme), client).await
            }
        }
    }
}

/// Prompt-per-question quiz for pipes and dumb terminals. Empty input, `q`
/// or end of input saves and stops.
fn run_plain_quiz<S: ProgressStore>(quiz: &mut Quiz<S>, mut input: impl BufRead) -> anyhow::Result<()> {
    let use_colors = output::should_use_colors();

    loop {
        if quiz.session().is_completed() {
            println!();
            println!("{}", output::format_result(&quiz.session().result(), use_colors));
            return Ok(());
        }

        println!();
        println!("{}", output::format_question(quiz.session()));
        print!("답 (A-D, n: 다음, p: 이전, q: 저장 후 종료): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let line = line.trim();

        match line.to_lowercase().as_str() {
            "" | "q" => {
                println!();
                println!("진행 상황을 저장했습니다. `minsim quiz`로 이어서 할 수 있습니다.");
                return Ok(());
            }
            "n" => {
                if !quiz.next()? {
                    quiz.go_to_first_unanswered()?;
                }
            }
            "p" => {
                quiz.previous()?;
            }
            label => {
                if !quiz.select_option(label)? {
                    eprintln!("'{}'은(는) 선택지에 없습니다.", line);
                    continue;
                }
                if !quiz.next()? {
                    quiz.go_to_first_unanswered()?;
                }
            }
        }
    }
}

fn check_fields(result: Result<(), Vec<FieldError>>) -> anyhow::Result<()> {
    result.map_err(|errors| InvalidInput::from_fields(&errors).into())
}

/// Prompt for the password, check it locally, then against the post
async fn authorize_post(client: &BackendClient, id: &str, admin: bool) -> anyhow::Result<Authorization> {
    let auth = credentials::resolve_authorization(admin)?;
    check_fields(validate_authorization(&auth))?;
    client.verify_post_password(id, &auth).await?;
    Ok(auth)
}

async fn run_board(
    action: BoardAction,
    client: &BackendClient,
    config: &Config,
    use_colors: bool,
) -> anyhow::Result<()> {
    match action {
        BoardAction::List { page, limit } => {
            if page == 0 {
                return Err(InvalidInput("페이지 번호는 1 이상이어야 합니다.".to_string()).into());
            }
            let response = client.list_posts(page, limit.unwrap_or(config.page_size())).await?;
            println!("{}", output::format_post_list(&response, chrono::Utc::now(), use_colors));
        }
        BoardAction::Show { id } => {
            let (post, comments) = tokio::try_join!(client.get_post(&id), client.list_comments(&id))?;
            println!("{}", output::format_post_detail(&post, &comments.comments, use_colors));
        }
        BoardAction::Write => {
            let form = PostForm {
                title: prompt_line("제목")?,
                nickname: prompt_line("닉네임")?,
                password: prompt_secret("비밀번호 (4-20자)")?,
                content: prompt_text("내용")?,
            };
            check_fields(validate_post_form(&form))?;
            let id = client.create_post(&form).await?;
            println!("게시글이 등록되었습니다. (id: {})", id);
        }
        BoardAction::Edit { id, admin } => {
            let post = client.get_post(&id).await?;
            let auth = authorize_post(client, &id, admin).await?;

            let title = prompt_line_with_default("제목", &post.title)?;
            let content = prompt_text("새 내용 (비워 두면 기존 내용 유지)")?;
            let content = if content.is_empty() { post.content } else { content };

            check_fields(validate_post_edit(&title, &content, &auth))?;
            client.update_post(&id, &title, &content, &auth).await?;
            println!("게시글이 수정되었습니다.");
        }
        BoardAction::Delete { id, admin, yes } => {
            let auth = authorize_post(client, &id, admin).await?;
            if !yes && !confirm("게시글과 모든 댓글을 삭제할까요?")? {
                println!("취소했습니다.");
                return Ok(());
            }
            client.delete_post(&id, &auth).await?;
            println!("게시글이 삭제되었습니다.");
        }
        BoardAction::Comment { post_id } => {
            let form = CommentForm {
                nickname: prompt_line("닉네임")?,
                password: prompt_secret("비밀번호 (4-20자)")?,
                content: prompt_text("댓글")?,
            };
            check_fields(validate_comment_form(&form))?;
            client.create_comment(&post_id, &form).await?;
            println!("댓글이 등록되었습니다.");
        }
        BoardAction::EditComment { id, admin } => {
            let auth = credentials::resolve_authorization(admin)?;
            let content = prompt_text("새 댓글")?;
            check_fields(validate_comment_edit(&content, &auth))?;
            client.update_comment(&id, &content, &auth).await?;
            println!("댓글이 수정되었습니다.");
        }
        BoardAction::DeleteComment { id, admin, yes } => {
            let auth = credentials::resolve_authorization(admin)?;
            check_fields(validate_authorization(&auth))?;
            if !yes && !confirm("댓글을 삭제할까요?")? {
                println!("취소했습니다.");
                return Ok(());
            }
            client.delete_comment(&id, &auth).await?;
            println!("댓글이 삭제되었습니다.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use minsim::quiz::{Category, MemoryProgressStore, QuestionOption};
    use std::io::Cursor;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_quiz() {
        let cli = Cli::parse_from(["minsim"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_board_flags() {
        let cli = Cli::parse_from(["minsim", "board", "delete", "abc", "--admin", "-y"]);
        match cli.command {
            Some(Commands::Board {
                action: BoardAction::Delete { id, admin, yes },
            }) => {
                assert_eq!(id, "abc");
                assert!(admin && yes);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_exit_codes() {
        let invalid: anyhow::Error = InvalidInput("x".to_string()).into();
        assert_eq!(exit_code_for(&invalid), EXIT_INVALID_INPUT);

        let rejected: anyhow::Error = ApiError::NoData("none".to_string()).into();
        assert_eq!(exit_code_for(&rejected), EXIT_REJECTED);

        let bad_url: anyhow::Error = ApiError::InvalidUrl("ftp://x".to_string()).into();
        assert_eq!(exit_code_for(&bad_url), EXIT_CONFIG);

        let io = anyhow::Error::from(std::io::Error::other("disk full")).context("Failed to save progress");
        assert_eq!(exit_code_for(&io), EXIT_IO);

        let other = anyhow::anyhow!("unexpected");
        assert_eq!(exit_code_for(&other), EXIT_FAILURE);
    }

    fn plain_questions() -> Vec<Question> {
        (1..=2)
            .map(|i| Question {
                question_id: format!("Q{}", i),
                order: i,
                category: Category::Economy,
                question_text: format!("질문 {}", i),
                options: [("A", -2), ("B", 2)]
                    .iter()
                    .map(|(label, score)| QuestionOption {
                        label: label.to_string(),
                        text: format!("선택 {}", label),
                        score: *score,
                    })
                    .collect(),
            })
            .collect()
    }

    async fn plain_quiz() -> Quiz<MemoryProgressStore> {
        Quiz::resume_or_start(MemoryProgressStore::new(), || async { Ok(plain_questions()) })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_plain_quiz_answers_until_complete() {
        let mut quiz = plain_quiz().await;
        run_plain_quiz(&mut quiz, Cursor::new("a\nB\n")).unwrap();

        let session = quiz.session();
        assert!(session.is_completed());
        assert_eq!(session.answers.get("Q1"), Some(-2));
        assert_eq!(session.answers.get("Q2"), Some(2));
        assert_eq!(quiz.store().load().unwrap().unwrap().answered_count(), 2);
    }

    #[tokio::test]
    async fn test_plain_quiz_skips_unknown_label_and_navigates() {
        let mut quiz = plain_quiz().await;
        run_plain_quiz(&mut quiz, Cursor::new("x\nn\np\nb\nq\n")).unwrap();

        let session = quiz.session();
        assert_eq!(session.answers.get("Q1"), Some(2));
        assert_eq!(session.answers.get("Q2"), None);
        assert_eq!(session.current_question_index, 1);
    }

    #[tokio::test]
    async fn test_plain_quiz_stops_at_end_of_input() {
        let mut quiz = plain_quiz().await;
        run_plain_quiz(&mut quiz, Cursor::new("a\n")).unwrap();

        assert!(!quiz.session().is_completed());
        assert_eq!(quiz.session().answered_count(), 1);
    }
}
