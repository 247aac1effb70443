use super::session::QuizSession;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key under which quiz progress is kept
pub const STORAGE_KEY: &str = "political-test-state";

const STATE_VERSION: u32 = 1;

/// Where quiz progress lives between runs. Last write wins.
pub trait ProgressStore {
    /// Saved progress, or None if nothing was saved
    fn load(&self) -> Result<Option<QuizSession>>;
    fn save(&self, session: &QuizSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Get the default progress file path (<cache dir>/minsim/political-test-state.json)
pub fn get_progress_path() -> PathBuf {
    crate::config::get_cache_dir().join(format!("{}.json", STORAGE_KEY))
}

#[derive(Serialize, Deserialize)]
struct SavedProgress {
    version: u32,
    #[serde(flatten)]
    session: QuizSession,
}

/// JSON file store, written atomically
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileProgressStore {
    fn default() -> Self {
        Self::new(get_progress_path())
    }
}

impl ProgressStore for FileProgressStore {
    /// A missing file means no saved progress.
    /// A file with an unsupported version is an error.
    fn load(&self) -> Result<Option<QuizSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open quiz progress at {}", self.path.display()))?;

        let saved: SavedProgress =
            serde_json::from_reader(file).context("Failed to load quiz progress")?;

        if saved.version != STATE_VERSION {
            anyhow::bail!("Unsupported quiz progress version: {}", saved.version);
        }

        Ok(Some(saved.session))
    }

    fn save(&self, session: &QuizSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut file = AtomicWriteFile::open(&self.path)
            .with_context(|| format!("Failed to open atomic write file at {}", self.path.display()))?;

        let saved = SavedProgress {
            version: STATE_VERSION,
            session: session.clone(),
        };
        serde_json::to_writer(&mut file, &saved).context("Failed to serialize quiz progress")?;

        file.commit().context("Failed to save quiz progress")?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove quiz progress"),
        }
    }
}

/// In-process store, for tests and runs that should leave nothing behind
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    inner: Mutex<Option<QuizSession>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<Option<QuizSession>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &QuizSession) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

impl MemoryProgressStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<QuizSession>>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("Quiz progress lock poisoned"))
    }
}
