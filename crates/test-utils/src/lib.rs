//! Shared test utilities for boredom-busters crates.
//!
//! This crate provides common fixtures used across the workspace: env-var
//! guards, a temporary data directory, and a scripted text generator that
//! stands in for a real backend.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};

use async_trait::async_trait;
use busters_backend::{BackendError, GenerationRequest, TextGenerator};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = busters_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temporary data directory for store and catalog tests.
///
/// The tempdir is removed when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// `<tmp>/data`, created eagerly.
    pub data_dir: PathBuf,
}

impl TestFixture {
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("data");
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { tempdir, data_dir })
    }

    pub fn home_path(&self) -> &std::path::Path {
        self.tempdir.path()
    }

    /// Point `HOME` at the fixture for the guard's lifetime.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(&self.home_path().to_string_lossy()))
    }

    /// Point `BUSTERS_DATA_DIR` at the fixture's data dir.
    pub fn data_dir_guard(&self) -> EnvVarGuard {
        set_env_var("BUSTERS_DATA_DIR", Some(&self.data_dir.to_string_lossy()))
    }

    /// Write `content` to `<data_dir>/<name>` and return the path.
    pub fn write_data_file(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.data_dir.join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Wrap a payload in a ```json fence the way models are asked to reply.
pub fn fenced(payload: &str) -> String {
    format!("```json\n{payload}\n```")
}

/// A [`TextGenerator`] that replays canned replies in order.
///
/// `Err` entries are returned as backend failures. Once the script runs out,
/// the final entry repeats, so a single failing entry fails every attempt.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, String>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script of successful replies only.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())))
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let reply = match next {
            Some(reply) => {
                *last = Some(reply.clone());
                reply
            }
            None => last.clone().unwrap_or_else(|| Err("script exhausted".into())),
        };
        reply.map_err(|message| BackendError::Status {
            status: 503,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_env_var_sets_and_restores() {
        let _g = env_guard();

        const KEY: &str = "BUSTERS_TEST_UTILS_TEST_VAR";
        std::env::remove_var(KEY);

        {
            let _guard = set_env_var(KEY, Some("test_value"));
            assert_eq!(std::env::var(KEY).ok(), Some("test_value".to_string()));
        }
        assert!(std::env::var(KEY).is_err());
    }

    #[test]
    fn test_set_env_var_restores_previous_value() {
        let _g = env_guard();

        const KEY: &str = "BUSTERS_TEST_RESTORE_VAR";
        std::env::set_var(KEY, "original");

        {
            let _guard = set_env_var(KEY, Some("changed"));
            assert_eq!(std::env::var(KEY).ok(), Some("changed".to_string()));
        }
        assert_eq!(std::env::var(KEY).ok(), Some("original".to_string()));

        std::env::remove_var(KEY);
    }

    #[test]
    fn test_fixture_creates_data_dir() {
        let fixture = TestFixture::new().expect("fixture creation");
        assert!(fixture.data_dir.is_dir());
        let path = fixture
            .write_data_file("activities.json", "{}")
            .expect("write data file");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }

    #[test]
    fn test_fixture_data_dir_guard() {
        let _g = env_guard();
        let fixture = TestFixture::new().expect("fixture creation");
        let original = std::env::var("BUSTERS_DATA_DIR").ok();
        {
            let _data = fixture.data_dir_guard();
            assert_eq!(
                std::env::var("BUSTERS_DATA_DIR").unwrap(),
                fixture.data_dir.to_string_lossy()
            );
        }
        assert_eq!(std::env::var("BUSTERS_DATA_DIR").ok(), original);
    }

    #[test]
    fn test_fenced_wraps_payload() {
        assert_eq!(fenced("{\"mood\": \"happy\"}"), "```json\n{\"mood\": \"happy\"}\n```");
    }

    #[tokio::test]
    async fn test_scripted_generator_repeats_last_reply() {
        let generator = ScriptedGenerator::new([Ok("first".to_string()), Err("down".to_string())]);
        let request = GenerationRequest::default();

        assert_eq!(generator.generate(&request).await.unwrap(), "first");
        assert!(generator.generate(&request).await.is_err());
        assert!(generator.generate(&request).await.is_err());
        assert_eq!(generator.calls(), 3);
        assert_eq!(generator.requests().len(), 3);
    }
}
