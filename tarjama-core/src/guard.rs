//! Build-run state: the duplicate output path guard.

use parking_lot::Mutex;
use std::collections::HashSet;
use thiserror::Error;

/// Two pages of one build would be written to the same path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Duplicate output path detected: {0}. Resolve by adjusting permalinks or filenames.")]
pub struct DuplicatePath(pub String);

/// Set of output paths already claimed during the current build run.
#[derive(Debug, Default)]
pub struct OutputPathGuard {
    seen: Mutex<HashSet<String>>,
}

impl OutputPathGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `path` for this build, failing if another page already did.
    pub fn register(&self, path: &str) -> Result<(), DuplicatePath> {
        let mut seen = self.seen.lock();
        if seen.contains(path) {
            return Err(DuplicatePath(path.to_string()));
        }
        seen.insert(path.to_string());
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    /// Forget every claimed path.
    pub fn reset(&self) {
        self.seen.lock().clear();
    }
}

/// State owned by one build run.
///
/// Create one with [`BuildContext::new`] when a build starts and drop it when
/// the build ends. Shared by reference between document workers.
#[derive(Debug, Default)]
pub struct BuildContext {
    outputs: OutputPathGuard,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an output path; must happen before the page is written.
    pub fn register_output(&self, path: &str) -> Result<(), DuplicatePath> {
        self.outputs.register(path)?;
        tracing::debug!("Registered output {}", path);
        Ok(())
    }

    pub fn outputs(&self) -> &OutputPathGuard {
        &self.outputs
    }

    /// Start a new build run with the same context.
    pub fn reset(&self) {
        self.outputs.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_once() {
        let guard = OutputPathGuard::new();
        assert!(guard.register("/en/post/").is_ok());
        assert!(guard.contains("/en/post/"));
    }

    #[test]
    fn test_register_twice_fails() {
        let guard = OutputPathGuard::new();
        guard.register("/en/post/").unwrap();
        let err = guard.register("/en/post/").unwrap_err();
        assert_eq!(err, DuplicatePath("/en/post/".to_string()));
        assert!(err.to_string().contains("/en/post/"));
    }

    #[test]
    fn test_distinct_paths() {
        let guard = OutputPathGuard::new();
        guard.register("/en/post/").unwrap();
        guard.register("/ar/post/").unwrap();
        assert_eq!(guard.len(), 2);
    }

    #[test]
    fn test_reset_starts_new_run() {
        let ctx = BuildContext::new();
        ctx.register_output("en/index.html").unwrap();
        ctx.reset();
        assert!(ctx.outputs().is_empty());
        assert!(ctx.register_output("en/index.html").is_ok());
    }

    #[test]
    fn test_fresh_context_per_build() {
        let first = BuildContext::new();
        first.register_output("404.html").unwrap();
        let second = BuildContext::new();
        assert!(second.register_output("404.html").is_ok());
    }

    #[test]
    fn test_concurrent_workers_see_one_winner() {
        let ctx = Arc::new(BuildContext::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                thread::spawn(move || ctx.register_output("en/same/index.html").is_ok())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
    }
}
