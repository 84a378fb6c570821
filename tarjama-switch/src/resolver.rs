//! Resolution of a page's equivalent in the other language.

use crate::candidates::{join_base_url, path_language, strip_base_url, CandidateList};
use crate::prefs::{PreferenceStore, PrefsError};
use crate::probe::Probe;
use std::sync::atomic::{AtomicBool, Ordering};
use tarjama_core::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("A language switch is already in progress")]
    InProgress,

    #[error(transparent)]
    Prefs(#[from] PrefsError),
}

/// Where a switch lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub language: Language,
    /// Site-relative path to navigate to
    pub path: String,
    /// `false` when no candidate existed and the language root was used
    pub matched: bool,
}

/// Finds the translated equivalent of a page by probing candidates in order.
///
/// Probes run strictly one after another and the first existing candidate
/// wins. A resolver handles one switch at a time; a second call while one
/// is running fails with [`SwitchError::InProgress`].
pub struct LanguageResolver<P> {
    probe: P,
    base_url: String,
    in_flight: AtomicBool,
}

impl<P: Probe> LanguageResolver<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            base_url: "/".to_string(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Site deployed under a path prefix such as `/blog/`.
    ///
    /// Incoming paths carry the prefix; it is removed before matching
    /// language segments and restored on every probed and returned path.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Whether a resolution is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Resolve `current_path` to its equivalent in `target`.
    ///
    /// Never fails for lack of a match: the language root is returned when
    /// no candidate exists.
    pub async fn resolve(
        &self,
        current_path: &str,
        target: Language,
    ) -> Result<Resolution, SwitchError> {
        let _flight = InFlight::acquire(&self.in_flight)?;
        let site_path = strip_base_url(current_path, &self.base_url);
        let candidates = CandidateList::build(&site_path, target);

        for candidate in candidates.probes() {
            let candidate = join_base_url(candidate, &self.base_url);
            match self.probe.exists(&candidate).await {
                Ok(true) => {
                    tracing::info!("Resolved {} to {}", current_path, candidate);
                    return Ok(Resolution {
                        language: target,
                        path: candidate,
                        matched: true,
                    });
                }
                Ok(false) => tracing::debug!("Candidate {} does not exist", candidate),
                Err(e) => tracing::debug!("Probe for {} failed: {}", candidate, e),
            }
        }

        let fallback = join_base_url(candidates.fallback(), &self.base_url);
        tracing::info!("No translation found for {}; using {}", current_path, fallback);
        Ok(Resolution {
            language: target,
            path: fallback,
            matched: false,
        })
    }

    /// Switch from the language of `current_path` to the other one.
    ///
    /// The current language is taken from the path, then from the stored
    /// preference, then defaults to English. The target language is saved
    /// once resolution finishes.
    pub async fn switch(
        &self,
        current_path: &str,
        store: &PreferenceStore,
    ) -> Result<Resolution, SwitchError> {
        let site_path = strip_base_url(current_path, &self.base_url);
        let current = current_language(&site_path, store.load()?);
        let resolution = self.resolve(current_path, current.other()).await?;
        store.save(resolution.language)?;
        Ok(resolution)
    }
}

/// Language a visitor is currently reading
pub fn current_language(path: &str, stored: Option<Language>) -> Language {
    path_language(path).or(stored).unwrap_or_default()
}

/// Holds the resolver's busy flag for the duration of one resolution
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SwitchError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SwitchError::InProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
