//! # tarjama-switch
//!
//! Finds the equivalent of a page in the other site language by probing an
//! ordered list of candidate paths against the deployed site.

pub mod candidates;
pub mod prefs;
pub mod probe;
pub mod resolver;

pub use candidates::{
    join_base_url, path_language, split_language_path, strip_base_url, CandidateList,
};
pub use prefs::{PreferenceStore, PrefsError};
pub use probe::{HttpProbe, Probe, ProbeError};
pub use resolver::{current_language, LanguageResolver, Resolution, SwitchError};
