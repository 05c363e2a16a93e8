//! Folder-wide inference of the installed game version and mod loader from
//! the individual file name signals.

use mc_mod_updater_rs_utils::types::{GameVersionCatalog, ModLoader};
use thiserror::Error;

use crate::filename::{detect_game_version, detect_loader};

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(
        "None of the {0} mod files mention a known game version, so there is no baseline version \
         to check against"
    )]
    NoVersionDetected(usize),

    #[error(
        "None of the {0} mod files mention a known mod loader, so there is no way to tell which \
         loader this folder targets"
    )]
    NoLoaderDetected(usize),
}

/// The game version this folder is running.
///
/// Each file contributes the most recent catalog version it mentions, and the
/// most recent of those wins. Most-recent-wins beats majority vote here: a
/// folder mid-upgrade usually has a few files already on the new version
/// while the bulk still names the old one.
pub fn infer_game_version<'a, S: AsRef<str>>(
    file_names: &[S],
    catalog: &'a GameVersionCatalog,
) -> InferenceResult<&'a str> {
    let mut best: Option<(usize, &str)> = None;

    for name in file_names {
        if let Some((idx, version)) = detect_game_version(name.as_ref(), catalog) {
            if best.is_none_or(|(best_idx, _)| idx < best_idx) {
                best = Some((idx, version));
            }
        }
    }

    best.map(|(_, version)| version)
        .ok_or(InferenceError::NoVersionDetected(file_names.len()))
}

/// The mod loader this folder targets, by counting loader mentions across all
/// file names. Ties go to the loader enumerated first.
pub fn infer_mod_loader<S: AsRef<str>>(file_names: &[S]) -> InferenceResult<ModLoader> {
    let mut best: Option<(ModLoader, usize)> = None;

    for loader in ModLoader::ALL {
        let count = file_names
            .iter()
            .filter(|name| detect_loader(name.as_ref()) == Some(loader))
            .count();

        if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((loader, count));
        }
    }

    best.map(|(loader, _)| loader)
        .ok_or(InferenceError::NoLoaderDetected(file_names.len()))
}
