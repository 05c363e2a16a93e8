//! The ordered cascade of search strategies that maps a local file name to a
//! remote catalog record.

use log::{debug, info, warn};
use mc_mod_updater_rs_catalog::{
    CatalogResult,
    curseforge::{CurseForgeLookup, CurseForgeMod},
    modrinth::ModrinthLookup,
};
use mc_mod_updater_rs_utils::{dictionary::WordDict, types::ModLoader};

use crate::{
    filename::{search_phrase_from_file_name, segment_with_dictionary, split_on_case_boundaries},
    record::RemoteModRecord,
};

/// The named strategies, in the order they are tried. The first one to yield
/// a candidate wins and the rest are skipped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchStrategy {
    /// Modrinth free text search with the phrase exactly as derived from the
    /// file name.
    ModrinthQuery,

    /// CurseForge slug lookup with the case-split, hyphenated, lowercased
    /// name.
    CurseForgeSlug,

    /// CurseForge free text search with the case-split name.
    CurseForgeQuery,

    /// CurseForge slug lookup with the dictionary-segmented name.
    CurseForgeSpacedSlug,

    /// CurseForge free text search with the dictionary-segmented name.
    CurseForgeSpacedQuery,
}

impl SearchStrategy {
    pub const CASCADE: [SearchStrategy; 5] = [
        SearchStrategy::ModrinthQuery,
        SearchStrategy::CurseForgeSlug,
        SearchStrategy::CurseForgeQuery,
        SearchStrategy::CurseForgeSpacedSlug,
        SearchStrategy::CurseForgeSpacedQuery,
    ];
}

/// Version and loader parameters shared by every lookup in one run.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext<'a> {
    pub current_version: &'a str,
    pub target_version: &'a str,
    pub loader: ModLoader,
}

/// Resolves one local mod file to a remote catalog record, or `None` when no
/// strategy matched (including unusable file names, which are logged and
/// treated as not found rather than failing the run).
pub async fn resolve_mod<C, M>(
    file_name: &str,
    ctx: &SearchContext<'_>,
    curseforge: &C,
    modrinth: &M,
    dict: &dyn WordDict,
) -> CatalogResult<Option<RemoteModRecord>>
where
    C: CurseForgeLookup,
    M: ModrinthLookup,
{
    let phrase = match search_phrase_from_file_name(file_name) {
        Ok(phrase) => phrase,
        Err(e) => {
            warn!("Skipping the catalog lookup for \"{}\": {}", file_name, e);
            return Ok(None);
        },
    };

    // CurseForge searches filter loosely on the release line, Modrinth gets
    // the exact target version through its facets.
    let cf_version = major_minor(ctx.current_version);

    let humanized = split_on_case_boundaries(&phrase);
    let slug = humanized.replace(' ', "-").to_lowercase();
    let segmented = segment_with_dictionary(&phrase.replace(' ', ""), dict);
    let segmented_slug = segmented.replace(' ', "-");

    for strategy in SearchStrategy::CASCADE {
        debug!("Trying {:?} for \"{}\"...", strategy, file_name);

        let record = match strategy {
            SearchStrategy::ModrinthQuery => {
                match modrinth
                    .search_by_query(ctx.target_version, ctx.loader, &phrase)
                    .await?
                    .into_iter()
                    .next()
                {
                    Some(hit) => {
                        let files = modrinth
                            .files_for_project(&hit.project_id, ctx.target_version, ctx.loader)
                            .await?
                            .into_iter()
                            .flat_map(|group| group.files)
                            .collect();

                        Some(RemoteModRecord::Modrinth { hit, files })
                    },
                    None => None,
                }
            },
            SearchStrategy::CurseForgeSlug => curseforge
                .search_by_slug(&cf_version, ctx.loader, &slug)
                .await?
                .into_iter()
                .next()
                .map(RemoteModRecord::CurseForge),
            SearchStrategy::CurseForgeQuery => {
                let hits = curseforge
                    .search_by_query(&cf_version, ctx.loader, &humanized)
                    .await?;

                pick_query_hit(hits, &phrase).map(RemoteModRecord::CurseForge)
            },
            SearchStrategy::CurseForgeSpacedSlug => curseforge
                .search_by_slug(&cf_version, ctx.loader, &segmented_slug)
                .await?
                .into_iter()
                .next()
                .map(RemoteModRecord::CurseForge),
            SearchStrategy::CurseForgeSpacedQuery => {
                let hits = curseforge
                    .search_by_query(&cf_version, ctx.loader, &segmented)
                    .await?;

                pick_query_hit(hits, &segmented).map(RemoteModRecord::CurseForge)
            },
        };

        if let Some(record) = record {
            info!(
                "Resolved \"{}\" to \"{}\" via {:?}.",
                file_name,
                record.display_name(),
                strategy
            );
            return Ok(Some(record));
        }
    }

    Ok(None)
}

/// Picks the first hit in result order whose leading words equal the
/// reference name, ignoring case.
///
/// A single hit is trusted unconditionally. Multiple hits with no match at
/// all resolve to nothing, since guessing among them would regularly pick a
/// lookalike mod.
fn pick_query_hit(hits: Vec<CurseForgeMod>, reference_name: &str) -> Option<CurseForgeMod> {
    if hits.len() == 1 {
        return hits.into_iter().next();
    }

    let reference_lower = reference_name.to_lowercase();
    let reference_words: Vec<&str> = reference_lower.split_whitespace().collect();

    hits.into_iter().find(|hit| {
        let leading: Vec<String> = hit
            .name
            .split_whitespace()
            .take(reference_words.len())
            .map(|w| w.to_lowercase())
            .collect();

        leading == reference_words
    })
}

// "1.20.1" -> "1.20"
fn major_minor(version: &str) -> String {
    let mut segments = version.split('.');

    match (segments.next(), segments.next()) {
        (Some(major), Some(minor)) => format!("{}.{}", major, minor),
        _ => version.to_string(),
    }
}
