//! Pure heuristics over mod file names.
//!
//! Nothing in here touches the network or the file system. Everything works
//! off the observation that mod files are almost always named
//! `<name tokens>-<version/build tokens>.jar`, with the name part either
//! already separated (`fake_player`), camel cased (`FakePlayer`), or run
//! together (`fakeplayer`).

use log::debug;
use mc_mod_updater_rs_utils::{
    dictionary::WordDict,
    types::{GameVersionCatalog, ModLoader},
};
use thiserror::Error;

pub type FilenameResult<T> = Result<T, FilenameError>;

#[derive(Debug, Error)]
pub enum FilenameError {
    #[error(
        "\"{0}\" has no version-looking token, so there is no way to tell where the mod name ends"
    )]
    NoVersionToken(String),

    #[error("\"{0}\" starts with its version, leaving nothing to use as a mod name")]
    NoNameTokens(String),
}

/// Derives a human readable search phrase from a mod file name.
///
/// The first token containing a digit and everything after it is treated as
/// version/build metadata and dropped. A trailing loader token right before
/// the cut point is loader noise, not part of the name, and is dropped too.
pub fn search_phrase_from_file_name(file_name: &str) -> FilenameResult<String> {
    let normalized = normalize_separators(strip_archive_suffix(file_name));
    let tokens: Vec<&str> = normalized.split('-').filter(|t| !t.is_empty()).collect();

    let cut = tokens
        .iter()
        .position(|t| t.chars().any(|c| c.is_ascii_digit()))
        .ok_or_else(|| FilenameError::NoVersionToken(file_name.to_string()))?;

    let mut name_tokens = &tokens[..cut];
    if let Some((last, rest)) = name_tokens.split_last() {
        let lowered = last.to_lowercase();
        if lowered == "fabric" || lowered == "forge" {
            name_tokens = rest;
        }
    }

    if name_tokens.is_empty() {
        return Err(FilenameError::NoNameTokens(file_name.to_string()));
    }

    Ok(name_tokens.join(" "))
}

/// Inserts a space before an uppercase letter that starts a new word
/// (`"OptiFine"` becomes `"Opti Fine"`).
///
/// Two guards keep this from mangling names: the previous character must not
/// be uppercase (so `"JEI"` stays intact), and the run of characters since the
/// last input space must not be all lowercase (so `"appleSkin"` style names
/// stay intact).
pub fn split_on_case_boundaries(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut run = String::new();
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c == ' ' {
            run.clear();
        } else {
            if c.is_uppercase()
                && prev.is_some_and(|p| !p.is_uppercase())
                && !run.chars().all(|r| r.is_lowercase())
            {
                out.push(' ');
            }

            run.push(c);
        }

        out.push(c);
        prev = Some(c);
    }

    out
}

/// Splits a run-together name (`"appleskin"`) into dictionary words
/// (`"apple skin"`) by greedily taking the longest known prefix at each
/// position.
///
/// Characters that start no known word are consumed one at a time and kept
/// together as a single pass-through chunk, so the function always makes
/// progress and unrecognized names come out unchanged.
pub fn segment_with_dictionary(s: &str, dict: &dyn WordDict) -> String {
    let lowered = s.to_lowercase();
    let mut words: Vec<String> = Vec::new();
    let mut residue = String::new();
    let mut rest = lowered.as_str();

    while !rest.is_empty() {
        match longest_known_prefix(rest, dict) {
            Some(len) => {
                flush_residue(&mut words, &mut residue, s);
                words.push(rest[..len].to_string());
                rest = &rest[len..];
            },
            None => match rest.chars().next() {
                Some(c) => {
                    residue.push(c);
                    rest = &rest[c.len_utf8()..];
                },
                None => break,
            },
        }
    }

    flush_residue(&mut words, &mut residue, s);

    words.join(" ")
}

fn flush_residue(words: &mut Vec<String>, residue: &mut String, original: &str) {
    if !residue.is_empty() {
        debug!(
            "Keeping the unrecognized chunk \"{}\" as-is while segmenting \"{}\"",
            residue, original
        );
        words.push(std::mem::take(residue));
    }
}

fn longest_known_prefix(s: &str, dict: &dyn WordDict) -> Option<usize> {
    let mut best = None;

    for (idx, c) in s.char_indices() {
        let end = idx + c.len_utf8();
        if dict.is_word(&s[..end]) {
            best = Some(end);
        }
    }

    best
}

/// The loader whose canonical token appears in the file name, if any. Mod
/// files are expected to mention at most one loader.
pub fn detect_loader(file_name: &str) -> Option<ModLoader> {
    let lowered = file_name.to_lowercase();

    ModLoader::ALL
        .into_iter()
        .find(|l| lowered.contains(l.canonical_token()))
}

/// The most recent catalog version mentioned in the file name, along with its
/// catalog position (lower means more recent).
pub fn detect_game_version<'a>(
    file_name: &str,
    catalog: &'a GameVersionCatalog,
) -> Option<(usize, &'a str)> {
    catalog
        .iter_descending()
        .enumerate()
        .find(|(_, v)| file_name.contains(*v))
}

/// One token that differs between two file names at the same position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenChange {
    pub old: String,
    pub new: String,
}

/// Structural diff between two file names.
///
/// Both names are normalized and split into hyphen tokens, then compared
/// position by position up to the shorter length. Every differing pair is
/// recorded, regardless of direction; whether a change counts as an update is
/// decided by the caller's candidate ordering, not here.
pub fn diff_between_files(old_file: &str, new_file: &str) -> Vec<TokenChange> {
    let old_tokens = diff_tokens(old_file);
    let new_tokens = diff_tokens(new_file);

    old_tokens
        .iter()
        .zip(new_tokens.iter())
        .filter(|(o, n)| o != n)
        .map(|(o, n)| TokenChange {
            old: o.to_string(),
            new: n.to_string(),
        })
        .collect()
}

/// The first hyphen token of a normalized file name. Two files from the same
/// release series share it.
pub fn leading_token(file_name: &str) -> String {
    diff_tokens(file_name).into_iter().next().unwrap_or_default()
}

fn diff_tokens(file_name: &str) -> Vec<String> {
    normalize_separators(strip_archive_suffix(file_name))
        .split('-')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn strip_archive_suffix(file_name: &str) -> &str {
    file_name.strip_suffix(".jar").unwrap_or(file_name)
}

fn normalize_separators(s: &str) -> String {
    s.replace(['+', ' ', '_'], "-")
}

#[cfg(test)]
mod tests {
    use mc_mod_updater_rs_utils::{dictionary::WordDict, types::ModLoader};

    use super::{
        FilenameError, GameVersionCatalog, detect_game_version, detect_loader, diff_between_files,
        leading_token, search_phrase_from_file_name, segment_with_dictionary,
        split_on_case_boundaries,
    };

    struct StubDict(&'static [&'static str]);

    impl WordDict for StubDict {
        fn is_word(&self, s: &str) -> bool {
            self.0.contains(&s)
        }
    }

    fn phrase(file_name: &str) -> String {
        search_phrase_from_file_name(file_name).unwrap()
    }

    #[test]
    fn search_phrase_drops_version_and_loader_noise() {
        assert_eq!(phrase("sodium-fabric-0.5.3+mc1.20.1.jar"), "sodium");
        assert_eq!(phrase("JourneyMap-5.9.7.jar"), "JourneyMap");
        assert_eq!(phrase("Fake_Player-forge-1.2.0.jar"), "Fake Player");
        assert_eq!(phrase("iron-chests-1.20.1-14.4.4.jar"), "iron chests");
    }

    #[test]
    fn search_phrase_keeps_loader_words_that_are_not_trailing() {
        // Only the token right before the cut point is loader noise.
        assert_eq!(phrase("fabric-api-0.92.0.jar"), "fabric api");
    }

    #[test]
    fn search_phrase_fails_without_a_version_token() {
        assert!(matches!(
            search_phrase_from_file_name("JustAName.jar"),
            Err(FilenameError::NoVersionToken(_))
        ));
    }

    #[test]
    fn search_phrase_fails_when_the_version_leads() {
        assert!(matches!(
            search_phrase_from_file_name("1.20.1-something.jar"),
            Err(FilenameError::NoNameTokens(_))
        ));

        // Dropping the loader token can leave nothing behind too.
        assert!(matches!(
            search_phrase_from_file_name("fabric-0.5.3.jar"),
            Err(FilenameError::NoNameTokens(_))
        ));
    }

    #[test]
    fn case_boundary_split_works() {
        assert_eq!(split_on_case_boundaries("OptiFine"), "Opti Fine");
        assert_eq!(split_on_case_boundaries("FakePlayerTwo"), "Fake Player Two");
    }

    #[test]
    fn case_boundary_split_leaves_acronyms_alone() {
        assert_eq!(split_on_case_boundaries("JEI"), "JEI");
        assert_eq!(split_on_case_boundaries("XRay"), "XRay");
    }

    #[test]
    fn case_boundary_split_leaves_lowercase_led_names_alone() {
        assert_eq!(split_on_case_boundaries("appleSkin"), "appleSkin");
        assert_eq!(split_on_case_boundaries("sodium"), "sodium");
    }

    #[test]
    fn case_boundary_split_respects_existing_spaces() {
        assert_eq!(split_on_case_boundaries("Opti Fine"), "Opti Fine");
    }

    #[test]
    fn dictionary_segmentation_takes_the_longest_prefix() {
        let dict = StubDict(&["app", "apple", "skin"]);

        assert_eq!(segment_with_dictionary("appleskin", &dict), "apple skin");
    }

    #[test]
    fn dictionary_segmentation_lowercases_its_input() {
        let dict = StubDict(&["fake", "player"]);

        assert_eq!(segment_with_dictionary("FakePlayer", &dict), "fake player");
    }

    #[test]
    fn dictionary_segmentation_passes_residue_through_as_one_chunk() {
        let dict = StubDict(&["skin"]);

        assert_eq!(segment_with_dictionary("xxskin", &dict), "xx skin");
        assert_eq!(segment_with_dictionary("skinxx", &dict), "skin xx");
    }

    #[test]
    fn dictionary_segmentation_terminates_on_fully_unknown_input() {
        let dict = StubDict(&[]);

        assert_eq!(segment_with_dictionary("qqqq", &dict), "qqqq");
        assert_eq!(segment_with_dictionary("", &dict), "");
    }

    #[test]
    fn loader_detection_works() {
        assert_eq!(
            detect_loader("sodium-fabric-0.5.3.jar"),
            Some(ModLoader::Fabric)
        );
        assert_eq!(
            detect_loader("JustEnoughItems-FORGE-1.20.1.jar"),
            Some(ModLoader::Forge)
        );
        assert_eq!(detect_loader("OptiFine_1.20.1.jar"), None);
    }

    #[test]
    fn version_detection_prefers_the_most_recent_mention() {
        let catalog = GameVersionCatalog::new(vec![
            "1.20.2".to_string(),
            "1.20.1".to_string(),
            "1.19.4".to_string(),
        ]);

        assert_eq!(
            detect_game_version("mod-1.19.4-to-1.20.1.jar", &catalog),
            Some((1, "1.20.1"))
        );
        assert_eq!(detect_game_version("mod-2.0.0.jar", &catalog), None);
    }

    #[test]
    fn diff_of_a_file_with_itself_is_empty() {
        assert!(diff_between_files("mod-1.2.0-fabric.jar", "mod-1.2.0-fabric.jar").is_empty());
    }

    #[test]
    fn diff_reports_a_version_bump() {
        let changes = diff_between_files("mod-1.2.0-fabric", "mod-1.3.0-fabric");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, "1.2.0");
        assert_eq!(changes[0].new, "1.3.0");
    }

    #[test]
    fn diff_reports_downgrades_too() {
        // Direction is the caller's business. The diff flags any change.
        let changes = diff_between_files("mod-1.3.0-fabric", "mod-1.2.0-fabric");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old, "1.3.0");
        assert_eq!(changes[0].new, "1.2.0");
    }

    #[test]
    fn diff_sees_through_separator_and_suffix_differences() {
        assert!(diff_between_files("mod_1.2.0.jar", "mod-1.2.0").is_empty());
        assert!(diff_between_files("mod+1.2.0.jar", "mod 1.2.0.jar").is_empty());
    }

    #[test]
    fn leading_token_works() {
        assert_eq!(leading_token("sodium-fabric-0.5.3.jar"), "sodium");
        assert_eq!(leading_token("lithium+mc1.20.1.jar"), "lithium");
        assert_eq!(leading_token(""), "");
    }
}
