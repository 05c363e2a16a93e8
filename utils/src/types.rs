use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

/// The closed set of mod-loading frameworks that mod files and the supported
/// catalogs know about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ModLoader {
    Forge,
    Cauldron,
    LiteLoader,
    Fabric,
    Quilt,
}

impl ModLoader {
    pub const ALL: [ModLoader; 5] = [
        ModLoader::Forge,
        ModLoader::Cauldron,
        ModLoader::LiteLoader,
        ModLoader::Fabric,
        ModLoader::Quilt,
    ];

    /// The lowercase token that appears inside mod file names and is also what
    /// the catalogs expect as their loader query parameter.
    pub fn canonical_token(&self) -> &'static str {
        match self {
            ModLoader::Forge => "forge",
            ModLoader::Cauldron => "cauldron",
            ModLoader::LiteLoader => "liteloader",
            ModLoader::Fabric => "fabric",
            ModLoader::Quilt => "quilt",
        }
    }

    /// The numeric `modLoaderType` ID that the CurseForge search endpoint
    /// uses.
    pub fn curseforge_id(&self) -> u8 {
        match self {
            ModLoader::Forge => 1,
            ModLoader::Cauldron => 2,
            ModLoader::LiteLoader => 3,
            ModLoader::Fabric => 4,
            ModLoader::Quilt => 5,
        }
    }
}

impl Display for ModLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModLoader::Forge => "Forge",
            ModLoader::Cauldron => "Cauldron",
            ModLoader::LiteLoader => "LiteLoader",
            ModLoader::Fabric => "Fabric",
            ModLoader::Quilt => "Quilt",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
#[error("Unknown mod loader \"{0}\"")]
pub struct UnknownModLoaderError(pub String);

impl FromStr for ModLoader {
    type Err = UnknownModLoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();

        ModLoader::ALL
            .into_iter()
            .find(|l| l.canonical_token() == lowered)
            .ok_or_else(|| UnknownModLoaderError(s.to_string()))
    }
}

/// The known game versions ordered descending by release recency (index 0 is
/// the latest release).
///
/// This ordering is the only notion of "newer" in the whole program. Version
/// strings are never parsed semantically.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GameVersionCatalog(Vec<String>);

impl GameVersionCatalog {
    pub fn new(versions_newest_first: Vec<String>) -> Self {
        Self(versions_newest_first)
    }

    pub fn latest(&self) -> Option<&str> {
        self.0.first().map(|v| v.as_str())
    }

    pub fn is_latest(&self, version: &str) -> bool {
        self.latest() == Some(version)
    }

    /// The position of a version in the catalog. A lower index means a more
    /// recent release.
    pub fn position(&self, version: &str) -> Option<usize> {
        self.0.iter().position(|v| v == version)
    }

    pub fn iter_descending(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for GameVersionCatalog {
    fn from(v: Vec<String>) -> Self {
        Self::new(v)
    }
}

/// A remote file that the update check decided is a genuinely different build
/// of a local mod file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateCandidate {
    pub local_file: String,
    pub remote_file: String,

    /// Not every catalog entry exposes a direct download URL.
    pub download_url: Option<String>,
}

impl Display for UpdateCandidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.local_file, self.remote_file)
    }
}

/// The aggregate outcome of one update check pass over every resolved mod.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateReport {
    pub updates: Vec<UpdateCandidate>,

    /// Human readable per-mod notes that are not errors (eg. "already up to
    /// date").
    pub messages: Vec<String>,

    /// Per-mod failures that did not stop the run.
    pub errors: Vec<String>,
}

impl UpdateReport {
    pub fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }
}
