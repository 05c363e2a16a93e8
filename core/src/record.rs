//! A shape-independent view over the two catalogs' mod records.

use mc_mod_updater_rs_catalog::{
    curseforge::CurseForgeMod,
    modrinth::{ModrinthFile, ModrinthHit},
};
use mc_mod_updater_rs_utils::types::ModLoader;

use crate::filename::detect_loader;

/// A resolved catalog hit for one local mod file.
#[derive(Clone, Debug)]
pub enum RemoteModRecord {
    CurseForge(CurseForgeMod),

    Modrinth {
        hit: ModrinthHit,

        /// Flattened from the per-version groups, in catalog return order.
        /// Already filtered server side to the target version and loader.
        files: Vec<ModrinthFile>,
    },
}

/// One remote file, with the catalog shape stripped away.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateFile {
    pub file_name: String,
    pub download_url: Option<String>,
}

impl RemoteModRecord {
    pub fn display_name(&self) -> &str {
        match self {
            RemoteModRecord::CurseForge(m) => &m.name,
            RemoteModRecord::Modrinth { hit, .. } => &hit.title,
        }
    }

    /// The mod's catalog page, for pointing the user at manual checks.
    pub fn page_url(&self) -> String {
        match self {
            RemoteModRecord::CurseForge(m) => m.links.website_url.clone(),
            RemoteModRecord::Modrinth { hit, .. } => {
                format!("https://modrinth.com/mod/{}", hit.slug)
            },
        }
    }

    /// Whether the catalog lists any downloadable file for this mod at all,
    /// for any version. Distinguishes "nothing to download" from "nothing for
    /// the version we care about".
    pub fn has_any_available_file(&self) -> bool {
        match self {
            RemoteModRecord::CurseForge(m) => m.latest_files.iter().any(|f| f.is_available),
            RemoteModRecord::Modrinth { files, .. } => !files.is_empty(),
        }
    }

    /// The candidate files for the target version, in the order the update
    /// scan should walk them.
    ///
    /// CurseForge records are filtered to available files tagged with the
    /// target version, sorted newest first, and stripped of files built for a
    /// different loader (files naming no loader are assumed loader-agnostic
    /// and kept). Modrinth records arrive pre-filtered, so their files pass
    /// through in catalog return order.
    pub fn files_for_version(&self, target_version: &str, loader: ModLoader) -> Vec<CandidateFile> {
        match self {
            RemoteModRecord::CurseForge(m) => {
                let mut files: Vec<_> = m
                    .latest_files
                    .iter()
                    .filter(|f| {
                        f.is_available && f.game_versions.iter().any(|v| v == target_version)
                    })
                    .collect();
                files.sort_by(|a, b| b.file_date.cmp(&a.file_date));

                files
                    .into_iter()
                    .filter(|f| match detect_loader(&f.file_name) {
                        Some(named) => named == loader,
                        None => true,
                    })
                    .map(|f| CandidateFile {
                        file_name: f.file_name.clone(),
                        download_url: f.download_url.clone(),
                    })
                    .collect()
            },
            RemoteModRecord::Modrinth { files, .. } => files
                .iter()
                .map(|f| CandidateFile {
                    file_name: f.filename.clone(),
                    download_url: Some(f.url.clone()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mc_mod_updater_rs_catalog::{
        curseforge::{CurseForgeFile, CurseForgeMod, CurseForgeModLinks},
        modrinth::{ModrinthFile, ModrinthHit},
    };
    use mc_mod_updater_rs_utils::types::ModLoader;

    use super::RemoteModRecord;

    fn cf_file(
        file_name: &str,
        available: bool,
        versions: &[&str],
        date_secs: i64,
    ) -> CurseForgeFile {
        CurseForgeFile {
            file_name: file_name.to_string(),
            is_available: available,
            game_versions: versions.iter().map(|v| v.to_string()).collect(),
            download_url: Some(format!("https://edge.forgecdn.net/{}", file_name)),
            file_date: DateTime::from_timestamp(date_secs, 0).unwrap(),
        }
    }

    fn cf_record(files: Vec<CurseForgeFile>) -> RemoteModRecord {
        RemoteModRecord::CurseForge(CurseForgeMod {
            id: 1,
            name: "Some Mod".to_string(),
            slug: "some-mod".to_string(),
            links: CurseForgeModLinks {
                website_url: "https://www.curseforge.com/minecraft/mc-mods/some-mod".to_string(),
            },
            latest_files: files,
        })
    }

    #[test]
    fn curseforge_candidates_are_filtered_and_sorted_newest_first() {
        let record = cf_record(vec![
            cf_file("mod-1.0.jar", true, &["1.20.1"], 10),
            cf_file("mod-2.0.jar", true, &["1.20.1"], 30),
            cf_file("mod-old.jar", true, &["1.19.4"], 40),
            cf_file("mod-gone.jar", false, &["1.20.1"], 50),
        ]);

        let candidates = record.files_for_version("1.20.1", ModLoader::Fabric);

        let names: Vec<_> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, ["mod-2.0.jar", "mod-1.0.jar"]);
    }

    #[test]
    fn curseforge_candidates_for_other_loaders_are_dropped() {
        let record = cf_record(vec![
            cf_file("mod-forge-2.0.jar", true, &["1.20.1"], 30),
            cf_file("mod-fabric-2.0.jar", true, &["1.20.1"], 20),
            cf_file("mod-2.0.jar", true, &["1.20.1"], 10),
        ]);

        let candidates = record.files_for_version("1.20.1", ModLoader::Fabric);

        let names: Vec<_> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        // The loader-agnostic file stays in.
        assert_eq!(names, ["mod-fabric-2.0.jar", "mod-2.0.jar"]);
    }

    #[test]
    fn modrinth_candidates_pass_through_in_catalog_order() {
        let record = RemoteModRecord::Modrinth {
            hit: ModrinthHit {
                project_id: "abc".to_string(),
                slug: "some-mod".to_string(),
                title: "Some Mod".to_string(),
            },
            files: vec![
                ModrinthFile {
                    url: "https://cdn.modrinth.com/a.jar".to_string(),
                    filename: "mod-2.0.jar".to_string(),
                },
                ModrinthFile {
                    url: "https://cdn.modrinth.com/b.jar".to_string(),
                    filename: "mod-1.0.jar".to_string(),
                },
            ],
        };

        let candidates = record.files_for_version("1.20.1", ModLoader::Fabric);

        let names: Vec<_> = candidates.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, ["mod-2.0.jar", "mod-1.0.jar"]);
        assert!(candidates.iter().all(|c| c.download_url.is_some()));
    }

    #[test]
    fn availability_check_distinguishes_nothing_at_all_from_nothing_matching() {
        let no_files = cf_record(vec![]);
        let only_unavailable = cf_record(vec![cf_file("mod-1.0.jar", false, &["1.20.1"], 10)]);
        let wrong_version = cf_record(vec![cf_file("mod-1.0.jar", true, &["1.19.4"], 10)]);

        assert!(!no_files.has_any_available_file());
        assert!(!only_unavailable.has_any_available_file());
        assert!(wrong_version.has_any_available_file());

        assert!(wrong_version
            .files_for_version("1.20.1", ModLoader::Fabric)
            .is_empty());
    }
}
