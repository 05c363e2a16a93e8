//! Scanning of the local mods folder. The folder listing is the authority on
//! what is installed; no other state is kept anywhere.

use std::{fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use mc_mod_updater_rs_utils::types::GameVersionCatalog;
use thiserror::Error;

pub type ModsDirResult<T> = Result<T, ModsDirError>;

#[derive(Debug, Error)]
pub enum ModsDirError {
    #[error("The mods directory \"{0}\" does not exist.")]
    MissingDir(Utf8PathBuf),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// One scan of the mods folder. Files and sub-directories are captured
/// separately since only files count as installed mods.
#[derive(Debug)]
pub struct ModsDir {
    path: Utf8PathBuf,
    file_names: Vec<String>,
    subdir_names: Vec<String>,
}

impl ModsDir {
    pub fn scan(path: &Utf8Path) -> ModsDirResult<Self> {
        if !path.exists() {
            return Err(ModsDirError::MissingDir(path.to_owned()));
        }

        let mut file_names = Vec::new();
        let mut subdir_names = Vec::new();

        for entry in path.read_dir_utf8()? {
            let entry = entry?;

            if entry.file_type()?.is_dir() {
                subdir_names.push(entry.file_name().to_string());
            } else {
                file_names.push(entry.file_name().to_string());
            }
        }

        // Directory listing order is platform dependent.
        file_names.sort();

        Ok(Self {
            path: path.to_owned(),
            file_names,
            subdir_names,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    /// Whether the folder already contains sub-directories named after game
    /// versions, which is how some launchers archive the mods of previous
    /// versions.
    pub fn has_version_subdirs(&self, catalog: &GameVersionCatalog) -> bool {
        self.subdir_names
            .iter()
            .any(|name| catalog.position(name).is_some())
    }

    /// Moves every scanned file into a sub-directory named after the given
    /// version, creating it if needed, and returns the sub-directory path.
    pub fn migrate_files_into_version_subdir(
        &self,
        version: &str,
    ) -> ModsDirResult<Utf8PathBuf> {
        let dest_dir = self.path.join(version);

        if !dest_dir.exists() {
            fs::create_dir(&dest_dir)?;
        }

        for file_name in &self.file_names {
            fs::rename(self.path.join(file_name), dest_dir.join(file_name))?;
        }

        info!(
            "Moved {} files into \"{}\".",
            self.file_names.len(),
            dest_dir
        );

        Ok(dest_dir)
    }
}
