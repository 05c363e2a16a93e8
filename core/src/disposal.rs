//! Replaced mod files are never deleted outright. They move into a dated
//! trash area under the OS cache directory, where the user can fish them
//! back out if an update goes wrong.

use std::{fs, io, path::PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use log::info;
use thiserror::Error;

pub type DisposalResult<T> = Result<T, DisposalError>;

static TRASH_DIR_NAME: &str = "mc-mod-updater-rs";

#[derive(Debug, Error)]
pub enum DisposalError {
    #[error(
        "No cache directory is known for this platform, so there is nowhere to keep replaced files."
    )]
    NoCacheDir,

    #[error("The cache directory path {0:?} is not valid UTF-8.")]
    NonUtf8Path(PathBuf),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// A directory that receives every file one run replaces, stamped with the
/// run's start time so consecutive runs never mix.
#[derive(Debug)]
pub struct TrashArea {
    dir: Utf8PathBuf,
}

impl TrashArea {
    pub fn create() -> DisposalResult<Self> {
        let cache_dir = dirs::cache_dir().ok_or(DisposalError::NoCacheDir)?;
        let cache_dir =
            Utf8PathBuf::from_path_buf(cache_dir).map_err(DisposalError::NonUtf8Path)?;

        let dir = cache_dir
            .join(TRASH_DIR_NAME)
            .join(format!("trash-{}", Utc::now().format("%Y%m%d-%H%M%S")));
        fs::create_dir_all(&dir)?;

        info!("Replaced files will be kept in \"{}\".", dir);

        Ok(Self { dir })
    }

    /// A trash area rooted at an explicit directory instead of the OS cache
    /// directory.
    pub fn at(dir: Utf8PathBuf) -> DisposalResult<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Moves a file into the trash area and returns its new path.
    pub fn dispose(&self, file: &Utf8Path) -> DisposalResult<Utf8PathBuf> {
        let dest = self.dir.join(file.file_name().unwrap_or("unnamed"));

        // The cache and mods directories can sit on different filesystems,
        // and a rename cannot cross that boundary.
        if fs::rename(file, &dest).is_err() {
            fs::copy(file, &dest)?;
            fs::remove_file(file)?;
        }

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::TrashArea;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn disposed_files_end_up_in_the_trash_area() {
        let mods = TempDir::new().unwrap();
        let trash = TempDir::new().unwrap();

        let file = utf8(&mods).join("old-mod-1.0.jar");
        fs::write(&file, b"bytes").unwrap();

        let area = TrashArea::at(utf8(&trash).join("run")).unwrap();
        let moved_to = area.dispose(&file).unwrap();

        assert!(!file.exists());
        assert_eq!(fs::read(moved_to).unwrap(), b"bytes");
    }

    #[test]
    fn the_trash_area_creates_its_own_directory() {
        let trash = TempDir::new().unwrap();
        let nested = utf8(&trash).join("a").join("b");

        let area = TrashArea::at(nested.clone()).unwrap();

        assert!(nested.exists());
        assert_eq!(area.dir(), nested);
    }
}
