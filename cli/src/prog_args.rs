use camino::Utf8PathBuf;
use clap::Parser;
use log::warn;

/// Checks a Minecraft mods folder for mod updates.
///
/// The folder itself is the only input: the game version and mod loader are
/// inferred from the mod file names, and each mod is then looked up on
/// Modrinth and CurseForge. When a newer game version is out, the tool offers
/// to upgrade the whole folder to it instead.
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
#[command(author, version)]
pub(crate) struct ProgArgs {
    /// Path to the mods folder to check.
    #[arg(short = 'm', long, default_value_t = get_os_default_mods_dir_path())]
    pub(crate) mods_dir: Utf8PathBuf,

    /// Apply every found update without asking.
    #[arg(short = 'y', long, default_value_t = false)]
    pub(crate) yes: bool,
}

fn get_os_default_mods_dir_path() -> Utf8PathBuf {
    // The launcher keeps its folder in a different spot on every OS.
    let game_dir = if cfg!(target_os = "macos") {
        dirs::config_dir().map(|p| p.join("minecraft"))
    } else if cfg!(windows) {
        dirs::config_dir().map(|p| p.join(".minecraft"))
    } else {
        dirs::home_dir().map(|p| p.join(".minecraft"))
    };

    match game_dir.and_then(|p| Utf8PathBuf::from_path_buf(p).ok()) {
        Some(p) => p.join("mods"),
        None => {
            warn!(
                "Unable to find the default Minecraft directory for this OS! Using the current \
                 directory instead as a fallback; pass --mods-dir to point at the real one."
            );
            Utf8PathBuf::from(".")
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{ProgArgs, get_os_default_mods_dir_path};

    #[test]
    fn an_explicit_mods_dir_overrides_the_default() {
        let args = ProgArgs::try_parse_from(["prog", "--mods-dir", "/tmp/mods", "--yes"]).unwrap();

        assert_eq!(args.mods_dir, "/tmp/mods");
        assert!(args.yes);
    }

    #[test]
    fn the_default_mods_dir_points_at_a_mods_folder() {
        let default = get_os_default_mods_dir_path();

        assert!(default.as_str().ends_with("mods") || default == ".");
    }
}
