use anyhow::bail;
use clap::Parser;
use cli_user_input_delegate::CliUserInputDelegate;
use mc_mod_updater_rs_core::updater::{Updater, UpdaterConfigBuilder};
use prog_args::ProgArgs;
use tracing_subscriber::EnvFilter;

mod cli_user_input_delegate;
mod prog_args;
mod report;

static CURSEFORGE_API_KEY_VAR: &str = "CURSEFORGE_API_KEY";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A `.env` file is the easiest place to keep the API key out of shell
    // history.
    dotenv::dotenv().ok();
    init_logger();

    let p_args = ProgArgs::parse();

    let api_key = validated_api_key(std::env::var(CURSEFORGE_API_KEY_VAR).ok())?;

    let config = UpdaterConfigBuilder::default()
        .mods_dir(p_args.mods_dir)
        .assume_yes(p_args.yes)
        .curseforge_api_key(api_key)
        .build()?;

    let user_input_delegate = CliUserInputDelegate::new();
    let mut updater = Updater::new(config, user_input_delegate)?;

    updater.run().await?;

    Ok(())
}

fn validated_api_key(raw: Option<String>) -> anyhow::Result<String> {
    match raw {
        None => bail!(
            "No CurseForge API key was found. Set the {} environment variable (or put it in a \
             .env file next to the binary). Keys are free at https://console.curseforge.com/.",
            CURSEFORGE_API_KEY_VAR
        ),
        Some(key) if key.trim().is_empty() => bail!(
            "The {} environment variable is set but empty. Give it a value in your shell or .env \
             file. Keys are free at https://console.curseforge.com/.",
            CURSEFORGE_API_KEY_VAR
        ),
        Some(key) => Ok(key),
    }
}

fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::validated_api_key;

    #[test]
    fn a_missing_api_key_is_a_startup_error() {
        let err = validated_api_key(None).unwrap_err();
        assert!(err.to_string().contains("No CurseForge API key was found"));
    }

    #[test]
    fn a_blank_api_key_is_a_startup_error() {
        assert!(validated_api_key(Some(String::new())).is_err());
        assert!(validated_api_key(Some("   ".to_string())).is_err());
    }

    #[test]
    fn a_real_api_key_passes_through() {
        let key = validated_api_key(Some("$2a$10$abcdef".to_string())).unwrap();
        assert_eq!(key, "$2a$10$abcdef");
    }
}
