//! The orchestrator that drives one full run: scan the folder, infer its
//! version and loader, resolve every mod against the catalogs, and apply
//! whatever the user picked.

use camino::Utf8PathBuf;
use derive_builder::Builder;
use log::{info, warn};
use mc_mod_updater_rs_catalog::{
    CatalogError,
    curseforge::CurseForgeClient,
    download::{DownloadError, Downloader},
    fabric_meta::FabricMetaClient,
    modrinth::ModrinthClient,
};
use mc_mod_updater_rs_utils::{
    dictionary::EnglishDictionary,
    types::{GameVersionCatalog, ModLoader, UpdateCandidate, UpdateReport},
    user_input_delegate::{RunSummary, UserInputDelegate},
};
use thiserror::Error;

use crate::{
    disposal::{DisposalError, TrashArea},
    infer::{InferenceError, infer_game_version, infer_mod_loader},
    installer::{InstallerError, run_installer_jar, stop_running_game_processes},
    mods_dir::{ModsDir, ModsDirError},
    search::{SearchContext, resolve_mod},
    update::check_for_updates,
};

pub type UpdaterResult<T> = Result<T, UpdaterError>;

static UPDATE_CHOICES: [&str; 3] = [
    "Update all mods",
    "Update some mods",
    "Don't update any mods",
];

#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("The mods directory \"{0}\" contains no files to check.")]
    EmptyModsDir(Utf8PathBuf),

    #[error("The game version catalog came back empty, so there is nothing to compare against.")]
    EmptyVersionCatalog,

    #[error("Selected \"some\" but then picked nothing. Nothing to do.")]
    EmptySomeSelection,

    #[error("No mod has a file for {0} yet. Try again once mod authors have caught up.")]
    NothingToUpgrade(String),

    #[error("The catalog lists no download URL for \"{0}\". It has to be fetched by hand.")]
    NoDownloadUrl(String),

    #[error(transparent)]
    InferenceError(#[from] InferenceError),

    #[error(transparent)]
    CatalogError(#[from] CatalogError),

    #[error(transparent)]
    DownloadError(#[from] DownloadError),

    #[error(transparent)]
    ModsDirError(#[from] ModsDirError),

    #[error(transparent)]
    DisposalError(#[from] DisposalError),

    #[error(transparent)]
    InstallerError(#[from] InstallerError),
}

/// Everything a run needs to know up front.
#[derive(Builder, Clone, Debug)]
pub struct UpdaterConfig {
    /// The mods folder to scan.
    pub mods_dir: Utf8PathBuf,

    /// Answer yes to every confirmation and apply every found update.
    #[builder(default)]
    pub assume_yes: bool,

    pub curseforge_api_key: String,
}

#[derive(Debug)]
pub struct Updater<U: UserInputDelegate> {
    config: UpdaterConfig,
    curseforge: CurseForgeClient,
    modrinth: ModrinthClient,
    fabric_meta: FabricMetaClient,
    downloader: Downloader,
    dict: EnglishDictionary,
    user_input_delegate: U,
}

impl<U: UserInputDelegate> Updater<U> {
    pub fn new(config: UpdaterConfig, user_input_delegate: U) -> UpdaterResult<Self> {
        Ok(Self {
            curseforge: CurseForgeClient::new(config.curseforge_api_key.clone())?,
            modrinth: ModrinthClient::new()?,
            fabric_meta: FabricMetaClient::new()?,
            downloader: Downloader::new()?,
            dict: EnglishDictionary::default(),
            user_input_delegate,
            config,
        })
    }

    pub async fn run(&mut self) -> UpdaterResult<()> {
        let mods_dir = ModsDir::scan(&self.config.mods_dir)?;

        if mods_dir.file_names().is_empty() {
            return Err(UpdaterError::EmptyModsDir(self.config.mods_dir.clone()));
        }

        let catalog = self.curseforge.minecraft_versions().await?;
        let latest = catalog.latest().ok_or(UpdaterError::EmptyVersionCatalog)?;

        let current_version = infer_game_version(mods_dir.file_names(), &catalog)?.to_string();
        let loader = infer_mod_loader(mods_dir.file_names())?;

        info!(
            "The folder looks like a {} install on Minecraft {}.",
            loader, current_version
        );

        let on_latest = catalog.is_latest(&current_version);
        let target_version = if on_latest {
            current_version.clone()
        } else {
            info!(
                "Minecraft {} is out, so mods will be checked against it instead.",
                latest
            );
            latest.to_string()
        };

        let ctx = SearchContext {
            current_version: &current_version,
            target_version: &target_version,
            loader,
        };

        let mut resolved = Vec::new();
        let mut not_found = Vec::new();

        for file_name in mods_dir.file_names() {
            match resolve_mod(
                file_name,
                &ctx,
                &self.curseforge,
                &self.modrinth,
                &self.dict,
            )
            .await?
            {
                Some(record) => resolved.push((file_name.clone(), record)),
                None => {
                    warn!("No catalog entry was found for \"{}\".", file_name);
                    not_found.push(file_name.clone());
                },
            }
        }

        let report = check_for_updates(&resolved, &current_version, &target_version, loader);

        let summary = RunSummary {
            current_version,
            target_version,
            loader,
            scanned_mod_count: mods_dir.file_names().len(),
            report,
            not_found,
        };

        self.user_input_delegate.display_run_summary(&summary);

        if on_latest {
            self.run_update_flow(&mods_dir, &summary.report).await
        } else {
            self.run_upgrade_flow(&mods_dir, &catalog, &summary).await
        }
    }

    /// The flow for a folder already on the newest game version: offer the
    /// found updates and swap in whichever ones the user picks.
    async fn run_update_flow(
        &mut self,
        mods_dir: &ModsDir,
        report: &UpdateReport,
    ) -> UpdaterResult<()> {
        if !report.has_updates() {
            info!("Every mod is as new as it gets. Nothing to do.");
            return Ok(());
        }

        let selected = self.pick_updates_to_apply(&report.updates)?;

        if selected.is_empty() {
            info!("Not updating anything.");
            return Ok(());
        }

        let trash = TrashArea::create()?;
        let mut applied = 0;
        let mut failed = 0;

        for update in selected {
            match self.apply_update(mods_dir, &trash, update).await {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("Unable to update \"{}\": {}", update.local_file, e);
                    failed += 1;
                },
            }
        }

        info!("Updated {} mods ({} failed).", applied, failed);

        Ok(())
    }

    /// The flow for a folder behind the newest game version: clear it out
    /// and rebuild it with files for the new version.
    async fn run_upgrade_flow(
        &mut self,
        mods_dir: &ModsDir,
        catalog: &GameVersionCatalog,
        summary: &RunSummary,
    ) -> UpdaterResult<()> {
        let report = &summary.report;

        if !report.has_updates() {
            return Err(UpdaterError::NothingToUpgrade(
                summary.target_version.clone(),
            ));
        }

        let prompt = format!(
            "Do you want to upgrade {} of {} mods to {}?",
            report.updates.len(),
            summary.scanned_mod_count,
            summary.target_version
        );

        if !self.confirm(&prompt) {
            info!("Leaving the folder on {}.", summary.current_version);
            return Ok(());
        }

        let trash = TrashArea::create()?;

        // The old jars have to be out of the way before the new ones land,
        // or the game would load both.
        if mods_dir.has_version_subdirs(catalog) {
            mods_dir.migrate_files_into_version_subdir(&summary.current_version)?;
        } else {
            for file_name in mods_dir.file_names() {
                trash.dispose(&mods_dir.path().join(file_name))?;
            }
        }

        if summary.loader == ModLoader::Fabric {
            self.install_fabric_loader(mods_dir, &trash).await?;
        }

        let mut applied = 0;
        let mut failed = 0;

        for update in &report.updates {
            match self.fetch_upgrade_file(mods_dir, update).await {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("Unable to fetch \"{}\": {}", update.remote_file, e);
                    failed += 1;
                },
            }
        }

        info!(
            "Upgraded the folder to {} with {} mods ({} failed).",
            summary.target_version, applied, failed
        );

        Ok(())
    }

    fn pick_updates_to_apply<'a>(
        &mut self,
        updates: &'a [UpdateCandidate],
    ) -> UpdaterResult<Vec<&'a UpdateCandidate>> {
        if self.config.assume_yes {
            return Ok(updates.iter().collect());
        }

        match self
            .user_input_delegate
            .select_item_from_list("What do you want to do?", &UPDATE_CHOICES)
        {
            0 => Ok(updates.iter().collect()),
            1 => {
                let indices = self
                    .user_input_delegate
                    .select_items_from_list("Which mods do you want to update?", updates);

                if indices.is_empty() {
                    return Err(UpdaterError::EmptySomeSelection);
                }

                Ok(indices.into_iter().filter_map(|i| updates.get(i)).collect())
            },
            _ => Ok(Vec::new()),
        }
    }

    async fn apply_update(
        &self,
        mods_dir: &ModsDir,
        trash: &TrashArea,
        update: &UpdateCandidate,
    ) -> UpdaterResult<()> {
        let url = update
            .download_url
            .as_deref()
            .ok_or_else(|| UpdaterError::NoDownloadUrl(update.remote_file.clone()))?;

        // Fetch first. A failed download must leave the old file in place.
        let new_file = self
            .downloader
            .download_to_dir(url, mods_dir.path(), Some(&update.remote_file))
            .await?;

        trash.dispose(&mods_dir.path().join(&update.local_file))?;

        info!("Updated \"{}\" to \"{}\".", update.local_file, new_file);

        Ok(())
    }

    async fn fetch_upgrade_file(
        &self,
        mods_dir: &ModsDir,
        update: &UpdateCandidate,
    ) -> UpdaterResult<()> {
        let url = update
            .download_url
            .as_deref()
            .ok_or_else(|| UpdaterError::NoDownloadUrl(update.remote_file.clone()))?;

        self.downloader
            .download_to_dir(url, mods_dir.path(), Some(&update.remote_file))
            .await?;

        Ok(())
    }

    /// Fetches the Fabric installer next to the mods folder, runs it, and
    /// trashes it afterwards.
    async fn install_fabric_loader(
        &self,
        mods_dir: &ModsDir,
        trash: &TrashArea,
    ) -> UpdaterResult<()> {
        let installer_url = self.fabric_meta.stable_installer_url().await?;

        // The installer must not land in the mods folder itself, or the game
        // would try to load it as a mod.
        let installer_dir = mods_dir.path().parent().unwrap_or(mods_dir.path());
        let installer_path = self
            .downloader
            .download_to_dir(&installer_url, installer_dir, Some("fabric-installer.jar"))
            .await?;

        let stopped = stop_running_game_processes();
        if stopped > 0 {
            info!(
                "Stopped {} running game processes before installing.",
                stopped
            );
        }

        run_installer_jar(&installer_path)?;
        trash.dispose(&installer_path)?;

        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.config.assume_yes {
            return true;
        }

        self.user_input_delegate.get_yes_no_resp(prompt)
    }
}
