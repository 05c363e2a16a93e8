use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::{CatalogError, CatalogResult, build_http_client};

static FABRIC_META_ROOT: &str = "https://meta.fabricmc.net";
static FABRIC_META_MIRROR_ROOT: &str = "https://meta2.fabricmc.net";

/// Client for the Fabric project's metadata service, which is where the
/// official loader installer is published.
#[derive(Debug)]
pub struct FabricMetaClient {
    client: Client,
}

impl FabricMetaClient {
    pub fn new() -> CatalogResult<Self> {
        let client = build_http_client()?;

        Ok(Self { client })
    }

    /// The download URL of the newest stable Fabric installer jar. Falls back
    /// to the mirror when the primary service is unreachable.
    pub async fn stable_installer_url(&self) -> CatalogResult<String> {
        let entries = match self.installer_entries(FABRIC_META_ROOT).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "The primary Fabric meta service was unreachable ({}). Trying the mirror...",
                    e
                );
                self.installer_entries(FABRIC_META_MIRROR_ROOT).await?
            },
        };

        // The service lists installers newest first.
        entries
            .into_iter()
            .find(|e| e.stable)
            .map(|e| e.url)
            .ok_or(CatalogError::NoStableFabricInstaller)
    }

    async fn installer_entries(&self, root: &str) -> CatalogResult<Vec<InstallerEntry>> {
        debug!("Fetching the Fabric installer list from {}...", root);

        Ok(serde_json::from_str(
            &self
                .client
                .get(format!("{}/v2/versions/installer", root))
                .send()
                .await?
                .text()
                .await?,
        )?)
    }
}

#[derive(Debug, Deserialize)]
struct InstallerEntry {
    url: String,
    stable: bool,
}
