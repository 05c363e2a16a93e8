use async_trait::async_trait;
use log::debug;
use mc_mod_updater_rs_utils::types::ModLoader;
use reqwest::Client;
use serde::Deserialize;

use crate::{CatalogResult, build_http_client};

static MODRINTH_ROOT: &str = "https://api.modrinth.com/v2";

/// The Modrinth side of the mod lookup capability.
#[async_trait]
pub trait ModrinthLookup {
    async fn search_by_query(
        &self,
        version: &str,
        loader: ModLoader,
        query: &str,
    ) -> CatalogResult<Vec<ModrinthHit>>;

    /// The files of a project, already filtered server side to the given
    /// loader and game version. Grouped per project version, newest release
    /// first in catalog return order.
    async fn files_for_project(
        &self,
        project_id: &str,
        version: &str,
        loader: ModLoader,
    ) -> CatalogResult<Vec<ModrinthVersionFiles>>;
}

#[derive(Debug)]
pub struct ModrinthClient {
    client: Client,
}

impl ModrinthClient {
    pub fn new() -> CatalogResult<Self> {
        let client = build_http_client()?;

        Ok(Self { client })
    }

    async fn get_text(&self, req: String) -> CatalogResult<String> {
        Ok(self.client.get(req).send().await?.text().await?)
    }
}

#[async_trait]
impl ModrinthLookup for ModrinthClient {
    async fn search_by_query(
        &self,
        version: &str,
        loader: ModLoader,
        query: &str,
    ) -> CatalogResult<Vec<ModrinthHit>> {
        debug!("Searching Modrinth with the query \"{}\"...", query);

        let req = format!(
            "{}/search?query={}&facets=[[\"project_type:mod\"],[\"versions:{}\"],[\"categories:{}\"\
             ]]",
            MODRINTH_ROOT,
            query,
            version,
            loader.canonical_token()
        );
        let resp: SearchResp = serde_json::from_str(&self.get_text(req).await?)?;

        Ok(resp.hits)
    }

    async fn files_for_project(
        &self,
        project_id: &str,
        version: &str,
        loader: ModLoader,
    ) -> CatalogResult<Vec<ModrinthVersionFiles>> {
        debug!("Fetching the Modrinth file list for project {}...", project_id);

        let req = format!(
            "{}/project/{}/version?loaders=[\"{}\"]&game_versions=[\"{}\"]",
            MODRINTH_ROOT,
            project_id,
            loader.canonical_token(),
            version
        );

        Ok(serde_json::from_str(&self.get_text(req).await?)?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResp {
    hits: Vec<ModrinthHit>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModrinthHit {
    pub project_id: String,
    pub slug: String,
    pub title: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModrinthVersionFiles {
    pub files: Vec<ModrinthFile>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModrinthFile {
    pub url: String,
    pub filename: String,
}
