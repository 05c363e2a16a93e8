use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use mc_mod_updater_rs_utils::types::{GameVersionCatalog, ModLoader};
use reqwest::{Client, header::ACCEPT};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{CatalogResult, build_http_client};

static CURSEFORGE_ROOT: &str = "https://api.curseforge.com";

/// Minecraft's game ID on CurseForge. Hard coded into the API and never
/// changes.
const MINECRAFT_GAME_ID: u32 = 432;

/// The CurseForge side of the mod lookup capability. A trait so the search
/// cascade can be driven against stub catalogs in tests.
#[async_trait]
pub trait CurseForgeLookup {
    /// Slug lookups are canonical on CurseForge, so the result has at most one
    /// entry.
    async fn search_by_slug(
        &self,
        version: &str,
        loader: ModLoader,
        slug: &str,
    ) -> CatalogResult<Vec<CurseForgeMod>>;

    async fn search_by_query(
        &self,
        version: &str,
        loader: ModLoader,
        query: &str,
    ) -> CatalogResult<Vec<CurseForgeMod>>;
}

#[derive(Debug)]
pub struct CurseForgeClient {
    client: Client,
    api_key: String,
}

impl CurseForgeClient {
    pub fn new(api_key: String) -> CatalogResult<Self> {
        let client = build_http_client()?;

        Ok(Self { client, api_key })
    }

    /// The full known game version catalog, most recent release first.
    pub async fn minecraft_versions(&self) -> CatalogResult<GameVersionCatalog> {
        debug!("Fetching the known Minecraft versions from CurseForge...");

        let resp: MinecraftVersionsResp = self
            .get_json(format!(
                "{}/v1/minecraft/version?sortDescending=true",
                CURSEFORGE_ROOT
            ))
            .await?;

        Ok(GameVersionCatalog::new(
            resp.data.into_iter().map(|v| v.version_string).collect(),
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, req: String) -> CatalogResult<T> {
        Ok(serde_json::from_str(
            &self
                .client
                .get(req)
                .header(ACCEPT, "application/json")
                .header("x-api-key", &self.api_key)
                .send()
                .await?
                .text()
                .await?,
        )?)
    }

    async fn search(
        &self,
        version: &str,
        loader: ModLoader,
        search_param: String,
    ) -> CatalogResult<Vec<CurseForgeMod>> {
        let req = format!(
            "{}/v1/mods/search?gameId={}&gameVersion={}&modLoaderType={}&{}",
            CURSEFORGE_ROOT,
            MINECRAFT_GAME_ID,
            version,
            loader.curseforge_id(),
            search_param
        );
        let resp: SearchResp = self.get_json(req).await?;

        Ok(resp.data)
    }
}

#[async_trait]
impl CurseForgeLookup for CurseForgeClient {
    async fn search_by_slug(
        &self,
        version: &str,
        loader: ModLoader,
        slug: &str,
    ) -> CatalogResult<Vec<CurseForgeMod>> {
        debug!("Searching CurseForge for the slug \"{}\"...", slug);

        self.search(version, loader, format!("slug={}", slug)).await
    }

    async fn search_by_query(
        &self,
        version: &str,
        loader: ModLoader,
        query: &str,
    ) -> CatalogResult<Vec<CurseForgeMod>> {
        debug!("Searching CurseForge with the query \"{}\"...", query);

        self.search(version, loader, format!("searchFilter={}", query))
            .await
    }
}

#[derive(Debug, Deserialize)]
struct SearchResp {
    data: Vec<CurseForgeMod>,
}

#[derive(Debug, Deserialize)]
struct MinecraftVersionsResp {
    data: Vec<MinecraftVersion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinecraftVersion {
    version_string: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeMod {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub links: CurseForgeModLinks,

    #[serde(default)]
    pub latest_files: Vec<CurseForgeFile>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeModLinks {
    pub website_url: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurseForgeFile {
    pub file_name: String,
    pub is_available: bool,

    #[serde(default)]
    pub game_versions: Vec<String>,

    /// Absent when the mod author has disabled third party distribution.
    pub download_url: Option<String>,

    pub file_date: DateTime<Utc>,
}
