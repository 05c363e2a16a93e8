use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use thiserror::Error;

pub mod curseforge;
pub mod download;
pub mod fabric_meta;
pub mod modrinth;

pub type CatalogResult<T> = Result<T, CatalogError>;

static USER_AGENT: &str = concat!("mc-mod-updater-rs/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    JsonDeserializationError(#[from] serde_json::Error),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error("The Fabric meta service did not list a stable installer")]
    NoStableFabricInstaller,
}

pub(crate) fn build_http_client() -> Result<Client, reqwest::Error> {
    ClientBuilder::default()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}
