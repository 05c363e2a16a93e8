use std::{fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use reqwest::{Client, Response, header::CONTENT_DISPOSITION};
use thiserror::Error;

use crate::build_http_client;

pub type DownloadResult<T> = Result<T, DownloadError>;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("A file already exists at \"{0}\". Refusing to overwrite it.")]
    DestinationExists(Utf8PathBuf),

    #[error("Unable to work out a file name for the download from \"{0}\"")]
    NoResolvableFileName(String),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

#[derive(Debug)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> DownloadResult<Self> {
        let client = build_http_client()?;

        Ok(Self { client })
    }

    /// Downloads `url` into `dest_dir` and returns the path that was written.
    ///
    /// The file name is taken from the `Content-Disposition` header when the
    /// server sends one, then from the last URL path segment, then from
    /// `fallback_file_name`. An existing file at the destination is an error,
    /// never overwritten.
    pub async fn download_to_dir(
        &self,
        url: &str,
        dest_dir: &Utf8Path,
        fallback_file_name: Option<&str>,
    ) -> DownloadResult<Utf8PathBuf> {
        let resp = self.client.get(url).send().await?;

        let file_name = file_name_from_resp_header(&resp)
            .or_else(|| file_name_from_url(url))
            .or_else(|| fallback_file_name.map(|n| n.to_string()))
            .ok_or_else(|| DownloadError::NoResolvableFileName(url.to_string()))?;

        let dest = dest_dir.join(&file_name);
        if dest.exists() {
            return Err(DownloadError::DestinationExists(dest));
        }

        debug!("Downloading \"{}\" to \"{}\"...", url, dest);

        let bytes = resp.bytes().await?;
        fs::write(&dest, &bytes)?;

        Ok(dest)
    }
}

fn file_name_from_resp_header(resp: &Response) -> Option<String> {
    resp.headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(file_name_from_content_disposition)
}

// eg. `attachment; filename="sodium-fabric-0.5.8.jar"`
fn file_name_from_content_disposition(raw: &str) -> Option<String> {
    raw.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}

fn file_name_from_url(url: &str) -> Option<String> {
    let path = match url.split_once(['?', '#']) {
        Some((path, _)) => path,
        None => url,
    };

    match path.rsplit_once('/') {
        Some((_, last)) if !last.is_empty() => Some(last.to_string()),
        _ => None,
    }
}
