use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use kernel::{Config, DEFAULT_BASE_URL};
use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use resource::Resource;
use serde_json::Value;
use url::Url;

pub mod error;
pub mod progress;
pub mod resource;
pub mod sanitize;

pub use error::Error;
pub use progress::ProgressObserver;
pub use sanitize::sanitize_name_for_uri;

const ADMIN_PATH: &str = "admin";
const DOWNLOAD_PATH: &str = "prepare-download";

static SHARED: OnceCell<RemoteFileClient> = OnceCell::new();

/// Authenticated client of the temp server admin endpoint.
pub struct RemoteFileClient {
    http: Client,
    config: Config,
    admin: Resource,
}

impl RemoteFileClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut token =
            HeaderValue::from_str(config.token()).map_err(|_| kernel::ConfigError::InvalidToken)?;
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, token);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let mut admin = Resource::from(config.base_url().clone());
        admin.append_path(ADMIN_PATH);

        Ok(Self {
            http,
            config,
            admin,
        })
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::new(Config::from_env()?)
    }

    /// Process wide client, configured from the environment on first use.
    ///
    /// A failed attempt leaves nothing behind, so the next call reads the
    /// environment again. Once built the instance is never replaced.
    pub fn shared() -> Result<&'static RemoteFileClient, Error> {
        SHARED.get_or_try_init(|| {
            let client = Self::from_env()?;
            tracing::debug!("remote file client ready: {:?}", client.config);
            Ok(client)
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Uploads `local_file_path` to `remote_path` on the server and returns
    /// the server reply.
    pub async fn upload_file(
        &self,
        local_file_path: impl AsRef<Path>,
        remote_path: &str,
    ) -> Result<Value, Error> {
        self.upload_file_with_progress(local_file_path, remote_path, None)
            .await
    }

    pub async fn upload_file_with_progress(
        &self,
        local_file_path: impl AsRef<Path>,
        remote_path: &str,
        observer: Option<Arc<dyn ProgressObserver>>,
    ) -> Result<Value, Error> {
        let path = local_file_path.as_ref();
        let content = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let total = content.len() as u64;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut file = Part::stream_with_length(
            progress::progress_body(Bytes::from(content), observer),
            total,
        )
        .file_name(file_name);
        if let Some(mime) = content_type_for(path) {
            file = file.mime_str(mime.essence_str())?;
        }

        let form = Form::new()
            .part("file", file)
            .text("path", remote_path.to_string());

        tracing::info!(
            "uploading {} ({total} bytes) to {remote_path}",
            path.display()
        );
        let response = self
            .http
            .put(self.admin.as_str())
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("upload of {remote_path} failed: {e}"))?;
        read_reply(response).await
    }

    /// Removes `remote_path` from the server.
    pub async fn delete_file(&self, remote_path: &str) -> Result<Value, Error> {
        let form = Form::new().text("path", remote_path.to_string());

        tracing::info!("deleting {remote_path}");
        let response = self
            .http
            .delete(self.admin.as_str())
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("delete of {remote_path} failed: {e}"))?;
        read_reply(response).await
    }
}

/// Public download URL of `file_name` released under `tag_name`.
///
/// Never touches the network.
#[must_use]
pub fn artifact_download_url(tag_name: &str, file_name: &str) -> String {
    download_url(DEFAULT_BASE_URL, tag_name, file_name)
}

/// Same as [`artifact_download_url`] against another server, such as the
/// one named by `SITMC_TEMP_SERVER_URL`.
#[must_use]
pub fn artifact_download_url_at(base: &Url, tag_name: &str, file_name: &str) -> String {
    download_url(base.as_str(), tag_name, file_name)
}

fn download_url(base: &str, tag_name: &str, file_name: &str) -> String {
    format!(
        "{}/{DOWNLOAD_PATH}/{tag_name}/{}",
        base.trim_end_matches('/'),
        sanitize_name_for_uri(file_name)
    )
}

/// Content type guessed from the file extension.
#[must_use]
pub fn content_type_for(path: &Path) -> Option<mime_guess::Mime> {
    mime_guess::from_path(path).first()
}

async fn read_reply(response: Response) -> Result<Value, Error> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!("server responded {status}");
        return Err(Error::Status { status, body });
    }
    tracing::info!("server responded {status}");
    Ok(match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => Value::String(body),
    })
}
