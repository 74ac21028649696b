use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use clap::ArgMatches;
use client::{Error, ProgressObserver, RemoteFileClient};
use kernel::Progress;

use super::{DESTINATION_ARG, FILE_ARG, PATH_ARG, SOURCE_ARG, SOURCE_POSITIONAL, TAG_ARG};

pub struct UploadParams {
    pub source: PathBuf,
    pub destination: String,
}

impl UploadParams {
    pub fn from_matches(matches: &ArgMatches) -> Option<Self> {
        let source = matches
            .get_one::<PathBuf>(SOURCE_ARG)
            .or_else(|| matches.get_one::<PathBuf>(SOURCE_POSITIONAL))?
            .clone();
        let destination = matches
            .get_one::<String>(DESTINATION_ARG)
            .cloned()
            .unwrap_or_else(|| super::default_destination(&source));
        Some(Self {
            source,
            destination,
        })
    }
}

/// Logs upload progress once per whole percent.
#[derive(Default)]
struct PercentLogger {
    // last logged whole percent plus one, zero means nothing logged yet
    logged: AtomicU32,
}

impl PercentLogger {
    fn advance(&self, progress: Progress) -> bool {
        let next = (progress.fraction() * 100.0).floor() as u32 + 1;
        self.logged.fetch_max(next, Ordering::Relaxed) < next
    }
}

impl ProgressObserver for PercentLogger {
    fn on_progress(&self, progress: Progress) {
        if self.advance(progress) {
            tracing::info!("{progress}");
        }
    }
}

pub async fn upload(params: UploadParams) -> Result<(), Error> {
    let client = RemoteFileClient::shared()?;
    let observer: Arc<dyn ProgressObserver> = Arc::new(PercentLogger::default());
    let reply = client
        .upload_file_with_progress(&params.source, &params.destination, Some(observer))
        .await?;
    println!("{}", super::render_reply(&reply));
    Ok(())
}

pub async fn delete(matches: &ArgMatches) -> Result<(), Error> {
    let Some(path) = matches.get_one::<String>(PATH_ARG) else {
        return Ok(());
    };
    let client = RemoteFileClient::shared()?;
    let reply = client.delete_file(path).await?;
    println!("{}", super::render_reply(&reply));
    Ok(())
}

/// Prints the download URL against the server named by
/// `SITMC_TEMP_SERVER_URL`, or the public one when unset.
pub fn download_url(matches: &ArgMatches) -> Result<(), Error> {
    if let Some(url) = artifact_url(matches, &|name: &str| std::env::var(name).ok())? {
        println!("{url}");
    }
    Ok(())
}

fn artifact_url<F>(matches: &ArgMatches, lookup: &F) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(tag), Some(file)) = (
        matches.get_one::<String>(TAG_ARG),
        matches.get_one::<String>(FILE_ARG),
    ) else {
        return Ok(None);
    };
    let base = kernel::base_url_from_lookup(lookup)?;
    Ok(Some(client::artifact_download_url_at(&base, tag, file)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::cli::build_cli;

    #[test]
    fn params_default_destination() {
        // Arrange
        let m = build_cli()
            .try_get_matches_from(["sitmc", "/tmp/build/app.zip"])
            .unwrap();

        // Act
        let p = UploadParams::from_matches(&m).unwrap();

        // Assert
        assert_eq!(p.source, PathBuf::from("/tmp/build/app.zip"));
        assert_eq!(p.destination, "build/app.zip");
    }

    #[test]
    fn params_explicit_destination() {
        // Arrange
        let m = build_cli()
            .try_get_matches_from(["sitmc", "--source", "dist/app.zip", "-d", "nightly/app.zip"])
            .unwrap();

        // Act
        let p = UploadParams::from_matches(&m).unwrap();

        // Assert
        assert_eq!(p.source, PathBuf::from("dist/app.zip"));
        assert_eq!(p.destination, "nightly/app.zip");
    }

    #[test]
    fn percent_logger_once_per_percent() {
        // Arrange
        let logger = PercentLogger::default();

        // Act
        let logged: Vec<bool> = [(0, 1000), (4, 1000), (10, 1000), (15, 1000), (1000, 1000)]
            .into_iter()
            .map(|(sent, total)| logger.advance(Progress::new(sent, total)))
            .collect();

        // Assert
        assert_eq!(logged, vec![true, false, true, false, true]);
    }

    #[test]
    fn percent_logger_logs_empty_upload() {
        // Arrange
        let logger = PercentLogger::default();

        // Act
        let logged = logger.advance(Progress::new(0, 0));

        // Assert
        assert!(logged);
    }

    #[test]
    fn artifact_url_honors_server_override() {
        // Arrange
        let m = build_cli()
            .try_get_matches_from(["sitmc", "url", "nightly", "My File.zip"])
            .unwrap();
        let (_, sub) = m.subcommand().unwrap();
        let lookup = |name: &str| {
            (name == kernel::BASE_URL_ENV).then(|| String::from("http://127.0.0.1:5000"))
        };

        // Act
        let url = artifact_url(sub, &lookup).unwrap();

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("http://127.0.0.1:5000/prepare-download/nightly/My%20File.zip")
        );
    }

    #[test]
    fn artifact_url_defaults_to_public_server() {
        // Arrange
        let m = build_cli()
            .try_get_matches_from(["sitmc", "url", "v1.0", "app.zip"])
            .unwrap();
        let (_, sub) = m.subcommand().unwrap();

        // Act
        let url = artifact_url(sub, &|_: &str| None).unwrap();

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://temp.sitmc.club/prepare-download/v1.0/app.zip")
        );
    }

    #[test]
    fn artifact_url_rejects_bad_override() {
        // Arrange
        let m = build_cli()
            .try_get_matches_from(["sitmc", "url", "v1.0", "app.zip"])
            .unwrap();
        let (_, sub) = m.subcommand().unwrap();

        // Act
        let r = artifact_url(sub, &|_: &str| Some(String::from("ftp://example.com")));

        // Assert
        assert!(matches!(
            r,
            Err(Error::Config(kernel::ConfigError::UnsupportedScheme { .. }))
        ));
    }
}
