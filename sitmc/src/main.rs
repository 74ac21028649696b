use std::process::ExitCode;

use cli::client::UploadParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let matches = cli::build_cli().get_matches();

    let result = match matches.subcommand() {
        Some((cli::VERSION_SUBCOMMAND, _)) => {
            cli::version::run();
            Ok(())
        }
        Some((cli::BUGREPORT_SUBCOMMAND, _)) => {
            cli::bugreport::run();
            Ok(())
        }
        Some((cli::URL_SUBCOMMAND, url_matches)) => cli::client::download_url(url_matches),
        Some((cli::DELETE_SUBCOMMAND, delete_matches)) => {
            cli::client::delete(delete_matches).await
        }
        _ => match UploadParams::from_matches(&matches) {
            Some(params) => cli::client::upload(params).await,
            None => {
                cli::build_cli().print_help().unwrap_or_default();
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

// stdout is reserved for the server reply
fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sitmc=info,client=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
