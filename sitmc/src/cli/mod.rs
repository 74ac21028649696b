use std::path::{Component, Path, PathBuf};

use clap::{Arg, Command, arg, command, crate_name, value_parser};
use serde_json::Value;

pub mod bugreport;
pub mod client;
pub mod version;

pub const VERSION_SUBCOMMAND: &str = "version";
pub const VERSION_DESCRIPTION: &str = "Display the version and build information";

pub const BUGREPORT_SUBCOMMAND: &str = "bugreport";
pub const BUGREPORT_DESCRIPTION: &str = "Collect information about the system and the environment for bug reports";

pub const DELETE_SUBCOMMAND: &str = "delete";
pub const DELETE_DESCRIPTION: &str = "Delete a file from the server";

pub const URL_SUBCOMMAND: &str = "url";
pub const URL_DESCRIPTION: &str = "Print the download URL of an uploaded artifact";

pub const SOURCE_ARG: &str = "source";
pub const SOURCE_POSITIONAL: &str = "source_positional";
pub const DESTINATION_ARG: &str = "destination";
pub const PATH_ARG: &str = "PATH";
pub const TAG_ARG: &str = "TAG";
pub const FILE_ARG: &str = "FILE";

pub fn build_cli() -> Command {
    command!(crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            Arg::new(SOURCE_POSITIONAL)
                .value_name("SOURCE")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present(SOURCE_ARG)
                .conflicts_with(SOURCE_ARG)
                .help("The path of local file to upload"),
        )
        .arg(
            arg!(-s --source <SOURCE>)
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("The path of local file to upload"),
        )
        .arg(
            arg!(-d --destination <DESTINATION>)
                .required(false)
                .help("The server path where to save the uploaded file. Defaults to <parent dir name>/<file name>"),
        )
        .subcommand(
            Command::new(DELETE_SUBCOMMAND)
                .about(DELETE_DESCRIPTION)
                .arg(arg!(<PATH>).help("Server path of the file to delete")),
        )
        .subcommand(
            Command::new(URL_SUBCOMMAND)
                .about(URL_DESCRIPTION)
                .arg(arg!(<TAG>).help("Release tag the artifact was published under"))
                .arg(arg!(<FILE>).help("File name of the artifact")),
        )
        .subcommand(Command::new(VERSION_SUBCOMMAND).about(VERSION_DESCRIPTION))
        .subcommand(Command::new(BUGREPORT_SUBCOMMAND).about(BUGREPORT_DESCRIPTION))
        .args_conflicts_with_subcommands(true)
        .subcommand_negates_reqs(true)
        .arg_required_else_help(true)
        .disable_version_flag(true)
}

/// Remote path used when none is given: the last component of the directory
/// holding `source` joined with its file name, e.g. `/tmp/build/app.zip`
/// becomes `build/app.zip` and `../app.zip` stays `../app.zip`. A source
/// whose parent is empty, `.` or the root maps to its bare name.
pub fn default_destination(source: &Path) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = source
        .parent()
        .and_then(|p| p.components().next_back())
        .and_then(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some(String::from("..")),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        });
    match dir {
        Some(dir) => format!("{dir}/{file_name}"),
        None => file_name,
    }
}

/// Server replies are opaque, strings go out as is and anything else as
/// pretty JSON.
pub fn render_reply(reply: &Value) -> String {
    match reply {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
