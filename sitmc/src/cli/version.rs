use std::env;

use kernel::{BASE_URL_ENV, DEFAULT_BASE_URL};

#[derive(Debug, Clone)]
struct VersionInfo {
    pub name: String,
    pub version: String,
    pub server: String,
    pub os: String,
    pub architecture: String,
}

pub fn run() {
    let info = VersionInfo {
        name: clap::crate_name!().to_string(),
        version: clap::crate_version!().to_string(),
        server: env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        os: env::consts::OS.to_string(),
        architecture: env::consts::ARCH.to_string(),
    };

    println!("Name           : {}", info.name);
    println!("Version        : {}", info.version);
    println!("Server         : {}", info.server);
    println!("OS             : {}", info.os);
    println!("Architecture   : {}", info.architecture);
}
