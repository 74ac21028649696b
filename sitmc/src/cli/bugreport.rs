use bugreport::{
    bugreport,
    collector::{CompileTimeInformation, EnvironmentVariables, OperatingSystem, SoftwareVersion},
    format::Markdown,
};
use kernel::{BASE_URL_ENV, TIMEOUT_ENV};

// Never list the auth variable here.
pub fn run() {
    bugreport!()
        .info(SoftwareVersion::default())
        .info(OperatingSystem::default())
        .info(EnvironmentVariables::list(&[
            BASE_URL_ENV,
            TIMEOUT_ENV,
            "RUST_LOG",
            "SHELL",
            "TERM",
        ]))
        .info(CompileTimeInformation::default())
        .print::<Markdown>();
}
