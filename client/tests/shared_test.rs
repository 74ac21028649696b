// Separate test binary: it edits the process environment, which no other
// test in this binary reads.
use std::env;
use std::ptr;

use client::{Error, RemoteFileClient};
use kernel::{ConfigError, AUTH_ENV, BASE_URL_ENV, TIMEOUT_ENV};

#[test]
fn shared_client_needs_token_then_is_built_once() {
    // Arrange
    env::remove_var(AUTH_ENV);
    env::remove_var(BASE_URL_ENV);
    env::remove_var(TIMEOUT_ENV);

    // Act
    let unconfigured = RemoteFileClient::shared();

    // Assert
    assert!(matches!(
        unconfigured,
        Err(Error::Config(ConfigError::MissingToken { var: AUTH_ENV }))
    ));

    // Arrange
    env::set_var(AUTH_ENV, "shared-token");

    // Act
    let first = RemoteFileClient::shared().unwrap();
    env::set_var(AUTH_ENV, "rotated-token");
    let second = RemoteFileClient::shared().unwrap();

    // Assert
    assert!(ptr::eq(first, second));
    assert_eq!(second.config().token(), "shared-token");
}
