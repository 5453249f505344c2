//! Docker availability probe for container-backed integration tests.

use std::path::Path;

/// Whether a Docker daemon looks reachable from this process.
///
/// Tests that need ephemeral containers call this first and skip with a
/// message instead of failing on machines without Docker.
#[must_use]
pub fn available() -> bool {
    if std::env::var_os("DOCKER_HOST").is_some() {
        return true;
    }
    Path::new("/var/run/docker.sock").exists()
}
