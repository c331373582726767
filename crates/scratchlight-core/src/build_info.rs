//! Build-time metadata embedded by the build script.

/// The git commit hash at build time (short form).
pub const GIT_HASH: &str = env!("SCRATCHLIGHT_GIT_HASH");

/// The build profile (`debug` or `release`).
pub const BUILD_PROFILE: &str = env!("SCRATCHLIGHT_BUILD_PROFILE");

/// The crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line for headers and `--version` output, e.g. `"v0.1.0 (abc1234)"`.
///
/// Release builds omit the profile suffix.
pub fn version_string() -> String {
    if BUILD_PROFILE == "release" {
        format!("v{VERSION} ({GIT_HASH})")
    } else {
        format!("v{VERSION} ({GIT_HASH}, {BUILD_PROFILE})")
    }
}
