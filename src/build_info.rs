//! Version stamp filled in by the build script.

pub const BUILD_COMMIT: &str = env!("THOUSAND_ROOMS_COMMIT");
pub const BUILD_DATE: &str = env!("THOUSAND_ROOMS_BUILD_DATE");

/// `thousand-rooms 0.1.0 (2026-10-17, abc1234)`
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
