//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `wordcaster 0.1.0 (2026-10-16, abc1234, release)`
pub fn version_string() -> String {
    format!(
        "wordcaster {} ({}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT,
        BUILD_PROFILE
    )
}
