//! Known platform identifiers
//!
//! Upstream platform ids arrive as route parameters; the table below only
//! gives them a display name. Unknown ids are still valid filters.

/// Fallback title when a platform id is not in the table
pub const UNKNOWN_PLATFORM_NAME: &str = "Games";

/// Platform id and display name pairs
pub const KNOWN_PLATFORMS: &[(&str, &str)] = &[
    ("1", "Xbox One"),
    ("3", "iOS"),
    ("4", "PC"),
    ("7", "Nintendo Switch"),
    ("18", "PlayStation 4"),
    ("21", "Android"),
    ("186", "Xbox Series X/S"),
    ("187", "PlayStation 5"),
];

/// Display name for a platform id
pub fn platform_name(platform_id: &str) -> &'static str {
    KNOWN_PLATFORMS
        .iter()
        .find(|(id, _)| *id == platform_id.trim())
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_PLATFORM_NAME)
}
