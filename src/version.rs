// Version information for the Posgrados Catalog Node

/// Full version string with feature description
pub const VERSION: &str = "v1.2.0-snapshot-refresh-2025-11-02";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.2.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-02";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "catalog-scraping",
    "fact-mining",
    "snapshot-cache",
    "scheduled-refresh",
    "manual-refresh-trigger",
    "grounded-answers",
    "health-reporting",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Posgrados Catalog Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
