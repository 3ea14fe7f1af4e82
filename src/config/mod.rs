pub mod database;
pub mod logging;
pub mod redis;

use std::env;

/// Reads an optional variable, treating an empty value as unset.
pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn flag_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

pub fn report_path() -> Option<std::path::PathBuf> {
    optional_var("CLEANUP_REPORT_PATH").map(Into::into)
}
