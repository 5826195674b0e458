//! Path utilities for locating the configuration file.

use std::path::PathBuf;

/// Name of the per-user configuration directory.
const APP_DIR: &str = "catalog-view";

/// Returns the default configuration file path.
///
/// Resolves to `$XDG_CONFIG_HOME/catalog-view/config.toml`, falling back to
/// `~/.config/catalog-view/config.toml`. Returns `None` when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

    Some(base.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when `HOME` is unset, are returned unchanged.
///
/// # Examples
///
/// ```
/// use catalog_view::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
