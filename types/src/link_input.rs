//! Normalization for user-entered shortcuts.

use url::Url;

use crate::{Link, ShortcutId};

const FALLBACK_TITLE: &str = "Site";

/// Prefix `https://` unless the input already carries an http(s) scheme.
///
/// Returns `None` for blank input.
#[must_use]
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

/// Title derived from the first label of the URL host, capitalized.
#[must_use]
pub fn title_from_url(url: &str) -> String {
    let Some(label) = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .and_then(|host| host.split('.').next().map(str::to_owned))
        .filter(|label| !label.is_empty())
    else {
        return FALLBACK_TITLE.to_string();
    };

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => FALLBACK_TITLE.to_string(),
    }
}

impl Link {
    /// Build a link from the add-shortcut form.
    ///
    /// A blank `name` falls back to [`title_from_url`]. Blank `raw_url` yields `None`.
    #[must_use]
    pub fn from_input(id: ShortcutId, name: &str, raw_url: &str) -> Option<Self> {
        let url = normalize_url(raw_url)?;
        let name = name.trim();
        let title = if name.is_empty() {
            title_from_url(&url)
        } else {
            name.to_string()
        };
        Some(Self::new(id, title, url))
    }
}
