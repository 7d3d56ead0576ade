//! Project naming from remote URLs and directory names

use regex::Regex;
use std::sync::LazyLock;

// SSH format: git@host:group/repo.git
static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/@:]+@[^:]+:(.+?)/?$").expect("hardcoded scp regex is valid")
});

/// Derive a project name from a remote URL: last path segment without `.git`
///
/// Handles `https://host/group/repo.git`, `ssh://git@host/group/repo` and
/// `git@host:group/repo.git`.
pub fn project_name_from_url(url: &str) -> Option<String> {
    let url = url.trim();

    let path = if let Some(caps) = SCP_LIKE.captures(url) {
        caps.get(1)?.as_str().to_string()
    } else if let Ok(parsed) = url::Url::parse(url) {
        parsed.path().to_string()
    } else {
        url.to_string()
    };

    let segment = path.trim_end_matches('/').rsplit(['/', ':']).next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Turn a directory base name into a display name
///
/// `my-cool_app` becomes `My Cool App`.
pub fn humanize_dir_name(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
