//! Project identifier resolution
//!
//! Maps a user-supplied project token (numeric id or fuzzy name) to a
//! canonical remote project id.

use crate::error::{Error, Result};
use crate::types::{Project, ProjectId};

/// Resolve `token` against the remote project list
///
/// A positive integer token must equal a project id exactly. Any other token is
/// matched by name in tiers: exact, name contains token, token contains name,
/// then the same three case-insensitively. Within a tier the first project in
/// listed order wins.
pub fn resolve_project_id(token: &str, projects: &[Project]) -> Result<ProjectId> {
    let token = token.trim();

    if let Some(id) = token.parse::<ProjectId>().ok().filter(|id| *id > 0) {
        return projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.id)
            .ok_or_else(|| not_found(token, projects));
    }

    if token.is_empty() {
        return Err(not_found(token, projects));
    }

    match_by_name(token, projects, |s| s.to_string())
        .or_else(|| match_by_name(token, projects, str::to_lowercase))
        .ok_or_else(|| not_found(token, projects))
}

fn match_by_name(
    token: &str,
    projects: &[Project],
    normalize: impl Fn(&str) -> String,
) -> Option<ProjectId> {
    let token = normalize(token);
    let names: Vec<(ProjectId, String)> = projects
        .iter()
        .map(|p| (p.id, normalize(&p.name)))
        .collect();

    names
        .iter()
        .find(|(_, name)| *name == token)
        .or_else(|| names.iter().find(|(_, name)| name.contains(token.as_str())))
        .or_else(|| {
            names
                .iter()
                .find(|(_, name)| !name.is_empty() && token.contains(name.as_str()))
        })
        .map(|(id, _)| *id)
}

fn not_found(token: &str, projects: &[Project]) -> Error {
    Error::ProjectNotFound {
        token: token.to_string(),
        available: projects.to_vec(),
    }
}
