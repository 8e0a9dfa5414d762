//! Picking an application from the installed list.

use crate::domain::{AppError, Application, Result};

/// Maximum number of suggestions shown for an unknown or ambiguous query.
const MAX_CANDIDATES: usize = 5;

/// Find the application a user meant by `query`.
///
/// Tries an exact (case-insensitive) name, then an exact bundle id, then a
/// unique substring of the name.
///
/// # Errors
/// Returns [`AppError::AppNotFound`] when nothing or more than one application matches.
pub fn find_application<'a>(apps: &'a [Application], query: &str) -> Result<&'a Application> {
    let needle = query.trim().to_lowercase();

    if let Some(app) = apps.iter().find(|a| a.name.to_lowercase() == needle) {
        return Ok(app);
    }

    if let Some(app) = apps
        .iter()
        .find(|a| a.bundle_id.as_deref().is_some_and(|id| id.to_lowercase() == needle))
    {
        return Ok(app);
    }

    let matches = filter_applications(apps, &needle);
    match matches.as_slice() {
        [app] => Ok(*app),
        _ => Err(AppError::AppNotFound {
            query: query.to_string(),
            candidates: matches
                .iter()
                .take(MAX_CANDIDATES)
                .map(|a| a.name.clone())
                .collect(),
        }),
    }
}

/// Applications whose name contains `filter`, case-insensitively.
#[must_use]
pub fn filter_applications<'a>(apps: &'a [Application], filter: &str) -> Vec<&'a Application> {
    let needle = filter.trim().to_lowercase();
    apps.iter()
        .filter(|a| needle.is_empty() || a.name.to_lowercase().contains(&needle))
        .collect()
}
