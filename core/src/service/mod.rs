pub mod category_service;
pub mod task_service;
pub mod theme_service;

use anyhow::{anyhow, Result};

/// Result of a mutation addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Finds the single item whose id equals `prefix` or starts with it.
pub(crate) fn resolve_prefix<'a, T>(
    items: &'a [T],
    prefix: &str,
    id_of: impl Fn(&T) -> &str,
    kind: &str,
) -> Result<&'a T> {
    if prefix.is_empty() {
        return Err(anyhow!("Empty {} id", kind));
    }

    // 1. Exact match
    if let Some(item) = items.iter().find(|item| id_of(*item) == prefix) {
        return Ok(item);
    }

    // 2. Prefix match
    let matches: Vec<&T> = items
        .iter()
        .filter(|item| id_of(*item).starts_with(prefix))
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(anyhow!("No {} matches id '{}'", kind, prefix)),
        n => Err(anyhow!("Ambiguous {} id '{}' matches {} entries", kind, prefix, n)),
    }
}
