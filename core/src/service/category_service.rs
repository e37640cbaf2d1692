use anyhow::{anyhow, Result};
use tracing::debug;

use crate::model::category::{Category, CategoryPatch};
use crate::repository::{KeyValueStore, Persistence};
use crate::service::{resolve_prefix, Outcome};

/// Owns the category list. Categories are appended in creation order.
///
/// Removing a category leaves tasks that point at it untouched; `lookup`
/// then answers `None` for that id.
pub struct CategoryService<S: KeyValueStore> {
    persistence: Persistence<S>,
    categories: Vec<Category>,
}

impl<S: KeyValueStore> CategoryService<S> {
    pub fn load(persistence: Persistence<S>) -> Self {
        let categories = persistence.load_categories();
        debug!(count = categories.len(), "categories loaded");
        Self {
            persistence,
            categories,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// `None` for an absent id or an id with no category behind it.
    pub fn lookup(&self, id: Option<&str>) -> Option<&Category> {
        let id = id?;
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolves user input: exact id, then name (case-insensitive), then id
    /// prefix.
    pub fn find(&self, id_or_name: &str) -> Result<&Category> {
        if let Some(category) = self.lookup(Some(id_or_name)) {
            return Ok(category);
        }
        let by_name: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(id_or_name))
            .collect();
        match by_name.len() {
            1 => return Ok(by_name[0]),
            0 => {}
            _ => return Err(anyhow!("Several categories are named '{}'; use the id", id_or_name)),
        }
        resolve_prefix(&self.categories, id_or_name, |c| c.id.as_str(), "category")
    }

    pub fn add(&mut self, name: impl Into<String>, color: impl Into<String>) -> Result<Category> {
        let category = Category::new(name, color);
        self.categories.push(category.clone());
        self.persist()?;
        debug!(id = %category.id, "category added");
        Ok(category)
    }

    pub fn update(&mut self, id: &str, patch: CategoryPatch) -> Result<Outcome> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            debug!(id, "category not found");
            return Ok(Outcome::NotFound);
        };
        category.apply(patch);
        self.persist()?;
        Ok(Outcome::Applied)
    }

    pub fn remove(&mut self, id: &str) -> Result<Outcome> {
        let initial_len = self.categories.len();
        self.categories.retain(|c| c.id != id);

        if self.categories.len() == initial_len {
            debug!(id, "category not found");
            return Ok(Outcome::NotFound);
        }

        self.persist()?;
        Ok(Outcome::Applied)
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save_categories(&self.categories)
    }
}
