//! Category listings.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use servicehub_core::error::ErrorKind;
use servicehub_core::result::AppResult;
use servicehub_database::store::CategoryStore;
use servicehub_entity::category::{CategoryWithSubcategories, CategoryWithUserCount};

/// The two shapes a category listing can take.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CategoryListing {
    /// Categories ranked by how many users work in them.
    WithUserCount(Vec<CategoryWithUserCount>),
    /// Categories with their subcategories, by name.
    WithSubcategories(Vec<CategoryWithSubcategories>),
}

impl CategoryListing {
    /// Number of categories in the listing.
    pub fn len(&self) -> usize {
        match self {
            Self::WithUserCount(items) => items.len(),
            Self::WithSubcategories(items) => items.len(),
        }
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only access to the category catalog.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").finish_non_exhaustive()
    }
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// Lists categories, either with their subcategories or with user counts.
    pub async fn list(&self, include_subcategories: bool) -> AppResult<CategoryListing> {
        let listing = if include_subcategories {
            self.categories
                .list_with_subcategories()
                .await
                .map(CategoryListing::WithSubcategories)
        } else {
            self.categories
                .list_with_user_count()
                .await
                .map(CategoryListing::WithUserCount)
        }
        .map_err(|e| e.remap(ErrorKind::BadRequest, "failed to list categories"))?;

        debug!(count = listing.len(), include_subcategories, "Listed categories");
        Ok(listing)
    }
}
