//! Category and subcategory models.
//!
//! Categories are reference data maintained outside this service; these
//! types are read-only views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use servicehub_core::types::id::{CategoryId, SubcategoryId};

/// A top-level service category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A subcategory that professionals attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Id and name of a subcategory, as embedded in category listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategorySummary {
    pub id: SubcategoryId,
    pub name: String,
}

impl From<&Subcategory> for SubcategorySummary {
    fn from(sub: &Subcategory) -> Self {
        Self {
            id: sub.id,
            name: sub.name.clone(),
        }
    }
}

/// A category with the number of users working in any of its subcategories.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryWithUserCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub subcategories_user_count: i64,
}

/// A category with its subcategories.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithSubcategories {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<SubcategorySummary>,
}
