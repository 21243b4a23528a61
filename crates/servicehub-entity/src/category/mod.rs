//! Service categories and their subcategories.

pub mod model;

pub use model::{
    Category, CategoryWithSubcategories, CategoryWithUserCount, Subcategory, SubcategorySummary,
};
