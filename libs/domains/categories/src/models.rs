use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Three or six hex digits with a leading `#`
pub static COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("color regex is valid")
});

/// Color assigned when the client does not send one
pub const DEFAULT_COLOR: &str = "#000000";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Category entity - stored in the `categories` collection
///
/// Instants are stored as integer epoch milliseconds; clients receive
/// [`CategoryResponse`] with RFC 3339 timestamps instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Display color, e.g. `#FF0000`
    #[validate(regex(path = *COLOR_REGEX, message = "Color must be in hex format (e.g. #FF0000)"))]
    pub color: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(regex(path = *COLOR_REGEX, message = "Color must be in hex format (e.g. #FF0000)"))]
    pub color: String,
}

/// DTO for updating an existing category
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Query filters for listing categories
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Case-insensitive name fragment
    pub name: Option<String>,
}

/// Category as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl Category {
    /// Create a new category from CreateCategory DTO
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            color: input.color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateCategory DTO
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        self.updated_at = Utc::now();
    }
}
