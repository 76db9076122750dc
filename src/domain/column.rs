use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a board column (product category)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A named bucket that groups products for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A `{value, label}` pair supplied by the host application.
///
/// An ordered list of these defines the default column set; the core treats
/// it as configuration input at initialization only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn to_column(&self) -> Column {
        Column::new(ColumnId::new(self.value.clone()), self.label.clone())
    }
}

/// The stock product categories used when the host supplies no options
pub fn default_category_options() -> Vec<CategoryOption> {
    [
        "Electronics",
        "Furniture",
        "Clothing",
        "Toys",
        "Groceries",
        "Books",
        "Jewelry",
        "Beauty Products",
    ]
    .into_iter()
    .map(|name| CategoryOption::new(name, name))
    .collect()
}

/// Policy for deriving the id of a newly created column.
///
/// Injectable so hosts that allow identically named columns can opt into
/// collision-free ids instead of title slugs.
pub trait ColumnIdGen {
    fn derive(&self, title: &str) -> ColumnId;
}

/// Slug ids: whitespace collapsed to underscores, uppercased
/// (`"Beauty Products"` becomes `BEAUTY_PRODUCTS`).
///
/// Two columns with the same title collide; use [`UuidIds`] where that matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugIds;

impl ColumnIdGen for SlugIds {
    fn derive(&self, title: &str) -> ColumnId {
        let slug = title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();
        ColumnId::new(slug)
    }
}

/// Random v4 ids, unique regardless of title
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl ColumnIdGen for UuidIds {
    fn derive(&self, _title: &str) -> ColumnId {
        ColumnId::new(Uuid::new_v4().to_string())
    }
}
