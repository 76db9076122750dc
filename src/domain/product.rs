use crate::domain::column::ColumnId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a product on the board.
///
/// Assigned as `max(existing ids) + 1` on creation and never reused after
/// deletion, so ids are strictly monotonic over the lifetime of a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A draggable product card assigned to exactly one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub formatted_price: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Which column the product renders under. Mutated by drag operations.
    pub column_id: ColumnId,
}

/// Product fields before an id is assigned, input to the store's add operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub column_id: ColumnId,
}

impl ProductDraft {
    /// Creates a draft. Negative prices are clamped to zero.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        column_id: ColumnId,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.max(0.0),
            image: image.into(),
            column_id,
        }
    }

    /// Materializes the draft with a freshly assigned id, deriving the
    /// display price and stamping both timestamps
    pub(crate) fn into_product(self, id: ProductId) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: self.name,
            description: self.description,
            formatted_price: format_usd(self.price),
            price: self.price,
            image: self.image,
            created_at: now,
            updated_at: now,
            column_id: self.column_id,
        }
    }
}

/// Formats a non-negative price as US dollars with thousands separators,
/// e.g. `$1,299.99`
pub fn format_usd(price: f64) -> String {
    let cents = (price.max(0.0) * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${grouped}.{frac:02}")
}
