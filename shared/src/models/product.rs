//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Image shown when a record has no usable image URL
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Stable product identifier
///
/// Upstream ids are usually integers but are treated as opaque; string ids
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl ProductId {
    /// Same record regardless of whether the upstream sent a number or a string
    pub fn same_record(&self, other: &ProductId) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&ProductId> for Value {
    fn from(id: &ProductId) -> Self {
        match id {
            ProductId::Int(n) => Value::from(*n),
            ProductId::Text(s) => Value::from(s.as_str()),
        }
    }
}

/// Canonical product entity
///
/// Every field is populated; fallbacks are applied by [`crate::normalize`]
/// so nothing downstream has to deal with missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Always carries exactly two fractional digits
    pub price: Decimal,
    pub category: String,
    pub stock: u32,
    pub sku: String,
    pub image: String,
}

impl Product {
    /// Price as displayed, e.g. `"12.50"`
    pub fn price_label(&self) -> String {
        format!("{:.2}", self.price)
    }

    pub fn stock_tier(&self) -> StockTier {
        StockTier::from_stock(self.stock)
    }
}

/// Stock level tier shared by every projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockTier {
    /// More than 10 units
    Healthy,
    /// 1 to 10 units
    Low,
    /// Nothing left
    Out,
}

impl StockTier {
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => Self::Out,
            1..=10 => Self::Low,
            _ => Self::Healthy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Low => "low",
            Self::Out => "out",
        }
    }

    /// Badge style class
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Healthy => "bg-success",
            Self::Low => "bg-warning",
            Self::Out => "bg-danger",
        }
    }
}

/// Record submitted by the editing surface for create/update
///
/// Treated as untrusted input and normalized like upstream data before it
/// is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub image: Option<String>,
    pub stock: i64,
}

impl ProductDraft {
    /// Pre-fill a draft from an existing product (edit mode)
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            image: Some(product.image.clone()),
            stock: i64::from(product.stock),
        }
    }
}

/// Product record as received from the remote API
///
/// Every field is kept loosely typed; the normalizer decides what is usable.
/// Unknown upstream fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Value>,
}

impl From<&Product> for RawProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(Value::from(&product.id)),
            title: Some(Value::from(product.title.as_str())),
            price: Some(Value::from(product.price_label())),
            category: Some(Value::from(product.category.as_str())),
            stock: Some(Value::from(product.stock)),
            sku: Some(Value::from(product.sku.as_str())),
            image: Some(Value::from(product.image.as_str())),
            thumbnail: None,
            images: None,
        }
    }
}
