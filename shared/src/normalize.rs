//! Record normalizer
//!
//! Maps upstream payloads into the canonical [`Product`]. Each field falls
//! back independently; the only cross-field rule is SKU derivation from the
//! id. Normalizing an already normalized product is a no-op.

use crate::models::{PLACEHOLDER_IMAGE, Product, ProductDraft, ProductId, RawProduct};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Untitled Product";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A record that cannot become a canonical product
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,

    #[error("record id is not usable: {0}")]
    InvalidId(String),
}

/// Normalize an upstream record
///
/// Fails only when no stable id can be derived; fabricating one would break
/// the one-record-per-id rule of the store.
pub fn normalize(raw: &RawProduct) -> Result<Product, NormalizeError> {
    let id = normalize_id(raw.id.as_ref())?;
    let sku = text(raw.sku.as_ref())
        .map(str::to_string)
        .unwrap_or_else(|| derive_sku(&id));

    Ok(Product {
        title: normalize_title(text(raw.title.as_ref())),
        price: normalize_price(raw.price.as_ref()),
        category: normalize_category(text(raw.category.as_ref())),
        stock: normalize_stock(raw.stock.as_ref()),
        image: pick_image(raw),
        sku,
        id,
    })
}

impl TryFrom<&RawProduct> for Product {
    type Error = NormalizeError;

    fn try_from(raw: &RawProduct) -> Result<Self, Self::Error> {
        normalize(raw)
    }
}

impl ProductDraft {
    /// Apply the same field fallbacks as [`normalize`]
    pub fn normalized(&self) -> ProductDraft {
        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| is_usable_image(s))
            .unwrap_or(PLACEHOLDER_IMAGE);

        ProductDraft {
            title: normalize_title(non_blank(&self.title)),
            price: round_price(self.price),
            category: normalize_category(non_blank(&self.category)),
            image: Some(image.to_string()),
            stock: self.stock.max(0),
        }
    }
}

/// `SKU-<id>` with the id left-padded to three characters
pub fn derive_sku(id: &ProductId) -> String {
    format!("SKU-{:0>3}", id.to_string())
}

fn normalize_id(value: Option<&Value>) -> Result<ProductId, NormalizeError> {
    match value {
        None | Some(Value::Null) => Err(NormalizeError::MissingId),
        Some(Value::Number(n)) => {
            if let Some(id) = n.as_u64() {
                return Ok(ProductId::Int(id));
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                    Ok(ProductId::Int(f as u64))
                }
                _ => Err(NormalizeError::InvalidId(n.to_string())),
            }
        }
        Some(Value::String(s)) => match s.trim() {
            "" => Err(NormalizeError::MissingId),
            id => Ok(ProductId::Text(id.to_string())),
        },
        Some(other) => Err(NormalizeError::InvalidId(other.to_string())),
    }
}

fn normalize_title(title: Option<&str>) -> String {
    title.unwrap_or(DEFAULT_TITLE).to_string()
}

fn normalize_category(category: Option<&str>) -> String {
    category.unwrap_or(DEFAULT_CATEGORY).to_string()
}

fn normalize_price(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };
    round_price(parsed.unwrap_or(Decimal::ZERO))
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn round_price(price: Decimal) -> Decimal {
    if price.is_sign_negative() {
        return Decimal::new(0, 2);
    }
    let mut rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn normalize_stock(value: Option<&Value>) -> u32 {
    let stock = match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    stock
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// First usable of `image`, `thumbnail`, `images[0]`
fn pick_image(raw: &RawProduct) -> String {
    let first_listed = match raw.images.as_ref() {
        Some(Value::Array(items)) => items.first(),
        _ => None,
    };

    [raw.image.as_ref(), raw.thumbnail.as_ref(), first_listed]
        .into_iter()
        .filter_map(text)
        .find(|s| is_usable_image(s))
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

fn is_usable_image(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https" | "data"))
        .unwrap_or(false)
}

fn text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) => non_blank(s),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
