//! Wire formats of the catalog API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{ProductDraft, RawProduct};

/// List response: paged envelope or a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope {
    Page { products: Vec<RawProduct> },
    Bare(Vec<RawProduct>),
}

impl ListEnvelope {
    pub(crate) fn into_records(self) -> Vec<RawProduct> {
        match self {
            Self::Page { products } | Self::Bare(products) => products,
        }
    }
}

/// Create/update request body
///
/// The upstream requires `brand` and `description` on top of the draft.
#[derive(Debug, Serialize)]
pub(crate) struct DraftPayload<'a> {
    pub title: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: &'a str,
    pub image: Option<&'a str>,
    pub stock: i64,
    pub brand: &'static str,
    pub description: String,
}

impl<'a> DraftPayload<'a> {
    pub(crate) fn new(draft: &'a ProductDraft) -> Self {
        Self {
            title: &draft.title,
            price: draft.price,
            category: &draft.category,
            image: draft.image.as_deref(),
            stock: draft.stock,
            brand: "Generic",
            description: format!(
                "{} - Quality product in {} category",
                draft.title, draft.category
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_shapes() {
        let page: ListEnvelope = serde_json::from_value(json!({
            "products": [{ "id": 1 }, { "id": 2 }],
            "total": 194,
            "skip": 0,
            "limit": 2
        }))
        .unwrap();
        assert_eq!(page.into_records().len(), 2);

        let bare: ListEnvelope = serde_json::from_value(json!([{ "id": 1 }])).unwrap();
        assert_eq!(bare.into_records().len(), 1);
    }

    #[test]
    fn test_payload_adds_upstream_fields() {
        let draft = ProductDraft {
            title: "Kettle".into(),
            price: Decimal::new(2450, 2),
            category: "kitchen".into(),
            image: None,
            stock: 4,
        };
        let body = serde_json::to_value(DraftPayload::new(&draft)).unwrap();
        assert_eq!(body["price"], json!(24.5));
        assert_eq!(body["brand"], "Generic");
        assert_eq!(
            body["description"],
            "Kettle - Quality product in kitchen category"
        );
    }
}
