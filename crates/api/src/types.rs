//! Wire shapes that exist only at the API boundary.
//!
//! Collection records arrive without a category (the sub-resource path is
//! the category), so they are stamped on the way in; everything else maps
//! directly onto `loomline-core` types.

use chrono::{DateTime, Utc};
use loomline_core::CatalogItem;
use loomline_core::types::{Category, ProductId, price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog record as the category sub-resources return it: no category
/// field of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default, with = "price::lenient")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inspiration: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Stamp the category the record was fetched under.
    #[must_use]
    pub fn into_item(self, category: Category) -> CatalogItem {
        CatalogItem {
            id: self.id,
            category,
            name: self.name,
            price: self.price,
            image: self.image,
            inspiration: self.inspiration,
            created_at: self.created_at,
        }
    }
}

/// Body for product create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(with = "price::lenient")]
    pub price: Decimal,
    pub image: String,
    pub inspiration: String,
}

/// Body for `POST /contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub message: String,
}

/// Successful contact submission response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactReceipt {
    /// Confirmation text to show the user, when the server provides one.
    #[serde(default)]
    pub message: Option<String>,
}

/// Error envelope used by submission endpoints on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_stamped_with_category() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id": 3, "name": "Orbit Tote", "price": 1500, "inspiration": "space"}"#,
        )
        .expect("deserialize");
        let item = record.into_item(Category::Bags);
        assert_eq!(item.category, Category::Bags);
        assert_eq!(item.name, "Orbit Tote");
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_product_input_serializes_price_as_number() {
        let input = ProductInput {
            name: "Tide Tee".to_string(),
            price: Decimal::new(950, 0),
            image: "https://img.example/tide.jpg".to_string(),
            inspiration: "ocean".to_string(),
        };
        let json = serde_json::to_value(&input).expect("serialize");
        assert!(json.get("price").is_some_and(serde_json::Value::is_number));
    }
}
