//! Potion document model and DTOs.
//!
//! The catalog is deliberately permissive: creation and update payloads may
//! carry fields beyond the documented schema, which ride along in the
//! flattened `extra` document and are stored as-is. `_id` is the one field
//! that is never caller-supplied.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// Per-potion quality ratings.
///
/// Both fields are optional at the storage level so partially populated
/// documents (permissive writes) still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<f64>,
}

/// Full potion document from the `potions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Potion {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

/// External-facing potion representation: identical to [`Potion`] except the
/// id is rendered as its hex string rather than an ObjectId.
#[derive(Debug, Clone, Serialize)]
pub struct PotionResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl From<Potion> for PotionResponse {
    fn from(potion: Potion) -> Self {
        PotionResponse {
            id: potion.id.to_hex(),
            name: potion.name,
            price: potion.price,
            score: potion.score,
            count: potion.count,
            ingredients: potion.ingredients,
            ratings: potion.ratings,
            categories: potion.categories,
            vendor_id: potion.vendor_id,
            extra: potion.extra,
        }
    }
}

/// DTO for creating a potion. `name` is the only required field; everything
/// else, including undocumented extras, is optional and stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePotion {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Ratings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

/// DTO for a partial update. Only supplied fields are merged into the
/// stored document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePotion {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub score: Option<f64>,
    pub count: Option<f64>,
    pub ingredients: Option<Vec<String>>,
    pub ratings: Option<Ratings>,
    pub categories: Option<Vec<String>>,
    pub vendor_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl UpdatePotion {
    /// Build the `$set` payload: supplied documented fields plus extras,
    /// with any smuggled `_id` dropped (the identity is immutable).
    pub fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.clone());
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        if let Some(score) = self.score {
            set.insert("score", score);
        }
        if let Some(count) = self.count {
            set.insert("count", count);
        }
        if let Some(ingredients) = &self.ingredients {
            set.insert("ingredients", ingredients.clone());
        }
        if let Some(ratings) = &self.ratings {
            let mut doc = Document::new();
            if let Some(strength) = ratings.strength {
                doc.insert("strength", strength);
            }
            if let Some(flavor) = ratings.flavor {
                doc.insert("flavor", flavor);
            }
            set.insert("ratings", doc);
        }
        if let Some(categories) = &self.categories {
            set.insert("categories", categories.clone());
        }
        if let Some(vendor_id) = &self.vendor_id {
            set.insert("vendor_id", vendor_id.clone());
        }
        for (key, value) in &self.extra {
            if key != "_id" {
                set.insert(key.clone(), value.clone());
            }
        }
        set
    }
}

/// Result descriptor for an update: how many documents matched the id and
/// how many were actually modified.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result descriptor for a delete. A zero count is a success, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Bson};

    #[test]
    fn test_set_document_includes_only_supplied_fields() {
        let update = UpdatePotion {
            price: Some(12.5),
            vendor_id: Some("vendor-1".to_string()),
            ..UpdatePotion::default()
        };

        let set = update.set_document();
        assert_eq!(set.get("price"), Some(&Bson::Double(12.5)));
        assert_eq!(set.get_str("vendor_id").ok(), Some("vendor-1"));
        assert!(!set.contains_key("name"), "unset fields must not appear");
        assert!(!set.contains_key("score"));
    }

    #[test]
    fn test_set_document_carries_extras_but_never_id() {
        let update = UpdatePotion {
            name: Some("Elixir".to_string()),
            extra: doc! { "shelf": "B2", "_id": "forged" },
            ..UpdatePotion::default()
        };

        let set = update.set_document();
        assert_eq!(set.get_str("shelf").ok(), Some("B2"));
        assert!(!set.contains_key("_id"), "_id must be stripped");
    }

    #[test]
    fn test_set_document_merges_partial_ratings() {
        let update = UpdatePotion {
            ratings: Some(Ratings {
                strength: Some(7.0),
                flavor: None,
            }),
            ..UpdatePotion::default()
        };

        let set = update.set_document();
        let ratings = set.get_document("ratings").expect("ratings subdocument");
        assert_eq!(ratings.get("strength"), Some(&Bson::Double(7.0)));
        assert!(!ratings.contains_key("flavor"));
    }
}
