use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Form data
// ============================================================================

/// Editable state of the product details form.
///
/// String fields hold the raw input values; `category_id` / `brand_id` are
/// references to catalog entries selected in dropdowns and are `None` until
/// the user picks one. The serialized shape (camelCase) is also the draft
/// layout persisted to localStorage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub article: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub weight: String,

    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,

    #[serde(rename = "brandId")]
    pub brand_id: Option<i64>,
}

impl ProductFormData {
    /// Look up a string field by its form name. Identifier fields
    /// (`categoryId`, `brandId`) are not strings and are not reachable here.
    pub fn string_field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "article" => Some(&self.article),
            "description" => Some(&self.description),
            "price" => Some(&self.price),
            "weight" => Some(&self.weight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape_uses_camel_case_ids() {
        let form = ProductFormData {
            name: "Мойка Granula 5502".into(),
            article: "GR-5502".into(),
            category_id: Some(12),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["categoryId"], json!(12));
        assert_eq!(value["brandId"], json!(null));
        assert_eq!(value["article"], json!("GR-5502"));
    }

    #[test]
    fn test_string_field_lookup() {
        let form = ProductFormData {
            weight: "12.5".into(),
            ..Default::default()
        };
        assert_eq!(form.string_field("weight"), Some("12.5"));
        assert_eq!(form.string_field("categoryId"), None);
        assert_eq!(form.string_field("unknown"), None);
    }
}
