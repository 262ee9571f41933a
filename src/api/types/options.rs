//! Dropdown option items
//!
//! Reference resources are rendered as `{"value", "label"}` pairs for
//! select inputs.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Client};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl From<&Category> for OptionItem {
    fn from(category: &Category) -> Self {
        Self {
            value: category.id.clone(),
            label: category.name.clone(),
        }
    }
}

impl From<&Client> for OptionItem {
    fn from(client: &Client) -> Self {
        Self {
            value: client.id.clone(),
            label: client.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_option_shape() {
        let category = Category::new("Banners").unwrap();
        let option = OptionItem::from(&category);

        assert_eq!(option.value, category.id);
        assert_eq!(option.label, "Banners");

        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["label"], "Banners");
        assert!(json.get("value").is_some());
    }
}
