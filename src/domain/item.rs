use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One entry of a repeater field as persisted by the host.
///
/// The JSON shape (`id`, `value`, `type`, `index`) is shared with every other
/// consumer of the field and must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListItem {
    pub id: String,
    pub value: ItemValue,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub index: usize,
}

impl ListItem {
    pub fn new(id: impl Into<String>, value: ItemValue, index: usize) -> Self {
        Self {
            id: id.into(),
            value,
            item_type: None,
            index,
        }
    }

    pub fn with_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Short single-line label used by list renderers.
    pub fn summary(&self) -> String {
        match &self.value {
            ItemValue::Text(text) => text.clone(),
            ItemValue::Address(address) => address.summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ItemValue {
    Text(String),
    Address(Address),
}

impl ItemValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemValue::Text(text) => Some(text),
            ItemValue::Address(_) => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            ItemValue::Address(address) => Some(address),
            ItemValue::Text(_) => None,
        }
    }
}

impl From<String> for ItemValue {
    fn from(value: String) -> Self {
        ItemValue::Text(value)
    }
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        ItemValue::Text(value.to_string())
    }
}

impl From<Address> for ItemValue {
    fn from(value: Address) -> Self {
        ItemValue::Address(value)
    }
}

/// Postal address stored as the value of an address list entry.
///
/// Hosts may omit keys; a missing key reads back as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub country: String,
    pub map_url: String,
    #[serde(rename = "type")]
    pub address_type: String,
}

impl Address {
    pub fn in_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::AddressLine1 => &self.address_line1,
            AddressField::AddressLine2 => &self.address_line2,
            AddressField::AddressLine3 => &self.address_line3,
            AddressField::City => &self.city,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Province => &self.province,
            AddressField::Country => &self.country,
            AddressField::MapUrl => &self.map_url,
            AddressField::Type => &self.address_type,
        }
    }

    /// Plain assignment. Cascading rules (country clears province) live in
    /// the address editor.
    pub(crate) fn set(&mut self, field: AddressField, value: String) {
        let slot = match field {
            AddressField::AddressLine1 => &mut self.address_line1,
            AddressField::AddressLine2 => &mut self.address_line2,
            AddressField::AddressLine3 => &mut self.address_line3,
            AddressField::City => &mut self.city,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Province => &mut self.province,
            AddressField::Country => &mut self.country,
            AddressField::MapUrl => &mut self.map_url,
            AddressField::Type => &mut self.address_type,
        };
        *slot = value;
    }

    pub fn summary(&self) -> String {
        let parts = [
            &self.address_line1,
            &self.address_line2,
            &self.address_line3,
            &self.city,
            &self.province,
            &self.postal_code,
            &self.country,
        ];
        let joined = parts
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if self.address_type.trim().is_empty() {
            joined
        } else {
            format!("[{}] {joined}", self.address_type)
        }
    }
}

/// Addressable fields of an [`Address`], named as the host names them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum AddressField {
    Country,
    Province,
    AddressLine1,
    AddressLine2,
    AddressLine3,
    City,
    PostalCode,
    MapUrl,
    Type,
}

impl AddressField {
    pub fn label(self) -> &'static str {
        match self {
            AddressField::Country => "Country",
            AddressField::Province => "State/Province",
            AddressField::AddressLine1 => "Address Line 1",
            AddressField::AddressLine2 => "Address Line 2",
            AddressField::AddressLine3 => "Address Line 3",
            AddressField::City => "City",
            AddressField::PostalCode => "Postal Code",
            AddressField::MapUrl => "Map Url",
            AddressField::Type => "Address Type",
        }
    }

    /// Country and province are picked from the reference table instead of typed.
    pub fn is_choice(self) -> bool {
        matches!(self, AddressField::Country | AddressField::Province)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn scalar_item_serializes_with_host_field_names() {
        let item = ListItem::new("a1", "http://x.com".into(), 0).with_type("home");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"id": "a1", "value": "http://x.com", "type": "home", "index": 0})
        );
    }

    #[test]
    fn missing_type_is_omitted_and_accepted() {
        let item: ListItem =
            serde_json::from_value(json!({"id": "x", "value": "v", "index": 2})).unwrap();
        assert_eq!(item.item_type, None);
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("type").is_none());
    }

    #[test]
    fn address_value_reads_partial_objects() {
        let item: ListItem = serde_json::from_value(json!({
            "id": "addr",
            "value": {"city": "Ottawa", "country": "Canada", "type": "Head office"},
            "type": "Official",
            "index": 0
        }))
        .unwrap();
        let address = item.value.as_address().expect("address value");
        assert_eq!(address.city, "Ottawa");
        assert_eq!(address.address_type, "Head office");
        assert_eq!(address.postal_code, "");
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["value"]["addressLine1"], json!(""));
        assert_eq!(back["value"]["mapUrl"], json!(""));
    }

    #[test]
    fn address_field_names_match_host_keys() {
        assert_eq!(AddressField::AddressLine1.as_ref(), "addressLine1");
        assert_eq!(AddressField::PostalCode.as_ref(), "postalCode");
        assert_eq!(AddressField::from_str("mapUrl").unwrap(), AddressField::MapUrl);
        assert_eq!(AddressField::from_str("type").unwrap(), AddressField::Type);
        assert!(AddressField::from_str("street").is_err());
    }

    #[test]
    fn summary_skips_blank_parts() {
        let mut address = Address::in_country("Canada");
        address.city = "Toronto".to_string();
        address.address_type = "Home".to_string();
        assert_eq!(address.summary(), "[Home] Toronto, Canada");
    }
}
