use serde::{Deserialize, Deserializer};

pub const DEFAULT_COUNTRY: &str = "Canada";
pub const DEFAULT_ADDRESS_TYPE: &str = "Official";

/// Declared input kind of a scalar list's value column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputKind {
    #[default]
    Text,
    Url,
    Email,
    Tel,
}

impl InputKind {
    /// Unrecognized names fall back to plain text.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "url" => InputKind::Url,
            "email" => InputKind::Email,
            "tel" => InputKind::Tel,
            _ => InputKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Url => "url",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
        }
    }
}

impl<'de> Deserialize<'de> for InputKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(InputKind::parse_lenient).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Scalar,
    Address,
}

/// Per-instance parameters handed over by the host at mount time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetParameters {
    pub input_type: InputKind,
    pub label: Option<String>,
    pub allow_inline_edit: Option<bool>,
    pub value_kind: Option<ValueKind>,
    pub default_country: Option<String>,
    pub item_type: Option<String>,
}

impl WidgetParameters {
    pub fn from_json(value: &serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value.clone())
    }
}

/// Resolved widget shape. One component covers the scalar list, the
/// address list with inline edit and the add-only address list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub input_kind: InputKind,
    pub label: String,
    pub allow_inline_edit: bool,
    pub value_kind: ValueKind,
    pub default_country: String,
    pub item_type: Option<String>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            input_kind: InputKind::Text,
            label: "Value".to_string(),
            allow_inline_edit: true,
            value_kind: ValueKind::Scalar,
            default_country: DEFAULT_COUNTRY.to_string(),
            item_type: None,
        }
    }
}

impl WidgetOptions {
    pub fn scalar(input_kind: InputKind) -> Self {
        Self {
            input_kind,
            ..Self::default()
        }
    }

    pub fn address() -> Self {
        Self {
            label: "Address".to_string(),
            value_kind: ValueKind::Address,
            item_type: Some(DEFAULT_ADDRESS_TYPE.to_string()),
            ..Self::default()
        }
    }

    pub fn from_parameters(params: &WidgetParameters) -> Self {
        let value_kind = params.value_kind.unwrap_or_default();
        let mut options = match value_kind {
            ValueKind::Scalar => Self::scalar(params.input_type),
            ValueKind::Address => Self::address(),
        };
        if let Some(label) = params.label.as_ref().filter(|label| !label.trim().is_empty()) {
            options.label = label.clone();
        }
        if let Some(allow) = params.allow_inline_edit {
            options.allow_inline_edit = allow;
        }
        if let Some(country) = &params.default_country {
            options.default_country = country.clone();
        }
        if params.item_type.is_some() {
            options.item_type = params.item_type.clone();
        }
        options
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_inline_edit(mut self, enabled: bool) -> Self {
        self.allow_inline_edit = enabled;
        self
    }

    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    pub fn with_item_type(mut self, item_type: Option<String>) -> Self {
        self.item_type = item_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_input_type_falls_back_to_text() {
        let params = WidgetParameters::from_json(&json!({"inputType": "color"})).unwrap();
        assert_eq!(params.input_type, InputKind::Text);
        let params = WidgetParameters::from_json(&json!({"inputType": null})).unwrap();
        assert_eq!(params.input_type, InputKind::Text);
    }

    #[test]
    fn parameters_resolve_into_options() {
        let params =
            WidgetParameters::from_json(&json!({"inputType": "URL", "label": "Website"})).unwrap();
        let options = WidgetOptions::from_parameters(&params);
        assert_eq!(options.input_kind, InputKind::Url);
        assert_eq!(options.label, "Website");
        assert!(options.allow_inline_edit);
        assert_eq!(options.value_kind, ValueKind::Scalar);
    }

    #[test]
    fn address_parameters_default_to_official_canada() {
        let params = WidgetParameters::from_json(&json!({
            "valueKind": "address",
            "allowInlineEdit": false
        }))
        .unwrap();
        let options = WidgetOptions::from_parameters(&params);
        assert_eq!(options.value_kind, ValueKind::Address);
        assert!(!options.allow_inline_edit);
        assert_eq!(options.default_country, "Canada");
        assert_eq!(options.item_type.as_deref(), Some("Official"));
        assert_eq!(options.label, "Address");
    }
}
