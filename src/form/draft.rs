use std::{fmt, str::FromStr};

use crate::{
    domain::{Address, AddressField, InputKind, ItemValue, ListItem, ValueKind, WidgetOptions},
    validation::{ItemValidation, Validation, validate_item},
};

use super::address::AddressEditor;

/// A field of a draft, as named by the host (`value`, `type`, or one of the
/// address keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Value,
    Type,
    Address(AddressField),
}

impl DraftField {
    pub fn label(self, value_label: &str) -> String {
        match self {
            DraftField::Value => value_label.to_string(),
            DraftField::Type => "Type".to_string(),
            DraftField::Address(field) => field.label().to_string(),
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "value" => Ok(DraftField::Value),
            "type" => Ok(DraftField::Type),
            other => AddressField::from_str(other)
                .map(DraftField::Address)
                .map_err(|_| format!("unknown draft field '{other}'")),
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Value => f.write_str("value"),
            DraftField::Type => f.write_str("type"),
            DraftField::Address(field) => f.write_str(field.as_ref()),
        }
    }
}

/// Draft of a scalar entry: the value column plus a free-text type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarDraft {
    kind: InputKind,
    value: String,
    item_type: String,
    validation: ItemValidation,
}

impl ScalarDraft {
    pub fn new(kind: InputKind, value: impl Into<String>, item_type: impl Into<String>) -> Self {
        let mut draft = Self {
            kind,
            value: value.into(),
            item_type: item_type.into(),
            validation: ItemValidation::default(),
        };
        draft.revalidate();
        draft
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn validation(&self) -> &ItemValidation {
        &self.validation
    }

    fn revalidate(&mut self) {
        self.validation = validate_item(self.kind, &self.value, &self.item_type);
    }
}

/// Uncommitted candidate for a new entry or for the entry being edited.
#[derive(Debug, Clone)]
pub enum Draft {
    Scalar(ScalarDraft),
    Address(AddressEditor),
}

impl Draft {
    pub fn blank(options: &WidgetOptions) -> Self {
        match options.value_kind {
            ValueKind::Scalar => Draft::Scalar(ScalarDraft::new(options.input_kind, "", "")),
            ValueKind::Address => Draft::Address(AddressEditor::blank(&options.default_country)),
        }
    }

    /// Seed a draft from a committed entry.
    pub fn from_item(item: &ListItem, options: &WidgetOptions) -> Self {
        match (options.value_kind, &item.value) {
            (ValueKind::Scalar, value) => {
                let text = match value {
                    ItemValue::Text(text) => text.clone(),
                    ItemValue::Address(address) => address.summary(),
                };
                Draft::Scalar(ScalarDraft::new(
                    options.input_kind,
                    text,
                    item.item_type.clone().unwrap_or_default(),
                ))
            }
            (ValueKind::Address, ItemValue::Address(address)) => {
                Draft::Address(AddressEditor::new(address.clone()))
            }
            (ValueKind::Address, ItemValue::Text(text)) => Draft::Address(AddressEditor::new(
                Address {
                    address_line1: text.clone(),
                    ..Address::default()
                },
            )),
        }
    }

    pub fn fields(&self) -> Vec<DraftField> {
        match self {
            Draft::Scalar(_) => vec![DraftField::Value, DraftField::Type],
            Draft::Address(_) => {
                use strum::IntoEnumIterator;
                AddressField::iter().map(DraftField::Address).collect()
            }
        }
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        match (self, field) {
            (Draft::Scalar(draft), DraftField::Value) => Some(draft.value()),
            (Draft::Scalar(draft), DraftField::Type) => Some(draft.item_type()),
            (Draft::Address(editor), DraftField::Address(field)) => Some(editor.address().get(field)),
            (Draft::Address(editor), DraftField::Type) => {
                Some(editor.address().get(AddressField::Type))
            }
            _ => None,
        }
    }

    /// Assign one field and re-validate. Returns `false` when the field does
    /// not exist on this kind of draft.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        let value = value.into();
        match (self, field) {
            (Draft::Scalar(draft), DraftField::Value) => {
                draft.value = value;
                draft.revalidate();
                true
            }
            (Draft::Scalar(draft), DraftField::Type) => {
                draft.item_type = value;
                draft.revalidate();
                true
            }
            (Draft::Address(editor), DraftField::Address(field)) => {
                editor.set_field(field, value);
                true
            }
            (Draft::Address(editor), DraftField::Type) => {
                editor.set_field(AddressField::Type, value);
                true
            }
            _ => false,
        }
    }

    pub fn field_validation(&self, field: DraftField) -> Validation {
        match (self, field) {
            (Draft::Scalar(draft), DraftField::Value) => draft.validation().value.clone(),
            (Draft::Scalar(draft), DraftField::Type) => draft.validation().item_type.clone(),
            (Draft::Address(editor), DraftField::Address(field)) => editor.field_validation(field),
            _ => Validation::ok(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Draft::Scalar(draft) => draft.validation().is_valid(),
            Draft::Address(editor) => editor.is_valid(),
        }
    }

    /// The value to commit. Scalar text is trimmed, the same way it was
    /// validated.
    pub fn to_value(&self) -> ItemValue {
        match self {
            Draft::Scalar(draft) => ItemValue::Text(draft.value.trim().to_string()),
            Draft::Address(editor) => ItemValue::Address(editor.address().clone()),
        }
    }

    /// Entry-level type carried by the draft. Address drafts have none; the
    /// widget decides theirs.
    pub fn item_type(&self) -> Option<String> {
        match self {
            Draft::Scalar(draft) => Some(draft.item_type.clone()),
            Draft::Address(_) => None,
        }
    }

    pub fn as_address_editor(&self) -> Option<&AddressEditor> {
        match self {
            Draft::Address(editor) => Some(editor),
            Draft::Scalar(_) => None,
        }
    }

    pub fn as_address_editor_mut(&mut self) -> Option<&mut AddressEditor> {
        match self {
            Draft::Address(editor) => Some(editor),
            Draft::Scalar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_field_names_parse() {
        assert_eq!("value".parse::<DraftField>(), Ok(DraftField::Value));
        assert_eq!("type".parse::<DraftField>(), Ok(DraftField::Type));
        assert_eq!(
            "postalCode".parse::<DraftField>(),
            Ok(DraftField::Address(AddressField::PostalCode))
        );
        assert!("zip".parse::<DraftField>().is_err());
        assert_eq!(DraftField::Address(AddressField::MapUrl).to_string(), "mapUrl");
    }

    #[test]
    fn blank_scalar_draft_starts_required() {
        let draft = Draft::blank(&WidgetOptions::scalar(InputKind::Email));
        assert!(!draft.is_valid());
        assert_eq!(draft.field_validation(DraftField::Value).message, "Required");
        assert!(draft.field_validation(DraftField::Type).valid);
    }

    #[test]
    fn scalar_draft_ignores_address_fields() {
        let mut draft = Draft::blank(&WidgetOptions::default());
        assert!(!draft.set_field(DraftField::Address(AddressField::City), "Oslo"));
        assert!(draft.set_field(DraftField::Value, "hello"));
        assert!(draft.is_valid());
        assert_eq!(draft.to_value(), ItemValue::from("hello"));
        assert_eq!(draft.item_type().as_deref(), Some(""));
    }

    #[test]
    fn committed_scalar_value_is_trimmed() {
        let mut draft = Draft::blank(&WidgetOptions::scalar(InputKind::Url));
        draft.set_field(DraftField::Value, "  http://x.com \t");
        assert!(draft.is_valid());
        assert_eq!(draft.to_value(), ItemValue::from("http://x.com"));
        assert_eq!(draft.get(DraftField::Value), Some("  http://x.com \t"));
    }

    #[test]
    fn address_draft_type_targets_address_type() {
        let mut draft = Draft::blank(&WidgetOptions::address());
        assert!(draft.set_field(DraftField::Type, "Billing"));
        assert!(!draft.set_field(DraftField::Value, "ignored"));
        assert_eq!(draft.get(DraftField::Address(AddressField::Type)), Some("Billing"));
        assert_eq!(draft.item_type(), None);
        assert_eq!(draft.fields().len(), 9);
    }

    #[test]
    fn seeding_from_existing_item_validates_immediately() {
        let options = WidgetOptions::scalar(InputKind::Url);
        let item = ListItem::new("a", ItemValue::from("http://x.com"), 0).with_type("home");
        let draft = Draft::from_item(&item, &options);
        assert!(draft.is_valid());
        assert_eq!(draft.get(DraftField::Type), Some("home"));

        let stale = ListItem::new("b", ItemValue::from("legacy value"), 1);
        assert!(!Draft::from_item(&stale, &options).is_valid());
    }
}
