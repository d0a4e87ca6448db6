//! Field-level validation for list drafts.
//!
//! Every check is pure and cheap; drafts re-run it on each change.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Address, InputKind};

pub const REQUIRED: &str = "Required";
pub const INVALID_FORMAT: &str = "Invalid Format";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(https?|ftp)://(localhost|(\d{1,3}\.){3}\d{1,3}|([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,})(:\d{1,5})?([/?#][^\s]*)?$",
    )
    .expect("url pattern")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s@"(),:;<>\[\]\\]+@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$"#)
        .expect("email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
}

impl Default for Validation {
    fn default() -> Self {
        Self::ok()
    }
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn required() -> Self {
        Self::failed(REQUIRED)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

pub fn is_valid_url(raw: &str) -> bool {
    URL_PATTERN.is_match(raw.trim())
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw.trim())
}

/// Validate one raw value against its declared input kind.
pub fn validate(kind: InputKind, raw: &str) -> Validation {
    if raw.trim().is_empty() {
        return Validation::required();
    }
    let well_formed = match kind {
        InputKind::Url => is_valid_url(raw),
        InputKind::Email => is_valid_email(raw),
        InputKind::Text | InputKind::Tel => true,
    };
    if well_formed {
        Validation::ok()
    } else {
        Validation::failed(INVALID_FORMAT)
    }
}

/// Validation record of a scalar draft (value + type columns).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemValidation {
    pub value: Validation,
    pub item_type: Validation,
}

impl ItemValidation {
    pub fn is_valid(&self) -> bool {
        self.value.valid && self.item_type.valid
    }
}

/// The type column is free text and never required.
pub fn validate_item(kind: InputKind, value: &str, _item_type: &str) -> ItemValidation {
    ItemValidation {
        value: validate(kind, value),
        item_type: Validation::ok(),
    }
}

/// Validation record of an address draft. Only city and country are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressValidation {
    pub city: Validation,
    pub country: Validation,
}

impl AddressValidation {
    pub fn is_valid(&self) -> bool {
        self.city.valid && self.country.valid
    }
}

pub fn validate_address(address: &Address) -> AddressValidation {
    AddressValidation {
        city: validate(InputKind::Text, &address.city),
        country: validate(InputKind::Text, &address.country),
    }
}
