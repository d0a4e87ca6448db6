use std::fmt;

use tracing::trace;

use crate::{
    domain::{Address, AddressField},
    validation::{AddressValidation, Validation, validate_address},
};

use super::{
    countries::{countries, provinces_for},
    select::SelectionWidget,
};

pub type ValidityListener = Box<dyn FnMut(bool)>;

/// Sub-form for one [`Address`] draft.
///
/// Seven free-text fields plus two cascading pickers: the province picker is
/// scoped to the selected country and is reset whenever the country changes.
pub struct AddressEditor {
    address: Address,
    validation: AddressValidation,
    country_picker: SelectionWidget,
    province_picker: SelectionWidget,
    on_validation_change: Option<ValidityListener>,
    last_reported: Option<bool>,
}

impl AddressEditor {
    pub fn new(address: Address) -> Self {
        let country_picker =
            SelectionWidget::new("Country", countries().to_vec(), address.country.clone());
        let province_picker = SelectionWidget::new(
            "Province",
            provinces_for(&address.country),
            address.province.clone(),
        );
        let validation = validate_address(&address);
        Self {
            address,
            validation,
            country_picker,
            province_picker,
            on_validation_change: None,
            last_reported: None,
        }
    }

    /// Fresh draft with the country preselected.
    pub fn blank(default_country: &str) -> Self {
        Self::new(Address::in_country(default_country))
    }

    /// Register a listener for validity changes. It fires immediately with
    /// the current validity, then on every transition.
    pub fn on_validation_change(&mut self, listener: ValidityListener) {
        self.on_validation_change = Some(listener);
        self.last_reported = None;
        self.report_validity();
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn into_address(self) -> Address {
        self.address
    }

    pub fn validation(&self) -> &AddressValidation {
        &self.validation
    }

    /// Validation of one field; fields without rules are always valid.
    pub fn field_validation(&self, field: AddressField) -> Validation {
        match field {
            AddressField::City => self.validation.city.clone(),
            AddressField::Country => self.validation.country.clone(),
            _ => Validation::ok(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn provinces(&self) -> &[String] {
        self.province_picker.candidates()
    }

    pub fn picker(&self, field: AddressField) -> Option<&SelectionWidget> {
        match field {
            AddressField::Country => Some(&self.country_picker),
            AddressField::Province => Some(&self.province_picker),
            _ => None,
        }
    }

    pub fn picker_mut(&mut self, field: AddressField) -> Option<&mut SelectionWidget> {
        match field {
            AddressField::Country => Some(&mut self.country_picker),
            AddressField::Province => Some(&mut self.province_picker),
            _ => None,
        }
    }

    /// Assign one field and re-validate.
    ///
    /// A new country clears the province and swaps the province choices in
    /// the same update, so no stale province is ever observable.
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        if field == AddressField::Country {
            if value != self.address.country {
                trace!(from = %self.address.country, to = %value, "country changed");
            }
            self.province_picker.set_candidates(provinces_for(&value));
            self.address.province.clear();
            self.province_picker.sync_value("");
        }
        self.address.set(field, value);
        let current = self.address.get(field).to_string();
        if let Some(picker) = self.picker_mut(field) {
            picker.sync_value(&current);
        }
        self.revalidate();
    }

    /// Commit the highlighted candidate of an expanded picker into the draft.
    pub fn select_highlighted(&mut self, field: AddressField) -> bool {
        let Some(chosen) = self
            .picker_mut(field)
            .and_then(SelectionWidget::select_highlighted)
        else {
            return false;
        };
        self.set_field(field, chosen);
        true
    }

    fn revalidate(&mut self) {
        self.validation = validate_address(&self.address);
        self.report_validity();
    }

    fn report_validity(&mut self) {
        let valid = self.validation.is_valid();
        if self.last_reported == Some(valid) {
            return;
        }
        if let Some(listener) = self.on_validation_change.as_mut() {
            listener(valid);
            self.last_reported = Some(valid);
        }
    }
}

impl Clone for AddressEditor {
    /// Listeners are not cloned.
    fn clone(&self) -> Self {
        Self {
            address: self.address.clone(),
            validation: self.validation.clone(),
            country_picker: self.country_picker.clone(),
            province_picker: self.province_picker.clone(),
            on_validation_change: None,
            last_reported: None,
        }
    }
}

impl fmt::Debug for AddressEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressEditor")
            .field("address", &self.address)
            .field("validation", &self.validation)
            .field("country_picker", &self.country_picker)
            .field("province_picker", &self.province_picker)
            .finish_non_exhaustive()
    }
}
