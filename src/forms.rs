//! Form-input validation.
//!
//! Writer endpoints take flat `key -> value` form data. `FormParser` walks
//! the raw map, coercing strings into typed values and collecting every
//! failure per field instead of bailing on the first one. Malformed input is
//! a normal outcome reported back to the submitter, never a panic and never
//! a 500.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Raw form data as the presentation layer delivers it.
pub type RawForm = HashMap<String, String>;

/// Accumulated validation failures: field name -> human-readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Fold the failures of one sub-form into another. Used when a request is
/// assembled from several prefixed field groups (e.g. `pickup_*` and
/// `delivery_*` addresses on a booking form).
pub fn merge_errors(into: &mut FieldErrors, from: FieldErrors) {
    for (field, mut messages) in from {
        into.entry(field).or_default().append(&mut messages);
    }
}

pub struct FormParser<'a> {
    raw: &'a RawForm,
    prefix: &'a str,
    errors: FieldErrors,
}

impl<'a> FormParser<'a> {
    pub fn new(raw: &'a RawForm) -> Self {
        Self::scoped(raw, "")
    }

    /// Parser that reads `{prefix}{name}` keys and reports errors under the
    /// prefixed field name.
    pub fn scoped(raw: &'a RawForm, prefix: &'a str) -> Self {
        Self {
            raw,
            prefix,
            errors: FieldErrors::new(),
        }
    }

    /// A field submitted as whitespace only counts as absent, matching how
    /// browsers post empty form inputs.
    fn get(&self, name: &str) -> Option<&'a str> {
        self.raw
            .get(&format!("{}{}", self.prefix, name))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn fail(&mut self, name: &str, message: impl Into<String>) {
        self.errors
            .entry(format!("{}{}", self.prefix, name))
            .or_default()
            .push(message.into());
    }

    pub fn required_text(&mut self, name: &str, max_len: usize) -> Option<String> {
        match self.get(name) {
            Some(value) if value.len() > max_len => {
                self.fail(name, format!("must be at most {max_len} characters"));
                None
            }
            Some(value) => Some(value.to_string()),
            None => {
                self.fail(name, "is required");
                None
            }
        }
    }

    pub fn optional_text(&mut self, name: &str, max_len: usize) -> Option<String> {
        let value = self.get(name)?;
        if value.len() > max_len {
            self.fail(name, format!("must be at most {max_len} characters"));
            return None;
        }
        Some(value.to_string())
    }

    fn parse_decimal(&mut self, name: &str, value: &str) -> Option<Decimal> {
        match Decimal::from_str(value) {
            Ok(number) => Some(number),
            Err(_) => {
                self.fail(name, "must be a number");
                None
            }
        }
    }

    /// Required decimal, strictly greater than zero.
    pub fn positive_decimal(&mut self, name: &str) -> Option<Decimal> {
        let raw = match self.get(name) {
            Some(value) => value,
            None => {
                self.fail(name, "is required");
                return None;
            }
        };
        let number = self.parse_decimal(name, raw)?;
        if number <= Decimal::ZERO {
            self.fail(name, "must be greater than 0");
            return None;
        }
        Some(number)
    }

    /// Required decimal, zero or greater.
    pub fn non_negative_decimal(&mut self, name: &str) -> Option<Decimal> {
        let raw = match self.get(name) {
            Some(value) => value,
            None => {
                self.fail(name, "is required");
                return None;
            }
        };
        let number = self.parse_decimal(name, raw)?;
        if number < Decimal::ZERO {
            self.fail(name, "must be zero or greater");
            return None;
        }
        Some(number)
    }

    /// Optional decimal, zero or greater; absent fields take `default`.
    pub fn non_negative_decimal_or(&mut self, name: &str, default: Decimal) -> Decimal {
        let Some(raw) = self.get(name) else {
            return default;
        };
        match self.parse_decimal(name, raw) {
            Some(number) if number < Decimal::ZERO => {
                self.fail(name, "must be zero or greater");
                default
            }
            Some(number) => number,
            None => default,
        }
    }

    pub fn optional_f64(&mut self, name: &str) -> Option<f64> {
        let raw = self.get(name)?;
        match raw.parse::<f64>() {
            Ok(number) => Some(number),
            Err(_) => {
                self.fail(name, "must be a number");
                None
            }
        }
    }

    /// Truthy-string coercion; absent fields take `default`.
    pub fn boolean_or(&mut self, name: &str, default: bool) -> bool {
        let Some(raw) = self.get(name) else {
            return default;
        };
        match raw {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                self.fail(name, "must be a boolean");
                default
            }
        }
    }

    /// Required member of a closed, case-sensitive set.
    pub fn enumerated<T: FromStr>(&mut self, name: &str, label: &str) -> Option<T> {
        let raw = match self.get(name) {
            Some(value) => value,
            None => {
                self.fail(name, "is required");
                return None;
            }
        };
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.fail(name, format!("is not a valid {label}"));
                None
            }
        }
    }

    pub fn required_uuid(&mut self, name: &str) -> Option<Uuid> {
        let raw = match self.get(name) {
            Some(value) => value,
            None => {
                self.fail(name, "is required");
                return None;
            }
        };
        match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.fail(name, "must be a valid UUID");
                None
            }
        }
    }

    pub fn optional_uuid(&mut self, name: &str) -> Option<Uuid> {
        let raw = self.get(name)?;
        match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                self.fail(name, "must be a valid UUID");
                None
            }
        }
    }

    pub fn optional_datetime(&mut self, name: &str) -> Option<DateTime<Utc>> {
        let raw = self.get(name)?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(_) => {
                self.fail(name, "must be an RFC 3339 timestamp");
                None
            }
        }
    }

    pub fn required_bool(&mut self, name: &str) -> Option<bool> {
        let raw = match self.get(name) {
            Some(value) => value,
            None => {
                self.fail(name, "is required");
                return None;
            }
        };
        match raw {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => {
                self.fail(name, "must be a boolean");
                None
            }
        }
    }

    /// Close the parse. `build` runs only when no field failed; every
    /// required accessor has returned `Some` by then, so the `?`s inside the
    /// builder never fire.
    pub fn finish<T>(mut self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            match build() {
                Some(value) => return Ok(value),
                None => self.fail("form", "is incomplete"),
            }
        }
        Err(self.errors)
    }
}
