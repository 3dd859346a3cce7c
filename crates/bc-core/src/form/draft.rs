//! Draft state store.
//!
//! Holds every field of a form across all wizard steps, including fields of
//! steps the user has not seen yet.

use std::collections::BTreeMap;

use super::{FieldValue, FileRef, FormField, UnknownField};

/// In-progress, unsubmitted values of one form.
///
/// Rascunho do formulário.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<F: FormField> {
    values: BTreeMap<F, FieldValue>,
}

impl<F: FormField> Default for Draft<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormField> Draft<F> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style write without cascading; meant for seeds and tests.
    pub fn with(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Build a draft from string keys, rejecting keys outside the form.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, UnknownField>
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let field = F::from_key(key).ok_or_else(|| UnknownField {
                form: F::form_name(),
                key: key.to_string(),
            })?;
            values.insert(field, value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, field: F) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Trimmed text value; `None` for missing, blank or non-text values.
    pub fn text(&self, field: F) -> Option<&str> {
        self.get(field)
            .and_then(FieldValue::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn number(&self, field: F) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    /// Missing flags read as `false`.
    pub fn flag(&self, field: F) -> bool {
        self.get(field)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn list(&self, field: F) -> &[String] {
        self.get(field)
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
    }

    pub fn files(&self, field: F) -> &[FileRef] {
        self.get(field)
            .and_then(FieldValue::as_files)
            .unwrap_or(&[])
    }

    pub fn is_blank(&self, field: F) -> bool {
        self.get(field).map_or(true, FieldValue::is_blank)
    }

    pub fn contains(&self, field: F) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    /// Write a value and drop every dependent it invalidates.
    ///
    /// Returns the dependents that were cleared.
    pub fn set(&mut self, field: F, value: impl Into<FieldValue>) -> Vec<F> {
        let value = value.into();
        let previous = self.values.insert(field, value);
        if previous.as_ref() == self.values.get(&field) {
            return Vec::new();
        }
        self.cascade(vec![field])
    }

    /// Remove a value; dependents are cascaded exactly as with [`Draft::set`].
    pub fn clear(&mut self, field: F) -> Vec<F> {
        if self.values.remove(&field).is_none() {
            return Vec::new();
        }
        self.cascade(vec![field])
    }

    /// Apply every value of `partial`, then cascade against the merged
    /// result so consistent parent/dependent pairs survive.
    pub fn merge(&mut self, partial: Draft<F>) -> Vec<F> {
        let mut changed = Vec::new();
        for (field, value) in partial.values {
            let previous = self.values.insert(field, value);
            if previous.as_ref() != self.values.get(&field) {
                changed.push(field);
            }
        }
        self.cascade(changed)
    }

    /// Discard every value, optionally starting over from a seed.
    pub fn reset(&mut self, seed: Option<Draft<F>>) {
        self.values = seed.map(|draft| draft.values).unwrap_or_default();
    }

    fn cascade(&mut self, mut pending: Vec<F>) -> Vec<F> {
        let mut cleared = Vec::new();
        while let Some(parent) = pending.pop() {
            for dependent in parent.stale_dependents(self) {
                if self.values.remove(&dependent).is_some() {
                    cleared.push(dependent);
                    pending.push(dependent);
                }
            }
        }
        cleared
    }
}
