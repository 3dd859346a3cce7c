//! Field keys and field values.

use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;

use super::Draft;

/// Closed set of field names belonging to one form.
///
/// Implemented through [`form_fields!`](crate::form_fields); hand-written
/// implementations are only needed in tests.
pub trait FormField: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Wire/display key of the field.
    fn key(self) -> &'static str;

    /// Name of the form enum, used in error reports.
    fn form_name() -> &'static str;

    /// Every field of the form, in declaration order.
    fn all() -> &'static [Self];

    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.key() == key)
    }

    /// Fields whose current value is no longer admissible after `self`
    /// changed. Called by [`Draft`] right after the write.
    fn stale_dependents(self, _draft: &Draft<Self>) -> Vec<Self> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{key}` for form {form}")]
pub struct UnknownField {
    pub form: &'static str,
    pub key: String,
}

/// Declares a field enum and its [`FormField`] implementation.
///
/// ```ignore
/// form_fields! {
///     pub enum PetField cascade(pet_cascade) {
///         Species => "species",
///         Breed => "breed",
///     }
/// }
/// ```
#[macro_export]
macro_rules! form_fields {
    (@decl $(#[$meta:meta])* $vis:vis $name:ident { $($variant:ident => $key:literal),* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
            pub const NAME: &'static str = stringify!($name);

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::form::UnknownField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|field| field.key() == s)
                    .ok_or_else(|| $crate::form::UnknownField {
                        form: $name::NAME,
                        key: s.to_string(),
                    })
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(self.key())
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident cascade($cascade:path) {
            $($variant:ident => $key:literal),* $(,)?
        }
    ) => {
        $crate::form_fields!(@decl $(#[$meta])* $vis $name { $($variant => $key),* });

        impl $crate::form::FormField for $name {
            fn key(self) -> &'static str {
                $name::key(self)
            }

            fn form_name() -> &'static str {
                $name::NAME
            }

            fn all() -> &'static [Self] {
                $name::ALL
            }

            fn stale_dependents(self, draft: &$crate::form::Draft<Self>) -> Vec<Self> {
                $cascade(self, draft)
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $key:literal),* $(,)?
        }
    ) => {
        $crate::form_fields!(@decl $(#[$meta])* $vis $name { $($variant => $key),* });

        impl $crate::form::FormField for $name {
            fn key(self) -> &'static str {
                $name::key(self)
            }

            fn form_name() -> &'static str {
                $name::NAME
            }

            fn all() -> &'static [Self] {
                $name::ALL
            }
        }
    };
}

/// In-memory file selected by the user (photo, logo).
///
/// The bytes are shared, so cloning a draft never copies image data; the
/// buffer is released once the last draft holding it is dropped or the
/// field is overwritten.
#[derive(Clone, PartialEq, Eq)]
pub struct FileRef {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileRef {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Debug for FileRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRef")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Value stored for a single field. A missing key stands for "no value".
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
    Files(Vec<FileRef>),
}

impl FieldValue {
    /// Blank values do not satisfy a "required" rule.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Files(files) => files.is_empty(),
            FieldValue::Number(n) => n.is_nan(),
            FieldValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(text) => text.trim().replace(',', ".").parse().ok(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileRef]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<FileRef>> for FieldValue {
    fn from(value: Vec<FileRef>) -> Self {
        FieldValue::Files(value)
    }
}

impl From<FileRef> for FieldValue {
    fn from(value: FileRef) -> Self {
        FieldValue::Files(vec![value])
    }
}
