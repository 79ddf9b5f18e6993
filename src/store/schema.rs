//! Collection schemas and validation
//!
//! A schema lists the typed fields of a collection. Fields it does not name
//! are stored verbatim, except that no string or key anywhere in a document
//! may contain a NUL character. Validation collects every failing path before
//! rejecting so the caller sees the full picture in one response.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use super::{Collection, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    /// Id of a record in another collection, stored as a non-empty string
    Reference(Collection),
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::Reference(_) => "a reference id string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub path: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(path: &'static str, kind: FieldKind) -> Self {
        Self {
            path,
            kind,
            required: true,
        }
    }

    const fn optional(path: &'static str, kind: FieldKind) -> Self {
        Self {
            path,
            kind,
            required: false,
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub collection: Collection,
    pub fields: &'static [FieldSpec],
}

pub static USER_SCHEMA: Schema = Schema {
    collection: Collection::Users,
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("email", FieldKind::String),
    ],
};

pub static PRODUCT_SCHEMA: Schema = Schema {
    collection: Collection::Products,
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("price", FieldKind::Number),
        FieldSpec::optional("description", FieldKind::String),
    ],
};

pub static ORDER_SCHEMA: Schema = Schema {
    collection: Collection::Orders,
    fields: &[
        FieldSpec::required("userId", FieldKind::Reference(Collection::Users)),
        FieldSpec::required("productId", FieldKind::Reference(Collection::Products)),
        FieldSpec::optional("quantity", FieldKind::Number),
    ],
};

impl Schema {
    /// Reference fields and the collection each one points into
    pub fn references(&self) -> impl Iterator<Item = (&'static str, Collection)> + '_ {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Reference(target) => Some((f.path, target)),
            _ => None,
        })
    }

    pub fn validate(&self, doc: &Document) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();

        for field in self.fields {
            match doc.get(field.path) {
                None | Some(Value::Null) => {
                    if field.required {
                        errors.insert(field.path.to_string(), FieldError::required(field.path));
                    }
                }
                Some(value) => {
                    if let Some(err) = check_kind(field, value) {
                        errors.insert(field.path.to_string(), err);
                    }
                }
            }
        }

        for (key, value) in doc {
            if errors.contains_key(key.as_str()) {
                continue;
            }
            let found = if key.contains('\0') {
                Some(key.clone())
            } else {
                nul_path(key, value)
            };
            if let Some(path) = found {
                errors.insert(key.clone(), FieldError::nul_character(&path));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_errors(self.collection, errors))
        }
    }
}

fn check_kind(field: &FieldSpec, value: &Value) -> Option<FieldError> {
    match (field.kind, value) {
        (FieldKind::String | FieldKind::Reference(_), Value::String(s)) if s.is_empty() => {
            if field.required {
                Some(FieldError::required(field.path))
            } else {
                None
            }
        }
        (FieldKind::String | FieldKind::Reference(_), Value::String(_)) => None,
        (FieldKind::Number, Value::Number(_)) => None,
        (kind, other) => Some(FieldError::type_mismatch(field.path, kind, other)),
    }
}

/// First path under `prefix` whose key or string value holds a NUL
fn nul_path(prefix: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.contains('\0') => Some(prefix.to_string()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| nul_path(&format!("{}.{}", prefix, i), item)),
        Value::Object(map) => map.iter().find_map(|(k, v)| {
            let path = format!("{}.{}", prefix, k);
            if k.contains('\0') {
                Some(path)
            } else {
                nul_path(&path, v)
            }
        }),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldErrorKind {
    Required,
    Type,
    Reference,
    /// Content no backend can store (NUL characters)
    Invalid,
}

/// Why a single path was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn required(path: &str) -> Self {
        Self {
            kind: FieldErrorKind::Required,
            path: path.to_string(),
            message: format!("Path `{}` is required.", path),
        }
    }

    pub fn type_mismatch(path: &str, kind: FieldKind, got: &Value) -> Self {
        Self {
            kind: FieldErrorKind::Type,
            path: path.to_string(),
            message: format!(
                "Path `{}` must be {}, got {}.",
                path,
                kind.expected(),
                json_type(got)
            ),
        }
    }

    pub fn nul_character(path: &str) -> Self {
        Self {
            kind: FieldErrorKind::Invalid,
            path: path.to_string(),
            message: format!("Path `{}` contains a NUL character.", path),
        }
    }

    pub fn missing_reference(path: &str, target: Collection, id: &str) -> Self {
        Self {
            kind: FieldErrorKind::Reference,
            path: path.to_string(),
            message: format!("Path `{}` references unknown {} record `{}`.", path, target, id),
        }
    }
}

/// Schema rejection, surfaced to clients as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error, ToSchema)]
#[error("{message}")]
pub struct ValidationError {
    #[schema(example = "orders validation failed: userId: Path `userId` is required.")]
    pub message: String,
    pub errors: BTreeMap<String, FieldError>,
}

impl ValidationError {
    pub fn from_errors(collection: Collection, errors: BTreeMap<String, FieldError>) -> Self {
        let detail = errors
            .iter()
            .map(|(path, e)| format!("{}: {}", path, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            message: format!("{} validation failed: {}", collection, detail),
            errors,
        }
    }

    /// The body could not be read as a document at all
    pub fn malformed_body(collection: Collection, reason: impl std::fmt::Display) -> Self {
        Self {
            message: format!("{} validation failed: {}", collection, reason),
            errors: BTreeMap::new(),
        }
    }
}
