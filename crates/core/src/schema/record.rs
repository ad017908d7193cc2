//! Struct definitions
//!
//! A [`StructDef`] is an ordered list of named fields. Binary codecs process
//! fields in declaration order; the structured form renders each field under
//! a key produced by the struct's [`NameTransform`].

use super::{DefaultFn, Schema};
use crate::error::{Error, Result};
use crate::value::{Record, Value};

/// Key casing applied to rendered names
#[derive(Debug, Clone, Copy, Default)]
pub enum NameTransform {
    /// Keep names unchanged
    #[default]
    Identity,
    /// `lowercase`
    Lower,
    /// `UPPERCASE`
    Upper,
    /// `Capitalized` (first character upper, rest lower)
    Capitalize,
    /// User supplied mapping
    Custom(fn(&str) -> String),
}

impl NameTransform {
    /// Apply the transform to a name
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameTransform::Identity => name.to_string(),
            NameTransform::Lower => name.to_lowercase(),
            NameTransform::Upper => name.to_uppercase(),
            NameTransform::Capitalize => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.as_str().to_lowercase().chars())
                        .collect(),
                    None => String::new(),
                }
            }
            NameTransform::Custom(f) => f(name),
        }
    }
}

/// One named field of a struct
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field schema
    pub schema: Schema,
    /// Structured default used when the key is absent
    pub default: Option<DefaultFn>,
}

/// Immutable struct definition
#[derive(Debug, Clone)]
pub struct StructDef {
    name: String,
    fields: Vec<Field>,
    rename: NameTransform,
}

impl StructDef {
    /// Start defining a struct
    pub fn builder(name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            name: name.into(),
            fields: Vec::new(),
            rename: NameTransform::Identity,
        }
    }

    /// Struct name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Key casing of the structured form
    pub fn rename(&self) -> NameTransform {
        self.rename
    }

    /// Structured key of a field
    pub fn key_of(&self, field: &Field) -> String {
        self.rename.apply(&field.name)
    }

    /// Empty record tagged with this struct's name
    pub fn record(&self) -> Record {
        Record::new(self.name.clone())
    }
}

/// Builder for [`StructDef`]
#[derive(Debug)]
pub struct StructBuilder {
    name: String,
    fields: Vec<Field>,
    rename: NameTransform,
}

impl StructBuilder {
    /// Append a field
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            schema: schema.into(),
            default: None,
        });
        self
    }

    /// Append a field with a structured default
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        schema: impl Into<Schema>,
        default: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            schema: schema.into(),
            default: Some(DefaultFn::new(default)),
        });
        self
    }

    /// Set the key casing of the structured form
    pub fn rename(mut self, transform: NameTransform) -> Self {
        self.rename = transform;
        self
    }

    /// Validate and freeze the definition
    pub fn build(self) -> Result<StructDef> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::DuplicateField {
                    struct_name: self.name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(StructDef {
            name: self.name,
            fields: self.fields,
            rename: self.rename,
        })
    }
}
