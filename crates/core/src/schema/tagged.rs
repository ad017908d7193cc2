//! Tagged-union definitions
//!
//! An [`EnumDef`] is an arena of variants indexed both by discriminant and by
//! name. Definitions are produced by [`EnumBuilder`], which assigns missing
//! discriminants (previous + 1, starting at 0) and rejects duplicates.
//!
//! ## Discriminant Width
//!
//! The discriminant is written with the enum's [`TagType`]. `TagType::Auto`
//! defers the choice to the call context: Borsh uses the configured
//! `borsh_tag` (U8 by default), ZeroCopy the configured `zero_copy_tag`
//! (U64 by default). Auto-tagged discriminants must fit in a U8.

use super::{Atomic, NameTransform, Schema};
use crate::error::{Error, Result};
use crate::value::{Value, VariantValue};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Discriminant type of an enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    /// Always this integer atomic
    Fixed(Atomic),
    /// Chosen by the call context
    Auto,
}

impl Default for TagType {
    fn default() -> Self {
        TagType::Fixed(Atomic::u8())
    }
}

impl TagType {
    /// Concrete atomic given the context's auto tag
    pub fn resolve(self, auto: Atomic) -> Atomic {
        match self {
            TagType::Fixed(atomic) => atomic,
            TagType::Auto => auto,
        }
    }
}

/// One case of a tagged union
#[derive(Debug, Clone)]
pub struct VariantDef {
    /// Variant name
    pub name: String,
    /// Integer discriminant
    pub discriminant: i128,
    /// Payload schema, if the variant carries one
    pub payload: Option<Schema>,
}

impl VariantDef {
    /// Check if this variant carries a payload
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

/// Immutable tagged-union definition
#[derive(Debug, Clone)]
pub struct EnumDef {
    name: String,
    variants: Vec<VariantDef>,
    by_discriminant: FxHashMap<i128, usize>,
    by_name: FxHashMap<String, usize>,
    tag: TagType,
    tag_key: Option<String>,
    tag_names: NameTransform,
}

impl EnumDef {
    /// Start defining an enum
    pub fn builder(name: impl Into<String>) -> EnumBuilder {
        EnumBuilder {
            name: name.into(),
            entries: Vec::new(),
            tag: TagType::default(),
            tag_key: None,
            tag_names: NameTransform::Identity,
        }
    }

    /// Enum name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in declaration order
    pub fn variants(&self) -> &[VariantDef] {
        &self.variants
    }

    /// Discriminant type
    pub fn tag(&self) -> TagType {
        self.tag
    }

    /// Structured tag key, if payload fields are merged at the top level
    pub fn tag_key(&self) -> Option<&str> {
        self.tag_key.as_deref()
    }

    /// Transform applied to rendered variant names
    pub fn tag_names(&self) -> NameTransform {
        self.tag_names
    }

    /// Check if no variant carries a payload
    pub fn is_unit_only(&self) -> bool {
        self.variants.iter().all(|v| !v.has_payload())
    }

    /// Look up a variant by name
    pub fn variant(&self, name: &str) -> Option<&VariantDef> {
        self.by_name.get(name).map(|&i| &self.variants[i])
    }

    /// Look up a variant by discriminant
    pub fn variant_by_discriminant(&self, discriminant: i128) -> Option<&VariantDef> {
        self.by_discriminant
            .get(&discriminant)
            .map(|&i| &self.variants[i])
    }

    /// Rendered tag text of a variant
    pub fn tag_text(&self, variant: &VariantDef) -> String {
        self.tag_names.apply(&variant.name)
    }

    /// Inverse of [`tag_text`](Self::tag_text)
    pub fn variant_by_tag_text(&self, text: &str) -> Option<&VariantDef> {
        self.variants.iter().find(|v| self.tag_text(v) == text)
    }

    /// Build a value of the named variant
    ///
    /// Fails if the variant is unknown or if payload presence disagrees
    /// with the declaration.
    pub fn value(&self, name: &str, payload: Option<Value>) -> Result<Value> {
        let variant = self.variant(name).ok_or_else(|| Error::UnknownVariantName {
            enum_name: self.name.clone(),
            name: name.to_string(),
        })?;
        if variant.has_payload() != payload.is_some() {
            return Err(Error::PayloadMismatch {
                enum_name: self.name.clone(),
                variant: variant.name.clone(),
                expects_payload: variant.has_payload(),
            });
        }
        Ok(self.instantiate(variant, payload))
    }

    /// Build a value of a payload-less variant
    pub fn unit_value(&self, name: &str) -> Result<Value> {
        self.value(name, None)
    }

    /// Build a value of a variant already known to belong to this enum
    pub fn instantiate(&self, variant: &VariantDef, payload: Option<Value>) -> Value {
        Value::Variant(VariantValue {
            enum_name: self.name.clone(),
            name: variant.name.clone(),
            discriminant: variant.discriminant,
            payload: payload.map(Box::new),
        })
    }
}

struct PendingVariant {
    name: String,
    discriminant: Option<i128>,
    payload: Option<Schema>,
}

/// Builder for [`EnumDef`]
pub struct EnumBuilder {
    name: String,
    entries: Vec<PendingVariant>,
    tag: TagType,
    tag_key: Option<String>,
    tag_names: NameTransform,
}

impl EnumBuilder {
    fn push(mut self, name: impl Into<String>, discriminant: Option<i128>, payload: Option<Schema>) -> Self {
        self.entries.push(PendingVariant {
            name: name.into(),
            discriminant,
            payload,
        });
        self
    }

    /// Variant without payload, auto-assigned discriminant
    pub fn unit(self, name: impl Into<String>) -> Self {
        self.push(name, None, None)
    }

    /// Variant without payload, explicit discriminant
    pub fn unit_with(self, name: impl Into<String>, discriminant: i128) -> Self {
        self.push(name, Some(discriminant), None)
    }

    /// Variant with payload, auto-assigned discriminant
    pub fn variant(self, name: impl Into<String>, payload: impl Into<Schema>) -> Self {
        self.push(name, None, Some(payload.into()))
    }

    /// Variant with payload, explicit discriminant
    pub fn variant_with(
        self,
        name: impl Into<String>,
        discriminant: i128,
        payload: impl Into<Schema>,
    ) -> Self {
        self.push(name, Some(discriminant), Some(payload.into()))
    }

    /// Set the discriminant type
    pub fn tag(mut self, tag: TagType) -> Self {
        self.tag = tag;
        self
    }

    /// Merge payload fields next to this key in the structured form
    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = Some(key.into());
        self
    }

    /// Transform rendered variant names
    pub fn tag_names(mut self, transform: NameTransform) -> Self {
        self.tag_names = transform;
        self
    }

    /// Assign discriminants, validate, and freeze the definition
    pub fn build(self) -> Result<EnumDef> {
        let enum_name = self.name;
        if self.entries.is_empty() {
            return Err(Error::EmptyEnum(enum_name));
        }

        let bound = match self.tag {
            TagType::Fixed(atomic) if !atomic.kind.is_integer() => {
                return Err(Error::InvalidTagType {
                    enum_name,
                    tag: atomic.to_string(),
                });
            }
            TagType::Fixed(atomic) => atomic,
            TagType::Auto => Atomic::u8(),
        };

        let mut variants: Vec<VariantDef> = Vec::with_capacity(self.entries.len());
        let mut by_discriminant = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        let mut prev: Option<i128> = None;

        for entry in self.entries {
            let discriminant = match (entry.discriminant, prev) {
                (Some(explicit), _) => Some(explicit),
                (None, None) => Some(0),
                (None, Some(p)) => p.checked_add(1),
            };
            let discriminant = match discriminant {
                Some(d) if bound.fits(d) => d,
                other => {
                    return Err(Error::DiscriminantOutOfRange {
                        enum_name,
                        variant: entry.name,
                        discriminant: other.unwrap_or(i128::MAX),
                        tag: bound.to_string(),
                    });
                }
            };

            if by_name.contains_key(&entry.name) {
                return Err(Error::DuplicateVariant {
                    enum_name,
                    variant: entry.name,
                });
            }
            if let Some(&first) = by_discriminant.get(&discriminant) {
                let first: &VariantDef = &variants[first];
                return Err(Error::DuplicateDiscriminant {
                    enum_name,
                    discriminant,
                    first: first.name.clone(),
                    second: entry.name,
                });
            }

            by_discriminant.insert(discriminant, variants.len());
            by_name.insert(entry.name.clone(), variants.len());
            variants.push(VariantDef {
                name: entry.name,
                discriminant,
                payload: entry.payload,
            });
            prev = Some(discriminant);
        }

        Ok(EnumDef {
            name: enum_name,
            variants,
            by_discriminant,
            by_name,
            tag: self.tag,
            tag_key: self.tag_key,
            tag_names: self.tag_names,
        })
    }
}

impl Schema {
    /// Rust-style `Option[T]`: auto-tagged enum with `NONE = 0` and `SOME = 1 (T)`
    ///
    /// Unlike [`Schema::optional`], the discriminant width follows the wire
    /// format (1 byte under Borsh, 8 bytes under ZeroCopy by default).
    pub fn option(inner: Schema) -> Schema {
        let name = format!("Option[{}]", inner.type_name());
        let variants = vec![
            VariantDef {
                name: "NONE".to_string(),
                discriminant: 0,
                payload: None,
            },
            VariantDef {
                name: "SOME".to_string(),
                discriminant: 1,
                payload: Some(inner),
            },
        ];
        let by_discriminant = variants
            .iter()
            .enumerate()
            .map(|(i, v)| (v.discriminant, i))
            .collect();
        let by_name = variants
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.clone(), i))
            .collect();
        Schema::Enum(Arc::new(EnumDef {
            name,
            variants,
            by_discriminant,
            by_name,
            tag: TagType::Auto,
            tag_key: None,
            tag_names: NameTransform::Identity,
        }))
    }
}
