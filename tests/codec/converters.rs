//! User Converters
//!
//! Converters registered on the catalog are consulted before the built-in
//! codecs, at every nesting level.

use crate::common::*;
use podlayout::{
    BinaryCodec, BinaryConverter, Context, NamedConverter, ReadBuffer, Result, ScalarKind,
    StructuredCodec, WriteBuffer,
};

/// Four raw bytes, rendered as lowercase hex
#[derive(Debug, Clone, Copy)]
struct HexKey;

fn key_bytes(value: &Value) -> Result<&[u8]> {
    match value.as_bytes() {
        Some(bytes) if bytes.len() == 4 => Ok(bytes),
        _ => Err(Error::mismatch("Pubkey", value.type_name())),
    }
}

impl BinaryCodec for HexKey {
    fn is_static(&self, _: &Catalog, _: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, _: &Catalog, _: Context) -> Result<u64> {
        Ok(4)
    }

    fn encode(&self, _: &Catalog, buf: &mut WriteBuffer, value: &Value, _: Context) -> Result<()> {
        buf.write(key_bytes(value)?);
        Ok(())
    }

    fn decode(&self, _: &Catalog, buf: &mut ReadBuffer<'_>, _: Context) -> Result<Value> {
        Ok(Value::Bytes(buf.read(4)?.to_vec()))
    }
}

impl StructuredCodec for HexKey {
    fn to_structured(&self, _: &Catalog, value: &Value, _: Context) -> Result<Json> {
        let hex: String = key_bytes(value)?
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Ok(Json::String(hex))
    }

    fn from_structured(&self, _: &Catalog, raw: &Json, _: Context) -> Result<Value> {
        let text = raw
            .as_str()
            .filter(|s| s.len() == 8)
            .ok_or_else(|| Error::Structured(format!("expected 8 hex digits, found {}", raw)))?;
        let bytes = (0..4)
            .map(|i| u8::from_str_radix(&text[i * 2..i * 2 + 2], 16))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|e| Error::Structured(e.to_string()))?;
        Ok(Value::Bytes(bytes))
    }
}

/// Writes every U16 as a single byte
struct NarrowU16 {
    codec: Narrow,
}

struct Narrow;

impl BinaryCodec for Narrow {
    fn is_static(&self, _: &Catalog, _: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, _: &Catalog, _: Context) -> Result<u64> {
        Ok(1)
    }

    fn encode(&self, _: &Catalog, buf: &mut WriteBuffer, value: &Value, _: Context) -> Result<()> {
        let v = value
            .as_u64()
            .filter(|v| *v <= u8::MAX as u64)
            .ok_or_else(|| Error::mismatch("U16 below 256", value.type_name()))?;
        buf.write_byte(v as u8);
        Ok(())
    }

    fn decode(&self, _: &Catalog, buf: &mut ReadBuffer<'_>, _: Context) -> Result<Value> {
        Ok(Value::UInt(buf.read_byte()? as u128))
    }
}

impl BinaryConverter for NarrowU16 {
    fn name(&self) -> &str {
        "narrow-u16"
    }

    fn resolve<'s>(&'s self, schema: &'s Schema) -> Option<&'s dyn BinaryCodec> {
        match schema {
            Schema::Atomic(atomic) if atomic.kind == ScalarKind::U16 => Some(&self.codec),
            _ => None,
        }
    }
}

fn account_schema() -> Schema {
    StructDef::builder("Account")
        .field("owner", Schema::custom("Pubkey"))
        .field("lamports", Schema::u32())
        .build()
        .unwrap()
        .into()
}

fn account() -> Value {
    Value::Record(
        Record::new("Account")
            .with("owner", vec![0xDEu8, 0xAD, 0xBE, 0xEF])
            .with("lamports", 10u32),
    )
}

fn key_catalog() -> Catalog {
    init_tracing();
    Catalog::builder()
        .config(CodecConfig::for_testing())
        .binary(NamedConverter::new("Pubkey", HexKey))
        .structured(NamedConverter::new("Pubkey", HexKey))
        .build()
        .unwrap()
}

#[test]
fn unclaimed_custom_schema_fails() {
    let catalog = test_catalog();
    let err = catalog
        .pack(&account_schema(), &account(), Format::Borsh)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::NoConverterFound { schema } if schema == "Pubkey"
    ));
    assert_eq!(err.path()[0].to_string(), "Account.owner");
}

#[test]
fn named_converter_handles_nested_custom() {
    let catalog = key_catalog();
    let bytes = roundtrip(&catalog, &account_schema(), &account(), Format::Borsh);
    assert_eq!(bytes, vec![0xDE, 0xAD, 0xBE, 0xEF, 10, 0, 0, 0]);
    assert!(catalog.is_static(&account_schema()).unwrap());
}

#[test]
fn named_converter_structured_form() {
    let catalog = key_catalog();
    let json = catalog.to_structured(&account_schema(), &account()).unwrap();
    assert_eq!(json, json!({"owner": "deadbeef", "lamports": 10}));
    assert_eq!(
        catalog.from_structured(&account_schema(), &json).unwrap(),
        account()
    );
}

#[test]
fn structured_only_converter_leaves_binary_unclaimed() {
    init_tracing();
    let catalog = Catalog::builder()
        .structured(NamedConverter::new("Pubkey", HexKey))
        .build()
        .unwrap();
    assert!(catalog.to_structured(&account_schema(), &account()).is_ok());
    assert!(catalog
        .pack(&account_schema(), &account(), Format::Borsh)
        .is_err());
}

#[test]
fn converter_overrides_builtin() {
    init_tracing();
    let catalog = Catalog::builder()
        .binary(NarrowU16 { codec: Narrow })
        .build()
        .unwrap();
    assert_eq!(
        roundtrip(&catalog, &Schema::from(point_def()), &point(true, 5), Format::Borsh),
        vec![1, 5]
    );
    // Other atomics keep the built-in layout
    assert_eq!(
        catalog.pack(&Schema::u32(), &Value::UInt(5), Format::Borsh).unwrap(),
        vec![5, 0, 0, 0]
    );
}
