//! Plain Rust Types
//!
//! Built-in `Pod` impls and a user struct implementing it by hand.

use crate::common::*;
use podlayout::{Pod, Result};

#[derive(Debug, Clone, PartialEq)]
struct Pixel {
    lit: bool,
    level: u16,
    tags: Vec<String>,
}

impl Pod for Pixel {
    fn schema() -> Schema {
        StructDef::builder("Pixel")
            .field("lit", bool::schema())
            .field("level", u16::schema())
            .field("tags", Vec::<String>::schema())
            .build()
            .map(Schema::from)
            .unwrap_or_else(|e| panic!("invalid Pixel schema: {}", e))
    }

    fn to_value(&self) -> Value {
        Value::Record(
            Record::new("Pixel")
                .with("lit", self.lit.to_value())
                .with("level", self.level.to_value())
                .with("tags", self.tags.to_value()),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        let record = value
            .as_record()
            .ok_or_else(|| Error::mismatch("Pixel", value.type_name()))?;
        let field = |name: &str| {
            record
                .get(name)
                .cloned()
                .ok_or_else(|| Error::MissingField(name.to_string()))
        };
        Ok(Pixel {
            lit: bool::from_value(field("lit")?)?,
            level: u16::from_value(field("level")?)?,
            tags: Vec::from_value(field("tags")?)?,
        })
    }
}

fn pixel() -> Pixel {
    Pixel {
        lit: true,
        level: 5,
        tags: vec!["a".to_string()],
    }
}

#[test]
fn builtin_impls_match_schema_layout() {
    assert_eq!(500u32.to_bytes(Format::Borsh).unwrap(), vec![0xF4, 0x01, 0, 0]);
    assert_eq!(
        Some(5u32).to_bytes(Format::Borsh).unwrap(),
        vec![0x01, 0x05, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        vec![1u16, 2, 3].to_bytes(Format::Borsh).unwrap(),
        vec![0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00]
    );
    assert_eq!(
        <(bool, i8)>::from_bytes(&[1, 0xFF], Format::Borsh).unwrap(),
        (true, -1)
    );
}

#[test]
fn static_sizes() {
    assert!(<[u32; 4]>::is_static().unwrap());
    assert_eq!(<[u32; 4]>::calc_max_size(WireFormat::Borsh).unwrap(), 16);
    assert!(!String::is_static().unwrap());
    assert_eq!("abc".to_string().calc_size(Format::Borsh).unwrap(), 7);
}

#[test]
fn user_struct_binary() {
    let bytes = pixel().to_bytes(Format::Borsh).unwrap();
    assert_eq!(
        bytes,
        vec![1, 5, 0, 1, 0, 0, 0, 1, 0, 0, 0, b'a']
    );
    assert_eq!(Pixel::from_bytes(&bytes, Format::Borsh).unwrap(), pixel());
    assert_eq!(pixel().calc_size(Format::Borsh).unwrap(), bytes.len() as u64);
}

#[test]
fn user_struct_structured() {
    let json = pixel().to_structured().unwrap();
    assert_eq!(json, json!({"lit": true, "level": 5, "tags": ["a"]}));
    assert_eq!(Pixel::from_structured(&json).unwrap(), pixel());
}

#[test]
fn from_value_errors() {
    assert!(matches!(
        u8::from_bytes(&[], Format::Borsh),
        Err(Error::UnexpectedEof { .. })
    ));
    assert!(matches!(
        u8::from_structured(&json!(256)),
        Err(Error::IntegerOutOfRange { .. })
    ));
    assert!(matches!(
        <[u8; 2]>::from_value(Value::List(vec![Value::UInt(1)])),
        Err(Error::ArityMismatch { expected: 2, actual: 1 })
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_pixel() -> impl Strategy<Value = Pixel> {
        (
            any::<bool>(),
            any::<u16>(),
            prop::collection::vec("[a-z]{0,6}", 0..4),
        )
            .prop_map(|(lit, level, tags)| Pixel { lit, level, tags })
    }

    proptest! {
        #[test]
        fn pixel_roundtrips_through_both_forms(pixel in arb_pixel()) {
            let bytes = pixel.to_bytes(Format::Borsh).unwrap();
            prop_assert_eq!(bytes.len() as u64, pixel.calc_size(Format::Borsh).unwrap());
            prop_assert_eq!(Pixel::from_bytes(&bytes, Format::Borsh).unwrap(), pixel.clone());

            let json = pixel.to_structured().unwrap();
            prop_assert_eq!(Pixel::from_structured(&json).unwrap(), pixel);
        }

        #[test]
        fn optional_int_fills_zero_copy_slot(value in any::<Option<i64>>()) {
            let bytes = value.to_bytes(Format::ZeroCopy).unwrap();
            prop_assert_eq!(
                bytes.len() as u64,
                <Option<i64>>::calc_max_size(WireFormat::ZeroCopy).unwrap()
            );
            prop_assert_eq!(<Option<i64>>::from_bytes(&bytes, Format::Auto).unwrap(), value);
        }

        #[test]
        fn int_tuple_roundtrips(value in any::<(u8, i32, u64)>()) {
            let bytes = value.to_bytes(Format::Borsh).unwrap();
            prop_assert_eq!(bytes.len(), 13);
            prop_assert_eq!(<(u8, i32, u64)>::from_bytes(&bytes, Format::Borsh).unwrap(), value);
        }
    }
}
