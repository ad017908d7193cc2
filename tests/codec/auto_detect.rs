//! Format Negotiation
//!
//! `Auto` picks ZeroCopy when the input length equals the ZeroCopy maximum
//! size and Borsh otherwise. `Pass` reuses an enclosing context.

use crate::common::*;
use podlayout::{ReadBuffer, WriteBuffer};

#[test]
fn auto_decodes_both_encodings_of_optional() {
    let catalog = test_catalog();
    let schema = Schema::optional(Schema::u32());

    for value in [Value::none(), Value::some(9u32)] {
        for format in [Format::Borsh, Format::ZeroCopy] {
            let bytes = catalog.pack(&schema, &value, format).unwrap();
            assert_eq!(
                catalog.unpack(&schema, &bytes, Format::Auto).unwrap(),
                value,
                "auto decode of {:?} bytes {:?}",
                format,
                bytes
            );
        }
    }
}

#[test]
fn auto_tag_width_follows_detected_format() {
    let catalog = test_catalog();
    let schema = Schema::option(Schema::u32());
    let def = match &schema {
        Schema::Enum(def) => def.clone(),
        _ => unreachable!(),
    };
    let value = def.value("SOME", Some(Value::UInt(3))).unwrap();

    let borsh = roundtrip(&catalog, &schema, &value, Format::Borsh);
    assert_eq!(borsh, vec![1, 3, 0, 0, 0]);
    let zero_copy = roundtrip(&catalog, &schema, &value, Format::ZeroCopy);
    assert_eq!(zero_copy, vec![1, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0]);

    assert_eq!(catalog.unpack(&schema, &borsh, Format::Auto).unwrap(), value);
    assert_eq!(catalog.unpack(&schema, &zero_copy, Format::Auto).unwrap(), value);
}

#[test]
fn static_schema_auto_is_transparent() {
    let catalog = test_catalog();
    let schema = Schema::from(point_def());
    let bytes = catalog.pack(&schema, &point(false, 300), Format::Borsh).unwrap();
    assert_eq!(
        catalog.unpack(&schema, &bytes, Format::Auto).unwrap(),
        point(false, 300)
    );
}

#[test]
fn auto_rejected_for_encoding() {
    let catalog = test_catalog();
    assert!(matches!(
        catalog.pack(&Schema::u8(), &Value::UInt(1), Format::Auto),
        Err(Error::AutoFormatOnEncode)
    ));
    assert!(matches!(
        catalog.calc_size(&Schema::u8(), None, Format::Auto),
        Err(Error::AutoFormatOnEncode)
    ));
}

#[test]
fn pass_requires_enclosing_context() {
    let catalog = test_catalog();
    assert!(matches!(
        catalog.pack(&Schema::u8(), &Value::UInt(1), Format::Pass),
        Err(Error::FormatNotResolved)
    ));
    assert!(matches!(
        catalog.unpack(&Schema::u8(), &[1], Format::Pass),
        Err(Error::FormatNotResolved)
    ));
}

#[test]
fn pass_inherits_wire_format() {
    let catalog = test_catalog();
    let schema = Schema::optional(Schema::u32());
    let outer = catalog.negotiator().context(WireFormat::ZeroCopy);

    let mut buf = WriteBuffer::new();
    catalog
        .pack_into(&Schema::u8(), &mut buf, &Value::UInt(0xAA), Format::Borsh, None)
        .unwrap();
    catalog
        .pack_into(&schema, &mut buf, &Value::none(), Format::Pass, Some(outer))
        .unwrap();
    let bytes = buf.into_inner();
    assert_eq!(bytes, vec![0xAA, 0, 0, 0, 0, 0]);

    let mut read = ReadBuffer::new(&bytes);
    let head = catalog
        .unpack_partial(&Schema::u8(), &mut read, Format::Borsh, None)
        .unwrap();
    let tail = catalog
        .unpack_partial(&schema, &mut read, Format::Pass, Some(outer))
        .unwrap();
    assert_eq!(head, Value::UInt(0xAA));
    assert_eq!(tail, Value::none());
    assert!(read.is_empty());
}

#[test]
fn auto_measures_remaining_bytes_only() {
    let catalog = test_catalog();
    let schema = Schema::optional(Schema::u16());
    // A one-byte header followed by a ZeroCopy optional
    let raw = [0xFF, 1, 7, 0];
    let mut buf = ReadBuffer::new(&raw);
    buf.skip(1).unwrap();
    let value = catalog
        .unpack_partial(&schema, &mut buf, Format::Auto, None)
        .unwrap();
    assert_eq!(value, Value::some(7u16));
}
