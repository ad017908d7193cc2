//! Bounds Enforcement
//!
//! Declared maxima and fixed arities are enforced on both encode and decode.

use crate::common::*;

#[test]
fn vec_longer_than_max_rejected_on_encode() {
    let catalog = test_catalog();
    let schema = Schema::vec_bounded(Schema::u8(), 4);
    let value = Value::List(vec![Value::UInt(0); 5]);
    assert!(matches!(
        catalog.pack(&schema, &value, Format::Borsh),
        Err(Error::LengthExceeded { len: 5, max: 4 })
    ));
}

#[test]
fn length_prefix_checked_before_payload() {
    let catalog = test_catalog();
    let schema = Schema::str_with(LenSpec::default().with_max(8));
    // Prefix of 9 with no payload at all: the bound fails, not the read
    let raw = 9u32.to_le_bytes();
    assert!(matches!(
        catalog.unpack(&schema, &raw, Format::Borsh),
        Err(Error::LengthExceeded { len: 9, max: 8 })
    ));
}

#[test]
fn bytes_bound() {
    let catalog = test_catalog();
    let len = LenSpec::bounded(2, Atomic::u8()).unwrap();
    let schema = Schema::bytes_with(len);
    assert_eq!(
        roundtrip(&catalog, &schema, &Value::Bytes(vec![7, 8]), Format::Borsh),
        vec![2, 7, 8]
    );
    assert!(matches!(
        catalog.pack(&schema, &Value::Bytes(vec![1, 2, 3]), Format::Borsh),
        Err(Error::LengthExceeded { len: 3, max: 2 })
    ));
}

#[test]
fn signed_length_type_rejected() {
    assert!(matches!(
        LenSpec::new(Atomic::i32()),
        Err(Error::InvalidLengthType(_))
    ));
}

#[test]
fn fixed_array_wrong_count() {
    let catalog = test_catalog();
    let schema = Schema::array(Schema::u16(), 2);
    assert!(matches!(
        catalog.pack(&schema, &Value::List(vec![Value::UInt(1)]), Format::Borsh),
        Err(Error::ArityMismatch { expected: 2, actual: 1 })
    ));
}

#[test]
fn fixed_bytes_too_long() {
    let catalog = test_catalog();
    assert!(matches!(
        catalog.pack(&Schema::fixed_bytes(2), &Value::Bytes(vec![1, 2, 3]), Format::Borsh),
        Err(Error::LengthExceeded { len: 3, max: 2 })
    ));
}

#[test]
fn truncated_input() {
    let catalog = test_catalog();
    let schema = Schema::from(point_def());
    let err = catalog.unpack(&schema, &[1, 5], Format::Borsh).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::UnexpectedEof { needed: 2, remaining: 1 }
    ));
}

#[test]
fn integer_out_of_range() {
    let catalog = test_catalog();
    assert!(matches!(
        catalog.pack(&Schema::u16(), &Value::UInt(70_000), Format::Borsh),
        Err(Error::IntegerOutOfRange { .. })
    ));
    assert!(matches!(
        catalog.pack(&Schema::i8(), &Value::Int(-129), Format::Borsh),
        Err(Error::IntegerOutOfRange { .. })
    ));
}

#[test]
fn calc_size_without_value_requires_static() {
    let catalog = test_catalog();
    assert_eq!(
        catalog
            .calc_size(&Schema::from(point_def()), None, Format::Borsh)
            .unwrap(),
        3
    );
    assert!(matches!(
        catalog.calc_size(&Schema::vec(Schema::u8()), None, Format::Borsh),
        Err(Error::NotStatic(_))
    ));
}

#[test]
fn recursion_limit() {
    let catalog = test_catalog();
    let mut schema = Schema::u8();
    for _ in 0..40 {
        schema = Schema::optional(schema);
    }
    assert!(matches!(
        catalog.calc_max_size(&schema, WireFormat::Borsh),
        Err(Error::RecursionLimit(32))
    ));
}
