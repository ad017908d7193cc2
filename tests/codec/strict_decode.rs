//! Residual Data
//!
//! `unpack` tolerates trailing bytes unless the catalog is configured for
//! checked decoding; `unpack_checked` always rejects them.

use crate::common::*;

#[test]
fn unpack_ignores_trailing_bytes_by_default() {
    let catalog = test_catalog();
    assert_eq!(
        catalog.unpack(&Schema::u8(), &[1, 2, 3], Format::Borsh).unwrap(),
        Value::UInt(1)
    );
}

#[test]
fn unpack_checked_rejects_trailing_bytes() {
    let catalog = test_catalog();
    let err = catalog
        .unpack_checked(&Schema::u8(), &[1, 2, 3], Format::Borsh)
        .unwrap_err();
    assert!(matches!(err, Error::TrailingBytes { consumed: 1, total: 3 }));
    assert_eq!(
        err.to_string(),
        "Unused bytes in provided raw data: consumed 1 of 3"
    );
}

#[test]
fn checked_decode_config_applies_to_unpack() {
    let catalog = Catalog::builder()
        .config(CodecConfig::for_testing().with_checked_decode(true))
        .build()
        .unwrap();
    assert!(matches!(
        catalog.unpack(&Schema::u16(), &[1, 0, 9], Format::Borsh),
        Err(Error::TrailingBytes { consumed: 2, total: 3 })
    ));
    assert_eq!(
        catalog.unpack(&Schema::u16(), &[1, 0], Format::Borsh).unwrap(),
        Value::UInt(1)
    );
}

#[test]
fn auto_with_trailing_bytes_falls_back_to_borsh() {
    let catalog = test_catalog();
    let schema = Schema::from(point_def());
    let raw = [1, 5, 0, 0xEE];
    // Length differs from the ZeroCopy size, so Borsh is assumed
    assert_eq!(
        catalog.unpack(&schema, &raw, Format::Auto).unwrap(),
        point(true, 5)
    );
    assert!(matches!(
        catalog.unpack_checked(&schema, &raw, Format::Auto),
        Err(Error::TrailingBytes { consumed: 3, total: 4 })
    ));
}

#[test]
fn checked_zero_copy_consumes_padding() {
    let catalog = test_catalog();
    let schema = Schema::vec_bounded(Schema::u8(), 3);
    let bytes = catalog
        .pack(&schema, &Value::List(vec![Value::UInt(4)]), Format::ZeroCopy)
        .unwrap();
    assert_eq!(bytes.len(), 7);
    assert!(catalog
        .unpack_checked(&schema, &bytes, Format::ZeroCopy)
        .is_ok());
}
