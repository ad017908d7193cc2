//! Structured form integration tests
//!
//! JSON rendering and parsing of structs, unions, containers and defaults,
//! plus the `Pod` trait for plain Rust types.

#[path = "../common/mod.rs"]
mod common;

mod defaults;
mod enums;
mod pod;
