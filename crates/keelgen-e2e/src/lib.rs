//! The typed client keelgen generates for
//! `tests/fixtures/openapi/keel.openapi.yaml`.
//!
//! `build.rs` regenerates it on every build, so generator output that does
//! not compile against `keelgen-runtime` fails this crate.

include!(concat!(env!("OUT_DIR"), "/api.rs"));
