//! End-to-end parsing tests
//!
//! These tests run DDL text through the public entry points and check the
//! resulting schema model.

mod batch;
mod single;
