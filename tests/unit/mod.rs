//! Unit tests for cbuffer modules
//!
//! These tests drive the public API only.

mod test_config;
