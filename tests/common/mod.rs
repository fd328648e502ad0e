//! Common test utilities for end-to-end fetch tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
