//! The record type a filter is evaluated against.
//!
//! A record is a mapping whose keys are strings and whose values are
//! recursively either such mappings or one of {integer, floating-point,
//! string, boolean, null} — exactly `serde_json::Value`'s object/scalar
//! subset, so callers hand the evaluator a borrowed `serde_json::Value`
//! directly rather than going through a bespoke type.

pub use serde_json::Value as Record;
