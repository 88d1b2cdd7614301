//! Shared utilities: codec, identifiers, code generation.

pub mod click_id;
pub mod code_generator;
pub mod short_code;
