//! UI components: the bound input and its shared editing primitives.

pub mod bound_input;
pub mod common;
