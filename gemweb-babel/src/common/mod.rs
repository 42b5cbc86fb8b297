//! Format-agnostic logic shared by every conversion.

pub mod block_builder;
