//! Intermediate Representation (IR) for gemtext documents.
//!
//! Two layers live here: the flat stream of classified lines produced by the
//! gemtext parser ([`events`]), and the grouped block tree that renderers
//! consume ([`nodes`]).

pub mod events;
pub mod nodes;
