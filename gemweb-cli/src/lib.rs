//! Library half of the `gemweb` binary: the inspect transforms and the
//! directory builder, kept here so they can be unit tested without a shell.

pub mod site;
pub mod transforms;
