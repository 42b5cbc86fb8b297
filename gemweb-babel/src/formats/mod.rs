//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the block tree and various text representations.

pub mod gemtext;
pub mod html;
pub mod icons;
pub mod treeviz;

pub use gemtext::GemtextFormat;
pub use html::{HtmlFormat, HtmlOptions};
pub use treeviz::TreevizFormat;
