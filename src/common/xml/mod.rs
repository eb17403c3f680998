//! XML text helpers.

mod escape;

pub use escape::{escape_text, escape_xml, unescape_text, unescape_xml};
