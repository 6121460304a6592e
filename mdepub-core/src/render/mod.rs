//! Rendering of parsed documents into packaged XHTML

mod anchors;
mod title;
mod xhtml;

pub use anchors::{assign_anchors, collect_sections, slugify};
pub use title::derive_title;
pub use xhtml::{escape_html, XhtmlRenderer};
