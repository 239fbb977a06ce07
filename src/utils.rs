//! Utility functions and helpers.

pub mod html;

pub use html::{read_text_source, strip_html};
