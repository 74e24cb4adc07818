//! Record rendering.
//!
//! Turns catalog metadata into fixed-width text, one labelled line per value.

mod fields;
mod record_renderer;

pub use fields::{FieldEntry, FieldSpec};
pub use record_renderer::{FieldRenderer, LABEL_WIDTH, PRIMARY_KEY};
