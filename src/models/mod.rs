//! Data models for journal search.

mod flags;
mod record;
mod result;

pub use flags::{QueryString, SearchFlags};
pub use record::{FieldValue, Mapping, RawRecord, Scalar};
pub use result::{RenderedRecord, ResultSet};
