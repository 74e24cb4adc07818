//! Field sets selecting what gets rendered.

/// One entry of a [`FieldSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEntry {
    /// A top-level metadata key.
    Field(&'static str),
    /// An empty separator line.
    BlankLine,
}

use self::FieldEntry::{BlankLine, Field};

const SHORT_FIELDS: &[FieldEntry] = &[
    Field("self"),
    Field("short_title"),
    Field("journal_title"),
    Field("urls"),
];

const LONG_FIELDS: &[FieldEntry] = &[
    Field("control_number"),
    Field("self"),
    Field("short_title"),
    Field("journal_title"),
    Field("title_variants"),
    BlankLine,
    Field("_harvesting_info"),
    Field("publisher"),
    Field("urls"),
    Field("doi_prefixes"),
    BlankLine,
    Field("inspire_categories"),
    Field("issns"),
    Field("license"),
    Field("proceedings"),
    Field("public_notes"),
    Field("_private_notes"),
    Field("refereed"),
    BlankLine,
    Field("date_ended"),
    Field("date_started"),
    Field("deleted"),
    Field("deleted_records"),
    Field("new_record"),
    Field("related_records"),
    Field("legacy_creation_date"),
    Field("legacy_version"),
];

/// An ordered selection of metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    entries: &'static [FieldEntry],
}

impl FieldSpec {
    /// The short field set: links, titles and URLs.
    pub const SHORT: Self = Self {
        entries: SHORT_FIELDS,
    };

    /// The long field set: every documented journal field.
    pub const LONG: Self = Self {
        entries: LONG_FIELDS,
    };

    /// Picks the long or short field set.
    #[must_use]
    pub const fn select(long: bool) -> Self {
        if long { Self::LONG } else { Self::SHORT }
    }

    /// The entries in render order.
    #[must_use]
    pub const fn entries(&self) -> &'static [FieldEntry] {
        self.entries
    }

    /// The field names, without separators.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().filter_map(|entry| match entry {
            Field(name) => Some(*name),
            BlankLine => None,
        })
    }

    /// Returns true if the field set renders `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.field_names().any(|name| name == field)
    }
}
