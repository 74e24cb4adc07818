//! Recursive, shape-driven field rendering.
//!
//! Each requested field becomes one or more lines of the form
//! `<label right-aligned to 25 columns> : <value>`. Lists put every element
//! on its own line; mappings print their `value` entry first and then each
//! other entry as `key : value`. A mapping inside a list is folded onto one
//! line, its entries separated by `" ;  "`:
//!
//! ```text
//!                      urls : https://journals.aps.org ;  description : Home page ;
//! ```

use std::fmt::Write;

use super::fields::{FieldEntry, FieldSpec};
use crate::models::{FieldValue, Mapping, RenderedRecord};
use crate::{Error, Result};

/// Width the field label is right-aligned to.
pub const LABEL_WIDTH: usize = 25;

/// Mapping key printed first, as the entry's main payload.
pub const PRIMARY_KEY: &str = "value";

/// Separator closing each entry of a mapping folded onto one line.
const INLINE_SEPARATOR: &str = " ;  ";

/// The shape of one output line: `<head><value><tail>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineTemplate {
    head: String,
    tail: &'static str,
}

impl LineTemplate {
    /// `"<label:>25> : "` ... `"\n"`.
    fn labelled(field: &str) -> Self {
        Self {
            head: format!("{field:>width$} : ", width = LABEL_WIDTH),
            tail: "\n",
        }
    }

    /// No label, `" ;  "` after each value. Used for mappings inside lists.
    const fn inline() -> Self {
        Self {
            head: String::new(),
            tail: INLINE_SEPARATOR,
        }
    }

    fn write(&self, out: &mut String, value: impl std::fmt::Display) {
        let _ = write!(out, "{}{}{}", self.head, value, self.tail);
    }
}

/// Heuristic: does the line's label already name `key`?
///
/// Plain substring containment against the label text, so `title` matches the
/// `journal_title` label and the entry prints as just its value. Short keys
/// can match by accident (`e` is contained in almost every label); such
/// entries lose their `key :` prefix.
fn label_names_key(template: &LineTemplate, key: &str) -> bool {
    template.head.contains(key)
}

/// Renders a record's metadata fields as aligned text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRenderer;

impl FieldRenderer {
    /// Creates a field renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders the requested fields of a metadata value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if `metadata` is not a mapping.
    pub fn render(&self, metadata: &FieldValue, fields: &FieldSpec) -> Result<RenderedRecord> {
        let map = metadata.as_mapping().ok_or_else(|| Error::Render {
            field: "metadata".to_string(),
            cause: format!("expected a mapping, found a {}", metadata.shape()),
        })?;
        Ok(self.render_mapping(map, fields))
    }

    /// Renders the requested fields of a metadata mapping.
    ///
    /// Fields absent from the mapping produce no output.
    #[must_use]
    pub fn render_mapping(&self, metadata: &Mapping, fields: &FieldSpec) -> RenderedRecord {
        let mut out = String::new();

        for entry in fields.entries() {
            match entry {
                FieldEntry::BlankLine => out.push('\n'),
                FieldEntry::Field(name) => {
                    if let Some(value) = metadata.get(name) {
                        render_value(&mut out, value, &LineTemplate::labelled(name));
                    }
                },
            }
        }

        RenderedRecord::new(out)
    }
}

fn render_value(out: &mut String, value: &FieldValue, template: &LineTemplate) {
    match value {
        FieldValue::Scalar(scalar) => template.write(out, scalar),
        FieldValue::Sequence(items) => render_sequence(out, items, template),
        FieldValue::Mapping(map) => render_mapping(out, map, template),
    }
}

fn render_sequence(out: &mut String, items: &[FieldValue], template: &LineTemplate) {
    for item in items {
        match item {
            FieldValue::Mapping(map) => {
                out.push_str(&template.head);
                render_mapping(out, map, &LineTemplate::inline());
                out.push('\n');
            },
            other => template.write(out, other),
        }
    }
}

fn render_mapping(out: &mut String, map: &Mapping, template: &LineTemplate) {
    if let Some(primary) = map.get(PRIMARY_KEY) {
        template.write(out, primary);
    }

    for (key, value) in map.iter().filter(|(key, _)| *key != PRIMARY_KEY) {
        if label_names_key(template, key) {
            template.write(out, value);
        } else {
            template.write(out, format_args!("{key} : {value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(metadata: serde_json::Value, fields: &FieldSpec) -> String {
        FieldRenderer::new()
            .render(&FieldValue::from(metadata), fields)
            .unwrap()
            .as_str()
            .to_string()
    }

    #[test]
    fn test_scalar_line() {
        let out = render(json!({"short_title": "Phys.Rev.D"}), &FieldSpec::SHORT);
        assert_eq!(out, "              short_title : Phys.Rev.D\n");
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let out = render(json!({"unrelated": 1}), &FieldSpec::SHORT);
        assert_eq!(out, "");
    }

    #[test]
    fn test_fields_follow_spec_order() {
        let out = render(
            json!({"urls": ["u"], "short_title": "S", "self": "x"}),
            &FieldSpec::SHORT,
        );
        let labels: Vec<&str> = out
            .lines()
            .map(|l| l.split(" : ").next().unwrap().trim())
            .collect();
        assert_eq!(labels, vec!["self", "short_title", "urls"]);
    }

    #[test]
    fn test_mapping_with_label_heuristic() {
        let out = render(
            json!({"journal_title": {"title": "Physical Review D"}}),
            &FieldSpec::SHORT,
        );
        assert_eq!(out, "            journal_title : Physical Review D\n");
    }

    #[test]
    fn test_mapping_key_not_in_label() {
        let out = render(
            json!({"self": {"$ref": "https://inspirehep.net/api/journals/1"}}),
            &FieldSpec::SHORT,
        );
        assert_eq!(
            out,
            "                     self : $ref : https://inspirehep.net/api/journals/1\n"
        );
    }

    #[test]
    fn test_primary_key_printed_first() {
        let out = render(
            json!({"license": {"url": "https://cc.org", "value": "CC-BY-4.0"}}),
            &FieldSpec::LONG,
        );
        assert_eq!(
            out,
            "\n\n                  license : CC-BY-4.0\n                  license : url : https://cc.org\n\n"
        );
    }

    #[test]
    fn test_list_of_scalars() {
        let out = render(json!({"urls": ["a", "b"]}), &FieldSpec::SHORT);
        assert_eq!(
            out,
            "                     urls : a\n                     urls : b\n"
        );
    }

    #[test]
    fn test_list_of_mappings_folds_onto_one_line() {
        let out = render(
            json!({"urls": [{"value": "https://journals.aps.org", "description": "Home"}]}),
            &FieldSpec::SHORT,
        );
        assert_eq!(
            out,
            "                     urls : https://journals.aps.org ;  description : Home ;  \n"
        );
    }

    #[test]
    fn test_list_of_mappings_has_no_label_heuristic() {
        // The inline template carries no label, so even `urls` keeps its key.
        let out = render(json!({"urls": [{"urls": "x"}]}), &FieldSpec::SHORT);
        assert_eq!(out, "                     urls : urls : x ;  \n");
    }

    #[test]
    fn test_short_key_matches_label_by_accident() {
        let out = render(json!({"self": {"e": "1", "zz": "2"}}), &FieldSpec::SHORT);
        assert_eq!(
            out,
            "                     self : 1\n                     self : zz : 2\n"
        );
    }

    #[test]
    fn test_nested_containers_render_inline() {
        let out = render(
            json!({"issns": [{"value": "1234-5678", "tags": ["print", "online"]}]}),
            &FieldSpec::LONG,
        );
        assert!(out.contains(r#"issns : 1234-5678 ;  tags : ["print","online"] ;  "#));
    }

    #[test]
    fn test_empty_containers_emit_nothing() {
        let out = render(json!({"urls": [], "self": {}}), &FieldSpec::SHORT);
        assert_eq!(out, "");
    }

    #[test]
    fn test_blank_lines_always_emitted() {
        let out = render(json!({}), &FieldSpec::LONG);
        assert_eq!(out, "\n\n\n");
    }

    #[test]
    fn test_non_mapping_metadata_is_render_error() {
        let err = FieldRenderer::new()
            .render(&FieldValue::from(json!(["not", "a", "map"])), &FieldSpec::SHORT)
            .unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
        assert!(err.to_string().contains("sequence"));
    }
}
