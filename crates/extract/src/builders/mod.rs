//! Typed metadata builders, one per [`DocumentType`].
//!
//! Every builder module exposes `FIELDS`, the exact list of bag fields it
//! claims, and a `build` function. Claimed fields are read through a
//! [`FieldReader`] and land in typed slots; every other bag field is copied
//! verbatim into [`AdditionalMetadata`]. A claimed field whose value is blank
//! or malformed is simply absent from the typed output.
//!
//! Builders are pure functions. [`builder_for`] maps each tag to its builder
//! with an exhaustive `match`, so adding a tag without a builder does not
//! compile.

use chrono::{DateTime, Utc};

use crate::bag::MetadataBag;
use crate::detect::DocumentType;
use crate::record::{AdditionalMetadata, BaseMetadata, DocumentMetadata};
use crate::value::{clean_text, parse_bool, parse_number, parse_rational, Number};

pub mod climate;
pub mod creative_commons;
pub mod database;
pub mod email;
pub mod epub;
pub mod font;
pub mod generic;
pub mod html;
pub mod image;
pub mod media;
pub mod office;
pub mod pdf;
pub mod rtf;
pub mod warc;

/// Record-level context every builder receives.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// MIME essence as seen by detection.
    pub mime_type: Option<&'a str>,
    /// Most specific parser identifier.
    pub parser: Option<&'a str>,
    pub engine_version: &'a str,
    pub strip_control_chars: bool,
}

/// Signature shared by all builders.
pub type BuildFn = fn(&MetadataBag, &BuildContext<'_>) -> DocumentMetadata;

/// Builder for `doc_type`.
pub fn builder_for(doc_type: DocumentType) -> BuildFn {
    match doc_type {
        DocumentType::Pdf => pdf::build,
        DocumentType::Office => office::build,
        DocumentType::Image => image::build,
        DocumentType::Email => email::build,
        DocumentType::Media => media::build,
        DocumentType::Html => html::build,
        DocumentType::Rtf => rtf::build,
        DocumentType::Database => database::build,
        DocumentType::Font => font::build,
        DocumentType::Epub => epub::build,
        DocumentType::Warc => warc::build,
        DocumentType::ClimateForecast => climate::build,
        DocumentType::CreativeCommons => creative_commons::build,
        DocumentType::Generic => generic::build,
    }
}

/// Claimed field list for `doc_type`.
pub fn claimed_fields(doc_type: DocumentType) -> &'static [&'static str] {
    match doc_type {
        DocumentType::Pdf => pdf::FIELDS,
        DocumentType::Office => office::FIELDS,
        DocumentType::Image => image::FIELDS,
        DocumentType::Email => email::FIELDS,
        DocumentType::Media => media::FIELDS,
        DocumentType::Html => html::FIELDS,
        DocumentType::Rtf => rtf::FIELDS,
        DocumentType::Database => database::FIELDS,
        DocumentType::Font => font::FIELDS,
        DocumentType::Epub => epub::FIELDS,
        DocumentType::Warc => warc::FIELDS,
        DocumentType::ClimateForecast => climate::FIELDS,
        DocumentType::CreativeCommons => creative_commons::FIELDS,
        DocumentType::Generic => generic::FIELDS,
    }
}

/// Typed view over a bag, restricted to one builder's claimed fields.
pub(crate) struct FieldReader<'a> {
    bag: &'a MetadataBag,
    claimed: &'static [&'static str],
    strip_control: bool,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        bag: &'a MetadataBag,
        claimed: &'static [&'static str],
        strip_control: bool,
    ) -> Self {
        Self {
            bag,
            claimed,
            strip_control,
        }
    }

    fn raw(&self, name: &str) -> Option<&'a str> {
        debug_assert!(
            self.claimed.contains(&name),
            "{name} is read but not listed as claimed"
        );
        self.bag.get(name)
    }

    /// First value, cleaned.
    pub(crate) fn text(&self, name: &str) -> Option<String> {
        self.raw(name).and_then(|raw| clean_text(raw, self.strip_control))
    }

    /// Every non-blank value, cleaned, in order. Duplicates are kept.
    pub(crate) fn texts(&self, name: &str) -> Vec<String> {
        debug_assert!(self.claimed.contains(&name));
        self.bag
            .values(name)
            .iter()
            .filter_map(|raw| clean_text(raw, self.strip_control))
            .collect()
    }

    /// Every value split on any of `separators`, pieces cleaned.
    pub(crate) fn split_list(&self, name: &str, separators: &[char]) -> Vec<String> {
        debug_assert!(self.claimed.contains(&name));
        split_values(self.bag.values(name), separators, self.strip_control)
    }

    pub(crate) fn number<T: Number>(&self, name: &str) -> Option<T> {
        self.raw(name).and_then(|raw| parse_number(name, raw))
    }

    pub(crate) fn rational(&self, name: &str) -> Option<f64> {
        self.raw(name).and_then(|raw| parse_rational(name, raw))
    }

    pub(crate) fn boolean(&self, name: &str) -> Option<bool> {
        self.raw(name).and_then(|raw| parse_bool(name, raw))
    }

    pub(crate) fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        debug_assert!(self.claimed.contains(&name));
        self.bag.date(name)
    }

    /// Reads a field without claiming it; it stays in the fallback map.
    pub(crate) fn peek(&self, name: &str) -> Option<String> {
        self.bag
            .get(name)
            .and_then(|raw| clean_text(raw, self.strip_control))
    }

    /// Base fields plus everything this reader does not claim.
    pub(crate) fn base(&self, ctx: &BuildContext<'_>) -> BaseMetadata {
        BaseMetadata {
            mime_type: ctx.mime_type.map(str::to_string),
            parser: ctx.parser.map(str::to_string),
            engine_version: ctx.engine_version.to_string(),
            additional: AdditionalMetadata::unclaimed(self.bag, self.claimed),
        }
    }
}

pub(crate) fn split_values(
    values: &[String],
    separators: &[char],
    strip_control: bool,
) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(separators))
        .filter_map(|piece| clean_text(piece, strip_control))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_builds_its_own_variant() {
        let bag = MetadataBag::new().with("unrelated", "value");
        for doc_type in DocumentType::ALL {
            let metadata = builder_for(doc_type)(&bag, &test_support::ctx());
            assert_eq!(metadata.document_type(), doc_type);
            assert_eq!(metadata.base().engine_version, "test-engine 1.0");
            assert_eq!(metadata.additional().values("unrelated"), ["value"]);
        }
    }

    #[test]
    fn claimed_fields_never_reach_the_fallback_map() {
        for doc_type in DocumentType::ALL {
            let fields = claimed_fields(doc_type);
            let bag: MetadataBag = fields.iter().map(|&name| (name, "1")).collect();
            let metadata = builder_for(doc_type)(&bag, &test_support::ctx());
            for name in fields {
                assert!(
                    !metadata.additional().contains_key(name),
                    "{doc_type}: {name} is both claimed and unclaimed"
                );
            }
        }
    }

    #[test]
    fn claimed_lists_have_no_duplicates() {
        for doc_type in DocumentType::ALL {
            let fields = claimed_fields(doc_type);
            let mut sorted = fields.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), fields.len(), "{doc_type}");
        }
    }

    #[test]
    fn split_values_drops_blank_pieces() {
        let values = vec!["a, b;;c".to_string(), " ".to_string(), "a".to_string()];
        assert_eq!(split_values(&values, &[',', ';'], true), ["a", "b", "c", "a"]);
    }
}
