//! Creative Commons overlay and embedded XMP merge.
//!
//! The overlay is attached next to the primary variant whenever the bag
//! carries rights fields, whatever the document type. It is best-effort:
//! failures are reported to the dispatcher, which logs and drops them.
use rights::RightsExtractor;
use tracing::debug;

use crate::bag::MetadataBag;
use crate::builders::creative_commons;
use crate::error::OverlayError;
use crate::record::CreativeCommonsRights;

/// Lowercase substrings of field names that signal rights metadata.
///
/// Every marker names fields the overlay reads, so a marker hit with a
/// usable value always yields an overlay.
pub const RIGHTS_MARKERS: &[&str] = &["xmprights", "cc:license", "cc:attributionname"];

/// Bag fields whose names contain a rights marker, in sorted order.
pub fn rights_fields(bag: &MetadataBag) -> Vec<&str> {
    bag.field_names()
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            RIGHTS_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .collect()
}

/// Builds the overlay from `bag`.
///
/// `Ok(None)` when no rights fields are present.
pub fn build_overlay(
    bag: &MetadataBag,
    strip_control_chars: bool,
) -> Result<Option<CreativeCommonsRights>, OverlayError> {
    let fields = rights_fields(bag);
    if fields.is_empty() {
        return Ok(None);
    }
    let rights = creative_commons::rights(bag, strip_control_chars);
    if rights.is_empty() {
        return Err(OverlayError::NoRightsValues {
            fields: fields.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(Some(rights))
}

/// Runs `extractor` over `packet` and fills absent `xmpRights:*` fields of
/// `bag`. Returns how many fields the packet supplied.
pub fn merge_xmp(extractor: &RightsExtractor, packet: &str, bag: &mut MetadataBag) -> usize {
    match extractor.extract(packet) {
        Ok(fields) => {
            let before = bag.len();
            fields.write_to(&mut *bag);
            bag.len() - before
        }
        Err(err) => {
            debug!(error = %err, "xmp_rights_unavailable");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use rights::field;

    use super::*;

    #[test]
    fn markers_match_case_insensitively() {
        let bag = MetadataBag::new()
            .with("XMPRIGHTS:Marked", "true")
            .with("cc:attributionName", "X")
            .with("CC:License", "Y")
            .with("creativeCommons:license", "W")
            .with("dc:rights", "Z");
        assert_eq!(
            rights_fields(&bag),
            ["CC:License", "XMPRIGHTS:Marked", "cc:attributionName"]
        );
    }

    #[test]
    fn no_markers_no_overlay() {
        let bag = MetadataBag::new().with("dc:rights", "CC BY");
        assert_eq!(build_overlay(&bag, true), Ok(None));
    }

    #[test]
    fn license_alone_yields_overlay() {
        let bag = MetadataBag::new()
            .with("Content-Type", "application/pdf")
            .with("cc:license", "https://creativecommons.org/licenses/by/4.0/");
        let overlay = build_overlay(&bag, true)
            .expect("no overlay error")
            .expect("overlay present");
        assert_eq!(
            overlay.license.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(overlay.marked, None);
        assert!(overlay.owners.is_empty());
    }

    #[test]
    fn blank_values_are_an_overlay_error() {
        let bag = MetadataBag::new().with(field::CERTIFICATE, "  ");
        assert_eq!(
            build_overlay(&bag, true),
            Err(OverlayError::NoRightsValues {
                fields: vec![field::CERTIFICATE.to_string()]
            })
        );
    }

    #[test]
    fn xmp_merge_fills_only_absent_fields() {
        let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"
            xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/"
            xmpRights:Marked="True" xmpRights:Certificate="https://example.org/c"/>"#;
        let mut bag = MetadataBag::new().with(field::CERTIFICATE, "upstream");

        let added = merge_xmp(&RightsExtractor::default(), packet, &mut bag);
        assert_eq!(added, 1);
        assert_eq!(bag.get(field::MARKED), Some("true"));
        assert_eq!(bag.get(field::CERTIFICATE), Some("upstream"));
    }

    #[test]
    fn unreadable_packet_leaves_bag_untouched() {
        let mut bag = MetadataBag::new().with("a", "b");
        assert_eq!(merge_xmp(&RightsExtractor::default(), "", &mut bag), 0);
        assert_eq!(bag.len(), 1);
    }
}
