//! Raw-tree path: walk a leniently parsed packet without a schema object.
//!
//! Each property is looked up in three places, first hit wins:
//!
//! 1. as an `xmpRights` attribute on the root element,
//! 2. as an `xmpRights` element anywhere below the root, matched by local name,
//! 3. as an `xmpRights` attribute on any `rdf:Description`.
//!
//! Owners are collected from every `rdf:li` of the `rdf:Bag`/`rdf:Seq`
//! containers directly under `xmpRights:Owner` elements, in document order and without deduplication.
use crate::error::RightsError;
use crate::xml::{self, Element, ParseMode};
use crate::{parse_marked, RightsFields, RDF_NS, XML_NS, XMP_RIGHTS_NS};

const RIGHTS_PREFIX: &str = "xmpRights";
const RDF_PREFIX: &str = "rdf";

/// Parses `packet` tolerantly and walks the resulting tree.
///
/// Only an empty packet (no element at all) is an error here.
pub fn extract(packet: &str) -> Result<RightsFields, RightsError> {
    let root = xml::parse(packet, ParseMode::Tolerant)?;
    Ok(from_tree(&root))
}

pub fn from_tree(root: &Element) -> RightsFields {
    let elements = root.descendants();
    RightsFields {
        certificate: find_property(root, &elements, "Certificate"),
        marked: find_property(root, &elements, "Marked").map(|raw| parse_marked(&raw)),
        usage_terms: find_property(root, &elements, "UsageTerms"),
        web_statement: find_property(root, &elements, "WebStatement"),
        owners: find_owners(root, &elements),
    }
}

fn find_property(root: &Element, elements: &[&Element], local: &str) -> Option<String> {
    if let Some(value) = root
        .attribute_loose(XMP_RIGHTS_NS, RIGHTS_PREFIX, local)
        .and_then(non_empty)
    {
        return Some(value);
    }

    if let Some(value) = elements
        .iter()
        .skip(1)
        .filter(|el| el.is_loose(XMP_RIGHTS_NS, RIGHTS_PREFIX, local))
        .find_map(|el| element_value(el))
    {
        return Some(value);
    }

    elements
        .iter()
        .filter(|el| el.is_loose(RDF_NS, RDF_PREFIX, "Description"))
        .find_map(|el| {
            el.attribute_loose(XMP_RIGHTS_NS, RIGHTS_PREFIX, local)
                .and_then(non_empty)
        })
}

/// Value of a property element: `rdf:resource`, then the preferred
/// alternative of a container, then plain text.
fn element_value(property: &Element) -> Option<String> {
    if let Some(resource) = property
        .attribute_loose(RDF_NS, RDF_PREFIX, "resource")
        .and_then(non_empty)
    {
        return Some(resource);
    }

    let container = property.descendants().into_iter().skip(1).find(|el| {
        el.is_loose(RDF_NS, RDF_PREFIX, "Alt")
            || el.is_loose(RDF_NS, RDF_PREFIX, "Bag")
            || el.is_loose(RDF_NS, RDF_PREFIX, "Seq")
    });
    if let Some(container) = container {
        let items: Vec<&Element> = list_items(container).collect();
        let preferred = items
            .iter()
            .find(|li| li.attribute_loose(XML_NS, "xml", "lang") == Some("x-default"))
            .or_else(|| items.first());
        if let Some(value) = preferred.and_then(|li| non_empty(&li.text_content())) {
            return Some(value);
        }
    }

    non_empty(&property.text_content())
}

fn find_owners(root: &Element, elements: &[&Element]) -> Vec<String> {
    let mut owners = Vec::new();
    for owner in elements
        .iter()
        .filter(|el| el.is_loose(XMP_RIGHTS_NS, RIGHTS_PREFIX, "Owner"))
    {
        let bags: Vec<&Element> = owner
            .child_elements()
            .filter(|el| {
                el.is_loose(RDF_NS, RDF_PREFIX, "Bag") || el.is_loose(RDF_NS, RDF_PREFIX, "Seq")
            })
            .collect();
        if bags.is_empty() {
            owners.extend(non_empty(&owner.text_content()));
            continue;
        }
        for bag in bags {
            owners.extend(list_items(bag).filter_map(|li| non_empty(&li.text_content())));
        }
    }
    if !owners.is_empty() {
        return owners;
    }

    // Single owner written in attribute form.
    std::iter::once(root)
        .chain(
            elements
                .iter()
                .copied()
                .filter(|el| el.is_loose(RDF_NS, RDF_PREFIX, "Description")),
        )
        .find_map(|el| {
            el.attribute_loose(XMP_RIGHTS_NS, RIGHTS_PREFIX, "Owner")
                .and_then(non_empty)
        })
        .into_iter()
        .collect()
}

fn list_items(container: &Element) -> impl Iterator<Item = &Element> {
    container
        .child_elements()
        .filter(|el| el.is_loose(RDF_NS, RDF_PREFIX, "li"))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
