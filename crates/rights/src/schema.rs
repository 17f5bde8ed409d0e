//! Structured path: an `xmpRights` schema object built from a well-formed packet.
//!
//! The packet is parsed strictly and interpreted with the XMP data model:
//! properties live on `rdf:Description` nodes below `rdf:RDF`, either as
//! attributes (simple values) or as child elements holding a simple value,
//! an `rdf:resource` URI, or an `rdf:Bag`/`rdf:Seq`/`rdf:Alt` array. Any
//! structural problem fails the whole path so the raw-tree walk can take over.
use std::collections::BTreeMap;

use crate::error::RightsError;
use crate::xml::{self, Element, ParseMode};
use crate::{parse_marked, RightsFields, RDF_NS, XML_NS, XMP_RIGHTS_NS};

/// A property value in the XMP data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmpValue {
    Simple(String),
    /// `rdf:Bag` or `rdf:Seq` items in document order.
    Array(Vec<String>),
    /// `rdf:Alt` items with their `xml:lang`, in document order.
    LangAlt(Vec<(Option<String>, String)>),
}

impl XmpValue {
    /// Single-valued view: the `x-default` alternative, else the first item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmpValue::Simple(value) => Some(value.as_str()),
            XmpValue::Array(items) => items.first().map(String::as_str),
            XmpValue::LangAlt(items) => items
                .iter()
                .find(|(lang, _)| lang.as_deref() == Some("x-default"))
                .or_else(|| items.first())
                .map(|(_, value)| value.as_str()),
        }
    }

    /// Multi-valued view.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            XmpValue::Simple(value) => vec![value.as_str()],
            XmpValue::Array(items) => items.iter().map(String::as_str).collect(),
            XmpValue::LangAlt(items) => items.iter().map(|(_, value)| value.as_str()).collect(),
        }
    }
}

/// `xmpRights` properties of one packet, keyed by local name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmpRightsSchema {
    properties: BTreeMap<String, XmpValue>,
}

impl XmpRightsSchema {
    /// Parses a packet strictly and builds the schema object.
    pub fn parse(packet: &str) -> Result<Self, RightsError> {
        let root = xml::parse(packet, ParseMode::Strict)?;
        Self::from_tree(&root)
    }

    /// Builds the schema object from an already parsed tree.
    ///
    /// When several descriptions carry the same property the first one wins.
    pub fn from_tree(root: &Element) -> Result<Self, RightsError> {
        let rdf = root
            .descendants()
            .into_iter()
            .find(|el| el.is(RDF_NS, "RDF"))
            .ok_or(RightsError::MissingRdf)?;

        let mut properties = BTreeMap::new();
        for description in rdf.child_elements().filter(|el| el.is(RDF_NS, "Description")) {
            for attr in &description.attributes {
                if attr.namespace.as_deref() != Some(XMP_RIGHTS_NS) {
                    continue;
                }
                let value = attr.value.trim();
                if !value.is_empty() {
                    properties
                        .entry(attr.local.clone())
                        .or_insert_with(|| XmpValue::Simple(value.to_string()));
                }
            }
            for property in description
                .child_elements()
                .filter(|el| el.namespace.as_deref() == Some(XMP_RIGHTS_NS))
            {
                if let Some(value) = property_value(property) {
                    properties.entry(property.local.clone()).or_insert(value);
                }
            }
        }
        Ok(Self { properties })
    }

    pub fn property(&self, local: &str) -> Option<&XmpValue> {
        self.properties.get(local)
    }

    pub fn certificate(&self) -> Option<&str> {
        self.text("Certificate")
    }

    /// `None` when the property is absent; any value other than `True` is `false`.
    pub fn marked(&self) -> Option<bool> {
        self.text("Marked").map(parse_marked)
    }

    pub fn usage_terms(&self) -> Option<&str> {
        self.text("UsageTerms")
    }

    pub fn web_statement(&self) -> Option<&str> {
        self.text("WebStatement")
    }

    pub fn owners(&self) -> Vec<&str> {
        self.property("Owner").map(XmpValue::as_list).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_fields(&self) -> RightsFields {
        RightsFields {
            certificate: self.certificate().map(str::to_string),
            marked: self.marked(),
            usage_terms: self.usage_terms().map(str::to_string),
            web_statement: self.web_statement().map(str::to_string),
            owners: self.owners().into_iter().map(str::to_string).collect(),
        }
    }

    fn text(&self, local: &str) -> Option<&str> {
        self.property(local).and_then(XmpValue::as_text)
    }
}

fn property_value(property: &Element) -> Option<XmpValue> {
    if let Some(resource) = property.attribute(RDF_NS, "resource") {
        return non_empty(resource).map(XmpValue::Simple);
    }

    let container = property
        .child_elements()
        .find(|el| el.is(RDF_NS, "Bag") || el.is(RDF_NS, "Seq") || el.is(RDF_NS, "Alt"));
    match container {
        Some(alt) if alt.local == "Alt" => {
            let items: Vec<(Option<String>, String)> = list_items(alt)
                .filter_map(|li| {
                    let lang = li
                        .attribute(XML_NS, "lang")
                        .or_else(|| li.attribute_loose(XML_NS, "xml", "lang"))
                        .map(str::to_string);
                    non_empty(&li.text_content()).map(|text| (lang, text))
                })
                .collect();
            (!items.is_empty()).then_some(XmpValue::LangAlt(items))
        }
        Some(array) => {
            let items: Vec<String> = list_items(array)
                .filter_map(|li| non_empty(&li.text_content()))
                .collect();
            (!items.is_empty()).then_some(XmpValue::Array(items))
        }
        None => non_empty(&property.text_content()).map(XmpValue::Simple),
    }
}

fn list_items(container: &Element) -> impl Iterator<Item = &Element> {
    container.child_elements().filter(|el| el.is(RDF_NS, "li"))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKET: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about=""
        xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/"
        xmpRights:Marked="True"
        xmpRights:Certificate="https://example.org/cert">
      <xmpRights:WebStatement rdf:resource="https://creativecommons.org/licenses/by/4.0/"/>
      <xmpRights:UsageTerms>
        <rdf:Alt>
          <rdf:li xml:lang="fr">Attribution requise</rdf:li>
          <rdf:li xml:lang="x-default">Attribution required</rdf:li>
        </rdf:Alt>
      </xmpRights:UsageTerms>
      <xmpRights:Owner>
        <rdf:Bag>
          <rdf:li>Alice</rdf:li>
          <rdf:li>Bob</rdf:li>
        </rdf:Bag>
      </xmpRights:Owner>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

    #[test]
    fn reads_all_rights_properties() {
        let schema = XmpRightsSchema::parse(PACKET).expect("schema parses");
        assert_eq!(schema.certificate(), Some("https://example.org/cert"));
        assert_eq!(schema.marked(), Some(true));
        assert_eq!(schema.usage_terms(), Some("Attribution required"));
        assert_eq!(
            schema.web_statement(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(schema.owners(), ["Alice", "Bob"]);
    }

    #[test]
    fn missing_rdf_fails() {
        let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"
            xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/" xmpRights:Marked="True"/>"#;
        assert_eq!(XmpRightsSchema::parse(packet), Err(RightsError::MissingRdf));
    }

    #[test]
    fn malformed_packet_fails() {
        let packet = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description>"#;
        assert!(XmpRightsSchema::parse(packet).is_err());
    }

    #[test]
    fn marked_other_literal_is_false() {
        let packet = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/">
            <rdf:Description xmpRights:Marked="maybe"/>
        </rdf:RDF>"#;
        let schema = XmpRightsSchema::parse(packet).expect("schema parses");
        assert_eq!(schema.marked(), Some(false));
        assert_eq!(schema.certificate(), None);
        assert!(schema.owners().is_empty());
    }

    #[test]
    fn first_description_wins() {
        let packet = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/">
            <rdf:Description xmpRights:Certificate="first"/>
            <rdf:Description xmpRights:Certificate="second" xmpRights:WebStatement="ws"/>
        </rdf:RDF>"#;
        let schema = XmpRightsSchema::parse(packet).expect("schema parses");
        assert_eq!(schema.certificate(), Some("first"));
        assert_eq!(schema.web_statement(), Some("ws"));
    }

    #[test]
    fn blank_values_are_absent() {
        let packet = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/">
            <rdf:Description xmpRights:Certificate="   ">
              <xmpRights:Owner><rdf:Bag><rdf:li>  </rdf:li></rdf:Bag></xmpRights:Owner>
            </rdf:Description>
        </rdf:RDF>"#;
        let schema = XmpRightsSchema::parse(packet).expect("schema parses");
        assert!(schema.is_empty());
    }
}
