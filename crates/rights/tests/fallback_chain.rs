use rights::{
    extract_rights, RawTreeStrategy, RightsError, RightsExtractor, RightsFields, RightsStrategy,
    SchemaStrategy, XmpRightsSchema,
};

/// Stands in for a schema object that cannot be obtained.
struct Unavailable;

impl RightsStrategy for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn extract(&self, _packet: &str) -> Result<RightsFields, RightsError> {
        Err(RightsError::Xml("schema object unavailable".into()))
    }
}

const FULL_PACKET: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/"
    xmpRights:Marked="True"
    xmpRights:Certificate="https://example.org/certificate"
    xmpRights:WebStatement="https://creativecommons.org/licenses/by-sa/4.0/">
   <xmpRights:UsageTerms>
    <rdf:Alt>
     <rdf:li xml:lang="x-default">Share alike with attribution</rdf:li>
    </rdf:Alt>
   </xmpRights:UsageTerms>
   <xmpRights:Owner>
    <rdf:Bag>
     <rdf:li>A</rdf:li>
     <rdf:li>B</rdf:li>
     <rdf:li>C</rdf:li>
    </rdf:Bag>
   </xmpRights:Owner>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

fn expected() -> RightsFields {
    RightsFields {
        certificate: Some("https://example.org/certificate".into()),
        marked: Some(true),
        usage_terms: Some("Share alike with attribution".into()),
        web_statement: Some("https://creativecommons.org/licenses/by-sa/4.0/".into()),
        owners: vec!["A".into(), "B".into(), "C".into()],
    }
}

#[test]
fn structured_path_reads_full_packet() {
    let fields = SchemaStrategy.extract(FULL_PACKET).expect("schema path");
    assert_eq!(fields, expected());
}

#[test]
fn raw_tree_recovers_everything_when_schema_is_unavailable() {
    let extractor =
        RightsExtractor::with_strategies(vec![Box::new(Unavailable), Box::new(RawTreeStrategy)]);
    let fields = extractor.extract(FULL_PACKET).expect("fallback path");
    assert_eq!(fields, expected());
}

#[test]
fn both_paths_agree_on_canonical_packets() {
    let structured = SchemaStrategy.extract(FULL_PACKET).expect("schema path");
    let raw = RawTreeStrategy.extract(FULL_PACKET).expect("raw path");
    assert_eq!(structured, raw);
}

#[test]
fn default_chain_order() {
    assert_eq!(
        RightsExtractor::default().strategy_names(),
        ["schema", "raw_tree"]
    );
}

#[test]
fn broken_packet_uses_fallback() {
    // Closing tags for the description and rdf:RDF are missing.
    let packet = &FULL_PACKET[..FULL_PACKET.find("</rdf:Description>").expect("marker")];
    assert!(XmpRightsSchema::parse(packet).is_err());

    let fields = extract_rights(packet).expect("fallback path");
    assert_eq!(fields, expected());
}

#[test]
fn fields_serialize_with_owner_list() {
    let json = serde_json::to_value(expected()).expect("serializable");
    assert_eq!(json["owners"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(json["marked"], serde_json::json!(true));
}

#[test]
fn rights_on_xmpmeta_root_reach_raw_tree() {
    let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"
    xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/"
    xmpRights:Marked="True">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""/>
 </rdf:RDF>
</x:xmpmeta>"#;
    assert_eq!(
        SchemaStrategy.extract(packet),
        Err(RightsError::NoRightsSchema)
    );

    let fields = extract_rights(packet).expect("fallback path");
    assert_eq!(fields, RawTreeStrategy.extract(packet).expect("raw path"));
    assert_eq!(fields.marked, Some(true));
}

#[test]
fn undeclared_rights_prefix_reaches_raw_tree() {
    let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="">
   <xmpRights:Owner>
    <rdf:Bag>
     <rdf:li>A</rdf:li>
     <rdf:li>B</rdf:li>
     <rdf:li>C</rdf:li>
    </rdf:Bag>
   </xmpRights:Owner>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>"#;
    assert!(SchemaStrategy.extract(packet).is_err());

    let fields = extract_rights(packet).expect("fallback path");
    assert_eq!(fields.owners, ["A", "B", "C"]);
}
