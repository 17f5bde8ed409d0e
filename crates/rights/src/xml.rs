//! Owned, namespace-aware XML tree for XMP packets.
//!
//! Packets are small, so both extraction paths work on a fully materialized
//! tree instead of streaming events. The tree is built iteratively from
//! [`quick_xml::NsReader`] events with an explicit stack of open elements, and
//! all traversal helpers in this module walk it with explicit stacks too:
//! nothing here recurses on input depth.
use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use tracing::debug;

use crate::error::RightsError;

/// Maximum element nesting accepted by the parser.
pub const MAX_DEPTH: usize = 256;

/// How the parser reacts to input that is not well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Any structural problem is an error.
    Strict,
    /// Repair what can be repaired and keep the partial tree.
    Tolerant,
}

/// A namespaced attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
    pub value: String,
}

/// Child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its resolved namespace and the prefix it was written with.
///
/// The prefix is kept so that tolerant lookups can still recognize
/// `xmpRights:Marked` in fragments that forgot to declare the namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Matches on resolved namespace and local name.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == Some(namespace)
    }

    /// Like [`Element::is`], but an element whose prefix never resolved also
    /// matches when it carries the conventional prefix.
    pub fn is_loose(&self, namespace: &str, prefix: &str, local: &str) -> bool {
        self.local == local && name_matches(&self.namespace, &self.prefix, namespace, prefix)
    }

    /// Value of the attribute `namespace`:`local`, if present.
    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.local == local && attr.namespace.as_deref() == Some(namespace))
            .map(|attr| attr.value.as_str())
    }

    /// Attribute lookup with the same unbound-prefix leniency as [`Element::is_loose`].
    pub fn attribute_loose(&self, namespace: &str, prefix: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| {
                attr.local == local && name_matches(&attr.namespace, &attr.prefix, namespace, prefix)
            })
            .map(|attr| attr.value.as_str())
    }

    /// Direct element children in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// This element and every element below it, pre-order, document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            let children: Vec<&Element> = element.child_elements().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Concatenated text of all descendant text nodes, trimmed.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(chunk) => text.push_str(chunk),
                Node::Element(element) => stack.extend(element.children.iter().rev()),
            }
        }
        text.trim().to_string()
    }

    fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

fn name_matches(
    namespace: &Option<String>,
    prefix: &Option<String>,
    want_namespace: &str,
    want_prefix: &str,
) -> bool {
    match namespace {
        Some(ns) => ns == want_namespace,
        None => prefix.as_deref() == Some(want_prefix),
    }
}

/// Parses `input` into a tree.
///
/// A packet with several top-level elements (a bare run of `rdf:Description`
/// fragments, say) is wrapped in a synthetic element with an empty name;
/// strict mode rejects it instead.
pub fn parse(input: &str, mode: ParseMode) -> Result<Element, RightsError> {
    let strict = mode == ParseMode::Strict;
    let mut reader = NsReader::from_str(input);
    let config = reader.config_mut();
    config.check_end_names = strict;
    config.allow_unmatched_ends = !strict;

    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Element> = Vec::new();
    // Tolerant mode: number of open elements being skipped past MAX_DEPTH.
    let mut skipped = 0usize;

    loop {
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(err) if strict => return Err(RightsError::Xml(err.to_string())),
            Err(err) => {
                debug!(error = %err, "xmp_parse_truncated");
                break;
            }
        };
        let namespace = resolved_namespace(&resolved);

        match event {
            Event::Start(start) => {
                if skipped > 0 || stack.len() >= MAX_DEPTH {
                    if strict {
                        return Err(RightsError::DepthExceeded { limit: MAX_DEPTH });
                    }
                    skipped += 1;
                    continue;
                }
                let element = open_element(&reader, namespace, &start, strict)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                if skipped > 0 || stack.len() >= MAX_DEPTH {
                    if strict {
                        return Err(RightsError::DepthExceeded { limit: MAX_DEPTH });
                    }
                    continue;
                }
                let element = open_element(&reader, namespace, &start, strict)?;
                attach(&mut stack, &mut roots, element);
            }
            Event::End(end) => {
                if skipped > 0 {
                    skipped -= 1;
                    continue;
                }
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                if strict {
                    let Some(element) = stack.pop() else {
                        return Err(RightsError::Xml(format!("unexpected closing tag </{name}>")));
                    };
                    attach(&mut stack, &mut roots, element);
                } else if let Some(pos) = stack.iter().rposition(|el| el.qualified_name() == name) {
                    while stack.len() > pos {
                        if let Some(element) = stack.pop() {
                            attach(&mut stack, &mut roots, element);
                        }
                    }
                }
            }
            Event::Text(text) => {
                if skipped > 0 {
                    continue;
                }
                let value = match text.unescape() {
                    Ok(value) => value.into_owned(),
                    Err(err) if strict => return Err(RightsError::Xml(err.to_string())),
                    Err(_) => lossy(&text).into_owned(),
                };
                push_text(&mut stack, value);
            }
            Event::CData(data) => {
                if skipped > 0 {
                    continue;
                }
                let value = lossy(&data).into_owned();
                push_text(&mut stack, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        if strict {
            return Err(RightsError::Xml(format!(
                "unclosed element <{}>",
                open.qualified_name()
            )));
        }
    }
    while let Some(element) = stack.pop() {
        attach(&mut stack, &mut roots, element);
    }

    match roots.len() {
        0 => Err(RightsError::EmptyPacket),
        1 => Ok(roots.remove(0)),
        n if strict => Err(RightsError::Xml(format!("{n} root elements"))),
        _ => Ok(Element {
            children: roots.into_iter().map(Node::Element).collect(),
            ..Element::default()
        }),
    }
}

fn resolved_namespace(resolved: &ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
    strict: bool,
) -> Result<Element, RightsError> {
    let name = start.name();
    let mut element = Element {
        namespace,
        prefix: name.prefix().map(|p| lossy(p.as_ref()).into_owned()),
        local: lossy(name.local_name().as_ref()).into_owned(),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes().with_checks(strict) {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) if strict => return Err(RightsError::Xml(err.to_string())),
            Err(_) => continue,
        };
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(err) if strict => return Err(RightsError::Xml(err.to_string())),
            Err(_) => lossy(&attr.value).into_owned(),
        };
        element.attributes.push(Attribute {
            namespace: resolved_namespace(&resolved),
            prefix: attr.key.prefix().map(|p| lossy(p.as_ref()).into_owned()),
            local: lossy(local.as_ref()).into_owned(),
            value,
        });
    }
    Ok(element)
}

fn attach(stack: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => roots.push(element),
    }
}

fn push_text(stack: &mut [Element], value: String) {
    if value.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(value));
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
