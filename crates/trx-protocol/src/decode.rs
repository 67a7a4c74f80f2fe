//! Request decoder - TRX request XML into a [`Request`]
//!
//! The document is first read into a small owned element tree so lookups
//! can be expressed as "first descendant named X", which is how the
//! protocol locates its nodes. Structural problems are errors; malformed
//! numbers are logged and replaced with zero.

use crate::entity::DEFAULT_WEIGHT;
use crate::error::ProtocolError;
use crate::request::{GenealogyEntry, Request};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

/// Deepest element nesting accepted in a request
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ProtocolError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(ProtocolError::malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(ProtocolError::malformed)?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First element named `name` in document order, starting with `self`
    fn find(&self, name: &str) -> Option<&Element> {
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.name == name {
                return Some(element);
            }
            pending.extend(element.children.iter().rev());
        }
        None
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn parse_document(xml: &[u8]) -> Result<Element, ProtocolError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(ProtocolError::malformed)?
        {
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ProtocolError::malformed(format!(
                        "elements nested deeper than {} levels",
                        MAX_DEPTH
                    )));
                }
                stack.push(Element::from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = Element::from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ProtocolError::malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(ProtocolError::malformed)?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ProtocolError::malformed(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| ProtocolError::malformed("document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ProtocolError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ProtocolError::malformed("multiple root elements")),
    }
    Ok(())
}

/// Parse an integer, tolerating surrounding whitespace.
///
/// Anything else is logged and read as zero.
fn parse_int(raw: &str, what: &str) -> i32 {
    match raw.trim().parse::<i32>() {
        Ok(n) => n,
        Err(_) => {
            warn!(value = %raw, "Malformed {}, using 0", what);
            0
        }
    }
}

/// Decode a TRX transform request.
///
/// # Errors
///
/// - [`ProtocolError::MalformedMessage`] if `xml` is not well-formed
/// - [`ProtocolError::MissingNode`] if `Entity`, its `Value` or `Limits` is absent
///
/// # Examples
///
/// ```
/// use trx_protocol::decode_request;
///
/// let xml = br#"<MaltegoMessage><MaltegoTransformRequestMessage>
///   <Entities><Entity Type="maltego.Person"><Value>Spencer</Value></Entity></Entities>
///   <Limits SoftLimit="12"/>
/// </MaltegoTransformRequestMessage></MaltegoMessage>"#;
///
/// let request = decode_request(xml).unwrap();
/// assert_eq!(request.value, "Spencer");
/// assert_eq!(request.weight, 100);
/// assert_eq!(request.slider, 12);
/// ```
pub fn decode_request(xml: &[u8]) -> Result<Request, ProtocolError> {
    let document = parse_document(xml)?;

    let entity = document
        .find("Entity")
        .ok_or(ProtocolError::MissingNode("Entity"))?;
    let value = entity
        .find("Value")
        .ok_or(ProtocolError::MissingNode("Value"))?;
    let limits = document
        .find("Limits")
        .ok_or(ProtocolError::MissingNode("Limits"))?;

    let mut request = Request::new(
        value.text.clone(),
        entity.attribute("Type").unwrap_or_default(),
    );

    request.weight = entity
        .find("Weight")
        .map(|w| parse_int(&w.text, "entity weight"))
        .unwrap_or(DEFAULT_WEIGHT);

    request.slider = match limits.attribute("SoftLimit") {
        Some(raw) => parse_int(raw, "soft limit"),
        None => {
            warn!("Limits node has no SoftLimit, using 0");
            0
        }
    };

    if let Some(genealogy) = entity.find("Genealogy") {
        request.genealogy = genealogy
            .children_named("Type")
            .map(|t| GenealogyEntry {
                name: t.attribute("Name").unwrap_or_default().to_string(),
                old_name: t.attribute("OldName").map(str::to_string),
            })
            .collect();
    }

    // Genealogy must be in place before properties so legacy names resolve
    if let Some(fields) = entity.find("AdditionalFields") {
        for (name, value) in named_fields(fields) {
            request.insert_property(name, value);
        }
    }

    if let Some(fields) = document.find("TransformFields") {
        for (name, value) in named_fields(fields) {
            request.settings.insert(name.to_string(), value.to_string());
        }
    }

    debug!(
        entity_type = %request.entity_type,
        properties = request.properties.len(),
        settings = request.settings.len(),
        "Decoded transform request"
    );

    Ok(request)
}

fn named_fields(container: &Element) -> impl Iterator<Item = (&str, &str)> {
    container.children_named("Field").filter_map(|field| {
        match field.attribute("Name").filter(|n| !n.is_empty()) {
            Some(name) => Some((name, field.text.as_str())),
            None => {
                debug!("Skipping field without a name");
                None
            }
        }
    })
}
