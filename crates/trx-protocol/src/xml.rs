//! XML and text utilities shared by the codec and the configuration export.
//!
//! TRX responses are a fixed shape, so the encoder streams events through
//! [`XmlWriter`] instead of building a DOM first. All text and attribute
//! content is sanitized before quick-xml escapes it.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;

/// Whether `c` may appear in an XML 1.0 document.
///
/// Allowed: `#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`.
/// Surrogates cannot occur in a Rust `char`, so unpaired surrogates in the
/// source are already `U+FFFD` by the time they reach this check.
pub fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replace every run of characters that are not allowed in XML with `?`.
///
/// Borrows when the input is already clean.
///
/// # Examples
///
/// ```
/// use trx_protocol::xml::remove_invalid_xml_chars;
///
/// assert_eq!(remove_invalid_xml_chars("ok"), "ok");
/// assert_eq!(remove_invalid_xml_chars("a\u{1}b"), "a?b");
/// assert_eq!(remove_invalid_xml_chars("a\u{1}\u{2}b"), "a?b");
/// ```
pub fn remove_invalid_xml_chars(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_valid_xml_char) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut in_invalid_run = false;
    for c in value.chars() {
        if is_valid_xml_char(c) {
            out.push(c);
            in_invalid_run = false;
        } else if !in_invalid_run {
            out.push('?');
            in_invalid_run = true;
        }
    }
    Cow::Owned(out)
}

/// Coerce raw bytes to UTF-8 text (lossily) and strip invalid XML characters.
pub fn sanitize_bytes(value: &[u8]) -> String {
    remove_invalid_xml_chars(&String::from_utf8_lossy(value)).into_owned()
}

/// Quote a CSV field if it contains the separator.
pub fn escape_csv_field(field: &str, separator: char) -> Cow<'_, str> {
    if field.contains(separator) {
        Cow::Owned(format!("\"{}\"", field))
    } else {
        Cow::Borrowed(field)
    }
}

/// Convert a transform name to its URL path segment.
///
/// ```
/// use trx_protocol::xml::name_to_path;
///
/// assert_eq!(name_to_path("DNS_To_IP"), "dns-to-ip");
/// ```
pub fn name_to_path(name: &str) -> String {
    name.replace('_', "-").to_lowercase()
}

/// Split a PascalCase identifier into space-separated words.
///
/// ```
/// use trx_protocol::xml::pascal_case_to_title;
///
/// assert_eq!(pascal_case_to_title("GreetPerson"), "Greet Person");
/// assert_eq!(pascal_case_to_title("DNSToIP"), "DNS To IP");
/// ```
pub fn pascal_case_to_title(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_is_lower = prev.is_lowercase() || prev.is_ascii_digit();
            if !prev.is_whitespace() && (next_is_lower || prev_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

/// Streaming XML writer used by the response encoder.
///
/// Wraps [`quick_xml::Writer`] and sanitizes every text and attribute
/// value before it is escaped. In canonical mode attributes are written in
/// lexicographic order, empty elements are never self-closed and CDATA
/// sections are written as escaped text, so the output is byte-for-byte
/// stable. In compact mode attributes keep the order they were given in.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
    canonical: bool,
}

impl XmlWriter {
    /// Create a writer
    pub fn new(canonical: bool) -> Self {
        Self {
            inner: Writer::new(Vec::new()),
            canonical,
        }
    }

    /// Write an opening tag
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) {
        let tag = self.tag(name, attributes);
        self.write(Event::Start(tag));
    }

    /// Write a closing tag
    pub fn end(&mut self, name: &str) {
        self.write(Event::End(BytesEnd::new(name)));
    }

    /// Write an element without content
    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) {
        if self.canonical {
            self.start(name, attributes);
            self.end(name);
        } else {
            let tag = self.tag(name, attributes);
            self.write(Event::Empty(tag));
        }
    }

    /// Write escaped character data
    pub fn text(&mut self, text: &str) {
        let clean = remove_invalid_xml_chars(text);
        self.write(Event::Text(BytesText::from_escaped(partial_escape(
            clean.as_ref(),
        ))));
    }

    /// Write a CDATA section.
    ///
    /// Any `]]>` in the content is split across two sections.
    pub fn cdata(&mut self, content: &str) {
        if self.canonical {
            self.text(content);
            return;
        }

        let clean = remove_invalid_xml_chars(content);
        let pieces: Vec<&str> = clean.split("]]>").collect();
        let last = pieces.len() - 1;
        for (i, piece) in pieces.iter().enumerate() {
            let head = if i > 0 { ">" } else { "" };
            let tail = if i < last { "]]" } else { "" };
            let section = format!("{}{}{}", head, piece, tail);
            self.write(Event::CData(BytesCData::new(section)));
        }
    }

    /// Write `<name attrs>text</name>`
    pub fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) {
        self.start(name, attributes);
        self.text(text);
        self.end(name);
    }

    /// Consume the writer and return the document
    pub fn into_string(self) -> String {
        String::from_utf8(self.inner.into_inner())
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    fn tag<'a>(&self, name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
        let mut ordered: Vec<&(&str, &str)> = attributes.iter().collect();
        if self.canonical {
            ordered.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut tag = BytesStart::new(name);
        for (key, value) in ordered {
            let clean = remove_invalid_xml_chars(value);
            tag.push_attribute((*key, clean.as_ref()));
        }
        tag
    }

    fn write(&mut self, event: Event<'_>) {
        // Writes into a Vec<u8> cannot fail
        let _ = self.inner.write_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_chars_pass_through() {
        let input = "Hello\tSpencer!\n\r\u{E000}\u{10000}àé";
        assert!(matches!(remove_invalid_xml_chars(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_control_chars_replaced() {
        assert_eq!(remove_invalid_xml_chars("a\u{0}b\u{1F}c"), "a?b?c");
        assert_eq!(remove_invalid_xml_chars("\u{FFFE}\u{FFFF}"), "?");
    }

    #[test]
    fn test_sanitize_bytes_lossy() {
        assert_eq!(sanitize_bytes(b"ok\x01"), "ok?");
        assert_eq!(sanitize_bytes(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain", ','), "plain");
        assert_eq!(escape_csv_field("a,b", ','), "\"a,b\"");
    }

    #[test]
    fn test_pascal_case_to_title() {
        assert_eq!(pascal_case_to_title("OverlayExample"), "Overlay Example");
        assert_eq!(pascal_case_to_title("Greet Person"), "Greet Person");
        assert_eq!(pascal_case_to_title("lower"), "lower");
    }

    #[test]
    fn test_writer_compact_mode() {
        let mut writer = XmlWriter::new(false);
        writer.start("Root", &[("b", "2"), ("a", "1")]);
        writer.empty("Leaf", &[("x", "<&\">")]);
        writer.text_element("Text", &[], "a < b & c");
        writer.end("Root");

        assert_eq!(
            writer.into_string(),
            "<Root b=\"2\" a=\"1\"><Leaf x=\"&lt;&amp;&quot;&gt;\"/>\
             <Text>a &lt; b &amp; c</Text></Root>"
        );
    }

    #[test]
    fn test_writer_canonical_mode() {
        let mut writer = XmlWriter::new(true);
        writer.start("Root", &[("b", "2"), ("a", "1")]);
        writer.empty("Leaf", &[]);
        writer.cdata("<p>");
        writer.end("Root");

        assert_eq!(
            writer.into_string(),
            "<Root a=\"1\" b=\"2\"><Leaf></Leaf>&lt;p&gt;</Root>"
        );
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        let mut writer = XmlWriter::new(false);
        writer.cdata("a]]>b");
        assert_eq!(writer.into_string(), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_cdata_with_several_terminators() {
        let mut writer = XmlWriter::new(false);
        writer.cdata("]]>x]]>");
        let xml = writer.into_string();
        assert_eq!(
            xml,
            "<![CDATA[]]]]><![CDATA[>x]]]]><![CDATA[>]]>"
        );

        let mut reader = quick_xml::Reader::from_str(&xml);
        let mut text = String::new();
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::CData(c) => {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()))
                }
                quick_xml::events::Event::Eof => break,
                _ => {}
            }
        }
        assert_eq!(text, "]]>x]]>");
    }

    #[test]
    fn test_attribute_values_sanitized() {
        let mut writer = XmlWriter::new(false);
        writer.empty("Leaf", &[("x", "a\u{1}b")]);
        assert_eq!(writer.into_string(), "<Leaf x=\"a?b\"/>");
    }
}
