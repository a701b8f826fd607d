//! Minimal owned XML element tree built from quick-xml events.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;

use crate::error::{NoticeError, Result};

/// What: One element of a parsed document.
///
/// Details:
/// - Only element names, direct text and child elements are kept; attributes are ignored.
/// - Repeated children are kept in document order, so a lone child and a list of children
///   are read the same way through [`XmlElement::children_named`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name as written, including any namespace prefix.
    name: String,
    /// Concatenated, trimmed direct text content.
    text: String,
    /// Child elements in document order.
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element.
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Trim the collected text once the element is closed.
    fn finish(mut self) -> Self {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
        self
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct text content (empty for `<Tag/>` or `<Tag></Tag>`).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// What: Every child with the given tag name, as a sequence.
    ///
    /// Inputs:
    /// - `name`: Tag name to match exactly.
    ///
    /// Output:
    /// - Iterator over matching children in document order; empty when there are none.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Build a `MalformedXml` error.
fn malformed(msg: impl Into<String>) -> NoticeError {
    NoticeError::MalformedXml(msg.into())
}

/// What: Hang a finished element under its parent, or make it the document root.
///
/// Output:
/// - `Err` when a second top-level element appears.
fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed(format!(
            "multiple root elements, found <{}> after the first",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

/// Append text to the element currently open; non-blank text outside the root is rejected.
fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(malformed("text outside of the root element")),
    }
    Ok(())
}

/// What: Resolve entity and character references one at a time.
///
/// Inputs:
/// - `raw`: Text exactly as it appears in the document.
///
/// Output:
/// - Text with every well-formed reference (`&lt;`, `&#39;`, `&#x41;`, ...) decoded.
///
/// Details:
/// - A `&` that does not open a reference quick-xml can resolve is kept as written, so one
///   stray ampersand does not stop the rest of the text from being decoded.
fn decode_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let reference = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .filter(|&end| tail.as_bytes()[end + 1] == b';')
            .map(|end| &tail[..end + 2]);
        match reference.and_then(|r| unescape(r).ok().map(|decoded| (r.len(), decoded))) {
            Some((len, decoded)) => {
                out.push_str(&decoded);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode a tag name into an owned string.
fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// What: Check well-formedness of `xml` and build its element tree.
///
/// Inputs:
/// - `xml`: Complete document text.
///
/// Output:
/// - Root element on success; `NoticeError::MalformedXml` otherwise.
///
/// # Errors
/// - Reader errors (bad syntax, mismatched end tags)
/// - Closing tags with no open element, elements left open at end of input
/// - Missing root, more than one root, or text outside the root
///
/// Details:
/// - Text pieces split by comments or CDATA are joined as written, then trimmed once
///   when the element closes.
/// - References are decoded one by one; a stray `&` is kept as written rather than rejected.
/// - Declarations, comments, processing instructions and doctypes are skipped.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(e.name().as_ref());
                if stack.is_empty() && root.is_some() {
                    return Err(malformed(format!(
                        "multiple root elements, found <{name}> after the first"
                    )));
                }
                stack.push(XmlElement::new(name));
            }
            Ok(Event::Empty(e)) => {
                let element = XmlElement::new(tag_name(e.name().as_ref()));
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(e)) => {
                let name = tag_name(e.name().as_ref());
                let Some(element) = stack.pop() else {
                    return Err(malformed(format!("unexpected closing tag </{name}>")));
                };
                if element.name != name {
                    return Err(malformed(format!(
                        "closing tag </{name}> does not match <{}>",
                        element.name
                    )));
                }
                attach(&mut stack, &mut root, element.finish())?;
            }
            Ok(Event::Text(e)) => {
                let text = decode_text(&String::from_utf8_lossy(&e));
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(malformed(format!(
                    "{e} (at byte {})",
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}
