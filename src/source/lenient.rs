//! Tag-soup front end backed by quick-xml
//!
//! quick-xml is run with end-name checking off, and the element stack is
//! balanced here:
//!
//! - void elements (`br`, `img`, ...) never take children
//! - opening `p`, `li`, `td`, ... closes an open sibling of the same family
//! - an end tag closes back to the nearest open element with that name and is
//!   dropped when nothing matches
//! - whatever is still open at end of input (or at a tokenizer error) is closed
//!
//! Several top-level elements are wrapped in a synthetic `html` element.

use super::{MarkupParser, normalize_text};
use crate::config::{CompatibilityMode, XmlPathConfig};
use crate::error::AcquisitionError;
use crate::model::{ElementBuilder, Node};
use log::warn;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Opening the key element implicitly closes open elements from the list
const IMPLIED_END_TAGS: &[(&str, &[&str])] = &[
    ("p", &["p"]),
    ("li", &["li"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dt", "dd"]),
    ("tr", &["tr", "td", "th"]),
    ("td", &["td", "th"]),
    ("th", &["td", "th"]),
    ("option", &["option"]),
];

/// Wrapper name used when the input has several top-level elements
const SYNTHETIC_ROOT: &str = "html";

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

fn implied_closes(name: &str) -> &'static [&'static str] {
    IMPLIED_END_TAGS
        .iter()
        .find(|(opener, _)| opener.eq_ignore_ascii_case(name))
        .map_or(&[], |(_, closes)| closes)
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        "nbsp" => Some("\u{a0}"),
        "copy" => Some("\u{a9}"),
        "reg" => Some("\u{ae}"),
        "trade" => Some("\u{2122}"),
        "hellip" => Some("\u{2026}"),
        "mdash" => Some("\u{2014}"),
        "ndash" => Some("\u{2013}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        "euro" => Some("\u{20ac}"),
        "pound" => Some("\u{a3}"),
        _ => None,
    }
}

/// Unescape character data one reference at a time; an unknown or
/// malformed reference is kept as written
fn unescape_lossy(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    if !raw.contains('&') {
        return raw.into_owned();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail[1..].find(['&', ';']).map(|i| i + 1) else {
            out.push_str(tail);
            return out;
        };
        if tail.as_bytes()[semi] == b'&' {
            // stray ampersand
            out.push('&');
            rest = &tail[1..];
            continue;
        }
        let reference = &tail[..=semi];
        match quick_xml::escape::unescape_with(reference, resolve_entity) {
            Ok(text) => out.push_str(&text),
            Err(_) => out.push_str(reference),
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    out
}

/// Element stack that repairs nesting as events arrive
struct SoupTree {
    stack: Vec<ElementBuilder>,
    roots: Vec<Node>,
    trim_whitespace: bool,
    max_depth: usize,
}

impl SoupTree {
    fn new(config: &LenientHtmlParser) -> Self {
        Self {
            stack: Vec::new(),
            roots: Vec::new(),
            trim_whitespace: config.trim_whitespace,
            max_depth: config.max_depth,
        }
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<String, AcquisitionError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let closes = implied_closes(&name);
        while self
            .stack
            .last()
            .is_some_and(|top| closes.iter().any(|c| c.eq_ignore_ascii_case(top.name())))
        {
            self.close_top();
        }

        if self.stack.len() >= self.max_depth {
            return Err(AcquisitionError::TooDeep {
                max_depth: self.max_depth,
            });
        }

        let mut builder = ElementBuilder::new(name.clone());
        for attr in start.html_attributes() {
            match attr {
                Ok(attr) if attr.key.as_ref().starts_with(b"xmlns") => {}
                Ok(attr) => {
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                    builder.push_attribute(key, unescape_lossy(&attr.value));
                }
                Err(e) => warn!("skipping malformed attribute on <{name}>: {e}"),
            }
        }
        self.stack.push(builder);
        Ok(name)
    }

    fn close_top(&mut self) {
        if let Some(builder) = self.stack.pop() {
            let node = builder.build();
            match self.stack.last_mut() {
                Some(parent) => parent.push_child(node),
                None => self.roots.push(node),
            }
        }
    }

    fn close(&mut self, name: &str) {
        let Some(position) = self
            .stack
            .iter()
            .rposition(|open| open.name().eq_ignore_ascii_case(name))
        else {
            warn!("ignoring unmatched end tag </{name}>");
            return;
        };
        while self.stack.len() > position + 1 {
            if let Some(top) = self.stack.last() {
                warn!("implicitly closing <{}> before </{name}>", top.name());
            }
            self.close_top();
        }
        self.close_top();
    }

    fn text(&mut self, raw: &str) {
        let Some(text) = normalize_text(raw, self.trim_whitespace) else {
            return;
        };
        if let Some(top) = self.stack.last_mut() {
            top.push_text(text);
        }
    }

    fn finish(mut self) -> Result<Node, AcquisitionError> {
        while let Some(top) = self.stack.last() {
            warn!("closing unclosed element <{}> at end of input", top.name());
            self.close_top();
        }
        match self.roots.len() {
            0 => Err(AcquisitionError::NoRootElement),
            1 => self.roots.pop().ok_or(AcquisitionError::NoRootElement),
            _ => {
                let mut wrapper = ElementBuilder::new(SYNTHETIC_ROOT);
                for root in self.roots {
                    wrapper.push_child(root);
                }
                Ok(wrapper.build())
            }
        }
    }
}

/// Repairs malformed markup instead of rejecting it
#[derive(Debug, Clone)]
pub struct LenientHtmlParser {
    trim_whitespace: bool,
    max_depth: usize,
}

impl LenientHtmlParser {
    pub fn new(config: &XmlPathConfig) -> Self {
        Self {
            trim_whitespace: config.trim_whitespace,
            max_depth: config.max_depth,
        }
    }
}

impl Default for LenientHtmlParser {
    fn default() -> Self {
        Self::new(&XmlPathConfig::for_mode(CompatibilityMode::Html))
    }
}

impl MarkupParser for LenientHtmlParser {
    fn mode(&self) -> CompatibilityMode {
        CompatibilityMode::Html
    }

    fn parse(&self, text: &str) -> Result<Node, AcquisitionError> {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;

        let mut tree = SoupTree::new(self);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = tree.open(&e)?;
                    if is_void(&name) {
                        tree.close_top();
                    }
                }
                Ok(Event::Empty(e)) => {
                    tree.open(&e)?;
                    tree.close_top();
                }
                Ok(Event::End(e)) => {
                    tree.close(&String::from_utf8_lossy(e.local_name().as_ref()));
                }
                Ok(Event::Text(e)) => tree.text(&unescape_lossy(&e)),
                Ok(Event::CData(e)) => tree.text(&String::from_utf8_lossy(&e)),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "stopping at byte {} after markup error: {e}",
                        reader.buffer_position()
                    );
                    break;
                }
            }
        }
        tree.finish()
    }
}
