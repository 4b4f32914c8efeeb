//! Pretty printer for document trees

use crate::error::{Result, XmlPathError};
use crate::model::{Content, Node};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 4;

/// Render a tree as indented XML
///
/// Text is escaped and trimmed; elements without content are written as
/// empty-element tags.
pub fn prettify(root: &Node) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    write_element(&mut writer, root).map_err(|e| XmlPathError::Serialization {
        message: e.to_string(),
    })?;
    String::from_utf8(writer.into_inner()).map_err(|e| XmlPathError::Serialization {
        message: e.to_string(),
    })
}

fn write_element(writer: &mut Writer<Vec<u8>>, node: &Node) -> std::io::Result<()> {
    let mut start = BytesStart::new(node.name());
    for (name, value) in node.attributes() {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let content = node.content();
    if content.is_empty() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    for part in content {
        match part {
            Content::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    writer.write_event(Event::Text(BytesText::new(text)))?;
                }
            }
            Content::Element(child) => write_element(writer, child)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(node.name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use crate::source::{MarkupParser, StrictXmlParser};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indents_nested_elements() {
        let root = Element::builder("shopping")
            .child(
                Element::builder("category")
                    .attribute("type", "groceries")
                    .child(Element::builder("name").text("Chocolate").build())
                    .child(Element::builder("empty").build())
                    .build(),
            )
            .build();

        assert_eq!(
            prettify(&root).unwrap(),
            "<shopping>\n    <category type=\"groceries\">\n        <name>Chocolate</name>\n        <empty/>\n    </category>\n</shopping>"
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let root = Element::builder("a")
            .attribute("title", "\"x\" & y")
            .text("1 < 2")
            .build();
        let pretty = prettify(&root).unwrap();
        assert_eq!(pretty, "<a title=\"&quot;x&quot; &amp; y\">1 &lt; 2</a>");
    }

    #[test]
    fn test_output_parses_to_same_tree() {
        let source = "<r><x id=\"1\">one</x><y><z>two</z></y></r>";
        let parser = StrictXmlParser::default();
        let original = parser.parse(source).unwrap();
        let reparsed = parser.parse(&prettify(&original).unwrap()).unwrap();
        assert_eq!(reparsed, original);
    }
}
