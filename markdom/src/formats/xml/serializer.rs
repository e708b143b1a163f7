//! XML serialization (Markdom events → Markdom XML)
//!
//! Builds an element tree while events arrive, using the same parent stacks as the
//! model builder, and writes it with `quick-xml` when the result is requested. Text
//! that starts or ends with a space or spans several lines goes into a CDATA section
//! so the exact whitespace survives indentation and reparsing.

use crate::error::FormatError;
use crate::handler::Handler;
use crate::types::EmphasisLevel;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const NAMESPACE: &str = "http://schema.markenwerk.net/markdom-1.0.xsd";
const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Clone)]
struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct XmlHandler {
    handle_comments: bool,
    pretty_print: bool,
    elements: Vec<Element>,
    block_parents: Vec<usize>,
    list_blocks: Vec<usize>,
    content_parents: Vec<usize>,
}

impl XmlHandler {
    pub fn new() -> Self {
        Self {
            handle_comments: true,
            pretty_print: false,
            elements: Vec::new(),
            block_parents: Vec::new(),
            list_blocks: Vec::new(),
            content_parents: Vec::new(),
        }
    }

    pub fn with_handle_comments(mut self, handle_comments: bool) -> Self {
        self.handle_comments = handle_comments;
        self
    }

    /// Indent nested elements by four spaces.
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    fn append(
        &mut self,
        parent: Option<usize>,
        name: &'static str,
        attributes: Vec<(&'static str, String)>,
        text: Option<&str>,
    ) -> usize {
        let index = self.elements.len();
        self.elements.push(Element {
            name,
            attributes,
            text: text.filter(|text| !text.is_empty()).map(str::to_string),
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(index);
        }
        index
    }

    fn block(&mut self, name: &'static str, attributes: Vec<(&'static str, String)>) -> usize {
        let parent = self.block_parents.last().copied();
        self.append(parent, name, attributes, None)
    }

    fn content(
        &mut self,
        name: &'static str,
        attributes: Vec<(&'static str, String)>,
        text: Option<&str>,
    ) -> usize {
        let parent = self.content_parents.last().copied();
        self.append(parent, name, attributes, text)
    }

    fn write(&self) -> Result<String, FormatError> {
        let mut writer = if self.pretty_print {
            Writer::new_with_indent(Vec::new(), b' ', 4)
        } else {
            Writer::new(Vec::new())
        };
        if !self.elements.is_empty() {
            self.write_element(&mut writer, 0)?;
        }
        let body = String::from_utf8(writer.into_inner())
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        Ok(format!("{DECLARATION}\n{body}\n"))
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, index: usize) -> Result<(), FormatError> {
        let element = &self.elements[index];
        let mut start = BytesStart::new(element.name);
        for (key, value) in &element.attributes {
            start.push_attribute((*key, value.as_str()));
        }
        if element.text.is_none() && element.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }
        write_event(writer, Event::Start(start))?;
        if let Some(text) = &element.text {
            let event = if needs_cdata(text) {
                Event::CData(BytesCData::new(text.as_str()))
            } else {
                Event::Text(BytesText::new(text))
            };
            write_event(writer, event)?;
        }
        for &child in &element.children {
            self.write_element(writer, child)?;
        }
        write_event(writer, Event::End(BytesEnd::new(element.name)))
    }
}

impl Default for XmlHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), FormatError> {
    writer
        .write_event(event)
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

fn needs_cdata(text: &str) -> bool {
    (text.contains('\n') || text.starts_with(' ') || text.ends_with(' ')) && !text.contains("]]>")
}

fn optional(attributes: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        attributes.push((key, value.to_string()));
    }
}

impl Handler for XmlHandler {
    type Output = Result<String, FormatError>;

    fn on_document_begin(&mut self) {
        self.elements.clear();
        self.block_parents.clear();
        self.list_blocks.clear();
        self.content_parents.clear();
        let root = self.append(
            None,
            "Document",
            vec![("version", "1.0".to_string()), ("xmlns", NAMESPACE.to_string())],
            None,
        );
        self.block_parents.push(root);
    }

    fn on_document_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_code_block(&mut self, code: &str, hint: Option<&str>) {
        let mut attributes = Vec::new();
        optional(&mut attributes, "hint", hint);
        let parent = self.block_parents.last().copied();
        self.append(parent, "Code", attributes, Some(code));
    }

    fn on_comment_block(&mut self, comment: &str) {
        if self.handle_comments {
            let parent = self.block_parents.last().copied();
            self.append(parent, "Comment", Vec::new(), Some(comment));
        }
    }

    fn on_division_block(&mut self) {
        self.block("Division", Vec::new());
    }

    fn on_heading_block_begin(&mut self, level: u8) {
        let heading = self.block("Heading", vec![("level", level.to_string())]);
        self.content_parents.push(heading);
    }

    fn on_heading_block_end(&mut self, _level: u8) {
        self.content_parents.pop();
    }

    fn on_unordered_list_block_begin(&mut self) {
        let list = self.block("UnorderedList", Vec::new());
        self.list_blocks.push(list);
    }

    fn on_ordered_list_block_begin(&mut self, start_index: u64) {
        let list = self.block("OrderedList", vec![("startIndex", start_index.to_string())]);
        self.list_blocks.push(list);
    }

    fn on_list_item_begin(&mut self) {
        let list = self.list_blocks.last().copied();
        let item = self.append(list, "ListItem", Vec::new(), None);
        self.block_parents.push(item);
    }

    fn on_list_item_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_unordered_list_block_end(&mut self) {
        self.list_blocks.pop();
    }

    fn on_ordered_list_block_end(&mut self, _start_index: u64) {
        self.list_blocks.pop();
    }

    fn on_paragraph_block_begin(&mut self) {
        let paragraph = self.block("Paragraph", Vec::new());
        self.content_parents.push(paragraph);
    }

    fn on_paragraph_block_end(&mut self) {
        self.content_parents.pop();
    }

    fn on_quote_block_begin(&mut self) {
        let quote = self.block("Quote", Vec::new());
        self.block_parents.push(quote);
    }

    fn on_quote_block_end(&mut self) {
        self.block_parents.pop();
    }

    fn on_code_content(&mut self, code: &str) {
        self.content("Code", Vec::new(), Some(code));
    }

    fn on_emphasis_content_begin(&mut self, level: EmphasisLevel) {
        let emphasis = self.content("Emphasis", vec![("level", level.to_string())], None);
        self.content_parents.push(emphasis);
    }

    fn on_emphasis_content_end(&mut self, _level: EmphasisLevel) {
        self.content_parents.pop();
    }

    fn on_image_content(&mut self, uri: &str, title: Option<&str>, alternative: Option<&str>) {
        let mut attributes = vec![("uri", uri.to_string())];
        optional(&mut attributes, "title", title);
        optional(&mut attributes, "alternative", alternative);
        self.content("Image", attributes, None);
    }

    fn on_line_break_content(&mut self, hard: bool) {
        self.content("LineBreak", vec![("hard", hard.to_string())], None);
    }

    fn on_link_content_begin(&mut self, uri: &str, title: Option<&str>) {
        let mut attributes = vec![("uri", uri.to_string())];
        optional(&mut attributes, "title", title);
        let link = self.content("Link", attributes, None);
        self.content_parents.push(link);
    }

    fn on_link_content_end(&mut self, _uri: &str, _title: Option<&str>) {
        self.content_parents.pop();
    }

    fn on_text_content(&mut self, text: &str) {
        self.content("Text", Vec::new(), Some(text));
    }

    fn result(&self) -> Result<String, FormatError> {
        self.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Content, Document, ListItem};
    use pretty_assertions::assert_eq;

    fn render(doc: &Document, handler: XmlHandler) -> String {
        doc.render(handler).unwrap()
    }

    #[test]
    fn compact_output() {
        let doc = Document::new(vec![Block::paragraph("Hi")]);
        assert_eq!(
            render(&doc, XmlHandler::new()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Document version=\"1.0\" xmlns=\"http://schema.markenwerk.net/markdom-1.0.xsd\">\
             <Paragraph><Text>Hi</Text></Paragraph></Document>\n"
        );
    }

    #[test]
    fn pretty_output() {
        let doc = Document::new(vec![
            Block::Division,
            Block::OrderedList {
                start_index: 2,
                items: vec![ListItem {
                    blocks: vec![Block::Code {
                        code: "a & b".into(),
                        hint: None,
                    }],
                }],
            },
        ]);
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<Document version="1.0" xmlns="http://schema.markenwerk.net/markdom-1.0.xsd">
    <Division/>
    <OrderedList startIndex="2">
        <ListItem>
            <Code>a &amp; b</Code>
        </ListItem>
    </OrderedList>
</Document>
"#;
        assert_eq!(render(&doc, XmlHandler::new().with_pretty_print(true)), expected);
    }

    #[test]
    fn whitespace_sensitive_text_uses_cdata() {
        let doc = Document::new(vec![Block::Paragraph {
            contents: vec![
                Content::text(" lead"),
                Content::text("two\nlines"),
                Content::text("plain"),
                Content::text(""),
                Content::LineBreak { hard: false },
            ],
        }]);
        let out = render(&doc, XmlHandler::new());
        assert!(out.contains("<Text><![CDATA[ lead]]></Text>"));
        assert!(out.contains("<Text><![CDATA[two\nlines]]></Text>"));
        assert!(out.contains("<Text>plain</Text>"));
        assert!(out.contains("<Text/>"));
        assert!(out.contains("<LineBreak hard=\"false\"/>"));
    }

    #[test]
    fn optional_attributes_only_when_present() {
        let doc = Document::new(vec![Block::Paragraph {
            contents: vec![Content::Image {
                uri: "i.png".into(),
                title: None,
                alternative: Some(String::new()),
            }],
        }]);
        let out = render(&doc, XmlHandler::new());
        assert!(out.contains("<Image uri=\"i.png\" alternative=\"\"/>"));
    }

    #[test]
    fn comments_can_be_dropped() {
        let doc = Document::new(vec![Block::Comment {
            comment: "note".into(),
        }]);
        assert!(render(&doc, XmlHandler::new()).contains("<Comment>note</Comment>"));
        assert!(!render(&doc, XmlHandler::new().with_handle_comments(false)).contains("Comment"));
    }
}
