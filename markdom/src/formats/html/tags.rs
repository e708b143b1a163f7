//! Tag tables for the HTML and XHTML renderers.

/// Every tag the HTML renderer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    CodeBlock,
    CodeInline,
    Comment,
    Division,
    HeadingBegin(u8),
    HeadingEnd(u8),
    UnorderedListBegin,
    UnorderedListEnd,
    OrderedListBegin,
    OrderedListEnd,
    ListItemBegin,
    ListItemEnd,
    ParagraphBegin,
    ParagraphEnd,
    QuoteBegin,
    QuoteEnd,
    EmphasisLightBegin,
    EmphasisLightEnd,
    EmphasisStrongBegin,
    EmphasisStrongEnd,
    Image,
    LineBreak,
    LinkBegin,
    LinkEnd,
}

/// Attribute list in output order. `None` values are skipped.
pub type Attributes<'a> = [(&'a str, Option<&'a str>)];

/// Builds the markup for one tag. `value` is the already escaped body of tags that
/// enclose text (code, comments).
pub trait TagBuilder {
    fn build_tag(&self, tag: Tag, value: &str, attributes: &Attributes<'_>) -> String;
}

/// HTML5 tag table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTagBuilder;

impl TagBuilder for HtmlTagBuilder {
    fn build_tag(&self, tag: Tag, value: &str, attributes: &Attributes<'_>) -> String {
        let attrs = attribute_string(attributes);
        match tag {
            Tag::CodeBlock => format!("<pre><code{attrs}>{value}</code></pre>"),
            Tag::CodeInline => format!("<code{attrs}>{value}</code>"),
            Tag::Comment => format!("<!-- {value} -->"),
            Tag::Division => format!("<hr{attrs}>"),
            Tag::HeadingBegin(level) => format!("<h{}{attrs}>", heading(level)),
            Tag::HeadingEnd(level) => format!("</h{}>", heading(level)),
            Tag::UnorderedListBegin => format!("<ul{attrs}>"),
            Tag::UnorderedListEnd => "</ul>".to_string(),
            Tag::OrderedListBegin => format!("<ol{attrs}>"),
            Tag::OrderedListEnd => "</ol>".to_string(),
            Tag::ListItemBegin => format!("<li{attrs}>"),
            Tag::ListItemEnd => "</li>".to_string(),
            Tag::ParagraphBegin => format!("<p{attrs}>"),
            Tag::ParagraphEnd => "</p>".to_string(),
            Tag::QuoteBegin => format!("<blockquote{attrs}>"),
            Tag::QuoteEnd => "</blockquote>".to_string(),
            Tag::EmphasisLightBegin => format!("<em{attrs}>"),
            Tag::EmphasisLightEnd => "</em>".to_string(),
            Tag::EmphasisStrongBegin => format!("<strong{attrs}>"),
            Tag::EmphasisStrongEnd => "</strong>".to_string(),
            Tag::Image => format!("<img{attrs}>"),
            Tag::LineBreak => "<br>".to_string(),
            Tag::LinkBegin => format!("<a{attrs}>"),
            Tag::LinkEnd => "</a>".to_string(),
        }
    }
}

/// XHTML: the HTML table with self-closing void elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct XhtmlTagBuilder;

impl TagBuilder for XhtmlTagBuilder {
    fn build_tag(&self, tag: Tag, value: &str, attributes: &Attributes<'_>) -> String {
        match tag {
            Tag::Division => format!("<hr{} />", attribute_string(attributes)),
            Tag::Image => format!("<img{} />", attribute_string(attributes)),
            Tag::LineBreak => "<br />".to_string(),
            _ => HtmlTagBuilder.build_tag(tag, value, attributes),
        }
    }
}

fn heading(level: u8) -> u8 {
    level.clamp(1, crate::types::MAX_HEADING_LEVEL)
}

/// ` key="value"` pairs; values are trimmed, absent or empty ones dropped.
fn attribute_string(attributes: &Attributes<'_>) -> String {
    attributes
        .iter()
        .filter_map(|(key, value)| {
            let value = (*value)?.trim();
            (!value.is_empty()).then(|| format!(" {}=\"{value}\"", key.to_lowercase()))
        })
        .collect()
}
