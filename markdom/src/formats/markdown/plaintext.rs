//! Plain text extraction over a comrak subtree, used for image alt text.

use comrak::nodes::{AstNode, NodeValue};

/// Concatenate every text and inline code fragment below `node`.
///
/// Fragments are joined by a single space unless the text so far already ends with
/// one. A hard line break forces such a space; soft breaks are ignored.
pub fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(fragment) => append_fragment(&mut text, fragment),
            NodeValue::Code(code) => append_fragment(&mut text, &code.literal),
            NodeValue::LineBreak => append_space(&mut text),
            _ => {}
        }
    }
    text
}

fn append_fragment(text: &mut String, fragment: &str) {
    append_space(text);
    if text.ends_with(' ') {
        text.push_str(fragment.trim_start_matches(' '));
    } else {
        text.push_str(fragment);
    }
}

fn append_space(text: &mut String) {
    if !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comrak::{parse_document, Arena, Options};

    fn first_image_text(source: &str) -> String {
        let arena = Arena::new();
        let root = parse_document(&arena, source, &Options::default());
        let image = root
            .descendants()
            .find(|node| matches!(node.data.borrow().value, NodeValue::Image(_)))
            .expect("image node");
        plain_text(image)
    }

    #[test]
    fn joins_fragments_with_single_spaces() {
        assert_eq!(first_image_text("![a *b* `c`](x.png)"), "a b c");
    }

    #[test]
    fn leading_spaces_after_a_separator_are_dropped() {
        assert_eq!(first_image_text("![x *y* z](i.png)"), "x y z");
        assert_eq!(first_image_text("![*a*  `b`](i.png)"), "a b");
    }

    #[test]
    fn hard_breaks_become_spaces_soft_breaks_vanish() {
        assert_eq!(first_image_text("![a\\\nb](x.png)"), "a b");
        assert_eq!(first_image_text("![a\nb](x.png)"), "a b");
    }

    #[test]
    fn nested_links_contribute_their_text() {
        assert_eq!(first_image_text("![see [here](http://a)](x.png)"), "see here");
    }
}
