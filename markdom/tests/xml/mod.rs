//! XML format tests

use crate::common::{arb_document, convert, options};
use markdom::format::Format;
use markdom::formats::{MarkdownFormat, XmlFormat};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_round_trip(doc in arb_document(), pretty in any::<bool>()) {
        let options = options(&[("pretty_print", if pretty { "true" } else { "false" })]);
        let xml = XmlFormat.serialize_with_options(&doc, &options).unwrap();
        prop_assert_eq!(XmlFormat.parse(&xml).unwrap(), doc);
    }
}

#[test]
fn test_markdown_to_xml() {
    let xml = convert("> *a*", "markdown", "xml");
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <Document version=\"1.0\" xmlns=\"http://schema.markenwerk.net/markdom-1.0.xsd\">\
         <Quote><Paragraph><Emphasis level=\"1\"><Text>a</Text></Emphasis></Paragraph></Quote>\
         </Document>\n"
    );
}

#[test]
fn test_xml_to_markdown() {
    let xml = convert("# a\n\n- b\n", "markdown", "xml");
    let markdown = convert(&xml, "xml", "markdown");
    assert_eq!(
        MarkdownFormat.parse(&markdown).unwrap(),
        MarkdownFormat.parse("# a\n\n- b\n").unwrap()
    );
}
