// ABOUTME: Selector-query strategy: parses the document into a tree and emits the
// ABOUTME: data of the first child node of every element matching a CSS selector.

use scraper::{Html, Node, Selector};

/// Extract the first-child data of every element matching `selector`.
///
/// Deliberately not innerText: only the first child node is consulted — its
/// text for a text node, its tag name for an element node, its text for a
/// comment node. Matches with no children are skipped.
pub fn extract_query(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for element in document.select(selector) {
        let Some(first) = element.first_child() else {
            continue;
        };
        match first.value() {
            Node::Text(text) => out.push(text.text.to_string()),
            Node::Element(el) => out.push(el.name().to_string()),
            Node::Comment(comment) => out.push(comment.comment.to_string()),
            _ => {}
        }
    }

    out
}
