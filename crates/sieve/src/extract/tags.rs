// ABOUTME: Tag-text strategy: emits the trimmed text immediately following a matching start tag.
// ABOUTME: Only the single next token is inspected; this is not subtree text extraction.

use html5ever::tokenizer::{TagKind, Token, TokenSink, TokenSinkResult};

use super::tokens::{run_sink, sink_result};

struct TagTextSink<'a> {
    names: &'a [String],
    pending: bool,
    out: Vec<String>,
}

impl TokenSink for TagTextSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.pending {
            // The token after a matching start tag is consumed either way;
            // it is never re-inspected as a start tag of its own.
            self.pending = false;
            if let Token::CharacterTokens(ref text) = token {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.out.push(trimmed.to_string());
                }
            }
            return sink_result(&token);
        }

        if let Token::TagToken(ref tag) = token {
            if tag.kind == TagKind::StartTag
                && self.names.iter().any(|name| name.as_str() == &*tag.name)
            {
                self.pending = true;
            }
        }
        sink_result(&token)
    }
}

/// Extract the text contained directly in the requested tags.
pub fn extract_tags(html: &str, names: &[String]) -> Vec<String> {
    let sink = TagTextSink {
        names,
        pending: false,
        out: Vec::new(),
    };
    run_sink(html, sink).out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn emits_trimmed_tag_text() {
        let html = "<html><head><title>  My Page  </title></head></html>";
        assert_eq!(extract_tags(html, &names(&["title"])), vec!["My Page"]);
    }

    #[test]
    fn multiple_names_in_document_order() {
        let html = "<html><head><title>Top</title></head>\
                    <body><h1>Heading</h1><strong>bold</strong></body></html>";
        assert_eq!(
            extract_tags(html, &names(&["title", "h1", "strong"])),
            vec!["Top", "Heading", "bold"]
        );
    }

    #[test]
    fn empty_after_trim_is_suppressed() {
        let html = "<p>   </p><p>kept</p>";
        assert_eq!(extract_tags(html, &names(&["p"])), vec!["kept"]);
    }

    #[test]
    fn non_text_next_token_yields_nothing() {
        // The token after <p> is a comment, so this occurrence emits nothing.
        let html = "<p><!-- note -->text</p>";
        assert_eq!(extract_tags(html, &names(&["p"])), Vec::<String>::new());
    }

    #[test]
    fn consumed_start_tag_is_not_reinspected() {
        // <i> is consumed as the token following <b>; its own text is lost.
        let html = "<b><i>x</i></b>";
        assert_eq!(extract_tags(html, &names(&["b", "i"])), Vec::<String>::new());
        // On its own, <i> still matches.
        assert_eq!(extract_tags("<i>x</i>", &names(&["b", "i"])), vec!["x"]);
    }

    #[test]
    fn script_body_is_not_tokenized_as_markup() {
        let html = "<script>if (a < b) { run(); }</script><p>after</p>";
        assert_eq!(extract_tags(html, &names(&["p"])), vec!["after"]);
    }

    #[test]
    fn unclosed_markup_degrades_gracefully() {
        let html = "<title>still here";
        assert_eq!(extract_tags(html, &names(&["title"])), vec!["still here"]);
    }

    #[test]
    fn no_names_no_output() {
        assert_eq!(
            extract_tags("<p>text</p>", &names(&[])),
            Vec::<String>::new()
        );
    }
}
