// ABOUTME: Comment strategy: emits comment text with embedded newlines collapsed to spaces.

use html5ever::tokenizer::{Token, TokenSink, TokenSinkResult};

use super::tokens::{run_sink, sink_result};

struct CommentSink {
    out: Vec<String>,
}

impl TokenSink for CommentSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::CommentToken(ref text) = token {
            let collapsed = text.replace('\n', " ");
            let trimmed = collapsed.trim();
            if !trimmed.is_empty() {
                self.out.push(trimmed.to_string());
            }
        }
        sink_result(&token)
    }
}

/// Extract every non-empty comment in the document.
pub fn extract_comments(html: &str) -> Vec<String> {
    let sink = CommentSink { out: Vec::new() };
    run_sink(html, sink).out
}
