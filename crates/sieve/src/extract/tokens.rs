// ABOUTME: Shared tokenizer driver feeding a document through an html5ever TokenSink.
// ABOUTME: Tokenization never fails; it stops where the tokenizer stops.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts};

/// Run `sink` over the whole document and hand it back with whatever it
/// collected. End-of-input and parse-stop are the same event to callers.
pub(crate) fn run_sink<S: TokenSink>(html: &str, sink: S) -> S {
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink
}

/// The sink result every strategy returns: switches the tokenizer into the
/// right raw state for rawtext/RCDATA elements so script bodies and style
/// sheets are not re-tokenized as markup.
pub(crate) fn sink_result<H>(token: &Token) -> TokenSinkResult<H> {
    if let Token::TagToken(tag) = token {
        if tag.kind == TagKind::StartTag {
            match &*tag.name {
                "title" | "textarea" => return TokenSinkResult::RawData(RawKind::Rcdata),
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                    return TokenSinkResult::RawData(RawKind::Rawtext)
                }
                "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
                _ => {}
            }
        }
    }
    TokenSinkResult::Continue
}
