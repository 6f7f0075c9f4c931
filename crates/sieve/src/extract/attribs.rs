// ABOUTME: Attribute strategy: emits values of requested attributes, URL-normalizing
// ABOUTME: src/href values against HTTP(S) origins. File origins are always verbatim.

use html5ever::tokenizer::{Token, TokenSink, TokenSinkResult};
use url::Url;

use super::tokens::{run_sink, sink_result};

struct AttribSink<'a> {
    names: &'a [String],
    origin_lower: String,
    origin_url: Option<Url>,
    out: Vec<String>,
}

impl TokenSink for AttribSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(ref tag) = token {
            for attr in &tag.attrs {
                let value: &str = &attr.value;
                if value.is_empty() {
                    continue;
                }
                let key: &str = &attr.name.local;
                for want in self.names {
                    if want == key {
                        self.push_value(want, value);
                    }
                }
            }
        }
        sink_result(&token)
    }
}

impl AttribSink<'_> {
    fn push_value(&mut self, name: &str, value: &str) {
        // http origins rewrite every requested attribute; https origins
        // rewrite only src and href. File origins never rewrite.
        let rewrite = self.origin_lower.starts_with("http:")
            || (self.origin_lower.starts_with("https:") && (name == "src" || name == "href"));
        if !rewrite {
            self.out.push(value.to_string());
            return;
        }
        match &self.origin_url {
            Some(origin) => self.out.push(absolutize(origin, value)),
            // Origin routed to the fetch path but not parseable as a URL:
            // emit the raw value.
            None => self.out.push(value.to_string()),
        }
    }
}

/// Resolve an attribute value against the origin document's URL.
///
/// Path-relative values are concatenated onto the origin with its filename
/// component intact; `.` and `..` segments are not collapsed.
fn absolutize(origin: &Url, value: &str) -> String {
    if value.starts_with("//") {
        return format!("https:{}", value);
    }
    if value.starts_with('/') {
        return format!("{}://{}{}", origin.scheme(), host_port(origin), value);
    }
    if Url::parse(value).is_ok() {
        return value.to_string();
    }
    format!(
        "{}://{}{}{}",
        origin.scheme(),
        host_port(origin),
        origin.path(),
        value
    )
}

fn host_port(origin: &Url) -> String {
    let host = origin.host_str().unwrap_or("");
    match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Extract the values of the requested attributes, normalizing link-ish
/// values when the document came from an HTTP(S) origin.
pub fn extract_attribs(html: &str, origin: &str, names: &[String]) -> Vec<String> {
    let sink = AttribSink {
        names,
        origin_lower: origin.to_ascii_lowercase(),
        origin_url: Url::parse(origin).ok(),
        out: Vec::new(),
    };
    run_sink(html, sink).out
}
