// ABOUTME: Target reader: resolves locations to Target{origin, stream} pairs.
// ABOUTME: Handles file opens, HTTP fetches with verbatim headers, and charset decoding.

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

use url::Url;

use crate::error::SieveError;

/// An opened, readable document paired with its originating location.
///
/// Exactly one owner at a time: created here, transferred through the handoff
/// channel, and dropped (stream closed) by the extraction engine after
/// processing — success or failure.
pub struct Target {
    /// The location the document was read from, used for diagnostics and
    /// relative-URL resolution. For URL targets this is the final URL after
    /// redirects.
    pub origin: String,
    /// The document bytes. Closed when the target is dropped.
    pub stream: Box<dyn Read + Send>,
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl Target {
    /// Drain the stream and decode it to UTF-8 text.
    pub fn read_text(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.stream.read_to_end(&mut buf)?;
        Ok(decode_body(&buf))
    }
}

/// A GET request for one URL location, with the configured header set.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub headers: Arc<Vec<(String, String)>>,
}

impl FetchRequest {
    /// Build a request for a location routed to the fetch path.
    ///
    /// A location that does not parse as a URL is an error; callers treat it
    /// as fatal to the whole run.
    pub fn new(
        location: &str,
        headers: Arc<Vec<(String, String)>>,
    ) -> Result<Self, SieveError> {
        let url = Url::parse(location).map_err(|e| {
            SieveError::invalid_url(
                location,
                "Request",
                Some(anyhow::anyhow!("failed to create request: {}", e)),
            )
        })?;
        Ok(Self { url, headers })
    }
}

/// Open a file location for reading.
pub fn open(path: &str) -> Result<Target, SieveError> {
    let file = File::open(path).map_err(|e| {
        SieveError::open(path, "Open", Some(anyhow::anyhow!("failed to open file: {}", e)))
    })?;
    Ok(Target {
        origin: path.to_string(),
        stream: Box::new(file),
    })
}

/// Fetch a URL location.
///
/// Headers are applied verbatim in order. The response status is not
/// inspected: any response with a non-empty body becomes a target, with the
/// final URL after redirects as its origin. An empty body produces no target.
pub async fn fetch(
    client: &reqwest::Client,
    request: &FetchRequest,
) -> Result<Option<Target>, SieveError> {
    let mut builder = client.get(request.url.clone());
    for (name, value) in request.headers.iter() {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.send().await.map_err(|e| {
        SieveError::fetch(
            request.url.as_str(),
            "Fetch",
            Some(anyhow::anyhow!("failed to fetch URL: {}", e)),
        )
    })?;

    let final_url = response.url().to_string();

    let body: bytes::Bytes = response.bytes().await.map_err(|e| {
        SieveError::fetch(
            request.url.as_str(),
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    if body.is_empty() {
        return Ok(None);
    }

    Ok(Some(Target {
        origin: final_url,
        stream: Box::new(Cursor::new(body)),
    }))
}

/// Decode body bytes to a String, honoring a BOM when present and falling
/// back to charset detection.
pub fn decode_body(body: &[u8]) -> String {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(body) {
        let (decoded, _) = encoding.decode_without_bom_handling(&body[bom_len..]);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
