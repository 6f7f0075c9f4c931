// ABOUTME: Extraction modes and the closed Strategy enum dispatching to them.
// ABOUTME: Each strategy is a pure function from decoded document text to owned strings.

pub mod attribs;
pub mod comments;
pub mod query;
pub mod tags;
mod tokens;

use scraper::Selector;

use crate::error::SieveError;
use crate::resource::Target;

/// The extraction mode, selected once at startup and applied to every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Tags,
    Attribs,
    Comments,
    Query,
}

impl Mode {
    /// Parse a mode name from the command line.
    pub fn parse(name: &str) -> Option<Mode> {
        match name {
            "tags" => Some(Mode::Tags),
            "attribs" => Some(Mode::Attribs),
            "comments" => Some(Mode::Comments),
            "query" => Some(Mode::Query),
            _ => None,
        }
    }
}

/// The configured extraction strategy. A closed enum: adding a mode means
/// adding a variant and a match arm.
#[derive(Debug)]
pub enum Strategy {
    Tags(Vec<String>),
    Attribs(Vec<String>),
    Comments,
    /// `None` means the selector failed to parse at startup; every target
    /// then yields an empty sequence.
    Query(Option<Selector>),
}

impl Strategy {
    /// Build the strategy for a mode and its positional arguments.
    ///
    /// For `query` the selector is parsed here, once; an unparsable selector
    /// is a Selector error the caller reports without aborting the run.
    pub fn new(mode: Mode, args: &[String]) -> Result<Self, SieveError> {
        match mode {
            Mode::Tags => Ok(Strategy::Tags(args.to_vec())),
            Mode::Attribs => Ok(Strategy::Attribs(args.to_vec())),
            Mode::Comments => Ok(Strategy::Comments),
            Mode::Query => {
                let raw = args.first().map(String::as_str).unwrap_or("");
                let selector = Selector::parse(raw).map_err(|e| {
                    SieveError::selector(
                        raw,
                        "ParseSelector",
                        Some(anyhow::anyhow!("failed to parse CSS selector: {}", e)),
                    )
                })?;
                Ok(Strategy::Query(Some(selector)))
            }
        }
    }

    /// The query strategy after a reported selector failure: drains targets,
    /// emits nothing.
    pub fn disabled_query() -> Self {
        Strategy::Query(None)
    }

    /// Run the strategy over one target, consuming it. The target's stream is
    /// dropped when this returns, on every path.
    pub fn extract(&self, mut target: Target) -> Result<Vec<String>, SieveError> {
        let html = target.read_text().map_err(|e| {
            SieveError::extract(
                target.origin.clone(),
                "Extract",
                Some(anyhow::anyhow!("failed to read document: {}", e)),
            )
        })?;

        Ok(match self {
            Strategy::Tags(names) => tags::extract_tags(&html, names),
            Strategy::Attribs(names) => attribs::extract_attribs(&html, &target.origin, names),
            Strategy::Comments => comments::extract_comments(&html),
            Strategy::Query(Some(selector)) => query::extract_query(&html, selector),
            Strategy::Query(None) => Vec::new(),
        })
    }
}
