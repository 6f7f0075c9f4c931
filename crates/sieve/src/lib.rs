// ABOUTME: Main library entry point for html-sieve, a pipeline HTML extraction tool.
// ABOUTME: Re-exports the public API: Engine, Strategy, FetchPipeline, Target, Options, errors.

//! html-sieve - extract parts of HTML documents named by URLs or file paths.
//!
//! Locations arrive one per line, documents are fetched with bounded
//! concurrency and a global dispatch delay (files are read directly), and a
//! single consumer applies one of four extraction strategies, printing one
//! result per line.
//!
//! # Example
//!
//! ```no_run
//! use html_sieve::{Engine, FetchPipeline, FetchRequest, Mode, Options, Strategy};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), html_sieve::SieveError> {
//!     let opts = Options::default();
//!     let (tx, rx) = tokio::sync::mpsc::channel(1);
//!     let engine = Engine::new(Strategy::new(Mode::Tags, &["title".to_string()])?);
//!     let consumer = tokio::spawn(async move {
//!         let mut out = std::io::stdout();
//!         engine.drain(rx, &mut out).await;
//!     });
//!
//!     let mut pipeline = FetchPipeline::new(&opts, tx.clone())?;
//!     let headers = Arc::new(opts.headers.clone());
//!     pipeline.submit(FetchRequest::new("https://example.com/", headers)?);
//!
//!     drop(tx);
//!     pipeline.wait().await;
//!     let _ = consumer.await;
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod extract;
pub mod location;
pub mod options;
pub mod pipeline;
pub mod resource;

pub use crate::engine::Engine;
pub use crate::error::{ErrorCode, SieveError};
pub use crate::extract::{Mode, Strategy};
pub use crate::location::{classify, LocationKind};
pub use crate::options::{parse_header_specs, Options};
pub use crate::pipeline::{build_http_client, FetchPipeline, RateLimiter};
pub use crate::resource::{decode_body, fetch, open, FetchRequest, Target};
