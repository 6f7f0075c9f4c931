// ABOUTME: CLI binary for html-sieve.
// ABOUTME: Reads locations from stdin, fetches or opens them, and extracts per the selected mode.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use html_sieve::{
    classify, parse_header_specs, Engine, FetchPipeline, FetchRequest, LocationKind, Mode,
    Options, SieveError, Strategy,
};

#[derive(Parser, Debug)]
#[command(name = "html-sieve")]
#[command(about = "Accept URLs or filenames for HTML documents on stdin and extract parts of them")]
#[command(after_help = "Modes:
    tags <tag-names>        Extract text contained in tags
    attribs <attrib-names>  Extract attribute values
    comments                Extract comments
    query <selector>        Extract first-child data of CSS selector matches

Examples:
    cat urls.txt | html-sieve tags title a strong
    find . -type f -name \"*.html\" | html-sieve attribs src href
    cat urls.txt | html-sieve comments")]
struct Args {
    /// Header to send with every request, as "name:value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,

    /// Maximum number of in-flight fetches
    #[arg(short = 'c', long = "concurrency", default_value_t = 40)]
    concurrency: usize,

    /// Minimum milliseconds between successive fetch dispatches
    #[arg(short = 'd', long = "delay", value_name = "MS", default_value_t = 100)]
    delay: u64,

    /// Extraction mode: tags, attribs, comments, or query
    mode: String,

    /// Mode arguments: tag names, attribute names, or a single CSS selector
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let Some(mode) = Mode::parse(&args.mode) else {
        eprintln!("unsupported mode '{}'", args.mode);
        return ExitCode::from(2);
    };

    // An unparsable selector is reported once and the run still consumes its
    // input (emitting nothing); other construction failures are usage errors.
    let strategy = match Strategy::new(mode, &args.args) {
        Ok(strategy) => strategy,
        Err(e) if e.is_selector() => {
            eprintln!("{}", e);
            Strategy::disabled_query()
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match run(&args, strategy).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(args: &Args, strategy: Strategy) -> Result<(), SieveError> {
    let opts = Options {
        concurrency: args.concurrency.max(1),
        delay: Duration::from_millis(args.delay),
        headers: parse_header_specs(&args.headers),
        ..Options::default()
    };
    let headers = Arc::new(opts.headers.clone());

    let (tx, rx) = mpsc::channel(1);

    let engine = Engine::new(strategy);
    let consumer = tokio::spawn(async move {
        let mut out = io::stdout();
        engine.drain(rx, &mut out).await;
    });

    let mut pipeline = FetchPipeline::new(&opts, tx.clone())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };
        let location = line.trim();

        match classify(location) {
            LocationKind::Url => {
                // A location that was routed to the fetch path but cannot
                // become a request is fatal to the whole run.
                let request = FetchRequest::new(location, Arc::clone(&headers))?;
                pipeline.submit(request);
            }
            LocationKind::File => match html_sieve::open(location) {
                Ok(target) => {
                    if tx.send(target).await.is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    // Shutdown order: stop submitting, release our sender, wait for every
    // in-flight fetch (each worker drops its sender clone as it finishes),
    // then the channel closes and the consumer drains what is left.
    drop(tx);
    pipeline.wait().await;
    let _ = consumer.await;

    Ok(())
}
