// ABOUTME: Extraction engine: the single consumer draining the handoff channel.
// ABOUTME: Writes one extracted string per line; per-target failures go to stderr.

use std::io::Write;

use tokio::sync::mpsc;

use crate::extract::Strategy;
use crate::resource::Target;

/// Single consumer of the handoff channel.
///
/// Pulls targets one at a time, dispatches to the configured strategy, and
/// writes each result string on its own line. A target's stream is dropped
/// exactly once per target — the strategy consumes the target whether
/// extraction succeeds or fails. Strategy errors are reported to stderr and
/// contribute zero output lines; the run continues with the next target.
pub struct Engine {
    strategy: Strategy,
}

impl Engine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Drain the channel until every sender is gone, writing results to `out`.
    pub async fn drain<W: Write>(self, mut rx: mpsc::Receiver<Target>, out: &mut W) {
        while let Some(target) = rx.recv().await {
            match self.strategy.extract(target) {
                Ok(values) => {
                    for value in values {
                        let _ = writeln!(out, "{}", value);
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Mode;
    use std::io::{self, Cursor, Read};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Reader that counts how many times it is dropped (closed).
    struct CountingStream {
        inner: Cursor<Vec<u8>>,
        drops: Arc<AtomicUsize>,
    }

    impl Read for CountingStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for CountingStream {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Reader that fails partway through.
    struct FailingStream;

    impl Read for FailingStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "mid-stream failure"))
        }
    }

    fn counted_target(html: &str, drops: &Arc<AtomicUsize>) -> Target {
        Target {
            origin: "./page.html".to_string(),
            stream: Box::new(CountingStream {
                inner: Cursor::new(html.as_bytes().to_vec()),
                drops: Arc::clone(drops),
            }),
        }
    }

    #[tokio::test]
    async fn writes_one_line_per_result_in_order() {
        let strategy = Strategy::new(Mode::Tags, &["title".to_string(), "h1".to_string()])
            .unwrap();
        let engine = Engine::new(strategy);
        let (tx, rx) = mpsc::channel(1);

        let producer = tokio::spawn(async move {
            let html = "<html><head><title>Top</title></head><body><h1>Head</h1></body></html>";
            let target = Target {
                origin: "./page.html".to_string(),
                stream: Box::new(Cursor::new(html.as_bytes().to_vec())),
            };
            tx.send(target).await.unwrap();
        });

        let mut out = Vec::new();
        engine.drain(rx, &mut out).await;
        producer.await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Top\nHead\n");
    }

    #[tokio::test]
    async fn stream_is_closed_exactly_once_on_success() {
        let drops = Arc::new(AtomicUsize::new(0));
        let strategy = Strategy::new(Mode::Comments, &[]).unwrap();
        let engine = Engine::new(strategy);
        let (tx, rx) = mpsc::channel(1);

        let target = counted_target("<!-- c -->", &drops);
        let producer = tokio::spawn(async move {
            tx.send(target).await.unwrap();
        });

        let mut out = Vec::new();
        engine.drain(rx, &mut out).await;
        producer.await.unwrap();

        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "c\n");
    }

    #[tokio::test]
    async fn stream_is_closed_exactly_once_on_read_failure() {
        let drops = Arc::new(AtomicUsize::new(0));
        let strategy = Strategy::new(Mode::Comments, &[]).unwrap();
        let engine = Engine::new(strategy);
        let (tx, rx) = mpsc::channel(1);

        struct CountedFailing {
            _marker: FailingStream,
            drops: Arc<AtomicUsize>,
        }
        impl Read for CountedFailing {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self._marker.read(buf)
            }
        }
        impl Drop for CountedFailing {
            fn drop(&mut self) {
                self.drops.fetch_add(1, Ordering::SeqCst);
            }
        }

        let target = Target {
            origin: "./broken.html".to_string(),
            stream: Box::new(CountedFailing {
                _marker: FailingStream,
                drops: Arc::clone(&drops),
            }),
        };
        let producer = tokio::spawn(async move {
            tx.send(target).await.unwrap();
        });

        let mut out = Vec::new();
        engine.drain(rx, &mut out).await;
        producer.await.unwrap();

        // The failing target contributed no output but its stream was closed.
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failure_does_not_stop_later_targets() {
        let drops = Arc::new(AtomicUsize::new(0));
        let strategy = Strategy::new(Mode::Tags, &["title".to_string()]).unwrap();
        let engine = Engine::new(strategy);
        let (tx, rx) = mpsc::channel(1);

        let bad = Target {
            origin: "./bad.html".to_string(),
            stream: Box::new(FailingStream),
        };
        let good = counted_target("<title>after</title>", &drops);
        let producer = tokio::spawn(async move {
            tx.send(bad).await.unwrap();
            tx.send(good).await.unwrap();
        });

        let mut out = Vec::new();
        engine.drain(rx, &mut out).await;
        producer.await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "after\n");
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}
