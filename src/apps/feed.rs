//! Fixed-delay mock data provider.
//!
//! A feed is requested once, stays pending for its configured delay measured
//! on the caller-supplied clock, then resolves. It never fails.

use std::time::{Duration, Instant};

use crate::tracing_sub::LogBuffer;

#[derive(Debug, Clone)]
pub enum FeedSource {
    Static(Vec<String>),
    /// Header lines followed by the last `lines` entries of the log buffer,
    /// read at poll time.
    LogTail {
        header: Vec<String>,
        logs: LogBuffer,
        lines: usize,
    },
}

impl FeedSource {
    pub fn from_text(text: &str) -> Self {
        FeedSource::Static(text.lines().map(str::to_string).collect())
    }

    fn fetch(&self) -> Vec<String> {
        match self {
            FeedSource::Static(lines) => lines.clone(),
            FeedSource::LogTail {
                header,
                logs,
                lines,
            } => {
                let mut out = header.clone();
                let tail = logs.tail(*lines);
                if tail.is_empty() {
                    out.push("(no log lines yet)".to_string());
                } else {
                    out.extend(tail);
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Pending { remaining: Duration },
    Ready(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct DelayedFeed {
    source: FeedSource,
    delay: Duration,
    requested_at: Option<Instant>,
}

impl DelayedFeed {
    pub fn new(source: FeedSource, delay: Duration) -> Self {
        Self {
            source,
            delay,
            requested_at: None,
        }
    }

    /// Start the request unless one is already in flight or done.
    pub fn request(&mut self, now: Instant) {
        if self.requested_at.is_none() {
            self.requested_at = Some(now);
        }
    }

    /// Drop any previous result and start over.
    pub fn refresh(&mut self, now: Instant) {
        self.requested_at = Some(now);
    }

    pub fn cancel(&mut self) {
        self.requested_at = None;
    }

    pub fn poll(&self, now: Instant) -> FeedState {
        let Some(requested_at) = self.requested_at else {
            return FeedState::Idle;
        };
        let elapsed = now.saturating_duration_since(requested_at);
        if elapsed >= self.delay {
            FeedState::Ready(self.source.fetch())
        } else {
            FeedState::Pending {
                remaining: self.delay - elapsed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(delay_ms: u64) -> DelayedFeed {
        DelayedFeed::new(
            FeedSource::Static(vec!["row".to_string()]),
            Duration::from_millis(delay_ms),
        )
    }

    #[test]
    fn resolves_after_delay() {
        let t0 = Instant::now();
        let mut f = feed(500);
        assert_eq!(f.poll(t0), FeedState::Idle);
        f.request(t0);
        assert_eq!(
            f.poll(t0 + Duration::from_millis(200)),
            FeedState::Pending {
                remaining: Duration::from_millis(300)
            }
        );
        assert_eq!(
            f.poll(t0 + Duration::from_millis(500)),
            FeedState::Ready(vec!["row".to_string()])
        );
    }

    #[test]
    fn request_is_sticky_but_refresh_restarts() {
        let t0 = Instant::now();
        let mut f = feed(100);
        f.request(t0);
        f.request(t0 + Duration::from_millis(90));
        assert!(matches!(
            f.poll(t0 + Duration::from_millis(100)),
            FeedState::Ready(_)
        ));
        f.refresh(t0 + Duration::from_millis(100));
        assert!(matches!(
            f.poll(t0 + Duration::from_millis(150)),
            FeedState::Pending { .. }
        ));
        f.cancel();
        assert_eq!(f.poll(t0), FeedState::Idle);
    }

    #[test]
    fn zero_delay_is_immediately_ready() {
        let t0 = Instant::now();
        let mut f = feed(0);
        f.request(t0);
        assert!(matches!(f.poll(t0), FeedState::Ready(_)));
    }

    #[test]
    fn log_tail_reads_buffer_at_poll_time() {
        let logs = LogBuffer::new(10);
        let mut f = DelayedFeed::new(
            FeedSource::LogTail {
                header: vec!["logs:".to_string()],
                logs: logs.clone(),
                lines: 2,
            },
            Duration::ZERO,
        );
        let t0 = Instant::now();
        f.request(t0);
        assert_eq!(
            f.poll(t0),
            FeedState::Ready(vec!["logs:".to_string(), "(no log lines yet)".to_string()])
        );
        logs.push("one");
        logs.push("two");
        logs.push("three");
        assert_eq!(
            f.poll(t0),
            FeedState::Ready(vec![
                "logs:".to_string(),
                "two".to_string(),
                "three".to_string()
            ])
        );
    }
}
