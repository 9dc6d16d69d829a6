//! Replays recorded touch traces through a [`Reader`].
//!
//! A trace is a JSON array of events:
//!
//! ```json
//! [
//!     { "type": "scroll", "scroll-top": 0, "client-height": 600, "scroll-height": 2000 },
//!     { "type": "start", "y": 100, "time-ms": 0 },
//!     { "type": "move", "y": 250, "time-ms": 16 },
//!     { "type": "end", "time-ms": 32 },
//!     { "type": "frame", "time-ms": 400 }
//! ]
//! ```
//!
//! Until the first `scroll` event there's no scroll container, so both boundaries count as
//! reached.

use std::cell::Cell;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use overscroll_nav_config::Config;
use serde::{Deserialize, Serialize};

use crate::article::{ArticleSequence, ArticleSequenceMut, Articles};
use crate::input::{InputEvent, TouchEvent, TouchInput};
use crate::overscroll::RenderOutputs;
use crate::reader::Reader;
use crate::scroll::ScrollMetrics;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TraceEvent {
    #[serde(rename_all = "kebab-case")]
    Start { y: f64, time_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    Move { y: f64, time_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    End { time_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    Cancel { time_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    Frame { time_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    Scroll {
        scroll_top: f64,
        client_height: f64,
        scroll_height: f64,
    },
    /// Navigation from outside the gesture, like the previous/next buttons.
    Navigate { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReplayOutput {
    Frame {
        time_ms: u64,
        outputs: RenderOutputs,
    },
    Navigation {
        time_ms: u64,
        target: usize,
    },
}

pub fn load_trace(path: &Path) -> anyhow::Result<Vec<TraceEvent>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("error reading {}", path.display()))?;
    parse_trace(&contents).with_context(|| format!("error parsing {}", path.display()))
}

pub fn parse_trace(text: &str) -> anyhow::Result<Vec<TraceEvent>> {
    let events = serde_json::from_str(text)?;
    Ok(events)
}

/// Replays `events` over `articles` articles starting at `index`.
///
/// Writes one JSON line per frame and per navigation.
pub fn replay(
    events: &[TraceEvent],
    articles: usize,
    index: usize,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<Vec<ReplayOutput>> {
    ensure!(articles > 0, "need at least one article");
    ensure!(
        index < articles,
        "index {index} out of range for {articles} articles"
    );

    let mut sequence = Articles::new((0..articles).collect::<Vec<_>>());
    sequence.set_current(index);

    let scroll: Cell<Option<ScrollMetrics>> = Cell::new(None);
    let mut reader = Reader::new(sequence, scroll, |_: usize| (), config);

    let mut outputs = Vec::new();
    let mut last_time = 0;

    for event in events {
        let input = match *event {
            TraceEvent::Start { y, time_ms } => {
                last_time = time_ms;
                InputEvent::TouchStart(TouchEvent::single(y, Duration::from_millis(time_ms)))
            }
            TraceEvent::Move { y, time_ms } => {
                last_time = time_ms;
                InputEvent::TouchMove(TouchEvent::single(y, Duration::from_millis(time_ms)))
            }
            TraceEvent::End { time_ms } => {
                last_time = time_ms;
                InputEvent::TouchEnd(TouchEvent::new(Duration::from_millis(time_ms)))
            }
            TraceEvent::Cancel { time_ms } => {
                last_time = time_ms;
                InputEvent::TouchCancel(TouchEvent::new(Duration::from_millis(time_ms)))
            }
            TraceEvent::Frame { time_ms } => {
                last_time = time_ms;
                if let Some(request) = reader.frame(Duration::from_millis(time_ms)) {
                    outputs.push(ReplayOutput::Navigation {
                        time_ms,
                        target: request.target,
                    });
                }
                outputs.push(ReplayOutput::Frame {
                    time_ms,
                    outputs: reader.render(),
                });
                continue;
            }
            TraceEvent::Scroll {
                scroll_top,
                client_height,
                scroll_height,
            } => {
                reader.scroll().set(Some(ScrollMetrics {
                    scroll_top,
                    client_height,
                    scroll_height,
                }));
                continue;
            }
            TraceEvent::Navigate { index } => {
                if !reader.navigate_to(index) {
                    debug!("trace navigation to {index} didn't change the article");
                }
                continue;
            }
        };

        let handled = reader.process_input_event(&input);
        trace!("{input:?} at {last_time} ms: {handled:?}");
    }

    debug!(
        "replay finished on article {}",
        reader.articles().current_index()
    );

    for output in &outputs {
        serde_json::to_writer(&mut *out, output)?;
        writeln!(out)?;
    }

    Ok(outputs)
}
