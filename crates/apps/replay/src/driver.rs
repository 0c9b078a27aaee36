//! Feeds script steps through [`EditorState`] and emits a frame per change.
//!
//! Two clocks:
//! - [`replay_virtual`] jumps straight between timestamps and fires
//!   notification expiry from the editor's own deadline queue.
//! - [`replay_realtime`] sleeps on the tokio clock and arms a cancellable
//!   task per notification that posts its token back into the event loop.

use std::io::Write;
use std::time::Duration;

use foundation::time::Time;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};
use waypoints::state::{JOURNAL_APPLIED, JOURNAL_IGNORED};
use waypoints::{EditorEvent, EditorSnapshot, EditorState, NotificationToken, Shown};

use crate::error::ReplayError;
use crate::script::ScriptStep;

/// Snapshot taken right after a change, stamped with the script clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayFrame {
    pub at_ms: u64,
    pub event: &'static str,
    pub snapshot: EditorSnapshot,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub applied: usize,
    pub ignored: usize,
}

/// Receives frames as they are produced.
pub trait FrameSink {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError>;
}

impl FrameSink for Vec<ReplayFrame> {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        self.push(frame);
        Ok(())
    }
}

/// Writes one JSON object per line and flushes, so a reader sees frames live.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn emit(&mut self, frame: ReplayFrame) -> Result<(), ReplayError> {
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

fn emit_frame(
    sink: &mut impl FrameSink,
    state: &EditorState,
    at: Time,
    event: &'static str,
    frames: &mut usize,
) -> Result<(), ReplayError> {
    *frames += 1;
    sink.emit(ReplayFrame {
        at_ms: at.as_millis(),
        event,
        snapshot: state.snapshot(),
    })
}

fn summarize(state: &EditorState, frames: usize) -> ReplaySummary {
    let summary = ReplaySummary {
        frames,
        applied: state.journal().count(JOURNAL_APPLIED),
        ignored: state.journal().count(JOURNAL_IGNORED),
    };
    info!(
        frames = summary.frames,
        applied = summary.applied,
        ignored = summary.ignored,
        "replay finished"
    );
    summary
}

/// Fires every notification deadline up to and including `until`.
fn fire_due(
    state: &mut EditorState,
    until: Option<Time>,
    sink: &mut impl FrameSink,
    frames: &mut usize,
) -> Result<(), ReplayError> {
    while let Some(deadline) = state
        .notification()
        .next_deadline()
        .filter(|d| until.is_none_or(|u| *d <= u))
    {
        if state.advance(deadline) {
            emit_frame(sink, state, deadline, "notification_expired", frames)?;
        }
    }
    Ok(())
}

pub fn replay_virtual(
    state: &mut EditorState,
    steps: &[ScriptStep],
    sink: &mut impl FrameSink,
) -> Result<ReplaySummary, ReplayError> {
    let mut frames = 0;
    for step in steps {
        let now = Time::from_millis(step.at_ms);
        fire_due(state, Some(now), sink, &mut frames)?;

        let outcome = state.dispatch(step.event, now);
        if outcome.changed {
            emit_frame(sink, state, now, step.event.kind(), &mut frames)?;
        }
    }
    // Let the last notification run out.
    fire_due(state, None, sink, &mut frames)?;
    Ok(summarize(state, frames))
}

pub async fn replay_realtime(
    state: &mut EditorState,
    steps: &[ScriptStep],
    sink: &mut impl FrameSink,
) -> Result<ReplaySummary, ReplayError> {
    let start = Instant::now();
    let (expired_tx, mut expired_rx) = mpsc::unbounded_channel::<Shown>();
    let mut armed: Option<(NotificationToken, JoinHandle<()>)> = None;
    let mut steps = steps.iter().peekable();
    let mut frames = 0;

    loop {
        let next_at = steps
            .peek()
            .map(|s| start + Duration::from_millis(s.at_ms));
        if next_at.is_none() && armed.is_none() {
            break;
        }

        tokio::select! {
            biased;

            Some(expired) = expired_rx.recv() => {
                let token = expired.token;
                if armed.as_ref().is_some_and(|(t, _)| *t == token) {
                    armed = None;
                }
                // Stamp with the scheduled deadline, not the wakeup time.
                let now = expired.expires_at;
                let outcome = state.dispatch(EditorEvent::NotificationExpired { token }, now);
                if outcome.changed {
                    emit_frame(sink, state, now, "notification_expired", &mut frames)?;
                } else {
                    debug!(token = token.get(), "stale notification expiry ignored");
                }
            }

            _ = sleep_until(next_at.unwrap_or(start)), if next_at.is_some() => {
                let Some(step) = steps.next() else { continue };
                let now = Time::from_millis(step.at_ms);
                let outcome = state.dispatch(step.event, now);

                if let Some(shown) = outcome.notification {
                    if let Some((_, previous)) = armed.take() {
                        previous.abort();
                    }
                    let deadline = start + Duration::from_millis(shown.expires_at.as_millis());
                    let tx = expired_tx.clone();
                    let handle = tokio::spawn(async move {
                        sleep_until(deadline).await;
                        // The loop owns the receiver until every armed timer is resolved.
                        let _ = tx.send(shown);
                    });
                    armed = Some((shown.token, handle));
                }

                if outcome.changed {
                    emit_frame(sink, state, now, step.event.kind(), &mut frames)?;
                }
            }
        }
    }

    Ok(summarize(state, frames))
}
