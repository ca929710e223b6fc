//! Paced stitch streaming with cancellation.
//!
//! The streamer turns segments into stitch points and pushes them through a
//! [`StitchSink`] one at a time, pausing `command_delay` after each. The
//! cancel flag is checked before every stitch and while pausing. Transport
//! failures never escape: they are logged and reported as
//! [`StreamOutcome::Offline`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use stitchkit_core::ScaleConfig;
use stitchkit_designer::{stitch_all, Segment};

use super::StitchSink;

/// Shared flag that stops a running stream between stitches.
pub type CancelFlag = Arc<AtomicBool>;

/// Pause granularity while waiting between commands
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Every stitch and the program end were sent
    Completed,
    /// Stopped by the cancel flag
    Cancelled,
    /// No sink, or the sink failed; nothing more was sent
    Offline,
}

/// Summary of one streaming run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamReport {
    pub stitches_sent: usize,
    pub outcome: StreamOutcome,
}

impl StreamReport {
    fn new(stitches_sent: usize, outcome: StreamOutcome) -> Self {
        Self {
            stitches_sent,
            outcome,
        }
    }
}

pub struct StitchStreamer {
    scale: ScaleConfig,
    command_delay: Duration,
    cancel: CancelFlag,
}

impl StitchStreamer {
    pub fn new(scale: ScaleConfig) -> Self {
        Self {
            scale,
            command_delay: Duration::ZERO,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Pause after each stitch command.
    pub fn with_command_delay(mut self, command_delay: Duration) -> Self {
        self.command_delay = command_delay;
        self
    }

    /// Handle for stopping the stream from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation so the streamer can be reused.
    pub fn reset(&self) {
        self.cancel.store(false, Ordering::SeqCst);
    }

    /// Stream the stitches of `segments` (canvas units) to `sink`.
    ///
    /// With no sink the run is reported offline and nothing is sent. On
    /// cancellation the program end is still sent so the controller stops
    /// cleanly.
    pub fn stream<'a, S>(
        &self,
        segments: impl IntoIterator<Item = &'a Segment> + 'a,
        sink: Option<&mut S>,
    ) -> StreamReport
    where
        S: StitchSink + ?Sized,
    {
        let Some(sink) = sink else {
            tracing::warn!("No controller connected, nothing sent");
            return StreamReport::new(0, StreamOutcome::Offline);
        };

        tracing::info!("Streaming stitches to {}", sink.endpoint());
        let mut sent = 0;

        for point in stitch_all(segments, &self.scale) {
            if self.is_cancelled() {
                return self.finish_cancelled(sink, sent);
            }

            let (x_mm, y_mm) = (self.scale.to_mm(point.x), self.scale.to_mm(point.y));
            if let Err(e) = sink.send_coordinate(x_mm, y_mm) {
                tracing::warn!("Streaming stopped after {} stitch(es): {}", sent, e);
                return StreamReport::new(sent, StreamOutcome::Offline);
            }
            sent += 1;

            if !self.pause() {
                return self.finish_cancelled(sink, sent);
            }
        }

        if let Err(e) = sink.end_program() {
            tracing::warn!("Program end not delivered: {}", e);
            return StreamReport::new(sent, StreamOutcome::Offline);
        }

        tracing::info!("Sent {} stitch(es) to {}", sent, sink.endpoint());
        StreamReport::new(sent, StreamOutcome::Completed)
    }

    fn finish_cancelled<S: StitchSink + ?Sized>(&self, sink: &mut S, sent: usize) -> StreamReport {
        tracing::info!("Streaming cancelled after {} stitch(es)", sent);
        if let Err(e) = sink.end_program() {
            tracing::warn!("Program end not delivered: {}", e);
        }
        StreamReport::new(sent, StreamOutcome::Cancelled)
    }

    /// Wait out the command delay. Returns false if cancelled meanwhile.
    fn pause(&self) -> bool {
        if self.command_delay.is_zero() {
            return true;
        }

        let deadline = Instant::now() + self.command_delay;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep(CANCEL_POLL_INTERVAL.min(deadline - now));
        }
    }
}
