//! Sinks that do not need a device: any `io::Write` target, and a
//! simulated renderer that reports each stitch as it is "sewn".

use std::io::Write;

use stitchkit_core::{thread_safe, ScaleConfig, ThreadSafe, TransportError};
use stitchkit_designer::gcode::{format_move, PROGRAM_END};
use stitchkit_designer::Point;

use super::StitchSink;

/// Writes the command stream as text, one line per command.
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| TransportError::WriteFailed {
                endpoint: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

impl<W: Write + Send> StitchSink for WriterSink<W> {
    fn endpoint(&self) -> &str {
        &self.name
    }

    fn send_coordinate(&mut self, x_mm: f64, y_mm: f64) -> Result<(), TransportError> {
        self.write_line(&format_move(x_mm, y_mm))
    }

    fn end_program(&mut self) -> Result<(), TransportError> {
        self.write_line(PROGRAM_END)
    }
}

/// One stitch seen by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedStitch {
    pub x_mm: f64,
    pub y_mm: f64,
    /// Position on the canvas, for drawing the stitch dot
    pub canvas: Point,
}

type StitchCallback = Box<dyn FnMut(&SimulatedStitch) + Send>;

/// Records stitches instead of sending them anywhere.
///
/// The trace is shared so a renderer can read it while streaming runs on
/// another thread.
pub struct SimulationSink {
    scale: ScaleConfig,
    trace: ThreadSafe<Vec<SimulatedStitch>>,
    on_stitch: Option<StitchCallback>,
    finished: bool,
}

impl SimulationSink {
    pub fn new(scale: ScaleConfig) -> Self {
        Self {
            scale,
            trace: thread_safe(Vec::new()),
            on_stitch: None,
            finished: false,
        }
    }

    /// Call `callback` for every stitch as it arrives.
    pub fn with_callback(mut self, callback: impl FnMut(&SimulatedStitch) + Send + 'static) -> Self {
        self.on_stitch = Some(Box::new(callback));
        self
    }

    pub fn trace(&self) -> ThreadSafe<Vec<SimulatedStitch>> {
        std::sync::Arc::clone(&self.trace)
    }

    pub fn stitches(&self) -> Vec<SimulatedStitch> {
        self.trace.lock().clone()
    }

    /// Whether the end-of-program marker has been received.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl StitchSink for SimulationSink {
    fn endpoint(&self) -> &str {
        "simulation"
    }

    fn send_coordinate(&mut self, x_mm: f64, y_mm: f64) -> Result<(), TransportError> {
        let stitch = SimulatedStitch {
            x_mm,
            y_mm,
            canvas: Point::new(self.scale.to_px(x_mm), self.scale.to_px(y_mm)),
        };
        tracing::info!("Stitch X: {:.2} Y: {:.2}", x_mm, y_mm);

        if let Some(callback) = self.on_stitch.as_mut() {
            callback(&stitch);
        }
        self.trace.lock().push(stitch);
        Ok(())
    }

    fn end_program(&mut self) -> Result<(), TransportError> {
        self.finished = true;
        tracing::info!("Simulation finished: {} stitch(es)", self.trace.lock().len());
        Ok(())
    }
}
