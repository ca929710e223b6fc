//! G-code text to pattern set.

use regex::Regex;
use std::sync::OnceLock;

use stitchkit_core::{GcodeError, Result, ScaleConfig};

use super::{COMMENT_MARKER, PROGRAM_END};
use crate::model::{Point, Segment};
use crate::pattern_store::{validate_pattern_name, PatternSet};

/// Pairing state of the pattern currently being read.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PairState {
    AwaitingStart,
    HaveStart { point: Point, line_number: usize },
}

fn move_regex() -> &'static Regex {
    static MOVE_REGEX: OnceLock<Regex> = OnceLock::new();
    MOVE_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)^G0?1\s+X(?P<x>[-+]?(?:\d+(?:\.\d*)?|\.\d+))\s+Y(?P<y>[-+]?(?:\d+(?:\.\d*)?|\.\d+))\s*(?:;.*)?$",
        )
        .expect("invalid move regex")
    })
}

/// `G1`/`G01`, including the word glued to its first axis (`G1X1.00`), which
/// [`parse_move`] then rejects. `G10` and friends are other commands.
fn is_linear_move(command: &str) -> bool {
    let command = command.to_ascii_uppercase();
    match command
        .strip_prefix("G01")
        .or_else(|| command.strip_prefix("G1"))
    {
        Some(rest) => rest.is_empty() || rest.starts_with(['X', 'Y']),
        None => false,
    }
}

/// Parse `G1 X<mm> Y<mm>` into millimetre coordinates.
fn parse_move(line_number: usize, line: &str) -> Result<(f64, f64)> {
    let caps = move_regex().captures(line).ok_or_else(|| {
        GcodeError::malformed(line_number, line, "expected `G1 X<number> Y<number>`")
    })?;

    let coord = |name: &str| -> Result<f64> {
        caps[name].parse::<f64>().map_err(|e| {
            GcodeError::malformed(line_number, line, format!("bad {} value: {}", name, e)).into()
        })
    };

    Ok((coord("x")?, coord("y")?))
}

/// Parse a pattern document.
///
/// Any structural problem aborts the whole decode. A pattern name that
/// appears twice continues the pattern declared first.
pub fn decode(text: &str, scale: &ScaleConfig) -> Result<PatternSet> {
    let mut set = PatternSet::new();
    let mut current: Option<String> = None;
    let mut state = PairState::AwaitingStart;
    let mut terminated = false;
    let mut last_line_number = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        last_line_number = line_number;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(COMMENT_MARKER) {
            if let PairState::HaveStart { line_number: start_line, .. } = state {
                return Err(GcodeError::malformed(
                    line_number,
                    line,
                    format!("G1 at line {} has no matching end point", start_line),
                )
                .into());
            }

            let name = rest.trim();
            validate_pattern_name(name).map_err(|e| {
                GcodeError::malformed(line_number, line, format!("bad pattern name: {}", e))
            })?;

            if set.contains(name) {
                tracing::debug!(
                    "Pattern {} declared again at line {}, continuing it",
                    name,
                    line_number
                );
            }
            set.entry(name)?;
            current = Some(name.to_string());
            continue;
        }

        let command = line.split_whitespace().next().unwrap_or_default();

        if command.eq_ignore_ascii_case(PROGRAM_END) {
            if let PairState::HaveStart { line_number: start_line, .. } = state {
                return Err(GcodeError::malformed(
                    line_number,
                    line,
                    format!("G1 at line {} has no matching end point", start_line),
                )
                .into());
            }
            terminated = true;
            break;
        }

        if !is_linear_move(command) {
            tracing::debug!("Ignoring line {}: {}", line_number, line);
            continue;
        }

        let Some(name) = current.as_deref() else {
            return Err(GcodeError::malformed(
                line_number,
                line,
                "G1 appears before any pattern name",
            )
            .into());
        };

        let (x_mm, y_mm) = parse_move(line_number, line)?;
        let point = Point::new(scale.to_px(x_mm), scale.to_px(y_mm));

        state = match state {
            PairState::AwaitingStart => PairState::HaveStart { point, line_number },
            PairState::HaveStart { point: start, .. } => {
                set.entry(name)?.segments.push(Segment::new(start, point));
                PairState::AwaitingStart
            }
        };
    }

    if !terminated {
        let reason = match state {
            PairState::HaveStart { line_number, .. } => {
                format!("G1 at line {} has no matching end point", line_number)
            }
            PairState::AwaitingStart => format!("missing {} program end", PROGRAM_END),
        };
        return Err(GcodeError::malformed(last_line_number + 1, "", reason).into());
    }

    tracing::debug!("Decoded {} pattern(s)", set.len());
    Ok(set)
}
