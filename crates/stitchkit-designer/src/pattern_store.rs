//! Named sewing patterns and the store that owns them.
//!
//! Pattern order is insertion order. It decides the order in which patterns
//! are written to G-code and the order in which their segments are stitched,
//! so the set is backed by an `IndexMap` rather than a hash map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stitchkit_core::{PatternError, Result, ScaleConfig};

use crate::model::{Point, Segment};
use crate::stitching::stitch_all;

/// Names of the pattern slots offered by the editor.
pub const DEFAULT_PATTERN_COUNT: usize = 10;

/// Name of the `index`-th pattern slot (1-based): `Pattern1`, `Pattern2`, ...
pub fn default_pattern_name(index: usize) -> String {
    format!("Pattern{}", index)
}

/// A named, ordered list of sewing lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total sewn length in canvas units.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Number of stitches the pattern produces at the given scale.
    pub fn stitch_count(&self, scale: &ScaleConfig) -> usize {
        stitch_all(&self.segments, scale).count()
    }

    /// All stitch points of the pattern, in sewing order.
    pub fn stitch_points(&self, scale: &ScaleConfig) -> Vec<Point> {
        stitch_all(&self.segments, scale).collect()
    }
}

/// Insertion-ordered mapping from pattern name to pattern.
///
/// Every key passes [`validate_pattern_name`], so any set can be written as
/// G-code and read back unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternSet {
    patterns: IndexMap<String, Pattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Pattern> {
        self.patterns.get_mut(name)
    }

    /// Get the named pattern, appending an empty one at the end if missing.
    pub fn entry(&mut self, name: &str) -> Result<&mut Pattern> {
        validate_pattern_name(name)?;
        Ok(self.slot(name))
    }

    /// Insert or replace a pattern. A replaced pattern keeps its position.
    pub fn insert(&mut self, pattern: Pattern) -> Result<()> {
        validate_pattern_name(&pattern.name)?;
        self.patterns.insert(pattern.name.clone(), pattern);
        Ok(())
    }

    /// Build a set from patterns in order. Later duplicates replace earlier
    /// ones in place.
    pub fn from_patterns(patterns: impl IntoIterator<Item = Pattern>) -> Result<Self> {
        let mut set = PatternSet::new();
        for pattern in patterns {
            set.insert(pattern)?;
        }
        Ok(set)
    }

    /// `entry` for one of the editor's own slot names.
    pub(crate) fn default_slot(&mut self, index: usize) -> &mut Pattern {
        self.slot(&default_pattern_name(index))
    }

    fn slot(&mut self, name: &str) -> &mut Pattern {
        self.patterns
            .entry(name.to_string())
            .or_insert_with(|| Pattern::new(name))
    }

    /// Patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.values()
    }

    /// Pattern names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Whether both sets hold the same patterns, in the same order, with
    /// endpoints equal within `tolerance` (canvas units).
    pub fn approx_eq(&self, other: &PatternSet, tolerance: f64) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| {
                a.name == b.name
                    && a.segments.len() == b.segments.len()
                    && a.segments.iter().zip(&b.segments).all(|(sa, sb)| {
                        sa.start.approx_eq(&sb.start, tolerance)
                            && sa.end.approx_eq(&sb.end, tolerance)
                    })
            })
    }
}

/// Check that a name can be stored and written as a `; <name>` comment line.
pub fn validate_pattern_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains(['\n', '\r']) {
        Some("name contains a line break")
    } else if name.trim() != name {
        Some("name has leading or trailing whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PatternError::InvalidPattern {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Owner of all patterns for the lifetime of an editing session.
///
/// Mutation goes through `&mut self`; anything that iterates the patterns
/// on another thread should work on [`PatternStore::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    set: PatternSet,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the named pattern, creating it empty on first use.
    pub fn select(&mut self, name: &str) -> Result<&Pattern> {
        let created = !self.set.contains(name);
        let pattern = self.set.entry(name)?;
        if created {
            tracing::debug!("Creating pattern {}", name);
        }
        Ok(pattern)
    }

    /// Select one of the editor's own slots (`Pattern1`, `Pattern2`, ...).
    pub fn select_default(&mut self, index: usize) -> &Pattern {
        self.set.default_slot(index)
    }

    /// Append a segment to a pattern that has already been selected.
    pub fn append_segment(&mut self, name: &str, segment: Segment) -> Result<()> {
        let pattern = self
            .set
            .get_mut(name)
            .ok_or_else(|| PatternError::InvalidPattern {
                name: name.to_string(),
                reason: "pattern has not been selected".to_string(),
            })?;
        pattern.segments.push(segment);
        Ok(())
    }

    /// Empty the named pattern. The name stays in the set.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let pattern = self
            .set
            .get_mut(name)
            .ok_or_else(|| PatternError::InvalidPattern {
                name: name.to_string(),
                reason: "pattern has not been selected".to_string(),
            })?;
        pattern.segments.clear();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.set.get(name)
    }

    pub fn all(&self) -> &PatternSet {
        &self.set
    }

    /// Independent copy of every pattern, for exporters and streamers.
    pub fn snapshot(&self) -> PatternSet {
        self.set.clone()
    }

    /// Replace every pattern, e.g. after loading a file.
    pub fn replace(&mut self, set: PatternSet) {
        self.set = set;
    }
}
