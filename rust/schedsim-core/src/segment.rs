//! Gantt segments
//!
//! The engine emits half-open `[start, end)` intervals labeled with the
//! process that held the CPU, or with one of two sentinels: an idle gap or
//! a context switch. The sentinel strings `IDLE` and `CS` are part of the
//! wire contract and are rendered only at (de)serialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::process::Tick;

/// Label attached to one span of CPU time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentLabel {
    /// No process was runnable
    Idle,
    /// Fixed-cost switch between two distinct processes
    ContextSwitch,
    /// A process run, labeled by pid
    Run(String),
}

impl SegmentLabel {
    /// True for the `IDLE` sentinel.
    pub fn is_idle(&self) -> bool {
        matches!(self, SegmentLabel::Idle)
    }

    /// True for a real process run.
    pub fn is_run(&self) -> bool {
        matches!(self, SegmentLabel::Run(_))
    }
}

impl fmt::Display for SegmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentLabel::Idle => write!(f, "IDLE"),
            SegmentLabel::ContextSwitch => write!(f, "CS"),
            SegmentLabel::Run(pid) => write!(f, "{}", pid),
        }
    }
}

impl From<String> for SegmentLabel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IDLE" => SegmentLabel::Idle,
            "CS" => SegmentLabel::ContextSwitch,
            _ => SegmentLabel::Run(value),
        }
    }
}

impl From<SegmentLabel> for String {
    fn from(label: SegmentLabel) -> Self {
        label.to_string()
    }
}

/// One half-open interval `[start, end)` of the reconstructed timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Tick,
    pub end: Tick,
    pub label: SegmentLabel,
}

impl Segment {
    pub fn new(start: Tick, end: Tick, label: SegmentLabel) -> Self {
        Self { start, end, label }
    }

    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Merge adjacent segments carrying the same label and drop empty ones.
pub fn merge_segments(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.label == segment.label && segment.start == last.end => {
                last.end = segment.end;
            }
            _ => merged.push(segment),
        }
    }
    merged.retain(|s| s.end > s.start);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: Tick, end: Tick, pid: &str) -> Segment {
        Segment::new(start, end, SegmentLabel::Run(pid.to_string()))
    }

    #[test]
    fn merges_adjacent_same_label() {
        let merged = merge_segments(vec![run(0, 2, "P1"), run(2, 5, "P1"), run(5, 6, "P2")]);
        assert_eq!(merged, vec![run(0, 5, "P1"), run(5, 6, "P2")]);
    }

    #[test]
    fn keeps_noncontiguous_runs_apart() {
        let merged = merge_segments(vec![
            run(0, 2, "P1"),
            Segment::new(2, 4, SegmentLabel::Idle),
            run(4, 6, "P1"),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn drops_empty_segments() {
        let merged = merge_segments(vec![run(0, 2, "P1"), run(2, 2, "P2"), run(2, 3, "P3")]);
        assert_eq!(merged, vec![run(0, 2, "P1"), run(2, 3, "P3")]);
    }

    #[test]
    fn sentinels_render_literally() {
        let idle = serde_json::to_string(&SegmentLabel::Idle).unwrap();
        assert_eq!(idle, "\"IDLE\"");
        let cs = serde_json::to_string(&SegmentLabel::ContextSwitch).unwrap();
        assert_eq!(cs, "\"CS\"");
        let pid = serde_json::to_string(&SegmentLabel::Run("P1".to_string())).unwrap();
        assert_eq!(pid, "\"P1\"");
    }

    #[test]
    fn sentinels_parse_back() {
        let label: SegmentLabel = serde_json::from_str("\"CS\"").unwrap();
        assert_eq!(label, SegmentLabel::ContextSwitch);
        let label: SegmentLabel = serde_json::from_str("\"P9\"").unwrap();
        assert_eq!(label, SegmentLabel::Run("P9".to_string()));
    }
}
