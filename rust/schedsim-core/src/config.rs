//! Resolved policy configuration
//!
//! Boundary layers parse heterogeneous request shapes into these types;
//! the core only ever sees fully-resolved parameters. Constructors enforce
//! the per-policy requirements (positive quanta, four MLQ queues, quanta
//! for MLFQ levels 0..2).

use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};
use crate::policy::{Fcfs, Hrrn, Mlfq, Mlq, Policy, RoundRobin, Sjf, Srtf};
use crate::process::Tick;

/// Supported scheduling algorithms.
///
/// `Spn` is the textbook alias of `Sjf`; it keeps its own variant so the
/// requested name can be echoed back, but it builds the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Spn,
    Srtf,
    Hrrn,
    Rr,
    Mlq,
    Mlfq,
}

impl Algorithm {
    /// All supported algorithms, in the order `compare` reports them.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Fcfs,
        Algorithm::Rr,
        Algorithm::Sjf,
        Algorithm::Spn,
        Algorithm::Srtf,
        Algorithm::Hrrn,
        Algorithm::Mlq,
        Algorithm::Mlfq,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Spn => "SPN",
            Algorithm::Srtf => "SRTF",
            Algorithm::Hrrn => "HRRN",
            Algorithm::Rr => "RR",
            Algorithm::Mlq => "MLQ",
            Algorithm::Mlfq => "MLFQ",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(SimError::Validation("algorithm is required".to_string()));
        }
        match name.to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Algorithm::Fcfs),
            "SJF" => Ok(Algorithm::Sjf),
            "SPN" => Ok(Algorithm::Spn),
            "SRTF" => Ok(Algorithm::Srtf),
            "HRRN" => Ok(Algorithm::Hrrn),
            "RR" => Ok(Algorithm::Rr),
            "MLQ" => Ok(Algorithm::Mlq),
            "MLFQ" => Ok(Algorithm::Mlfq),
            _ => Err(SimError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

/// Discipline of one MLQ queue / MLFQ level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueDiscipline {
    Fcfs,
    Sjf,
    Rr,
    Hrrn,
}

impl QueueDiscipline {
    /// Parse a per-queue algorithm name. Unrecognized names fall back to
    /// FCFS rather than failing the whole request.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "RR" => QueueDiscipline::Rr,
            "SJF" | "SPN" => QueueDiscipline::Sjf,
            "HRRN" => QueueDiscipline::Hrrn,
            _ => QueueDiscipline::Fcfs,
        }
    }
}

/// Discipline plus quantum for one MLQ queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub discipline: QueueDiscipline,
    pub quantum: Option<Tick>,
}

impl QueueSpec {
    pub fn fcfs() -> Self {
        Self {
            discipline: QueueDiscipline::Fcfs,
            quantum: None,
        }
    }

    pub fn rr(quantum: Tick) -> Self {
        Self {
            discipline: QueueDiscipline::Rr,
            quantum: Some(quantum),
        }
    }
}

/// Mapping from a user-supplied priority integer to an MLQ queue index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityMapping {
    /// Priorities 1..4 map to queues 0..3
    #[default]
    OneToFour,
    /// Priorities 0..3 map to queues 0..3
    ZeroToThree,
}

impl PriorityMapping {
    /// Parse a mapping name; anything other than `"0-3"` behaves as the
    /// default `"1-4"`.
    pub fn parse(name: &str) -> Self {
        if name.trim() == "0-3" {
            PriorityMapping::ZeroToThree
        } else {
            PriorityMapping::OneToFour
        }
    }
}

/// Fully-resolved MLQ parameters: exactly four queues, highest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlqConfig {
    pub queues: [QueueSpec; 4],
    pub priority_mapping: PriorityMapping,
}

/// Fully-resolved MLFQ parameters: quanta for the three RR levels; the
/// fourth level is always FCFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlfqConfig {
    pub quanta: [Tick; 3],
}

/// Fully-resolved policy parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySpec {
    Fcfs,
    Sjf,
    Srtf,
    Hrrn,
    Rr { quantum: Tick },
    Mlq(MlqConfig),
    Mlfq(MlfqConfig),
}

/// Construct the policy described by `spec`.
pub fn build_policy(spec: &PolicySpec) -> SimResult<Box<dyn Policy>> {
    match spec {
        PolicySpec::Fcfs => Ok(Box::new(Fcfs::new())),
        PolicySpec::Sjf => Ok(Box::new(Sjf::new())),
        PolicySpec::Srtf => Ok(Box::new(Srtf::new())),
        PolicySpec::Hrrn => Ok(Box::new(Hrrn::new())),
        PolicySpec::Rr { quantum } => Ok(Box::new(RoundRobin::new(*quantum)?)),
        PolicySpec::Mlq(config) => Ok(Box::new(Mlq::new(config)?)),
        PolicySpec::Mlfq(config) => Ok(Box::new(Mlfq::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithms_case_insensitively() {
        assert_eq!("fcfs".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!(" Srtf ".parse::<Algorithm>().unwrap(), Algorithm::Srtf);
        assert_eq!("SPN".parse::<Algorithm>().unwrap(), Algorithm::Spn);
    }

    #[test]
    fn rejects_empty_algorithm() {
        let err = "   ".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SimError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = "LOTTERY".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, SimError::UnsupportedAlgorithm("LOTTERY".to_string()));
    }

    #[test]
    fn unknown_queue_discipline_falls_back_to_fcfs() {
        assert_eq!(QueueDiscipline::parse("EDF"), QueueDiscipline::Fcfs);
        assert_eq!(QueueDiscipline::parse("rr"), QueueDiscipline::Rr);
        assert_eq!(QueueDiscipline::parse("spn"), QueueDiscipline::Sjf);
    }

    #[test]
    fn priority_mapping_defaults_to_one_based() {
        assert_eq!(PriorityMapping::parse("0-3"), PriorityMapping::ZeroToThree);
        assert_eq!(PriorityMapping::parse("1-4"), PriorityMapping::OneToFour);
        assert_eq!(PriorityMapping::parse("banana"), PriorityMapping::OneToFour);
    }

    #[test]
    fn rr_requires_positive_quantum() {
        let err = build_policy(&PolicySpec::Rr { quantum: 0 }).unwrap_err();
        assert!(matches!(err, SimError::PolicyConfig(_)));
    }

    #[test]
    fn builds_every_simple_policy() {
        for spec in [
            PolicySpec::Fcfs,
            PolicySpec::Sjf,
            PolicySpec::Srtf,
            PolicySpec::Hrrn,
            PolicySpec::Rr { quantum: 2 },
        ] {
            assert!(build_policy(&spec).is_ok());
        }
    }
}
