//! Property-based laws for the simulation core
//!
//! Verifies the universal invariants every run must satisfy, plus the
//! determinism and SJF/SPN equivalence laws, across random workloads and
//! policies.

use proptest::prelude::*;
use schedsim_core::{
    build_policy, simulate, MlfqConfig, MlqConfig, PolicySpec, PriorityMapping, ProcState,
    Process, QueueSpec, Segment, SegmentLabel, Tick,
};

fn arb_processes() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec(
        (0u64..20, 1u64..10, prop::option::of(0i64..6)),
        1..8,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| Process {
                pid: format!("P{}", i + 1),
                arrival_time: arrival,
                burst_time: burst,
                priority,
            })
            .collect()
    })
}

fn arb_spec() -> impl Strategy<Value = PolicySpec> {
    prop_oneof![
        Just(PolicySpec::Fcfs),
        Just(PolicySpec::Sjf),
        Just(PolicySpec::Srtf),
        Just(PolicySpec::Hrrn),
        (1u64..6).prop_map(|quantum| PolicySpec::Rr { quantum }),
        (1u64..4).prop_map(|q| PolicySpec::Mlfq(MlfqConfig {
            quanta: [q, q * 2, q * 4],
        })),
        (1u64..4).prop_map(|q| PolicySpec::Mlq(MlqConfig {
            queues: [
                QueueSpec::rr(q),
                QueueSpec::rr(q),
                QueueSpec::fcfs(),
                QueueSpec::fcfs(),
            ],
            priority_mapping: PriorityMapping::OneToFour,
        })),
    ]
}

fn run(spec: &PolicySpec, processes: &[Process], cs: Tick) -> (Vec<ProcState>, Vec<Segment>) {
    let mut table: Vec<ProcState> = processes.iter().map(ProcState::new).collect();
    let mut policy = build_policy(spec).unwrap();
    let segments = simulate(&mut table, policy.as_mut(), cs);
    (table, segments)
}

fn busy_time(segments: &[Segment], pid: &str) -> Tick {
    segments
        .iter()
        .filter(|s| s.label == SegmentLabel::Run(pid.to_string()))
        .map(Segment::duration)
        .sum()
}

proptest! {
    #[test]
    fn run_time_equals_total_burst(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        let (_, segments) = run(&spec, &processes, cs);
        let granted: Tick = segments
            .iter()
            .filter(|s| s.label.is_run())
            .map(Segment::duration)
            .sum();
        let owed: Tick = processes.iter().map(|p| p.burst_time).sum();
        prop_assert_eq!(granted, owed);
    }

    #[test]
    fn per_process_runs_sum_to_burst(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        let (_, segments) = run(&spec, &processes, cs);
        for p in &processes {
            prop_assert_eq!(busy_time(&segments, &p.pid), p.burst_time);
        }
    }

    #[test]
    fn segments_are_ordered_contiguous_and_nonempty(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        let (table, segments) = run(&spec, &processes, cs);
        prop_assert!(!segments.is_empty());
        // the timeline always starts at the epoch and ends at the last
        // completion
        prop_assert_eq!(segments[0].start, 0);
        let last_completion = table
            .iter()
            .filter_map(|p| p.completion_time)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(segments[segments.len() - 1].end, last_completion);
        for window in segments.windows(2) {
            prop_assert_eq!(window[0].end, window[1].start);
            // merging leaves no adjacent equal labels
            prop_assert_ne!(&window[0].label, &window[1].label);
        }
        for s in &segments {
            prop_assert!(s.start < s.end);
        }
    }

    #[test]
    fn first_start_and_completion_are_consistent(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        let (table, _) = run(&spec, &processes, cs);
        for p in &table {
            let first = p.first_start.unwrap();
            let completion = p.completion_time.unwrap();
            prop_assert!(first >= p.arrival_time);
            prop_assert!(completion >= first + p.burst_time);
            prop_assert_eq!(p.remaining, 0);
        }
    }

    #[test]
    fn no_context_switch_next_to_idle_or_same_pid(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 1u64..3,
    ) {
        let (_, segments) = run(&spec, &processes, cs);
        for (i, s) in segments.iter().enumerate() {
            if s.label != SegmentLabel::ContextSwitch {
                continue;
            }
            // a switch is always sandwiched between two distinct real runs
            prop_assert!(i > 0 && i + 1 < segments.len());
            let before = &segments[i - 1];
            let after = &segments[i + 1];
            prop_assert!(before.label.is_run());
            prop_assert!(after.label.is_run());
            prop_assert_ne!(&before.label, &after.label);
        }
    }

    #[test]
    fn simulation_is_deterministic(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        let (table_a, segments_a) = run(&spec, &processes, cs);
        let (table_b, segments_b) = run(&spec, &processes, cs);
        prop_assert_eq!(segments_a, segments_b);
        prop_assert_eq!(table_a, table_b);
    }

    #[test]
    fn rerunning_from_fresh_state_is_idempotent(
        processes in arb_processes(),
        spec in arb_spec(),
        cs in 0u64..3,
    ) {
        // rebuild the input list from the mutated table and run again
        let (table, segments) = run(&spec, &processes, cs);
        let rebuilt: Vec<Process> = table
            .iter()
            .map(|p| Process {
                pid: p.pid.clone(),
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                priority: p.priority,
            })
            .collect();
        let (_, again) = run(&spec, &rebuilt, cs);
        prop_assert_eq!(segments, again);
    }

    #[test]
    fn nonpreemptive_policies_run_each_process_once(
        processes in arb_processes(),
        spec in prop_oneof![
            Just(PolicySpec::Fcfs),
            Just(PolicySpec::Sjf),
            Just(PolicySpec::Hrrn),
        ],
    ) {
        let (_, segments) = run(&spec, &processes, 0);
        for p in &processes {
            let runs = segments
                .iter()
                .filter(|s| s.label == SegmentLabel::Run(p.pid.clone()))
                .count();
            prop_assert_eq!(runs, 1);
        }
    }
}
