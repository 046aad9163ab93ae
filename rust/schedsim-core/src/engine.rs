//! Discrete-event simulation engine
//!
//! Drives simulated time forward over the process table, delegating
//! selection, slice-length, and expiration decisions to a [`Policy`].
//! The engine owns arrival admission, context-switch accounting, idle
//! gaps, and termination; the resulting timeline is merged before return.

use tracing::debug;

use crate::policy::Policy;
use crate::process::{ProcState, Tick};
use crate::segment::{merge_segments, Segment, SegmentLabel};

/// Reconstruct the CPU timeline for `table` under `policy`.
///
/// `context_switch_time` is charged between two consecutive runs of
/// distinct processes, never next to an idle gap. On return every process
/// has `first_start` and `completion_time` populated (a policy that
/// starves a process leaves it incomplete; the metrics builder rejects
/// such runs).
pub fn simulate(
    table: &mut [ProcState],
    policy: &mut dyn Policy,
    context_switch_time: Tick,
) -> Vec<Segment> {
    let n = table.len();
    if n == 0 {
        return Vec::new();
    }
    debug!(
        policy = policy.name(),
        processes = n,
        context_switch_time,
        "simulate"
    );

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        (table[a].arrival_time, table[a].pid.as_str())
            .cmp(&(table[b].arrival_time, table[b].pid.as_str()))
    });

    let mut cursor = 0usize;
    let mut time: Tick = 0;
    let mut done = 0usize;
    let mut current: Option<usize> = None;
    let mut segments: Vec<Segment> = Vec::new();
    // pid and end of the previous run, for context-switch accounting
    let mut last_run: Option<(usize, Tick)> = None;

    let first_arrival = table[order[0]].arrival_time;
    if first_arrival > 0 {
        segments.push(Segment::new(0, first_arrival, SegmentLabel::Idle));
        time = first_arrival;
    }

    while done < n {
        admit_arrivals(table, policy, &order, &mut cursor, time);

        let Some(selected) = policy.select(table, time, current) else {
            let Some(&next_slot) = order.get(cursor) else {
                break;
            };
            let next_arrival = table[next_slot].arrival_time;
            if next_arrival > time {
                segments.push(Segment::new(time, next_arrival, SegmentLabel::Idle));
                last_run = None;
                time = next_arrival;
            }
            current = None;
            continue;
        };

        // a different selection means the policy displaced (and re-admitted)
        // the previous runner
        if current.is_some_and(|cur| cur != selected) {
            current = None;
        }

        if context_switch_time > 0 {
            if let Some((last_slot, last_end)) = last_run {
                let after_real_run = segments.last().is_some_and(|s| s.label.is_run());
                if last_slot != selected && last_end == time && after_real_run {
                    let cs_end = time + context_switch_time;
                    segments.push(Segment::new(time, cs_end, SegmentLabel::ContextSwitch));
                    time = cs_end;
                    admit_arrivals(table, policy, &order, &mut cursor, time);
                    last_run = None;
                }
            }
        }

        if table[selected].first_start.is_none() {
            table[selected].first_start = Some(time);
        }

        let mut slice = policy
            .max_continuous_run(table, selected, time)
            .unwrap_or(table[selected].remaining)
            .min(table[selected].remaining);
        let mut stop_at_arrival = None;
        if policy.preempt_on_arrival() {
            if let Some(&next_slot) = order.get(cursor) {
                let next_arrival = table[next_slot].arrival_time;
                if next_arrival > time {
                    stop_at_arrival = Some(next_arrival);
                    slice = slice.min(next_arrival - time);
                }
            }
        }

        if slice == 0 {
            // nothing runnable right now; jump to the next arrival
            let Some(&next_slot) = order.get(cursor) else {
                break;
            };
            let next_arrival = table[next_slot].arrival_time;
            if next_arrival > time {
                segments.push(Segment::new(time, next_arrival, SegmentLabel::Idle));
                last_run = None;
                time = next_arrival;
            }
            current = None;
            continue;
        }

        let end = time + slice;
        debug!(pid = %table[selected].pid, start = time, end, "dispatch");
        segments.push(Segment::new(
            time,
            end,
            SegmentLabel::Run(table[selected].pid.clone()),
        ));
        last_run = Some((selected, end));
        time = end;
        table[selected].remaining -= slice;
        policy.on_run(table, selected, slice, time);
        admit_arrivals(table, policy, &order, &mut cursor, time);

        if table[selected].remaining == 0 {
            table[selected].completion_time = Some(time);
            done += 1;
            current = None;
            continue;
        }

        if policy.preempt_on_arrival() && stop_at_arrival == Some(time) {
            // stopped exactly at an arrival: keep the runner and let it
            // compete against the newcomer at the next selection
            current = Some(selected);
            continue;
        }

        policy.on_timeslice_expired(table, selected, time);
        current = None;
    }

    finalize_segments(segments)
}

/// Admit every process whose arrival time has been reached, in
/// `(arrival_time, pid)` order. `ready_since` is stamped with the
/// process's own arrival time, not the admission instant.
fn admit_arrivals(
    table: &mut [ProcState],
    policy: &mut dyn Policy,
    order: &[usize],
    cursor: &mut usize,
    up_to: Tick,
) {
    while *cursor < order.len() {
        let slot = order[*cursor];
        let arrival = table[slot].arrival_time;
        if arrival > up_to {
            break;
        }
        policy.on_arrival(table, slot, arrival);
        *cursor += 1;
    }
}

/// Trim synthetic tail segments, then merge: a trailing `CS, IDLE` pair
/// folds into one idle span and a bare trailing `CS` is dropped.
fn finalize_segments(mut segments: Vec<Segment>) -> Vec<Segment> {
    let len = segments.len();
    if len >= 2
        && segments[len - 2].label == SegmentLabel::ContextSwitch
        && segments[len - 1].label == SegmentLabel::Idle
    {
        let start = segments[len - 2].start;
        let end = segments[len - 1].end;
        segments.truncate(len - 2);
        segments.push(Segment::new(start, end, SegmentLabel::Idle));
    }
    if segments
        .last()
        .is_some_and(|s| s.label == SegmentLabel::ContextSwitch)
    {
        segments.pop();
    }
    merge_segments(segments)
}
