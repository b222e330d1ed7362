//! Per-host admission control
//!
//! A [`HostGate`] bounds how many fetches against one host run at once. It
//! never blocks: [`HostGate::submit`] either admits a task immediately or
//! parks it in a FIFO queue, and [`HostGate::finish`] hands the next parked
//! task to the caller when a running one completes.
//!
//! Gates are created lazily per host by [`HostGates`] and live as long as the
//! crawler that owns the registry, so the cap on a host holds across every
//! concurrent crawl.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Outcome of submitting a task to a gate
#[derive(Debug)]
pub enum Admission<T> {
    /// A slot was free; the caller must start the task now
    Run(T),
    /// The host is at its limit; the task waits in the gate's queue
    Queued,
}

#[derive(Debug)]
struct GateState<T> {
    in_flight: usize,
    queue: VecDeque<T>,
}

/// Admission controller for a single host
///
/// Invariant: `0 <= in_flight <= limit`, and every admitted task must be
/// followed by exactly one call to [`finish`](HostGate::finish).
#[derive(Debug)]
pub struct HostGate<T> {
    limit: usize,
    state: Mutex<GateState<T>>,
}

impl<T> HostGate<T> {
    /// Creates a gate allowing `limit` concurrent tasks (at least one)
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            state: Mutex::new(GateState {
                in_flight: 0,
                queue: VecDeque::new(),
            }),
        }
    }

    /// Admits `task` if a slot is free, otherwise queues it behind earlier tasks
    pub fn submit(&self, task: T) -> Admission<T> {
        let mut state = self.state.lock();
        if state.in_flight < self.limit {
            state.in_flight += 1;
            Admission::Run(task)
        } else {
            state.queue.push_back(task);
            Admission::Queued
        }
    }

    /// Releases the slot of a completed task
    ///
    /// If tasks are waiting, the oldest one inherits the slot and is returned
    /// for the caller to start; `in_flight` is unchanged. Otherwise the slot
    /// is freed and `None` is returned.
    pub fn finish(&self) -> Option<T> {
        let mut state = self.state.lock();
        match state.queue.pop_front() {
            Some(next) => Some(next),
            None => {
                state.in_flight = state.in_flight.saturating_sub(1);
                None
            }
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of tasks currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight
    }

    /// Number of tasks waiting for a slot
    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }
}

/// Registry of gates keyed by host, shared by every crawl of one crawler
#[derive(Debug)]
pub struct HostGates<T> {
    per_host: usize,
    gates: DashMap<String, Arc<HostGate<T>>>,
}

impl<T> HostGates<T> {
    pub fn new(per_host: usize) -> Self {
        Self {
            per_host,
            gates: DashMap::new(),
        }
    }

    /// Returns the gate for `host`, creating it on first use
    pub fn gate_for(&self, host: &str) -> Arc<HostGate<T>> {
        if let Some(gate) = self.gates.get(host) {
            return Arc::clone(gate.value());
        }

        let gate = self
            .gates
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(HostGate::new(self.per_host)));
        Arc::clone(gate.value())
    }

    /// Returns the gate for `host` if one has been created
    pub fn get(&self, host: &str) -> Option<Arc<HostGate<T>>> {
        self.gates.get(host).map(|gate| Arc::clone(gate.value()))
    }

    /// Number of hosts seen so far
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
