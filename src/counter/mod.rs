// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

pub mod factory;

/// What a counter does once its count has reached the configured limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep returning the limit without touching the state.
    #[default]
    Saturate,
    /// Refuse the invocation with `CounterError::Overflow`.
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterError {
    Overflow { limit: u64 },
}

impl fmt::Display for CounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterError::Overflow { limit } => {
                write!(f, "counter overflow: limit {} already reached", limit)
            }
        }
    }
}

impl std::error::Error for CounterError {}

/// Computes the successor of `count` under the given policy and limit.
/// Shared by the struct and the closure representations.
pub(crate) fn step(count: u64, limit: u64, policy: OverflowPolicy) -> Result<u64, CounterError> {
    if count < limit {
        return Ok(count + 1);
    }
    match policy {
        OverflowPolicy::Saturate => Ok(count),
        OverflowPolicy::Fail => Err(CounterError::Overflow { limit }),
    }
}

/// A callable counter instance.
pub trait Invoke {
    /// Bumps the private count and returns the new value.
    fn invoke(&mut self) -> Result<u64, CounterError>;
}

impl<F> Invoke for F
where
    F: FnMut() -> Result<u64, CounterError>,
{
    fn invoke(&mut self) -> Result<u64, CounterError> {
        (*self)()
    }
}

/// The counter state and the one method allowed to mutate it.
///
/// Cloning forks the state: the clone starts from the current count and both copies
/// advance independently afterwards.
#[derive(Clone, Debug)]
pub struct Counter {
    count: u64,
    limit: u64,
    policy: OverflowPolicy,
}

impl Default for Counter {
    fn default() -> Self {
        Counter::new()
    }
}

impl Counter {
    pub fn new() -> Self {
        Counter::with_limit(u64::MAX, OverflowPolicy::default())
    }

    pub fn with_limit(limit: u64, policy: OverflowPolicy) -> Self {
        Counter {
            count: 0,
            limit,
            policy,
        }
    }

    pub fn increment(&mut self) -> Result<u64, CounterError> {
        self.count = step(self.count, self.limit, self.policy)?;
        Ok(self.count)
    }

    /// Get the current value of the counter without incrementing
    pub fn value(&self) -> u64 {
        self.count
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}

impl Invoke for Counter {
    fn invoke(&mut self) -> Result<u64, CounterError> {
        self.increment()
    }
}
