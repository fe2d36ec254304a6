// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

//! Constructors of counter instances.

use log::*;

use super::{step, Counter, CounterError, Invoke, OverflowPolicy};

/// Returns a closure that owns a private count, bumps it on every call and returns
/// the new value. The count saturates at `u64::MAX`.
pub fn make_counter() -> impl FnMut() -> u64 {
    let mut count: u64 = 0;
    move || {
        count = count.saturating_add(1);
        count
    }
}

/// The representation used for the counter instances built by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A `Counter` struct holding the state in a field.
    State,
    /// A closure holding the state in a captured variable.
    Closure,
}

/// Hands out fresh counter instances. The factory itself holds no counter state,
/// so instances never share a count.
#[derive(Clone, Copy, Debug)]
pub struct CounterFactory {
    limit: u64,
    policy: OverflowPolicy,
}

impl Default for CounterFactory {
    fn default() -> Self {
        CounterFactory::new(u64::MAX, OverflowPolicy::default())
    }
}

impl CounterFactory {
    pub fn new(limit: u64, policy: OverflowPolicy) -> CounterFactory {
        CounterFactory { limit, policy }
    }

    pub fn make(&self) -> Counter {
        debug!("New counter state (limit: {}, overflow: {:?})", self.limit, self.policy);
        Counter::with_limit(self.limit, self.policy)
    }

    pub fn make_closure(&self) -> impl FnMut() -> Result<u64, CounterError> {
        debug!("New counter closure (limit: {}, overflow: {:?})", self.limit, self.policy);
        let (limit, policy) = (self.limit, self.policy);
        let mut count: u64 = 0;
        move || {
            count = step(count, limit, policy)?;
            Ok(count)
        }
    }

    pub fn make_instance(&self, backend: Backend) -> Box<dyn Invoke> {
        match backend {
            Backend::State => Box::new(self.make()),
            Backend::Closure => Box::new(self.make_closure()),
        }
    }
}
