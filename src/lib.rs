// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

//! Counters built from closures that capture and mutate their own state.
//!
//! A counter factory hands out independent counter instances; every invocation of an
//! instance bumps its private count by one and returns the new value.

pub mod counter;
pub mod driver;
pub mod util;
