// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

//! The main routine of `counter`.
//!
//! Creates one counter instance and prints the value returned by each invocation.

use log::*;
use std::env;

use closure_counter::driver;
use closure_counter::util::options::CounterOptions;

fn main() {
    // Initialize loggers.
    if env::var("COUNTER_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("COUNTER_LOG")
            .write_style("COUNTER_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    // Get any options specified via the COUNTER_FLAGS environment variable
    let mut options = CounterOptions::default();
    let counter_flags = env::var("COUNTER_FLAGS").unwrap_or_default();
    let counter_args: Vec<String> = serde_json::from_str(&counter_flags).unwrap_or_default();
    options.parse_from_args(&counter_args[..]);

    // Let arguments supplied on the command line override the environment variable.
    let args = env::args().skip(1).collect::<Vec<_>>();
    options.parse_from_args(&args[..]);
    info!("Counter Options: {:?}", options);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = driver::run(&options, &mut stdout) {
        error!("Counter run failed: {:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
