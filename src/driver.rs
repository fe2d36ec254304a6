// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

//! The entry-point routine: builds one counter instance and invokes it.

use anyhow::Context;
use log::*;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::counter::factory::{Backend, CounterFactory};
use crate::counter::{Invoke, OverflowPolicy};
use crate::util::options::CounterOptions;
use crate::util::{results_dumper, statistics};

/// What a single run of the driver produced.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RunReport {
    pub backend: Backend,
    pub overflow: OverflowPolicy,
    pub limit: u64,
    pub values: Vec<u64>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// Number of invocations that returned the same value as the previous one.
    pub fn saturated_calls(&self) -> usize {
        self.values.windows(2).filter(|w| w[0] == w[1]).count()
    }
}

/// Creates one counter instance from `options` and writes the value of each
/// invocation on its own line to `out`.
pub fn run<W: Write>(options: &CounterOptions, out: &mut W) -> anyhow::Result<RunReport> {
    let now = Instant::now();

    let factory = CounterFactory::new(options.limit, options.overflow);
    let mut instance = factory.make_instance(options.backend);
    let mut report = RunReport {
        backend: options.backend,
        overflow: options.overflow,
        limit: options.limit,
        values: Vec::new(),
        elapsed: Duration::ZERO,
    };

    for i in 1..=options.invocations {
        let value = instance
            .invoke()
            .with_context(|| format!("invocation {} of {:?} counter", i, options.backend))?;
        writeln!(out, "{}", value).context("Unable to write counter value")?;
        report.values.push(value);
    }
    out.flush().context("Unable to flush counter output")?;

    report.elapsed = now.elapsed();
    info!("Counter run completed.");
    info!(
        "Run time: {}",
        humantime::format_duration(report.elapsed).to_string()
    );

    if let Some(report_output) = &options.report_output {
        info!("Dumping run report...");
        results_dumper::dump_report(&report, report_output)
            .with_context(|| format!("Unable to dump report to {}", report_output))?;
    }

    if options.dump_stats {
        statistics::dump_stats(&report, std::io::stdout())
            .context("Unable to dump statistics")?;
    }

    Ok(report)
}

#[cfg(test)]
mod test {
    use rand::Rng;
    use crate::counter::factory::Backend;
    use crate::counter::OverflowPolicy;
    use crate::driver::run;
    use crate::util::options::CounterOptions;

    #[test]
    fn default_run_prints_one_then_two() {
        let mut out = Vec::<u8>::new();
        let report = run(&CounterOptions::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
        assert_eq!(report.values, vec![1, 2]);
    }

    #[test]
    fn both_backends_print_the_same_sequence() {
        let invocations = rand::thread_rng().gen_range(1..50);
        let mut outputs = Vec::new();
        for backend in [Backend::State, Backend::Closure] {
            let options = CounterOptions { invocations, backend, ..CounterOptions::default() };
            let mut out = Vec::<u8>::new();
            let report = run(&options, &mut out).unwrap();
            assert_eq!(report.values, (1..=invocations).collect::<Vec<_>>());
            outputs.push(out);
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn saturating_run_repeats_limit() {
        let options = CounterOptions {
            invocations: 4,
            limit: 2,
            ..CounterOptions::default()
        };
        let mut out = Vec::<u8>::new();
        let report = run(&options, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n2\n2\n");
        assert_eq!(report.saturated_calls(), 2);
    }

    #[test]
    fn failing_run_keeps_values_written_before_overflow() {
        let options = CounterOptions {
            invocations: 3,
            limit: 2,
            overflow: OverflowPolicy::Fail,
            backend: Backend::State,
            ..CounterOptions::default()
        };
        let mut out = Vec::<u8>::new();
        let err = run(&options, &mut out).unwrap_err();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
        assert!(format!("{:#}", err).contains("counter overflow: limit 2 already reached"));
    }

    #[test]
    fn zero_invocations_print_nothing() {
        let options = CounterOptions { invocations: 0, ..CounterOptions::default() };
        let mut out = Vec::<u8>::new();
        let report = run(&options, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(report.values.is_empty());
    }

    #[test]
    fn report_is_dumped_as_json() {
        let path = std::env::temp_dir().join(format!("counter-report-{}.json", std::process::id()));
        let options = CounterOptions {
            report_output: Some(path.to_string_lossy().into_owned()),
            ..CounterOptions::default()
        };
        run(&options, &mut Vec::<u8>::new()).unwrap();

        let dumped: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(dumped["values"], serde_json::json!([1, 2]));
        assert_eq!(dumped["backend"], "closure");
        assert_eq!(dumped["overflow"], "saturate");
        std::fs::remove_file(&path).unwrap();
    }
}
