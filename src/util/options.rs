// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

//! Counter options.

use clap::{Arg, Command};

use crate::counter::factory::Backend;
use crate::counter::OverflowPolicy;

const COUNTER_USAGE: &str = r#"counter [OPTIONS]"#;

/// Creates the clap::Command metadata for argument parsing.
fn make_options_parser() -> Command<'static> {
    let parser = Command::new("counter")
        .no_binary_name(true)
        .override_usage(COUNTER_USAGE)
        .version(env!("CARGO_PKG_VERSION"))
        .arg(Arg::new("invocations")
            .long("invocations")
            .takes_value(true)
            .value_parser(clap::value_parser!(u64))
            .default_value("2")
            .help("How many times the counter instance is invoked."))
        .arg(Arg::new("backend")
            .long("backend")
            .takes_value(true)
            .value_parser(["state", "closure"])
            .default_value("closure")
            .help("The representation of the counter instance.")
            .long_help("`closure` keeps the count in a captured variable, `state` keeps it in a struct field."))
        .arg(Arg::new("overflow")
            .long("overflow")
            .takes_value(true)
            .value_parser(["saturate", "fail"])
            .default_value("saturate")
            .help("What happens once the counter reaches its limit."))
        .arg(Arg::new("limit")
            .long("limit")
            .takes_value(true)
            .value_parser(clap::value_parser!(u64).range(1..))
            .help("The largest value the counter may return."))
        .arg(Arg::new("dump-stats")
            .long("dump-stats")
            .takes_value(false)
            .help("Dump the statistics of the run."))
        .arg(Arg::new("report-output")
            .long("dump-report")
            .takes_value(true)
            .help("Dump the run report in JSON format to the output file."));
    parser
}

#[derive(Clone, Debug)]
pub struct CounterOptions {
    pub invocations: u64,
    pub backend: Backend,
    // options for the overflow edge
    pub overflow: OverflowPolicy,
    pub limit: u64,

    pub dump_stats: bool,
    pub report_output: Option<String>,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            invocations: 2,
            backend: Backend::Closure,
            overflow: OverflowPolicy::Saturate,
            limit: u64::MAX,
            dump_stats: false,
            report_output: None,
        }
    }
}

impl CounterOptions {
    /// Parses options from a list of strings, exiting the process with clap's
    /// diagnostics (or help/version text) if they cannot be parsed.
    pub fn parse_from_args(&mut self, args: &[String]) {
        if let Err(e) = self.try_parse_from_args(args) {
            e.exit();
        }
    }

    /// Parses options from a list of strings. Options that are not given keep
    /// the value they already had, so later sources override earlier ones.
    pub fn try_parse_from_args(&mut self, args: &[String]) -> Result<(), clap::Error> {
        let matches = make_options_parser().try_get_matches_from(args.iter())?;

        if matches.value_source("invocations") == Some(clap::ValueSource::CommandLine) {
            if let Some(n) = matches.get_one::<u64>("invocations") {
                self.invocations = *n;
            }
        }

        if matches.value_source("backend") == Some(clap::ValueSource::CommandLine) {
            self.backend = match matches.get_one::<String>("backend").map(String::as_str) {
                Some("state") => Backend::State,
                _ => Backend::Closure,
            }
        }

        if matches.value_source("overflow") == Some(clap::ValueSource::CommandLine) {
            self.overflow = match matches.get_one::<String>("overflow").map(String::as_str) {
                Some("fail") => OverflowPolicy::Fail,
                _ => OverflowPolicy::Saturate,
            }
        }

        if let Some(limit) = matches.get_one::<u64>("limit") {
            self.limit = *limit;
        }

        if matches.contains_id("dump-stats") {
            self.dump_stats = true;
        }
        if let Some(output) = matches.get_one::<String>("report-output") {
            self.report_output = Some(output.clone());
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::counter::factory::Backend;
    use crate::counter::OverflowPolicy;
    use crate::util::options::CounterOptions;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let mut options = CounterOptions::default();
        options.try_parse_from_args(&[]).unwrap();
        assert_eq!(options.invocations, 2);
        assert_eq!(options.backend, Backend::Closure);
        assert_eq!(options.overflow, OverflowPolicy::Saturate);
        assert_eq!(options.limit, u64::MAX);
        assert!(!options.dump_stats);
        assert!(options.report_output.is_none());
    }

    #[test]
    fn parses_every_option() {
        let mut options = CounterOptions::default();
        options
            .try_parse_from_args(&args(&[
                "--invocations", "5",
                "--backend", "state",
                "--overflow", "fail",
                "--limit", "3",
                "--dump-stats",
                "--dump-report", "report.json",
            ]))
            .unwrap();
        assert_eq!(options.invocations, 5);
        assert_eq!(options.backend, Backend::State);
        assert_eq!(options.overflow, OverflowPolicy::Fail);
        assert_eq!(options.limit, 3);
        assert!(options.dump_stats);
        assert_eq!(options.report_output.as_deref(), Some("report.json"));
    }

    #[test]
    fn later_arguments_override_earlier_ones() {
        let mut options = CounterOptions::default();
        options.try_parse_from_args(&args(&["--backend", "state", "--invocations", "9"])).unwrap();
        options.try_parse_from_args(&args(&["--invocations", "4"])).unwrap();
        assert_eq!(options.backend, Backend::State);
        assert_eq!(options.invocations, 4);
    }

    #[test]
    fn rejects_zero_limit() {
        let mut options = CounterOptions::default();
        assert!(options.try_parse_from_args(&args(&["--limit", "0"])).is_err());
    }

    #[test]
    fn rejects_unknown_backend() {
        let mut options = CounterOptions::default();
        assert!(options.try_parse_from_args(&args(&["--backend", "thread"])).is_err());
    }
}
