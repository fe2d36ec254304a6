// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::driver::RunReport;

/// Writes the run report as pretty-printed JSON to `report_path`, or to standard
/// output when the path is `stdout`.
pub fn dump_report(report: &RunReport, report_path: &str) -> std::io::Result<()> {
    let mut report_writer = BufWriter::new(match report_path {
        "stdout" => Box::new(std::io::stdout()) as Box<dyn Write>,
        _ => Box::new(File::create(report_path)?) as Box<dyn Write>,
    });
    serde_json::to_writer_pretty(&mut report_writer, report)?;
    report_writer.write_all(b"\n")?;
    report_writer.flush()
}
