// Copyright (c) 2024 <Wei Li>.
//
// This source code is licensed under the GNU license found in the
// LICENSE file in the root directory of this source tree.

use log::*;
use std::io::{BufWriter, Write};

use crate::driver::RunReport;

pub fn dump_stats<W: Write>(report: &RunReport, out: W) -> std::io::Result<()> {
    let mut stat_writer = BufWriter::new(out);

    info!("Dumping counter statistics...");
    stat_writer.write_all("##########################################################\n".as_bytes())?;
    stat_writer.write_all("Counter Statistics: \n".as_bytes())?;
    stat_writer.write_all(format!("#Backend: {:?}\n", report.backend).as_bytes())?;
    stat_writer.write_all(format!("#Invocations: {}\n", report.values.len()).as_bytes())?;
    match report.values.last() {
        Some(last) => stat_writer.write_all(format!("#Last value: {}\n", last).as_bytes())?,
        None => stat_writer.write_all("#Last value: none\n".as_bytes())?,
    }
    stat_writer.write_all(format!("#Saturated calls: {}\n", report.saturated_calls()).as_bytes())?;
    stat_writer.write_all(
        format!("#Run time: {}\n", humantime::format_duration(report.elapsed)).as_bytes(),
    )?;
    stat_writer.write_all("##########################################################\n".as_bytes())?;
    stat_writer.flush()
}
