//! Append-only CSV results file.
//!
//! Row layout: `size,<variant>_us...,<variant>_speedup...` with a speedup
//! column for every variant except the baseline, optionally followed by
//! `<variant>_cpe...` cycles-per-element columns.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::runner::SizeOutcome;
use crate::error::{BenchError, Result};

pub struct CsvSink {
    path: PathBuf,
    variants: Vec<&'static str>,
    baseline: &'static str,
    cycles: bool,
    writer: BufWriter<File>,
}

/// First line of an existing file, without the line terminator.
fn read_header(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| BenchError::io(path, e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| BenchError::io(path, e))?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

impl CsvSink {
    /// Open `path` for appending. The header is written only when the file
    /// is new (or empty), so repeated runs accumulate rows under one header.
    ///
    /// An existing header must match this run's columns exactly; otherwise
    /// the rows would no longer line up and `CsvHeaderMismatch` is returned
    /// without touching the file.
    pub fn open(
        path: impl AsRef<Path>,
        variants: &[&'static str],
        baseline: &'static str,
        cycles: bool,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let existing = if path.exists() {
            Some(read_header(&path)?).filter(|h| !h.is_empty())
        } else {
            None
        };

        let expected = header_for(variants, baseline, cycles);
        if let Some(found) = &existing {
            if *found != expected {
                return Err(BenchError::CsvHeaderMismatch {
                    path,
                    expected,
                    found: found.clone(),
                });
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| BenchError::io(&path, e))?;

        let mut sink = Self {
            path,
            variants: variants.to_vec(),
            baseline,
            cycles,
            writer: BufWriter::new(file),
        };
        if existing.is_none() {
            sink.write_line(&expected)?;
        }
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> String {
        header_for(&self.variants, self.baseline, self.cycles)
    }

    fn row(&self, outcome: &SizeOutcome) -> String {
        let lookup = |name: &str| outcome.results.iter().find(|r| r.variant == name);

        let mut fields = vec![outcome.size.to_string()];
        for v in &self.variants {
            fields.push(lookup(v).map(|r| format!("{:.2}", r.mean_time_us)).unwrap_or_default());
        }
        for v in self.variants.iter().filter(|v| **v != self.baseline) {
            fields.push(
                lookup(v)
                    .map(|r| format!("{:.2}", r.speedup_vs_baseline))
                    .unwrap_or_default(),
            );
        }
        if self.cycles {
            for v in &self.variants {
                fields.push(
                    lookup(v)
                        .and_then(|r| r.cycles_per_element)
                        .map(|c| format!("{:.2}", c))
                        .unwrap_or_default(),
                );
            }
        }
        fields.join(",")
    }

    /// Append one row and flush, so a later failure keeps earlier sizes.
    pub fn write_outcome(&mut self, outcome: &SizeOutcome) -> Result<()> {
        let row = self.row(outcome);
        self.write_line(&row)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")
            .and_then(|_| self.writer.flush())
            .map_err(|e| BenchError::io(&self.path, e))
    }
}

fn header_for(variants: &[&'static str], baseline: &str, cycles: bool) -> String {
    let mut columns = vec!["size".to_string()];
    columns.extend(variants.iter().map(|v| format!("{v}_us")));
    columns.extend(
        variants
            .iter()
            .filter(|v| **v != baseline)
            .map(|v| format!("{v}_speedup")),
    );
    if cycles {
        columns.extend(variants.iter().map(|v| format!("{v}_cpe")));
    }
    columns.join(",")
}
