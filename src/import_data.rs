use crate::gps_processor::{PointRecord, TripDeriver};
use crate::record_parser::{self, LineOutcome, RejectReason};
use crate::trip_summary::{self, TripSummary};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
};
use strum::{EnumCount, IntoEnumIterator};

pub const DEFAULT_EXTENSION: &str = "gsd";

/// Number of dropped lines per reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectionTally {
    counts: [usize; RejectReason::COUNT],
}

impl Default for RejectionTally {
    fn default() -> Self {
        RejectionTally {
            counts: [0; RejectReason::COUNT],
        }
    }
}

impl RejectionTally {
    pub fn add(&mut self, reason: RejectReason) {
        self.counts[reason as usize] += 1;
    }

    pub fn get(&self, reason: RejectReason) -> usize {
        self.counts[reason as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Rejections that hint at a damaged record. Header and comment lines
    /// without a delimiter are expected in every file.
    pub fn malformed(&self) -> usize {
        self.total() - self.get(RejectReason::NotDataLine)
    }

    pub fn merge(&mut self, other: &RejectionTally) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }
}

impl std::fmt::Display for RejectionTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = RejectReason::iter()
            .filter(|reason| self.get(*reason) > 0)
            .map(|reason| format!("{}: {}", reason, self.get(reason)))
            .join(", ");
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts)
        }
    }
}

/// Everything derived from one source file.
#[derive(Clone, Debug)]
pub struct TripReport {
    pub points: Vec<PointRecord>,
    pub summary: TripSummary,
    pub rejections: RejectionTally,
}

/// The file's base name without extension identifies the user/device.
pub fn source_id_of(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(OsStr::to_str)
        .map(|x| x.to_owned())
        .ok_or_else(|| anyhow!("cannot derive a source id from {:?}", path))
}

/// Lists files directly inside `dir` whose extension matches, sorted by path.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {:?}", dir))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(OsStr::to_str)
            .map(|x| x.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    Ok(files.into_iter().sorted().collect())
}

pub fn load_trip(source_id: &str, reader: impl Read) -> Result<TripReport> {
    let mut deriver = TripDeriver::new(source_id);
    let mut rejections = RejectionTally::default();

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        // a garbled byte only costs the line it is on
        let outcome = match std::str::from_utf8(&buf) {
            Ok(line) => record_parser::parse_line(line),
            Err(_) => LineOutcome::Rejected(RejectReason::InvalidEncoding),
        };
        match outcome {
            LineOutcome::Accepted(fix) => deriver.push(fix),
            LineOutcome::Rejected(reason) => {
                debug!("{}:{} dropped ({})", source_id, line_no, reason);
                rejections.add(reason);
            }
        }
    }

    let points = deriver.finish();
    let summary = trip_summary::summarize(source_id, &points);
    Ok(TripReport {
        points,
        summary,
        rejections,
    })
}

pub fn load_gsd(file_path: &Path) -> Result<TripReport> {
    let source_id = source_id_of(file_path)?;
    let file = File::open(file_path).with_context(|| format!("failed to open {:?}", file_path))?;
    load_trip(&source_id, file).with_context(|| format!("failed to read {:?}", file_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally() {
        let mut tally = RejectionTally::default();
        assert_eq!(tally.to_string(), "none");
        tally.add(RejectReason::NotDataLine);
        tally.add(RejectReason::InvalidSpeed);
        tally.add(RejectReason::InvalidSpeed);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.malformed(), 2);
        assert_eq!(tally.to_string(), "not a data line: 1, invalid speed: 2");

        let mut other = RejectionTally::default();
        other.add(RejectReason::TooFewFields);
        other.merge(&tally);
        assert_eq!(other.total(), 4);
        assert_eq!(other.get(RejectReason::InvalidSpeed), 2);
    }

    #[test]
    fn source_id() {
        assert_eq!(
            source_id_of(Path::new("data/Bullis1.gsd")).unwrap(),
            "Bullis1"
        );
        assert_eq!(source_id_of(Path::new("trip.v2.gsd")).unwrap(), "trip.v2");
    }
}
