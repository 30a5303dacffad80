use crate::export_data;
use crate::gps_processor::PointRecord;
use crate::import_data::{self, RejectionTally, TripReport, DEFAULT_EXTENSION};
use crate::trip_summary::TripSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    // without the leading dot, matched case-insensitively
    pub extension: String,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_owned();
        self
    }
}

/// The run-wide point table and summary table, in file discovery order.
#[derive(Clone, Debug, Default)]
pub struct TripTables {
    pub points: Vec<PointRecord>,
    pub summaries: Vec<TripSummary>,
    pub rejections: RejectionTally,
}

impl TripTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trip. Trips sharing a source id stay separate rows.
    pub fn append(&mut self, report: TripReport) {
        self.points.extend(report.points);
        self.summaries.push(report.summary);
        self.rejections.merge(&report.rejections);
    }
}

pub fn collect_trips(input_dir: &Path, extension: &str) -> Result<TripTables> {
    let files = import_data::discover_files(input_dir, extension)?;
    if files.is_empty() {
        warn!("no *.{} files found in {:?}", extension, input_dir);
    }

    let mut tables = TripTables::new();
    for file in files {
        let report = import_data::load_gsd(&file)?;
        info!(
            "{}: {} points, {:.3} km, {:.3} h",
            report.summary.source_id,
            report.summary.point_count,
            report.summary.total_distance_km,
            report.summary.total_duration_hours
        );
        if report.rejections.malformed() > 0 {
            warn!(
                "{}: dropped malformed lines ({})",
                report.summary.source_id, report.rejections
            );
        }
        tables.append(report);
    }
    Ok(tables)
}

/// Processes every trip file and writes both tables. Nothing is written if
/// any input fails.
pub fn run(config: &PipelineConfig) -> Result<TripTables> {
    info!("processing {:?}", config.input_dir);
    let tables = collect_trips(&config.input_dir, &config.extension)
        .with_context(|| format!("failed to process {:?}", config.input_dir))?;
    let (points_path, summary_path) =
        export_data::write_tables(&config.output_dir, &tables.points, &tables.summaries)?;
    info!(
        "{} trips saved into {:?} and {:?}",
        tables.summaries.len(),
        points_path,
        summary_path
    );
    Ok(tables)
}
