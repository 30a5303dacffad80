use crate::gps_processor::PointRecord;
use crate::trip_summary::TripSummary;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

pub const POINT_TABLE_FILE: &str = "PointLevelData.csv";
pub const SUMMARY_TABLE_FILE: &str = "TripSummary.csv";

// Headers are written up front so that an empty table still has them.
pub const POINT_COLUMNS: [&str; 15] = [
    "TP_ID",
    "TRAIL_ID",
    "USER_ID",
    "Y_COORDINA",
    "X_COORDINA",
    "TIME",
    "DATE",
    "SPEED",
    "HEIGHT",
    "SPEED(KM/H)",
    "Y_WGS84",
    "X_WGS84",
    "DISTANCE_KM",
    "TIME_DIFF_S",
    "ACCELERATION",
];

pub const SUMMARY_COLUMNS: [&str; 6] = [
    "USER_ID",
    "Points",
    "Total_Distance_KM",
    "Total_Duration_Hours",
    "Avg_Speed_KMH",
    "Avg_Acceleration",
];

fn table_writer<W: Write>(writer: W, columns: &[&str]) -> Result<csv::Writer<W>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(columns)?;
    Ok(writer)
}

#[derive(Serialize)]
struct PointRow<'a> {
    trip_id: u32,
    point_index: u32,
    source_id: &'a str,
    raw_latitude: &'a str,
    raw_longitude: &'a str,
    time: String,
    date: String,
    raw_speed: i64,
    raw_height: i64,
    speed_kmh: f64,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
    time_diff_s: f64,
    acceleration: f64,
}

impl<'a> From<&'a PointRecord> for PointRow<'a> {
    fn from(record: &'a PointRecord) -> Self {
        PointRow {
            trip_id: record.trip_id,
            point_index: record.point_index,
            source_id: &record.source_id,
            raw_latitude: &record.raw.raw_latitude,
            raw_longitude: &record.raw.raw_longitude,
            time: record.time_str(),
            date: record.date_str(),
            raw_speed: record.raw.raw_speed,
            raw_height: record.raw.raw_height,
            speed_kmh: record.speed_kmh,
            latitude: record.point.latitude,
            longitude: record.point.longitude,
            distance_km: record.distance_km,
            time_diff_s: record.time_diff_s,
            acceleration: record.acceleration,
        }
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    source_id: &'a str,
    point_count: usize,
    total_distance_km: f64,
    total_duration_hours: f64,
    avg_speed_kmh: f64,
    avg_acceleration: f64,
}

impl<'a> From<&'a TripSummary> for SummaryRow<'a> {
    fn from(summary: &'a TripSummary) -> Self {
        SummaryRow {
            source_id: &summary.source_id,
            point_count: summary.point_count,
            total_distance_km: summary.total_distance_km,
            total_duration_hours: summary.total_duration_hours,
            avg_speed_kmh: summary.avg_speed_kmh,
            avg_acceleration: summary.avg_acceleration,
        }
    }
}

pub fn write_points<W: Write>(writer: W, points: &[PointRecord]) -> Result<()> {
    let mut writer = table_writer(writer, &POINT_COLUMNS)?;
    for record in points {
        writer.serialize(PointRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summaries<W: Write>(writer: W, summaries: &[TripSummary]) -> Result<()> {
    let mut writer = table_writer(writer, &SUMMARY_COLUMNS)?;
    for summary in summaries {
        writer.serialize(SummaryRow::from(summary))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the two tables into `output_dir`, creating it if needed. Returns
/// the paths of the point table and the summary table.
pub fn write_tables(
    output_dir: &Path,
    points: &[PointRecord],
    summaries: &[TripSummary],
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {:?}", output_dir))?;

    let points_path = output_dir.join(POINT_TABLE_FILE);
    let file = fs::File::create(&points_path)
        .with_context(|| format!("failed to create {:?}", points_path))?;
    write_points(file, points).with_context(|| format!("failed to write {:?}", points_path))?;

    let summary_path = output_dir.join(SUMMARY_TABLE_FILE);
    let file = fs::File::create(&summary_path)
        .with_context(|| format!("failed to create {:?}", summary_path))?;
    write_summaries(file, summaries)
        .with_context(|| format!("failed to write {:?}", summary_path))?;

    Ok((points_path, summary_path))
}
