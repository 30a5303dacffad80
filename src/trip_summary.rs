use crate::gps_processor::{PointRecord, SECONDS_PER_HOUR};

#[derive(Clone, Debug, PartialEq)]
pub struct TripSummary {
    pub source_id: String,
    pub point_count: usize,
    pub total_distance_km: f64,
    pub total_duration_hours: f64,
    pub avg_speed_kmh: f64,
    pub avg_acceleration: f64,
}

/// Reduces the ordered records of one trip into its summary row.
///
/// The first record's zero acceleration is part of the mean. An empty trip
/// has every statistic set to 0.
pub fn summarize(source_id: &str, records: &[PointRecord]) -> TripSummary {
    let point_count = records.len();
    let total_distance_km: f64 = records.iter().map(|x| x.distance_km).sum();
    let total_duration_hours =
        records.iter().map(|x| x.time_diff_s).sum::<f64>() / SECONDS_PER_HOUR;
    let avg_speed_kmh = if total_duration_hours > 0.0 {
        total_distance_km / total_duration_hours
    } else {
        0.0
    };
    let avg_acceleration = if point_count == 0 {
        0.0
    } else {
        records.iter().map(|x| x.acceleration).sum::<f64>() / point_count as f64
    };

    TripSummary {
        source_id: source_id.to_owned(),
        point_count,
        total_distance_km,
        total_duration_hours,
        avg_speed_kmh,
        avg_acceleration,
    }
}
