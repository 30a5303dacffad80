use chrono::NaiveDateTime;

use crate::coordinates::Point;
use crate::record_parser::{Fix, RawFix};

// Every record reports the same trip. One file is one trip, so this only
// becomes meaningful once a file can hold several.
pub const TRIP_ID: u32 = 1;

pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
    pub trip_id: u32,
    pub point_index: u32,
    pub source_id: String,
    pub raw: RawFix,
    pub timestamp: NaiveDateTime,
    pub speed_kmh: f64,
    pub point: Point,
    pub distance_km: f64,
    pub time_diff_s: f64,
    // km/h²
    pub acceleration: f64,
}

impl PointRecord {
    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    pub fn date_str(&self) -> String {
        self.timestamp.format("%d-%m-%y").to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct LastFix {
    point: Point,
    timestamp: NaiveDateTime,
    speed_kmh: f64,
}

/// Carried state between two consecutive accepted fixes of one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeriverState {
    last_index: u32,
    last_fix: Option<LastFix>,
}

impl DeriverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the record for `fix` and the state to use for the next one.
    pub fn step(self, source_id: &str, fix: Fix) -> (DeriverState, PointRecord) {
        let (distance_km, time_diff_s, acceleration) = match &self.last_fix {
            None => (0.0, 0.0, 0.0),
            Some(last) => {
                let distance_km = last.point.haversine_distance(&fix.point);
                let time_diff_s = (fix.timestamp - last.timestamp).num_seconds() as f64;
                // out of order or duplicated timestamps are kept as is
                let acceleration = if time_diff_s > 0.0 {
                    (fix.speed_kmh - last.speed_kmh) / (time_diff_s / SECONDS_PER_HOUR)
                } else {
                    0.0
                };
                (distance_km, time_diff_s, acceleration)
            }
        };

        let state = DeriverState {
            last_index: self.last_index + 1,
            last_fix: Some(LastFix {
                point: fix.point,
                timestamp: fix.timestamp,
                speed_kmh: fix.speed_kmh,
            }),
        };
        let record = PointRecord {
            trip_id: TRIP_ID,
            point_index: state.last_index,
            source_id: source_id.to_owned(),
            raw: fix.raw,
            timestamp: fix.timestamp,
            speed_kmh: fix.speed_kmh,
            point: fix.point,
            distance_km,
            time_diff_s,
            acceleration,
        };
        (state, record)
    }
}

/// Owns the carried state of one source file and collects its records.
pub struct TripDeriver {
    source_id: String,
    state: DeriverState,
    records: Vec<PointRecord>,
}

impl TripDeriver {
    pub fn new(source_id: &str) -> Self {
        TripDeriver {
            source_id: source_id.to_owned(),
            state: DeriverState::new(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, fix: Fix) {
        let state = std::mem::take(&mut self.state);
        let (state, record) = state.step(&self.source_id, fix);
        self.state = state;
        self.records.push(record);
    }

    pub fn finish(self) -> Vec<PointRecord> {
        self.records
    }
}

pub fn derive_trip(source_id: &str, fixes: impl IntoIterator<Item = Fix>) -> Vec<PointRecord> {
    fixes
        .into_iter()
        .scan(DeriverState::new(), |state, fix| {
            let (next, record) = std::mem::take(state).step(source_id, fix);
            *state = next;
            Some(record)
        })
        .collect()
}
