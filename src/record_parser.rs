use chrono::NaiveDateTime;
use strum_macros::{Display, EnumCount, EnumIter};

use crate::coordinates::{packed_to_decimal_degrees, Point};

const TIMESTAMP_FORMAT: &str = "%d%m%y%H%M%S";
const MIN_FIELD_COUNT: usize = 6;

/// The payload of one logger line, exactly as recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFix {
    // packed `DDMM.MMMM`, leading zeros are significant
    pub raw_latitude: String,
    pub raw_longitude: String,
    pub time: String,
    pub date: String,
    // centi-km/h
    pub raw_speed: i64,
    pub raw_height: i64,
}

/// A decoded fix, ready for kinematics.
#[derive(Clone, Debug, PartialEq)]
pub struct Fix {
    pub raw: RawFix,
    pub timestamp: NaiveDateTime,
    pub point: Point,
    pub speed_kmh: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum RejectReason {
    #[strum(serialize = "not a data line")]
    NotDataLine,
    #[strum(serialize = "too few fields")]
    TooFewFields,
    #[strum(serialize = "invalid timestamp")]
    InvalidTimestamp,
    #[strum(serialize = "invalid speed")]
    InvalidSpeed,
    #[strum(serialize = "invalid height")]
    InvalidHeight,
    #[strum(serialize = "invalid coordinate")]
    InvalidCoordinate,
    #[strum(serialize = "invalid encoding")]
    InvalidEncoding,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome {
    Accepted(Fix),
    Rejected(RejectReason),
}

impl LineOutcome {
    pub fn accepted(self) -> Option<Fix> {
        match self {
            LineOutcome::Accepted(fix) => Some(fix),
            LineOutcome::Rejected(_) => None,
        }
    }
}

/// Splits a line into its raw fields without decoding them.
pub fn parse_raw_fix(line: &str) -> Result<RawFix, RejectReason> {
    let (_, payload) = line.split_once('=').ok_or(RejectReason::NotDataLine)?;
    let fields: Vec<&str> = payload.trim().split(',').collect();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(RejectReason::TooFewFields);
    }

    Ok(RawFix {
        raw_latitude: fields[0].to_owned(),
        raw_longitude: fields[1].to_owned(),
        time: fields[2].to_owned(),
        date: fields[3].to_owned(),
        raw_speed: fields[4]
            .trim()
            .parse()
            .map_err(|_| RejectReason::InvalidSpeed)?,
        raw_height: fields[5]
            .trim()
            .parse()
            .map_err(|_| RejectReason::InvalidHeight)?,
    })
}

impl Fix {
    pub fn decode(raw: RawFix) -> Result<Self, RejectReason> {
        let timestamp =
            NaiveDateTime::parse_from_str(&format!("{}{}", raw.date, raw.time), TIMESTAMP_FORMAT)
                .map_err(|_| RejectReason::InvalidTimestamp)?;
        let latitude = packed_to_decimal_degrees(&raw.raw_latitude)
            .map_err(|_| RejectReason::InvalidCoordinate)?;
        let longitude = packed_to_decimal_degrees(&raw.raw_longitude)
            .map_err(|_| RejectReason::InvalidCoordinate)?;
        let speed_kmh = raw.raw_speed as f64 / 100.0;
        Ok(Fix {
            raw,
            timestamp,
            point: Point::new(latitude, longitude),
            speed_kmh,
        })
    }
}

pub fn parse_line(line: &str) -> LineOutcome {
    match parse_raw_fix(line).and_then(Fix::decode) {
        Ok(fix) => LineOutcome::Accepted(fix),
        Err(reason) => LineOutcome::Rejected(reason),
    }
}
