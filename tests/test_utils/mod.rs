#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use gsd_trips::record_parser::{self, Fix};
use std::{fs, path::Path};

pub const TRIPS_DIR: &str = "./tests/data/trips";

pub fn datetime(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, ss)
        .unwrap()
}

/// A logger line in the `$GSD=lat,lon,time,date,speed,height` shape.
pub fn gsd_line(
    lat: &str,
    lon: &str,
    at: NaiveDateTime,
    raw_speed: i64,
    raw_height: i64,
) -> String {
    format!(
        "$GSD={},{},{},{},{},{}",
        lat,
        lon,
        at.format("%H%M%S"),
        at.format("%d%m%y"),
        raw_speed,
        raw_height
    )
}

pub fn fix(lat: &str, lon: &str, at: NaiveDateTime, raw_speed: i64) -> Fix {
    record_parser::parse_line(&gsd_line(lat, lon, at, raw_speed, 0))
        .accepted()
        .unwrap()
}

pub fn write_gsd(dir: &Path, name: &str, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(dir.join(name), content).unwrap();
}

pub fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(|x| x.to_owned())
        .collect();
    let rows = reader.records().map(|x| x.unwrap()).collect();
    (headers, rows)
}
