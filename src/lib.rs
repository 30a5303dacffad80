#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod coordinates;
pub mod export_data;
pub mod gps_processor;
pub mod import_data;
pub mod logs;
pub mod pipeline;
pub mod record_parser;
pub mod trip_summary;
