//! Titanic Insights - passenger statistics & chart dashboard
//!
//! ```text
//! CSV (HTTP or file) -> Passenger records -> report tables -> charts -> dashboard / PNG + CSV + JSON export
//! ```
//!
//! - [`data`] - manifest loading and passenger records
//! - [`stats`] - survival demographics, family fares, surname counts
//! - [`charts`] - bar-chart series, egui_plot drawing, plotters rendering
//! - [`export`] - CSV, JSON and PNG report export
//! - [`gui`] - eframe dashboard
//! - [`config`] - settings from JSON and environment

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;

pub use config::AppConfig;
pub use data::{DataLoader, LoaderError, Passenger, PassengerTable};
pub use stats::{AgeGroup, DemographicRow, FamilyRow, SurnameCount, TitanicReport};
