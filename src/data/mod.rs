//! Data module - manifest loading and passenger records

mod loader;
mod passenger;

pub use loader::{DataLoader, LoaderError};
pub use passenger::{passengers_from_dataframe, Passenger, PassengerTable};
