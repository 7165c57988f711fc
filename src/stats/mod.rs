//! Stats module - demographic, family and surname aggregations

mod demographics;
mod family;
mod report;
mod surnames;

pub use demographics::{
    demographics_to_dataframe, survival_demographics, survival_demographics_with_levels,
    survival_rate, AgeGroup, DemographicLevels, DemographicRow,
};
pub use family::{family_groups, family_groups_to_dataframe, FamilyRow};
pub use report::TitanicReport;
pub use surnames::{extract_surname, last_names, surnames_to_dataframe, top_surnames, SurnameCount};

/// Round to 2 decimals, ties to even.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
