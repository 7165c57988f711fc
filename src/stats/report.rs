//! Titanic Report
//! The three tables the dashboard shows, built from one passenger collection.

use polars::prelude::*;
use serde::Serialize;

use super::demographics::{demographics_to_dataframe, survival_demographics, AgeGroup, DemographicRow};
use super::family::{family_groups, family_groups_to_dataframe, FamilyRow};
use super::surnames::{last_names, surnames_to_dataframe, SurnameCount};
use crate::data::Passenger;

/// Derived tables for one dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TitanicReport {
    pub demographics: Vec<DemographicRow>,
    pub family_groups: Vec<FamilyRow>,
    /// All surnames, most frequent first
    pub surnames: Vec<SurnameCount>,
}

impl TitanicReport {
    pub fn build(passengers: &[Passenger]) -> Self {
        let report = Self {
            demographics: survival_demographics(passengers),
            family_groups: family_groups(passengers),
            surnames: last_names(passengers),
        };

        tracing::info!(
            passengers = passengers.len(),
            demographic_rows = report.demographics.len(),
            family_rows = report.family_groups.len(),
            surnames = report.surnames.len(),
            "Built report"
        );
        report
    }

    /// Demographic rows of one age group, still in class/sex order.
    pub fn age_group_rows(&self, group: AgeGroup) -> Vec<&DemographicRow> {
        self.demographics
            .iter()
            .filter(|r| r.age_group == group)
            .collect()
    }

    /// First `n` surname counts.
    pub fn top_surnames(&self, n: usize) -> &[SurnameCount] {
        &self.surnames[..n.min(self.surnames.len())]
    }

    /// Named DataFrames for export.
    pub fn to_dataframes(&self) -> PolarsResult<Vec<(&'static str, DataFrame)>> {
        Ok(vec![
            ("survival_demographics", demographics_to_dataframe(&self.demographics)?),
            ("family_groups", family_groups_to_dataframe(&self.family_groups)?),
            ("last_names", surnames_to_dataframe(&self.surnames)?),
        ])
    }
}
