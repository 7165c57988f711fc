//! Survival Demographics
//! Survival counts and rates by passenger class, sex and age group.

use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::round2;
use crate::data::Passenger;

/// Age brackets in their natural order.
///
/// Bins are `(0, 12]`, `(12, 19]`, `(19, 59]` and `(59, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Child,
        AgeGroup::Teen,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    /// Bucket for an age. Zero, negative and NaN ages have none.
    pub fn from_age(age: f64) -> Option<Self> {
        if age.is_nan() || age <= 0.0 {
            None
        } else if age <= 12.0 {
            Some(AgeGroup::Child)
        } else if age <= 19.0 {
            Some(AgeGroup::Teen)
        } else if age <= 59.0 {
            Some(AgeGroup::Adult)
        } else {
            Some(AgeGroup::Senior)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Child => "Child",
            AgeGroup::Teen => "Teen",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }

    /// Position in the natural order.
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One (class, sex, age group) bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRow {
    pub pclass: u8,
    pub sex: String,
    pub age_group: AgeGroup,
    pub n_passengers: u32,
    pub n_survivors: u32,
    pub survival_rate: f64,
}

/// Class and sex values the output table is expanded over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemographicLevels {
    pub classes: Vec<u8>,
    pub sexes: Vec<String>,
}

impl DemographicLevels {
    /// Sorted, de-duplicated levels.
    pub fn new(mut classes: Vec<u8>, mut sexes: Vec<String>) -> Self {
        classes.sort_unstable();
        classes.dedup();
        sexes.sort();
        sexes.dedup();
        Self { classes, sexes }
    }

    /// Levels seen anywhere in the collection, including rows without an age.
    pub fn observed(passengers: &[Passenger]) -> Self {
        Self::new(
            passengers.iter().filter_map(|p| p.pclass).collect(),
            passengers.iter().filter_map(|p| p.sex.clone()).collect(),
        )
    }

    /// Number of rows a dense table over these levels has.
    pub fn combinations(&self) -> usize {
        self.classes.len() * self.sexes.len() * AgeGroup::ALL.len()
    }
}

/// Percentage of survivors, 2 decimals. Empty buckets are 0.0.
pub fn survival_rate(n_survivors: u32, n_passengers: u32) -> f64 {
    if n_passengers == 0 {
        return 0.0;
    }
    round2(n_survivors as f64 / n_passengers as f64 * 100.0)
}

/// Survival table over the classes and sexes observed in `passengers`.
pub fn survival_demographics(passengers: &[Passenger]) -> Vec<DemographicRow> {
    survival_demographics_with_levels(passengers, &DemographicLevels::observed(passengers))
}

/// Survival table with one row per class x sex x age group of `levels`.
///
/// Passengers without a class, sex, age bucket or survival flag, or outside
/// the levels, do not count. Rows come out ordered by class, sex, then age
/// group rank.
pub fn survival_demographics_with_levels(
    passengers: &[Passenger],
    levels: &DemographicLevels,
) -> Vec<DemographicRow> {
    // (passengers, survivors)
    let mut tallies: HashMap<(u8, &str, AgeGroup), (u32, u32)> = HashMap::new();

    for passenger in passengers {
        let (Some(pclass), Some(sex), Some(group), Some(survived)) = (
            passenger.pclass,
            passenger.sex.as_deref(),
            passenger.age.and_then(AgeGroup::from_age),
            passenger.survived,
        ) else {
            continue;
        };
        let tally = tallies.entry((pclass, sex, group)).or_default();
        tally.0 += 1;
        if survived {
            tally.1 += 1;
        }
    }

    let mut rows = Vec::with_capacity(levels.combinations());
    for &pclass in &levels.classes {
        for sex in &levels.sexes {
            for group in AgeGroup::ALL {
                let (n_passengers, n_survivors) = tallies
                    .get(&(pclass, sex.as_str(), group))
                    .copied()
                    .unwrap_or((0, 0));
                rows.push(DemographicRow {
                    pclass,
                    sex: sex.clone(),
                    age_group: group,
                    n_passengers,
                    n_survivors,
                    survival_rate: survival_rate(n_survivors, n_passengers),
                });
            }
        }
    }

    tracing::debug!(rows = rows.len(), "Built survival demographics");
    rows
}

/// Table with columns `Pclass, Sex, age_group, n_passengers, n_survivors, survival_rate`.
pub fn demographics_to_dataframe(rows: &[DemographicRow]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "Pclass".into(),
            rows.iter().map(|r| r.pclass as i64).collect::<Vec<_>>(),
        ),
        Column::new(
            "Sex".into(),
            rows.iter().map(|r| r.sex.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "age_group".into(),
            rows.iter().map(|r| r.age_group.label()).collect::<Vec<_>>(),
        ),
        Column::new(
            "n_passengers".into(),
            rows.iter().map(|r| r.n_passengers).collect::<Vec<_>>(),
        ),
        Column::new(
            "n_survivors".into(),
            rows.iter().map(|r| r.n_survivors).collect::<Vec<_>>(),
        ),
        Column::new(
            "survival_rate".into(),
            rows.iter().map(|r| r.survival_rate).collect::<Vec<_>>(),
        ),
    ])
}
