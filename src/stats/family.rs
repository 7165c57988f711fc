//! Family Size and Wealth
//! Fare statistics grouped by family size and passenger class.

use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use super::round2;
use crate::data::Passenger;

/// One (family size, class) bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyRow {
    pub family_size: u32,
    pub pclass: u8,
    /// Passengers in the bucket with a known fare
    pub n_passengers: u32,
    pub avg_fare: Option<f64>,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
}

/// Fare statistics per observed (family size, class), ordered by class then size.
///
/// Passengers with an unknown class, or an unknown sibling or parent count,
/// are left out. Unknown fares are ignored by the statistics.
pub fn family_groups(passengers: &[Passenger]) -> Vec<FamilyRow> {
    // Keyed by (class, size) so iteration yields the output order
    let mut fares: BTreeMap<(u8, u32), Vec<f64>> = BTreeMap::new();

    for passenger in passengers {
        let (Some(pclass), Some(size)) = (passenger.pclass, passenger.family_size()) else {
            continue;
        };
        let bucket = fares.entry((pclass, size)).or_default();
        if let Some(fare) = passenger.fare.filter(|f| !f.is_nan()) {
            bucket.push(fare);
        }
    }

    let rows: Vec<FamilyRow> = fares
        .into_iter()
        .map(|((pclass, family_size), values)| {
            if values.is_empty() {
                return FamilyRow {
                    family_size,
                    pclass,
                    n_passengers: 0,
                    avg_fare: None,
                    min_fare: None,
                    max_fare: None,
                };
            }
            FamilyRow {
                family_size,
                pclass,
                n_passengers: values.len() as u32,
                avg_fare: Some(round2(values.iter().mean())),
                min_fare: Some(Statistics::min(values.iter())),
                max_fare: Some(Statistics::max(values.iter())),
            }
        })
        .collect();

    tracing::debug!(rows = rows.len(), "Built family groups");
    rows
}

/// Table with columns `family_size, Pclass, n_passengers, avg_fare, min_fare, max_fare`.
pub fn family_groups_to_dataframe(rows: &[FamilyRow]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "family_size".into(),
            rows.iter().map(|r| r.family_size).collect::<Vec<_>>(),
        ),
        Column::new(
            "Pclass".into(),
            rows.iter().map(|r| r.pclass as i64).collect::<Vec<_>>(),
        ),
        Column::new(
            "n_passengers".into(),
            rows.iter().map(|r| r.n_passengers).collect::<Vec<_>>(),
        ),
        Column::new(
            "avg_fare".into(),
            rows.iter().map(|r| r.avg_fare).collect::<Vec<_>>(),
        ),
        Column::new(
            "min_fare".into(),
            rows.iter().map(|r| r.min_fare).collect::<Vec<_>>(),
        ),
        Column::new(
            "max_fare".into(),
            rows.iter().map(|r| r.max_fare).collect::<Vec<_>>(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> Vec<Passenger> {
        vec![
            Passenger::new(3, "male", false).with_family(1, 0).with_fare(7.25),
            Passenger::new(3, "female", true).with_family(0, 1).with_fare(8.05),
            Passenger::new(3, "male", false).with_family(0, 0).with_fare(7.75),
            Passenger::new(1, "female", true).with_family(1, 2).with_fare(151.55),
            Passenger::new(1, "male", false).with_family(2, 1).with_fare(120.45),
            Passenger::new(1, "male", true).with_family(0, 0),
            Passenger::new(2, "female", true).with_family(0, 0).with_fare(13.0),
            Passenger::new(2, "male", false).with_family(0, 0).with_fare(10.5),
            Passenger::new(2, "male", false).with_family(0, 0).with_fare(26.0),
        ]
    }

    fn find(rows: &[FamilyRow], class: u8, size: u32) -> &FamilyRow {
        rows.iter()
            .find(|r| r.pclass == class && r.family_size == size)
            .unwrap()
    }

    #[test]
    fn test_fare_stats() {
        let rows = family_groups(&sample());

        let pair = find(&rows, 3, 2);
        assert_eq!(pair.n_passengers, 2);
        assert_eq!(pair.avg_fare, Some(7.65));
        assert_eq!(pair.min_fare, Some(7.25));
        assert_eq!(pair.max_fare, Some(8.05));

        let solo = find(&rows, 2, 1);
        assert_eq!(solo.n_passengers, 3);
        assert_eq!(solo.avg_fare, Some(16.5));
        assert_eq!(solo.min_fare, Some(10.5));
        assert_eq!(solo.max_fare, Some(26.0));

        let big = find(&rows, 1, 4);
        assert_eq!(big.n_passengers, 2);
        assert_eq!(big.avg_fare, Some(136.0));
    }

    #[test]
    fn test_unknown_fare_bucket() {
        let rows = family_groups(&sample());
        let first_solo = find(&rows, 1, 1);
        assert_eq!(first_solo.n_passengers, 0);
        assert_eq!(first_solo.avg_fare, None);
        assert_eq!(first_solo.max_fare, None);
    }

    #[test]
    fn test_ordering() {
        let rows = family_groups(&sample());
        let keys: Vec<(u8, u32)> = rows.iter().map(|r| (r.pclass, r.family_size)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 4), (2, 1), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_family_size_reconstruction() {
        let passengers: Vec<Passenger> = sample()
            .into_iter()
            .filter(|p| p.fare.is_some())
            .collect();
        let rows = family_groups(&passengers);

        let mut expected: HashMap<(u8, u32), u32> = HashMap::new();
        for p in &passengers {
            let size = p.sibsp.unwrap() + p.parch.unwrap() + 1;
            *expected.entry((p.pclass.unwrap(), size)).or_default() += 1;
        }

        assert_eq!(rows.len(), expected.len());
        for row in &rows {
            assert_eq!(expected[&(row.pclass, row.family_size)], row.n_passengers);
        }
    }

    #[test]
    fn test_missing_family_fields_excluded() {
        let mut unknown = Passenger::new(1, "male", false).with_fare(50.0);
        unknown.parch = None;
        let rows = family_groups(&[unknown]);
        assert!(rows.is_empty());

        let mut classless = Passenger::new(1, "male", false).with_fare(50.0);
        classless.pclass = None;
        assert!(family_groups(&[classless]).is_empty());
    }

    #[test]
    fn test_unknown_sex_and_survival_still_grouped() {
        let mut unknown = Passenger::new(3, "male", false).with_family(1, 0).with_fare(9.0);
        unknown.sex = None;
        unknown.survived = None;
        let known = Passenger::new(3, "female", true).with_family(1, 0).with_fare(7.0);

        let rows = family_groups(&[unknown, known]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].n_passengers, 2);
        assert_eq!(rows[0].avg_fare, Some(8.0));
    }

    #[test]
    fn test_empty_collection() {
        assert!(family_groups(&[]).is_empty());
    }

    #[test]
    fn test_dataframe_nulls() {
        let rows = family_groups(&sample());
        let df = family_groups_to_dataframe(&rows).unwrap();
        assert_eq!(df.height(), rows.len());
        assert_eq!(df.column("avg_fare").unwrap().null_count(), 1);
        assert_eq!(df.get_column_names()[0].as_str(), "family_size");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::stats::strategies::passenger_lists;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    proptest! {
        #[test]
        fn prop_family_size_reconstruction(passengers in passenger_lists()) {
            // (class, sibsp + parch + 1) -> passengers with a known fare
            let mut expected: BTreeMap<(u8, u32), u32> = BTreeMap::new();
            for p in &passengers {
                if let (Some(pclass), Some(sibsp), Some(parch)) = (p.pclass, p.sibsp, p.parch) {
                    let known = expected.entry((pclass, sibsp + parch + 1)).or_default();
                    if p.fare.is_some() {
                        *known += 1;
                    }
                }
            }

            let rows = family_groups(&passengers);
            let actual: BTreeMap<(u8, u32), u32> = rows
                .iter()
                .map(|r| ((r.pclass, r.family_size), r.n_passengers))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_fare_stats_consistent(passengers in passenger_lists()) {
            for row in family_groups(&passengers) {
                prop_assert!(row.family_size >= 1);
                match (row.min_fare, row.avg_fare, row.max_fare) {
                    (Some(min), Some(avg), Some(max)) => {
                        prop_assert!(row.n_passengers > 0);
                        prop_assert!(min <= max);
                        // avg is rounded to 2 decimals
                        prop_assert!(avg >= min - 0.005 && avg <= max + 0.005);
                    }
                    (None, None, None) => prop_assert_eq!(row.n_passengers, 0),
                    other => prop_assert!(false, "partial fare stats {:?}", other),
                }
            }
        }
    }
}
