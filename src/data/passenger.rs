//! Passenger Records
//! Typed view over the manifest columns.

use polars::prelude::*;

use super::loader::LoaderError;

pub const COL_CLASS: &str = "Pclass";
pub const COL_SEX: &str = "Sex";
pub const COL_AGE: &str = "Age";
pub const COL_SIBSP: &str = "SibSp";
pub const COL_PARCH: &str = "Parch";
pub const COL_FARE: &str = "Fare";
pub const COL_NAME: &str = "Name";
pub const COL_SURVIVED: &str = "Survived";

/// One row of the manifest. Any field but the name may be unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub pclass: Option<u8>,
    pub sex: Option<String>,
    pub age: Option<f64>,
    pub sibsp: Option<u32>,
    pub parch: Option<u32>,
    pub fare: Option<f64>,
    pub name: String,
    pub survived: Option<bool>,
}

impl Passenger {
    /// Relatives aboard plus the passenger. `None` when either count is unknown.
    pub fn family_size(&self) -> Option<u32> {
        Some(self.sibsp? + self.parch? + 1)
    }
}

/// Passengers converted from a DataFrame.
#[derive(Debug, Clone, Default)]
pub struct PassengerTable {
    pub passengers: Vec<Passenger>,
    /// Rows kept without a class, sex or survival flag
    pub incomplete: usize,
}

impl PassengerTable {
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
    df.column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))
}

/// Numeric column as floats. Unparseable cells and NaN become `None`.
fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let values = column(df, name)?.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Non-negative whole-number column.
fn count_values(df: &DataFrame, name: &str) -> Result<Vec<Option<u32>>, LoaderError> {
    Ok(float_values(df, name)?
        .into_iter()
        .map(|v| {
            v.filter(|x| *x >= 0.0 && x.fract() == 0.0 && *x <= u32::MAX as f64)
                .map(|x| x as u32)
        })
        .collect())
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let values = column(df, name)?.cast(&DataType::String)?;
    Ok(values
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from))
        .collect())
}

/// Convert the manifest DataFrame into passenger records.
///
/// Every row is kept. Each aggregation ignores the records it cannot key, so
/// a row without a sex still counts towards surnames and family groups.
pub fn passengers_from_dataframe(df: &DataFrame) -> Result<PassengerTable, LoaderError> {
    let classes = count_values(df, COL_CLASS)?;
    let sexes = text_values(df, COL_SEX)?;
    let ages = float_values(df, COL_AGE)?;
    let sibsps = count_values(df, COL_SIBSP)?;
    let parches = count_values(df, COL_PARCH)?;
    let fares = float_values(df, COL_FARE)?;
    let names = text_values(df, COL_NAME)?;
    let survived = float_values(df, COL_SURVIVED)?;

    let mut table = PassengerTable::default();

    for i in 0..df.height() {
        let passenger = Passenger {
            pclass: classes[i].and_then(|c| u8::try_from(c).ok()).filter(|c| *c > 0),
            sex: sexes[i].clone(),
            age: ages[i],
            sibsp: sibsps[i],
            parch: parches[i],
            fare: fares[i],
            name: names[i].clone().unwrap_or_default(),
            survived: survived[i].map(|flag| flag != 0.0),
        };

        if passenger.pclass.is_none() || passenger.sex.is_none() || passenger.survived.is_none() {
            table.incomplete += 1;
        }
        table.passengers.push(passenger);
    }

    if table.incomplete > 0 {
        tracing::warn!(
            incomplete = table.incomplete,
            "Rows without class, sex or survival flag are left out of the survival table"
        );
    }
    tracing::info!(passengers = table.len(), "Loaded passenger records");

    Ok(table)
}

#[cfg(test)]
impl Passenger {
    /// Minimal record for tests.
    pub(crate) fn new(pclass: u8, sex: &str, survived: bool) -> Self {
        Self {
            pclass: Some(pclass),
            sex: Some(sex.to_string()),
            age: None,
            sibsp: Some(0),
            parch: Some(0),
            fare: None,
            name: String::new(),
            survived: Some(survived),
        }
    }

    pub(crate) fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub(crate) fn with_family(mut self, sibsp: u32, parch: u32) -> Self {
        self.sibsp = Some(sibsp);
        self.parch = Some(parch);
        self
    }

    pub(crate) fn with_fare(mut self, fare: f64) -> Self {
        self.fare = Some(fare);
        self
    }

    pub(crate) fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> DataFrame {
        df!(
            "Pclass" => [Some(3i64), Some(1), None, Some(2)],
            "Sex" => [Some("male"), Some("female"), Some("female"), Some("")],
            "Age" => [Some(22.0), None, Some(4.0), Some(30.0)],
            "SibSp" => [Some(1i64), Some(0), Some(1), Some(0)],
            "Parch" => [Some(0i64), None, Some(1), Some(0)],
            "Fare" => [Some(7.25), Some(71.28), None, Some(13.0)],
            "Name" => [
                Some("Braund, Mr. Owen Harris"),
                Some("Cumings, Mrs. John Bradley"),
                None,
                Some("Nobody, Mr."),
            ],
            "Survived" => [Some(0i64), Some(1), Some(1), None]
        )
        .unwrap()
    }

    #[test]
    fn test_convert_rows() {
        let table = passengers_from_dataframe(&manifest()).unwrap();
        assert_eq!(table.len(), 4);

        let first = &table.passengers[0];
        assert_eq!(first.pclass, Some(3));
        assert_eq!(first.sex.as_deref(), Some("male"));
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.family_size(), Some(2));
        assert_eq!(first.survived, Some(false));

        let second = &table.passengers[1];
        assert_eq!(second.age, None);
        assert_eq!(second.parch, None);
        assert_eq!(second.family_size(), None);
        assert_eq!(second.survived, Some(true));
    }

    #[test]
    fn test_incomplete_rows_kept() {
        let table = passengers_from_dataframe(&manifest()).unwrap();

        // Row 3 has no class, row 4 an empty sex and no survival flag
        assert_eq!(table.incomplete, 2);

        let third = &table.passengers[2];
        assert_eq!(third.pclass, None);
        assert_eq!(third.family_size(), Some(3));
        assert_eq!(third.name, "");

        let fourth = &table.passengers[3];
        assert_eq!(fourth.pclass, Some(2));
        assert_eq!(fourth.sex, None);
        assert_eq!(fourth.survived, None);
        assert_eq!(fourth.name, "Nobody, Mr.");
    }

    #[test]
    fn test_non_numeric_age_is_missing() {
        let df = df!(
            "Pclass" => [1i64, 2],
            "Sex" => ["female", "male"],
            "Age" => ["unknown", "40"],
            "SibSp" => [0i64, 0],
            "Parch" => [0i64, 0],
            "Fare" => [10.0, 20.0],
            "Name" => ["A, Miss.", "B, Mr."],
            "Survived" => [1i64, 0]
        )
        .unwrap();

        let table = passengers_from_dataframe(&df).unwrap();
        assert_eq!(table.passengers[0].age, None);
        assert_eq!(table.passengers[1].age, Some(40.0));
    }

    #[test]
    fn test_missing_column() {
        let df = df!("Pclass" => [1i64], "Sex" => ["male"]).unwrap();
        let err = passengers_from_dataframe(&df).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Age"));
    }

    #[test]
    fn test_empty_frame() {
        let df = df!(
            "Pclass" => Vec::<i64>::new(),
            "Sex" => Vec::<String>::new(),
            "Age" => Vec::<f64>::new(),
            "SibSp" => Vec::<i64>::new(),
            "Parch" => Vec::<i64>::new(),
            "Fare" => Vec::<f64>::new(),
            "Name" => Vec::<String>::new(),
            "Survived" => Vec::<i64>::new()
        )
        .unwrap();

        let table = passengers_from_dataframe(&df).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.incomplete, 0);
    }
}
