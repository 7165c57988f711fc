//! Surname Frequencies
//! Extracts family names from "Surname, Given" strings and counts them.

use polars::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::data::Passenger;

/// Letters, spaces, apostrophes and hyphens up to the first comma.
const SURNAME_PATTERN: &str = r"^([\p{L}' \-]+),";

fn surname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SURNAME_PATTERN).expect("surname pattern is valid"))
}

/// Surname and number of passengers carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurnameCount {
    pub surname: String,
    pub count: u32,
}

/// Surname of a "Surname, Given" name, or `None` when it does not fit the pattern.
pub fn extract_surname(name: &str) -> Option<String> {
    let captures = surname_regex().captures(name)?;
    let surname = captures.get(1)?.as_str().trim();
    if surname.is_empty() {
        None
    } else {
        Some(surname.to_string())
    }
}

/// Surname frequencies, most frequent first. Ties keep first-encounter order.
pub fn last_names(passengers: &[Passenger]) -> Vec<SurnameCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<SurnameCount> = Vec::new();

    for surname in passengers.iter().filter_map(|p| extract_surname(&p.name)) {
        match index.get(&surname) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(surname.clone(), counts.len());
                counts.push(SurnameCount { surname, count: 1 });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(surnames = counts.len(), "Counted surnames");
    counts
}

/// The `n` most frequent surnames.
pub fn top_surnames(passengers: &[Passenger], n: usize) -> Vec<SurnameCount> {
    let mut counts = last_names(passengers);
    counts.truncate(n);
    counts
}

/// Table with columns `LastName, count`.
pub fn surnames_to_dataframe(counts: &[SurnameCount]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::new(
            "LastName".into(),
            counts.iter().map(|c| c.surname.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "count".into(),
            counts.iter().map(|c| c.count).collect::<Vec<_>>(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Passenger> {
        names
            .iter()
            .map(|n| Passenger::new(3, "male", false).with_name(n))
            .collect()
    }

    #[test]
    fn test_extract() {
        assert_eq!(extract_surname("O'Brien, Mr. James").as_deref(), Some("O'Brien"));
        assert_eq!(
            extract_surname("Braund, Mr. Owen Harris").as_deref(),
            Some("Braund")
        );
        assert_eq!(
            extract_surname("Rothes, the Countess. of (Lucy Noel Martha Dyer-Edwards)").as_deref(),
            Some("Rothes")
        );
        assert_eq!(
            extract_surname("Vander Planke, Miss. Augusta Maria").as_deref(),
            Some("Vander Planke")
        );
        assert_eq!(
            extract_surname("Petit-Jean , Mr. Paul").as_deref(),
            Some("Petit-Jean")
        );
        assert_eq!(extract_surname("Müller, Mr. Hans").as_deref(), Some("Müller"));
    }

    #[test]
    fn test_extract_rejects() {
        assert_eq!(extract_surname("No comma here"), None);
        assert_eq!(extract_surname("St. John, Mr. Paul"), None);
        assert_eq!(extract_surname("   , Mr. Blank"), None);
        assert_eq!(extract_surname(", Mr. Blank"), None);
        assert_eq!(extract_surname(""), None);
        assert_eq!(extract_surname("Smith2, Mr. John"), None);
    }

    #[test]
    fn test_counts_descending_with_stable_ties() {
        let passengers = named(&[
            "Andersson, Mr. Anders",
            "Sage, Master. Thomas",
            "Goodwin, Mrs. Frederick",
            "Sage, Miss. Constance",
            "Goodwin, Master. William",
            "Andersson, Miss. Ellis",
            "Sage, Mr. John",
            "Kelly, Mr. James",
            "bad name",
        ]);

        let counts = last_names(&passengers);
        let flat: Vec<(&str, u32)> = counts
            .iter()
            .map(|c| (c.surname.as_str(), c.count))
            .collect();
        assert_eq!(
            flat,
            vec![("Sage", 3), ("Andersson", 2), ("Goodwin", 2), ("Kelly", 1)]
        );
    }

    #[test]
    fn test_top_surnames() {
        let passengers = named(&[
            "Brown, Mr. A",
            "Smith, Mr. B",
            "Smith, Mrs. C",
            "Jones, Mr. D",
        ]);
        let top = top_surnames(&passengers, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], SurnameCount { surname: "Smith".into(), count: 2 });
        assert_eq!(top[1].surname, "Brown");

        assert_eq!(top_surnames(&passengers, 50).len(), 3);
        assert!(top_surnames(&[], 10).is_empty());
    }

    #[test]
    fn test_extraction_idempotent() {
        let passengers = named(&[
            "O'Brien, Mr. James",
            "Smith, Mr. John",
            "42",
            "O'Brien, Mrs. Thomas",
            "de la Cruz, Mr. Juan",
        ]);
        let first = last_names(&passengers);

        let subset: Vec<Passenger> = passengers
            .into_iter()
            .filter(|p| extract_surname(&p.name).is_some())
            .collect();
        assert_eq!(subset.len(), 4);
        assert_eq!(last_names(&subset), first);
    }

    #[test]
    fn test_dataframe() {
        let passengers = named(&["Smith, Mr. B", "Smith, Mrs. C"]);
        let df = surnames_to_dataframe(&last_names(&passengers)).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
        assert!(df.column("LastName").is_ok());
    }
}
