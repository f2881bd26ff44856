//! Query results of a run, ordered by query name.

use std::collections::BTreeMap;

use serde::Serialize;

use slprob_core::constants::DEFAULT_PRECISION;

use crate::numeric::render_significant;
use crate::weight::WeightLiteral;

/// Mass of the credible interval printed next to each Beta result.
pub const CREDIBLE_LEVEL: f64 = 0.95;

/// A single query's final weight.
pub type QueryValue = WeightLiteral;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults {
    #[serde(skip)]
    precision: u32,
    #[serde(flatten)]
    values: BTreeMap<String, QueryValue>,
}

impl Default for QueryResults {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl QueryResults {
    /// Empty results rendered at `precision` significant digits.
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, query: impl Into<String>, value: impl Into<QueryValue>) {
        self.values.insert(query.into(), value.into());
    }

    pub fn get(&self, query: &str) -> Option<&QueryValue> {
        self.values.get(query)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn into_inner(self) -> BTreeMap<String, QueryValue> {
        self.values
    }

    /// One fixed-width line per query: `name [mean variance] (low, high)`
    /// for Betas, with the [`CREDIBLE_LEVEL`] interval when it exists, and
    /// `name [b d u a]` for opinions.
    pub fn render_table(&self) -> String {
        let num = |v: f64| render_significant(v, self.precision);
        self.values
            .iter()
            .map(|(name, value)| match value {
                QueryValue::Beta(b) => {
                    let row =
                        format!("{:<12} [{:<23} {:<23}]", name, num(b.mean()), num(b.variance()));
                    match b.credible_interval(CREDIBLE_LEVEL) {
                        Some((low, high)) => format!("{} ({}, {})", row, num(low), num(high)),
                        None => row,
                    }
                }
                QueryValue::Opinion(o) => format!(
                    "{:<12} [{:<23} {:<23} {:<23} {}]",
                    name,
                    num(o.belief),
                    num(o.disbelief),
                    num(o.uncertainty),
                    num(o.base_rate)
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a QueryResults {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beta::BetaDistribution;
    use crate::opinion::Opinion;

    fn sample() -> QueryResults {
        let mut results = QueryResults::default();
        results.insert("b_query", BetaDistribution::new(0.6, 0.0002));
        results.insert("a_query", Opinion::new(0.7, 0.1, 0.2, 0.5));
        results
    }

    #[test]
    fn test_ordered_by_name() {
        let results = sample();
        let names: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["a_query", "b_query"]);
        assert!(results.get("a_query").and_then(|v| v.as_opinion()).is_some());
        assert!(results.get("missing").is_none());
    }

    #[test]
    fn test_render_table() {
        let table = sample().render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            format!("{:<12} [{:<23} {:<23} {:<23} {}]", "a_query", "0.7", "0.1", "0.2", "0.5")
        );
        let (low, high) = BetaDistribution::new(0.6, 0.0002)
            .credible_interval(CREDIBLE_LEVEL)
            .unwrap();
        assert_eq!(
            lines[1],
            format!(
                "{:<12} [{:<23} {:<23}] ({}, {})",
                "b_query",
                "0.6",
                "0.0002",
                render_significant(low, DEFAULT_PRECISION),
                render_significant(high, DEFAULT_PRECISION)
            )
        );
        assert!(0.55 < low && high < 0.65);
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["b_query"]["kind"], "beta");
        assert_eq!(value["b_query"]["mean"], 0.6);
        assert_eq!(value["a_query"]["kind"], "opinion");
        assert_eq!(value["a_query"]["belief"], 0.7);
    }
}
