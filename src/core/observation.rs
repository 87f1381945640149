//! Raw input records and their normalization into purchase observations.

use serde::Deserialize;

/// A single purchase event: one (entity, state, brand, year) tuple.
///
/// Immutable once derived from the raw input. Repeated combinations are
/// retained as separate observations — a household may report up to four
/// vehicles, and two identical reports are two purchases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Identifier of the reporting entity (household).
    pub entity_id: String,
    /// Two-letter state code.
    pub state: String,
    /// Vehicle brand (make).
    pub brand: String,
    /// Purchase year.
    pub year: i32,
}

/// One raw row of the wide input table: up to four (make, year) slot pairs.
///
/// Slots pair positionally: `MAKE1` with `YEAR1`, `MAKE2` with `YEAR2`, and
/// so on. Years arrive as floats in survey exports and are truncated to
/// integers during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct WideRecord {
    pub entity_id: String,
    pub state: String,
    #[serde(rename = "MAKE1")]
    pub make1: Option<String>,
    #[serde(rename = "MAKE2")]
    pub make2: Option<String>,
    #[serde(rename = "MAKE3")]
    pub make3: Option<String>,
    #[serde(rename = "MAKE4")]
    pub make4: Option<String>,
    #[serde(rename = "YEAR1")]
    pub year1: Option<f64>,
    #[serde(rename = "YEAR2")]
    pub year2: Option<f64>,
    #[serde(rename = "YEAR3")]
    pub year3: Option<f64>,
    #[serde(rename = "YEAR4")]
    pub year4: Option<f64>,
}

impl WideRecord {
    fn slots(&self) -> [(&Option<String>, &Option<f64>); 4] {
        [
            (&self.make1, &self.year1),
            (&self.make2, &self.year2),
            (&self.make3, &self.year3),
            (&self.make4, &self.year4),
        ]
    }

    /// Expand this record into one observation per complete slot pair.
    ///
    /// A slot with a missing make or a missing year contributes nothing;
    /// other slots of the same record are unaffected.
    pub fn observations(&self) -> Vec<Observation> {
        self.slots()
            .into_iter()
            .filter_map(|(make, year)| {
                let make = make.as_deref()?.trim();
                let year = (*year)?;
                if make.is_empty() || !year.is_finite() {
                    return None;
                }
                Some(Observation {
                    entity_id: self.entity_id.clone(),
                    state: self.state.clone(),
                    brand: make.to_string(),
                    year: year as i32,
                })
            })
            .collect()
    }
}

/// Normalize a batch of wide records into a flat observation table.
pub fn normalize(records: &[WideRecord]) -> Vec<Observation> {
    records.iter().flat_map(WideRecord::observations).collect()
}
