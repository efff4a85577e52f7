// SPDX-License-Identifier: MIT

//!
//! The temporal clause
//!

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The names of the feature properties holding the decimal start and end
/// dates of a feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalAttributes {
    pub start: String,
    pub end: String,
}

impl Default for TemporalAttributes {
    fn default() -> Self {
        TemporalAttributes {
            start: String::from("start_decdate"),
            end: String::from("end_decdate"),
        }
    }
}

impl TemporalAttributes {
    /// The clause installed before any date is applied (matches everything)
    pub fn placeholder(&self) -> Value {
        json!(["all"])
    }

    /// The clause matching features visible on the decimal date: those with no
    /// start or a start on/before the date, and no end or an end on/after it.
    /// Features with neither are eternal and always match.
    pub fn clause_for(&self, decimal_date: f64) -> Value {
        json!([
            "all",
            ["any", ["!has", self.start], ["<=", self.start, decimal_date]],
            ["any", ["!has", self.end], [">=", self.end, decimal_date]]
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clause() {
        let attributes = TemporalAttributes::default();
        assert_eq!(
            attributes.clause_for(2022.00137),
            json!([
                "all",
                ["any", ["!has", "start_decdate"], ["<=", "start_decdate", 2022.00137]],
                ["any", ["!has", "end_decdate"], [">=", "end_decdate", 2022.00137]]
            ])
        );

        let attributes: TemporalAttributes = serde_json::from_str(r#"{"start": "from"}"#).unwrap();
        assert_eq!(attributes.start, "from");
        assert_eq!(attributes.end, "end_decdate");
    }
}
