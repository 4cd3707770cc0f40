// API response body types
// Success and error shapes for the cell lookup endpoints

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::cell::CellInfo;

/// Outcome of one lookup.
///
/// Serde flattens the variants into the untagged wire shapes: a single cell
/// description, a level-keyed ancestor mapping, or `{"err": ...}`. Success
/// and failure travel with the same HTTP status; the body shape is the only
/// signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupResult {
    Cell(CellInfo),
    Ancestors(BTreeMap<i64, CellInfo>),
    Error(ErrorBody),
}

/// Parse-failure body. The message is the parser's own wording, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub err: String,
}

impl LookupResult {
    /// Error result carrying the failure's display output.
    pub fn error(err: impl fmt::Display) -> Self {
        Self::Error(ErrorBody {
            err: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_serializes_to_err_field_only() {
        let result = LookupResult::error("invalid digit found in string");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "err": "invalid digit found in string" }));
    }

    #[test]
    fn test_cell_body_serializes_to_three_fields() {
        let result = LookupResult::Cell(CellInfo {
            cell_id: "3".to_string(),
            bits: "11".to_string(),
            level: "30".to_string(),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({ "cell_id": "3", "bits": "11", "level": "30" })
        );
    }

    #[test]
    fn test_ancestor_mapping_is_keyed_by_level() {
        let mut chain = BTreeMap::new();
        for lv in 0..2_i64 {
            chain.insert(
                lv,
                CellInfo {
                    cell_id: "1".to_string(),
                    bits: "1".to_string(),
                    level: lv.to_string(),
                },
            );
        }
        let value = serde_json::to_value(LookupResult::Ancestors(chain)).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("0"));
        assert!(object.contains_key("1"));
        assert_eq!(object["1"]["level"], "1");
    }

    #[test]
    fn test_empty_ancestor_mapping_is_empty_object() {
        let value = serde_json::to_value(LookupResult::Ancestors(BTreeMap::new())).unwrap();
        assert_eq!(value, json!({}));
    }
}
