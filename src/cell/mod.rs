//! Hierarchical spatial cell lookups.
//!
//! Thin layer over the S2 library: constructs cell identifiers from raw
//! 64-bit ids, compact tokens, and geographic coordinates, and projects them
//! into the wire description (decimal id, bit layout, level). Also derives
//! the ancestor chain of a cell up to the root.

use serde::Serialize;
use std::collections::BTreeMap;

use s2::latlng::LatLng;
use s2::s1::Deg;

pub use s2::cellid::CellID;

/// Deepest subdivision level in the hierarchy.
pub const MAX_LEVEL: i64 = s2::cellid::MAX_LEVEL as i64;

/// Wire description of a single cell.
///
/// All three fields are numeral strings: `cell_id` base 10, `bits` base 2
/// without leading zeros, `level` base 10 (negative for ids whose bit layout
/// encodes no usable level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub cell_id: String,
    pub bits: String,
    pub level: String,
}

/// Cell identifier from a raw 64-bit value, unvalidated.
pub const fn from_id(id: u64) -> CellID {
    CellID(id)
}

/// Cell identifier from a compact token.
///
/// Never fails: malformed tokens decode to the sentinel identifier 0, which
/// is described like any other id.
pub fn from_token(token: &str) -> CellID {
    CellID::from_token(token)
}

/// Leaf cell containing the given coordinate, in degrees.
///
/// Out-of-range magnitudes are passed through to the encoder unchecked.
pub fn from_degrees(lat: f64, lng: f64) -> CellID {
    let ll = LatLng::new(Deg(lat).into(), Deg(lng).into());
    CellID::from(&ll)
}

/// Level encoded in an identifier's bit layout.
///
/// `CellID::level` is only defined for structurally valid ids, while raw ids
/// taken straight off the wire may carry no level bit at all. Reading the
/// lowest-set-bit position directly keeps the lookup total: valid ids get
/// exactly the value `CellID::level` reports, degenerate ids get an
/// out-of-range level instead of a panic. The all-zero id reports the level
/// of a lowest set bit at position 0.
pub fn level(cell: CellID) -> i64 {
    let lowest_set = if cell.0 == 0 {
        0
    } else {
        i64::from(cell.0.trailing_zeros())
    };
    MAX_LEVEL - (lowest_set >> 1)
}

/// Project a cell into its wire description.
pub fn describe(cell: CellID) -> CellInfo {
    CellInfo {
        cell_id: cell.0.to_string(),
        bits: format!("{:b}", cell.0),
        level: level(cell).to_string(),
    }
}

/// Ancestor chain of a cell, keyed by each ancestor's own level.
///
/// Walks from the cell's level minus one down to the root at level 0. A cell
/// at level 0, and any id whose derived level is negative, has no ancestors
/// and yields an empty mapping.
pub fn ancestors(cell: CellID) -> BTreeMap<i64, CellInfo> {
    let mut chain = BTreeMap::new();
    let mut lv = level(cell) - 1;
    while lv >= 0 {
        chain.insert(lv, describe(cell.parent(lv.unsigned_abs())));
        lv -= 1;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_renders_decimal_binary_level() {
        let info = describe(from_id(3));
        assert_eq!(info.cell_id, "3");
        assert_eq!(info.bits, "11");
        assert_eq!(info.level, "30");
    }

    #[test]
    fn test_level_agrees_with_library_for_valid_ids() {
        let leaf = from_degrees(48.8584, 2.2945);
        assert_eq!(level(leaf), i64::try_from(leaf.level()).unwrap());

        let mid = leaf.parent(12);
        assert_eq!(level(mid), 12);
        assert_eq!(level(mid), i64::try_from(mid.level()).unwrap());

        assert_eq!(level(leaf.parent(0)), 0);
    }

    #[test]
    fn test_level_is_total_for_degenerate_ids() {
        assert_eq!(level(from_id(0)), 30);
        assert_eq!(level(from_id(1 << 62)), -1);
        assert_eq!(level(from_id(1 << 63)), -1);
    }

    #[test]
    fn test_from_degrees_encodes_at_max_level() {
        let cell = from_degrees(0.0, 0.0);
        assert_eq!(level(cell), MAX_LEVEL);
        // pure function: same coordinate, same cell
        assert_eq!(cell, from_degrees(0.0, 0.0));
    }

    #[test]
    fn test_ancestor_chain_of_leaf() {
        let leaf = from_degrees(35.6895, 139.6917);
        let chain = ancestors(leaf);
        assert_eq!(chain.len(), 30);
        for lv in 0..30_i64 {
            let entry = chain.get(&lv).expect("missing ancestor level");
            assert_eq!(entry.level, lv.to_string());
            assert_eq!(*entry, describe(leaf.parent(lv.unsigned_abs())));
        }
    }

    #[test]
    fn test_ancestor_chain_is_nested() {
        let leaf = from_degrees(-33.8688, 151.2093);
        let chain = ancestors(leaf);
        for lv in 1..30_u64 {
            let deeper = leaf.parent(lv);
            let expected = describe(deeper.parent(lv - 1));
            let key = i64::try_from(lv).unwrap() - 1;
            assert_eq!(chain.get(&key), Some(&expected));
        }
    }

    #[test]
    fn test_root_cell_has_no_ancestors() {
        let face = from_degrees(0.0, 0.0).parent(0);
        assert_eq!(level(face), 0);
        assert!(ancestors(face).is_empty());
    }

    #[test]
    fn test_negative_level_id_has_no_ancestors() {
        assert!(ancestors(from_id(1 << 63)).is_empty());
    }

    #[test]
    fn test_token_roundtrip() {
        let cell = from_degrees(51.5074, -0.1278).parent(16);
        assert_eq!(from_token(&cell.to_token()), cell);
    }

    #[test]
    fn test_malformed_token_decodes_to_sentinel() {
        assert_eq!(from_token("zzzz").0, 0);
        assert_eq!(from_token("definitely-not-a-token").0, 0);

        let info = describe(from_token("zzzz"));
        assert_eq!(info.cell_id, "0");
        assert_eq!(info.bits, "0");
    }
}
