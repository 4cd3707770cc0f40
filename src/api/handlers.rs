// Cell lookup handlers module
//
// One pure lookup per route. Handlers take the raw path parameters as
// strings and return a `LookupResult`; the HTTP layer only serializes.

use super::types::LookupResult;
use crate::cell;

/// Lookup by decimal identifier.
///
/// The id is parsed as an unsigned 64-bit integer and used as-is; whether it
/// encodes a structurally valid cell is not checked, so degenerate ids come
/// back with out-of-range levels rather than an error.
pub fn lookup_by_id(id: &str) -> LookupResult {
    match id.parse::<u64>() {
        Ok(raw) => LookupResult::Cell(cell::describe(cell::from_id(raw))),
        Err(e) => LookupResult::error(e),
    }
}

/// Lookup by compact token. Never fails; malformed tokens decode to the
/// sentinel identifier and are described like any other cell.
pub fn lookup_by_token(token: &str) -> LookupResult {
    LookupResult::Cell(cell::describe(cell::from_token(token)))
}

/// Lookup by coordinate, in degrees, at the deepest level.
///
/// Latitude is parsed before longitude and the first failure wins; no range
/// check is applied to either magnitude.
pub fn lookup_by_lat_lng(lat: &str, lng: &str) -> LookupResult {
    let lat = match lat.parse::<f64>() {
        Ok(v) => v,
        Err(e) => return LookupResult::error(e),
    };
    let lng = match lng.parse::<f64>() {
        Ok(v) => v,
        Err(e) => return LookupResult::error(e),
    };
    LookupResult::Cell(cell::describe(cell::from_degrees(lat, lng)))
}

/// Ancestor chain of the cell with the given decimal identifier.
pub fn parents_by_id(id: &str) -> LookupResult {
    match id.parse::<u64>() {
        Ok(raw) => LookupResult::Ancestors(cell::ancestors(cell::from_id(raw))),
        Err(e) => LookupResult::error(e),
    }
}
