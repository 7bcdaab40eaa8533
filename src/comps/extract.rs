// src/comps/extract.rs
use crate::comps::criteria::positive_number;
use serde_json::Value;

// The listings API has answered in several shapes over its versions:
//
// v3 search                      v2 list-for-rent
//  data                           properties[]
//   └── home_search                ├── price
//        └── results[]             ├── price_min
//             ├── list_price       └── building_size
//             ├── list_price_min        └── size
//             └── description
//                  └── sqft
//
// so the result list and each record's fields are looked up by path rather than
// deserialized into one fixed model.

/// Where the result list may live, highest priority first. Changing the
/// order changes which list wins when a payload carries more than one.
pub const RESULT_PATHS: &[&[&str]] = &[
    &["data", "home_search", "results"],
    &["data", "results"],
    &["properties"],
    &["listings"],
    &["results"],
    &["data"],
];

/// Rent candidates, first usable value wins.
pub const RENT_FIELDS: &[&[&str]] = &[
    &["price"],
    &["list_price"],
    &["price_min"],
    &["list_price_min"],
];

/// Floor area candidates, first usable value wins.
pub const AREA_FIELDS: &[&[&str]] = &[
    &["description", "sqft"],
    &["sqft"],
    &["building_size", "size"],
];

/// A usable rental comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comp {
    pub rent: f64,
    pub sqft: Option<f64>,
}

impl Comp {
    pub fn rent_per_sqft(&self) -> Option<f64> {
        self.sqft.map(|area| self.rent / area)
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// Returns the first result list found along `RESULT_PATHS`.
pub fn find_results(payload: &Value) -> Option<&[Value]> {
    RESULT_PATHS.iter().find_map(|path| {
        let list = lookup(payload, path)?.as_array()?;
        tracing::debug!(path = %path.join("."), len = list.len(), "found listings result list");
        Some(list.as_slice())
    })
}

/// First candidate holding a finite positive number. Placeholders like
/// `0`, `""` or `null` fall through to the next field.
fn first_usable(record: &Value, fields: &[&[&str]]) -> Option<f64> {
    fields
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(positive_number)
}

/// Derives a comp from one raw record. Records whose rent isn't a finite
/// positive number carry no signal and are dropped.
pub fn comp_from_record(record: &Value) -> Option<Comp> {
    let rent = first_usable(record, RENT_FIELDS)?;
    let sqft = first_usable(record, AREA_FIELDS);

    Some(Comp { rent, sqft })
}

pub fn extract_comps(payload: &Value) -> Vec<Comp> {
    let Some(records) = find_results(payload) else {
        tracing::debug!("no result list in listings payload");
        return Vec::new();
    };

    let comps: Vec<Comp> = records.iter().filter_map(comp_from_record).collect();

    tracing::debug!(
        raw = records.len(),
        usable = comps.len(),
        "extracted comps from listings payload"
    );

    comps
}
