// src/comps/criteria.rs
use crate::comps::CompsError;
use serde_json::{Map, Value};

/// Absolute lower bound for the square footage window.
pub const MIN_SQFT_FLOOR: f64 = 300.0;
/// Listings requested per search.
pub const PAGE_SIZE: u32 = 50;
/// Sort key asking the listings API for the freshest listings first.
pub const SORT_KEY: &str = "freshest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    SingleFamily,
    Condo,
    Apartment,
    MultiFamily,
}

impl PropertyType {
    /// Maps a caller-supplied type onto the listings API vocabulary.
    /// Anything we don't recognise means "no filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");

        match key.as_str() {
            "house" | "single_family" => Some(Self::SingleFamily),
            "condo" => Some(Self::Condo),
            "apartment" => Some(Self::Apartment),
            "duplex" | "multi_family" => Some(Self::MultiFamily),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleFamily => "single_family",
            Self::Condo => "condo",
            Self::Apartment => "apartment",
            Self::MultiFamily => "multi_family",
        }
    }
}

/// What the caller wants comps for. `None` on a numeric field means
/// "unspecified": no filter is applied for that dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    pub zip: String,
    pub beds: Option<u32>,
    pub baths: Option<f64>,
    pub sqft: Option<u32>,
    pub property_type: Option<PropertyType>,
}

impl QueryCriteria {
    pub fn from_json_body(body: &str) -> Result<Self, CompsError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| CompsError::Input(format!("invalid JSON body: {e}")))?;

        let obj = value
            .as_object()
            .ok_or_else(|| CompsError::Input("request body must be a JSON object".into()))?;

        Self::from_fields(obj)
    }

    pub fn from_fields(obj: &Map<String, Value>) -> Result<Self, CompsError> {
        let zip = obj
            .get("zip")
            .and_then(text_value)
            .filter(|z| !z.is_empty())
            .ok_or_else(|| CompsError::Input("ZIP code is required".into()))?;

        let beds = obj
            .get("beds")
            .and_then(positive_number)
            .map(|n| n.trunc() as u32)
            .filter(|n| *n > 0);

        let baths = obj.get("baths").and_then(positive_number);

        let sqft = obj
            .get("sqft")
            .and_then(positive_number)
            .map(|n| n.round() as u32)
            .filter(|n| *n > 0);

        let property_type = obj
            .get("propertyType")
            .and_then(Value::as_str)
            .and_then(PropertyType::parse);

        Ok(Self {
            zip,
            beds,
            baths,
            sqft,
            property_type,
        })
    }
}

// The search takes baths at one decimal, so bounds are rounded outward to
// tenths and never narrow the window. Snapping to thousandths first keeps
// `1.1 * 10` from landing just past a whole tenth.
fn floor_tenth(x: f64) -> f64 {
    ((x * 10.0 * 1000.0).round() / 1000.0).floor() / 10.0
}

fn ceil_tenth(x: f64) -> f64 {
    ((x * 10.0 * 1000.0).round() / 1000.0).ceil() / 10.0
}

/// Ranges sent to the listings search. Point criteria are widened so a
/// thin market still returns something.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBounds {
    pub postal_code: String,
    pub beds: Option<(u32, u32)>,
    pub baths: Option<(f64, f64)>,
    pub sqft: Option<(u32, u32)>,
    pub prop_type: Option<PropertyType>,
}

impl SearchBounds {
    pub fn from_criteria(criteria: &QueryCriteria) -> Self {
        let beds = criteria
            .beds
            .map(|b| (b.saturating_sub(1), b.saturating_add(1)));

        let baths = criteria.baths.map(|b| {
            let low = floor_tenth((b - 1.0).max(0.0));
            let high = ceil_tenth(b + 1.0);
            (low, high)
        });

        let sqft = criteria.sqft.map(|s| {
            let s = f64::from(s);
            let low = (s * 0.7).round().max(MIN_SQFT_FLOOR);
            let high = (s * 1.3).round();
            (low as u32, high as u32)
        });

        Self {
            postal_code: criteria.zip.clone(),
            beds,
            baths,
            sqft,
            prop_type: criteria.property_type,
        }
    }

    /// Query-string parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("postal_code", self.postal_code.clone())];

        if let Some((min, max)) = self.beds {
            pairs.push(("beds_min", min.to_string()));
            pairs.push(("beds_max", max.to_string()));
        }
        if let Some((min, max)) = self.baths {
            pairs.push(("baths_min", format!("{min:.1}")));
            pairs.push(("baths_max", format!("{max:.1}")));
        }
        if let Some((min, max)) = self.sqft {
            pairs.push(("sqft_min", min.to_string()));
            pairs.push(("sqft_max", max.to_string()));
        }
        if let Some(prop_type) = self.prop_type {
            pairs.push(("prop_type", prop_type.as_str().to_string()));
        }

        pairs.push(("limit", PAGE_SIZE.to_string()));
        pairs.push(("offset", "0".to_string()));
        pairs.push(("sort", SORT_KEY.to_string()));
        pairs
    }
}

fn text_value(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a JSON number or numeric string. Only finite values above zero count.
pub(crate) fn positive_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    (n.is_finite() && n > 0.0).then_some(n)
}
