use crate::comps::Comp;
use serde::Serialize;

/// Below this many comps there is nothing sensible to trim.
pub const MIN_COMPS_FOR_TRIM: usize = 6;
/// Share of comps dropped from each end, in percent.
pub const TRIM_PERCENT: usize = 15;

/// Median of `values`. The empty set yields 0.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Drops the cheapest and priciest ~15% of comps by rank.
///
/// The cutoffs are the rents at rank `trim` and `n - 1 - trim` and both are
/// inclusive, so comps tied with a cutoff rent are kept.
pub fn trim_outliers(mut comps: Vec<Comp>) -> Vec<Comp> {
    if comps.len() < MIN_COMPS_FOR_TRIM {
        return comps;
    }

    comps.sort_by(|a, b| a.rent.total_cmp(&b.rent));

    let n = comps.len();
    let trim = n * TRIM_PERCENT / 100;
    let low = comps[trim].rent;
    let high = comps[n - 1 - trim].rent;

    comps.retain(|c| c.rent >= low && c.rent <= high);
    comps
}

/// What the rent estimator reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompsSummary {
    pub comps_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_rent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_rent_per_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl CompsSummary {
    pub fn empty() -> Self {
        Self {
            comps_count: 0,
            median_rent: None,
            median_rent_per_sqft: None,
            zip: None,
        }
    }
}

/// Reduces filtered comps to the reported figures.
pub fn summarize(zip: &str, comps: &[Comp]) -> CompsSummary {
    if comps.is_empty() {
        return CompsSummary::empty();
    }

    let rents: Vec<f64> = comps.iter().map(|c| c.rent).collect();
    let per_sqft: Vec<f64> = comps.iter().filter_map(Comp::rent_per_sqft).collect();

    CompsSummary {
        comps_count: comps.len(),
        median_rent: Some(median(&rents).round()),
        median_rent_per_sqft: (!per_sqft.is_empty()).then(|| round_cents(median(&per_sqft))),
        zip: Some(zip.to_string()),
    }
}

fn round_cents(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}
