//! Paid-search trend figures by industry.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::IndustryCatalog;

/// Sentinel shown for figures the catalog does not have.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single benchmark figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    NotAvailable,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Cost-per-click and click-through-rate for one industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReport {
    #[serde(rename = "CPC")]
    pub cpc: Metric,
    #[serde(rename = "CTR")]
    pub ctr: Metric,
}

impl TrendReport {
    /// Report used for industries without figures.
    pub const UNAVAILABLE: Self = Self {
        cpc: Metric::NotAvailable,
        ctr: Metric::NotAvailable,
    };
}

/// Looks up trend figures for `industry`.
#[must_use]
pub fn lookup_trends(catalog: &IndustryCatalog, industry: &str) -> TrendReport {
    catalog
        .find(industry)
        .and_then(|entry| entry.trend)
        .map_or(TrendReport::UNAVAILABLE, |trend| TrendReport {
            cpc: Metric::Value(trend.cpc),
            ctr: Metric::Value(trend.ctr),
        })
}

impl fmt::Display for TrendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPC: {}\nCTR: {}", self.cpc, self.ctr)
    }
}
