//! Industry catalog configuration and validation.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Industry at index {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Duplicate industry name found: {name}")]
    DuplicateName { name: String },

    #[error("Industry at index {index} ({name}) has no keywords")]
    NoKeywords { index: usize, name: String },

    #[error("Industry at index {index} ({name}) has an invalid {metric}: {value} (must be finite and >= 0)")]
    InvalidTrend {
        index: usize,
        name: String,
        metric: &'static str,
        value: f64,
    },

    #[error("No industries configured")]
    NoIndustries,

    #[error("Fallback keyword list is empty")]
    NoFallbackKeywords,

    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Paid-search benchmark figures for one industry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendFigures {
    /// Average cost per click.
    #[serde(rename = "CPC")]
    pub cpc: f64,

    /// Average click-through rate, in percent.
    #[serde(rename = "CTR")]
    pub ctr: f64,
}

/// A single industry entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Industry {
    /// Display name, matched case-insensitively by lookups.
    pub name: String,

    /// Search keywords associated with the industry.
    pub keywords: Vec<String>,

    /// Benchmark figures, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendFigures>,
}

impl Industry {
    /// Creates a new industry entry.
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: &[&str], trend: Option<TrendFigures>) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            trend,
        }
    }

    /// Checks whether this entry answers to the given industry name.
    #[must_use]
    pub fn matches(&self, industry: &str) -> bool {
        self.name.eq_ignore_ascii_case(industry.trim())
    }
}

/// Catalog of industries served by the keyword and trend lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryCatalog {
    /// Known industries.
    pub industries: Vec<Industry>,

    /// Suggestions returned with every keyword lookup.
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Keywords returned for industries not in the catalog.
    #[serde(default = "default_fallback_keywords")]
    pub fallback_keywords: Vec<String>,
}

fn default_fallback_keywords() -> Vec<String> {
    vec!["default keywords".to_owned()]
}

impl Default for IndustryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IndustryCatalog {
    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    /// Saves the catalog to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.validate_all().into_iter().collect()
    }

    /// Returns validation results for the catalog as a whole followed by one
    /// result per industry.
    #[must_use]
    pub fn validate_all(&self) -> Vec<Result<(), CatalogError>> {
        let mut results = Vec::new();

        if self.industries.is_empty() {
            results.push(Err(CatalogError::NoIndustries));
            return results;
        }

        if self.fallback_keywords.is_empty() {
            results.push(Err(CatalogError::NoFallbackKeywords));
        }

        let mut seen = HashSet::new();

        for (index, industry) in self.industries.iter().enumerate() {
            results.push(check_industry(index, industry, &mut seen));
        }

        results
    }

    /// Finds the entry for an industry name.
    #[must_use]
    pub fn find(&self, industry: &str) -> Option<&Industry> {
        self.industries.iter().find(|i| i.matches(industry))
    }

    /// Returns the number of industries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.industries.len()
    }

    /// Checks if there are no industries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    /// Returns the industry names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.industries.iter().map(|i| i.name.as_str())
    }

    /// The catalog the bot ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            industries: vec![
                Industry::new(
                    "Construction",
                    &["building materials", "construction tools", "civil engineering"],
                    Some(TrendFigures { cpc: 2.5, ctr: 3.2 }),
                ),
                Industry::new(
                    "Retail",
                    &["e-commerce", "shopping deals", "retail trends"],
                    Some(TrendFigures { cpc: 1.8, ctr: 4.1 }),
                ),
            ],
            suggestions: vec![
                "Optimize PPC for better reach".to_owned(),
                "Focus on local SEO".to_owned(),
            ],
            fallback_keywords: default_fallback_keywords(),
        }
    }
}

fn check_industry(
    index: usize,
    industry: &Industry,
    seen: &mut HashSet<String>,
) -> Result<(), CatalogError> {
    let name = industry.name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName { index });
    }

    if !seen.insert(name.to_ascii_lowercase()) {
        return Err(CatalogError::DuplicateName {
            name: industry.name.clone(),
        });
    }

    if industry.keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(CatalogError::NoKeywords {
            index,
            name: industry.name.clone(),
        });
    }

    if let Some(trend) = industry.trend {
        for (metric, value) in [("CPC", trend.cpc), ("CTR", trend.ctr)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidTrend {
                    index,
                    name: industry.name.clone(),
                    metric,
                    value,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = IndustryCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_find_ignores_case_and_whitespace() {
        let catalog = IndustryCatalog::builtin();
        assert_eq!(catalog.find("  retail ").map(|i| i.name.as_str()), Some("Retail"));
        assert_eq!(
            catalog.find("CONSTRUCTION").map(|i| i.name.as_str()),
            Some("Construction")
        );
        assert!(catalog.find("Farming").is_none());
    }

    #[test]
    fn test_validation_empty_catalog() {
        let catalog = IndustryCatalog {
            industries: vec![],
            suggestions: vec![],
            fallback_keywords: default_fallback_keywords(),
        };
        assert!(matches!(catalog.validate(), Err(CatalogError::NoIndustries)));
    }

    #[test]
    fn test_validation_duplicate_name() {
        let catalog = IndustryCatalog {
            industries: vec![
                Industry::new("Retail", &["a"], None),
                Industry::new("retail", &["b"], None),
            ],
            suggestions: vec![],
            fallback_keywords: default_fallback_keywords(),
        };
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_validation_no_keywords() {
        let catalog = IndustryCatalog {
            industries: vec![Industry::new("Retail", &[" "], None)],
            suggestions: vec![],
            fallback_keywords: default_fallback_keywords(),
        };
        assert!(matches!(catalog.validate(), Err(CatalogError::NoKeywords { .. })));
    }

    #[test]
    fn test_validation_negative_trend() {
        let catalog = IndustryCatalog {
            industries: vec![Industry::new(
                "Retail",
                &["a"],
                Some(TrendFigures { cpc: -1.0, ctr: 2.0 }),
            )],
            suggestions: vec![],
            fallback_keywords: default_fallback_keywords(),
        };
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::InvalidTrend { metric: "CPC", .. })
        ));
    }

    #[test]
    fn test_validate_all_reports_each_industry() {
        let catalog = IndustryCatalog {
            industries: vec![
                Industry::new("Retail", &["a"], None),
                Industry::new("", &["b"], None),
                Industry::new("Travel", &["c"], None),
            ],
            suggestions: vec![],
            fallback_keywords: vec![],
        };
        let results = catalog.validate_all();
        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], Err(CatalogError::NoFallbackKeywords)));
        assert!(results[1].is_ok());
        assert!(matches!(results[2], Err(CatalogError::EmptyName { index: 1 })));
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{
            "industries": [
                { "name": "Travel", "keywords": ["cheap flights"], "trend": { "CPC": 1.5, "CTR": 4.7 } }
            ]
        }"#;
        let catalog: IndustryCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.fallback_keywords, vec!["default keywords"]);
        assert!(catalog.suggestions.is_empty());
        assert_eq!(
            catalog.find("travel").and_then(|i| i.trend),
            Some(TrendFigures { cpc: 1.5, ctr: 4.7 })
        );
    }
}
