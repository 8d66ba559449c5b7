//! Keyword suggestions by industry.

use std::fmt;

use serde::Serialize;

use crate::config::IndustryCatalog;

/// Keywords and campaign suggestions for one industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordReport {
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Looks up keywords for `industry`.
///
/// Unknown industries get the catalog's fallback keywords. Suggestions are
/// the same for every industry.
#[must_use]
pub fn lookup_keywords(catalog: &IndustryCatalog, industry: &str) -> KeywordReport {
    let keywords = catalog.find(industry).map_or_else(
        || catalog.fallback_keywords.clone(),
        |entry| entry.keywords.clone(),
    );

    KeywordReport {
        keywords,
        suggestions: catalog.suggestions.clone(),
    }
}

impl fmt::Display for KeywordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keywords: {}", self.keywords.join(", "))?;
        if !self.suggestions.is_empty() {
            f.write_str("\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n- {suggestion}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_industry() {
        let report = lookup_keywords(&IndustryCatalog::builtin(), "Construction");
        assert_eq!(
            report.keywords,
            vec!["building materials", "construction tools", "civil engineering"]
        );
        assert_eq!(
            report.suggestions,
            vec!["Optimize PPC for better reach", "Focus on local SEO"]
        );
    }

    #[test]
    fn test_unknown_industry_falls_back() {
        let catalog = IndustryCatalog::builtin();
        let report = lookup_keywords(&catalog, "Aerospace");
        assert_eq!(report.keywords, vec!["default keywords"]);
        assert_eq!(report.suggestions, catalog.suggestions);
    }

    #[test]
    fn test_lookup_is_pure() {
        let catalog = IndustryCatalog::builtin();
        assert_eq!(
            lookup_keywords(&catalog, "Retail"),
            lookup_keywords(&catalog, "Retail")
        );
        assert_eq!(
            lookup_keywords(&catalog, "nope"),
            lookup_keywords(&catalog, "also nope")
        );
    }

    #[test]
    fn test_display() {
        let report = lookup_keywords(&IndustryCatalog::builtin(), "Retail");
        assert_eq!(
            report.to_string(),
            "Keywords: e-commerce, shopping deals, retail trends\n\
             Suggestions:\n\
             - Optimize PPC for better reach\n\
             - Focus on local SEO"
        );
    }

    #[test]
    fn test_serializes_like_a_record() {
        let report = lookup_keywords(&IndustryCatalog::builtin(), "Unknown");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["keywords"], serde_json::json!(["default keywords"]));
    }
}
