use serde::{Deserialize, Serialize};

/// Label that stands for "no filter" wherever a category is selected
pub const ALL_CATEGORIES: &str = "all";

/// A quote and the category it was filed under
///
/// No identity beyond the two strings: duplicates are allowed and
/// indistinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Which quotes the random picker draws from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse the persisted label. `"all"` is the wildcard, so a category
    /// literally named "all" can't be selected on its own. A blank label
    /// also means no filter.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES || label.trim().is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => quote.category == *category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The quotes a fresh store starts with when nothing has been saved yet
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to predict the future is to invent it.",
            "Inspiration",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new("Do or do not. There is no try.", "Motivation"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_label_round_trip() {
        assert_eq!(CategoryFilter::from_label("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("Life"),
            CategoryFilter::Only("Life".to_string())
        );
        assert_eq!(CategoryFilter::All.label(), "all");
        assert_eq!(CategoryFilter::Only("Life".into()).to_string(), "Life");
    }

    #[test]
    fn test_blank_label_means_all() {
        assert_eq!(CategoryFilter::from_label(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_label("  \t"), CategoryFilter::All);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let quote = Quote::new("Stay hungry.", "Motivation");
        assert!(CategoryFilter::Only("Motivation".into()).matches(&quote));
        assert!(!CategoryFilter::Only("motivation".into()).matches(&quote));
        assert!(CategoryFilter::All.matches(&quote));
    }

    #[test]
    fn test_quote_json_shape() {
        let quote = Quote::new("Do or do not.", "Motivation");
        let json = serde_json::to_string(&quote).unwrap();
        assert_eq!(json, r#"{"text":"Do or do not.","category":"Motivation"}"#);
    }

    #[test]
    fn test_default_quotes_cover_three_categories() {
        let quotes = default_quotes();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[2].category, "Motivation");
    }
}
