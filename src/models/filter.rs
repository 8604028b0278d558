use std::fmt;
use std::str::FromStr;

pub const ALL_SENTINEL: &str = "all";

/// A brand or category choice. `All` disables that filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact, case-sensitive comparison for `Only`.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selection::from(s))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL_SENTINEL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Brand, category and text query applied to the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub brand: Selection,
    pub category: Selection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_brand(mut self, brand: Selection) -> Self {
        self.brand = brand;
        self
    }

    pub fn with_category(mut self, category: Selection) -> Self {
        self.category = category;
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.brand.is_all() || !self.category.is_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parsing() {
        assert_eq!(Selection::from("all"), Selection::All);
        assert_eq!(Selection::from("ALL"), Selection::All);
        assert_eq!(Selection::from("  "), Selection::All);
        assert_eq!(Selection::from(" Bosch "), Selection::only("Bosch"));
    }

    #[test]
    fn test_selection_accepts_exact_match_only() {
        let bosch = Selection::only("Bosch");
        assert!(bosch.accepts("Bosch"));
        assert!(!bosch.accepts("bosch"));
        assert!(Selection::All.accepts("anything"));
    }

    #[test]
    fn test_filter_state_reset() {
        let mut state = FilterState::new()
            .with_query("oil")
            .with_brand(Selection::only("Bosch"));
        assert!(state.is_active());

        state.reset();
        assert_eq!(state, FilterState::default());
        assert!(!state.is_active());
    }
}
