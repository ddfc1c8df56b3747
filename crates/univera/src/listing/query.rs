use serde::{Deserialize, Serialize};

/// Structured attribute an exact-match predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    State,
    Locality,
    Category,
    Type,
    Gender,
    FoodType,
    Amenity,
}

/// Inclusive numeric range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One active structured constraint. Unset controls are simply absent from the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Entity carries `value` among its values for `attribute`.
    Matches { attribute: Attribute, value: String },
    /// Rating at or above the threshold; a missing rating counts as 0.
    MinRating(f64),
    /// Derived minimum price inside the range; entities without a price never match.
    PriceWithin(PriceRange),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Descending; missing ratings count as 0.
    #[default]
    Rating,
    /// Ascending by derived minimum price; unpriced entities last.
    #[serde(alias = "fees", alias = "rent")]
    Price,
    /// Ascending; unranked entities last.
    Ranking,
}

/// Free text plus active predicates for one listing screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub text: Option<String>,
    pub predicates: Vec<Predicate>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text needle; whitespace-only input leaves the query unset.
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        let trimmed = text.as_ref().trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn matching(self, attribute: Attribute, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => self.with_predicate(Predicate::Matches {
                attribute,
                value: value.to_string(),
            }),
            None => self,
        }
    }

    pub fn min_rating(self, threshold: Option<f64>) -> Self {
        match threshold.filter(|value| value.is_finite()) {
            Some(threshold) => self.with_predicate(Predicate::MinRating(threshold)),
            None => self,
        }
    }

    pub fn price_within(self, range: PriceRange) -> Self {
        if range.is_unbounded() {
            self
        } else {
            self.with_predicate(Predicate::PriceWithin(range))
        }
    }

    pub(crate) fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}
