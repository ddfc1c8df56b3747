use std::cmp::Ordering;

use serde::Serialize;

use super::query::{Attribute, ListQuery, Predicate, SortKey};
use crate::catalog::{Accommodation, College};

/// Ranking stand-in for entities without one; sorts after every real rank.
pub const UNRANKED: u32 = u32::MAX;

/// Attribute accessors a listing screen filters and sorts on.
pub trait Listable {
    /// Fields searched by the free-text needle.
    fn text_fields(&self) -> Vec<&str>;
    /// Values held for an attribute; empty when the attribute does not apply.
    fn attribute_values(&self, attribute: Attribute) -> Vec<&str>;
    fn rating(&self) -> Option<f64>;
    /// Derived minimum price across sub-items (branch fees, rent).
    fn min_price(&self) -> Option<f64>;
    fn ranking(&self) -> Option<u32> {
        None
    }
}

impl Listable for College {
    fn text_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.location.as_str()];
        fields.extend(self.branches.iter().map(|branch| branch.name.as_str()));
        fields
    }

    fn attribute_values(&self, attribute: Attribute) -> Vec<&str> {
        match attribute {
            Attribute::State => vec![self.state.as_str()],
            Attribute::Locality => vec![self.location.as_str()],
            Attribute::Category => self
                .branches
                .iter()
                .map(|branch| branch.category.as_str())
                .collect(),
            Attribute::Type => vec![self.college_type.label()],
            Attribute::Gender | Attribute::FoodType | Attribute::Amenity => Vec::new(),
        }
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn min_price(&self) -> Option<f64> {
        self.min_annual_fee()
    }

    fn ranking(&self) -> Option<u32> {
        self.nirf_ranking
    }
}

impl Listable for Accommodation {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str()]
    }

    fn attribute_values(&self, attribute: Attribute) -> Vec<&str> {
        match attribute {
            Attribute::Locality => vec![self.locality()],
            Attribute::Type => vec![self.accommodation_type.label()],
            Attribute::Gender => vec![self.gender.label()],
            Attribute::FoodType => self.food_type.iter().map(String::as_str).collect(),
            Attribute::Amenity => self.amenities.iter().map(String::as_str).collect(),
            Attribute::State | Attribute::Category => Vec::new(),
        }
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn min_price(&self) -> Option<f64> {
        self.rent
    }
}

/// Filtered and sorted projection handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> ListView<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Filter `entities` by `query`, then stable-sort by `sort`. The input is left untouched.
pub fn view<T>(entities: &[T], query: &ListQuery, sort: SortKey) -> ListView<T>
where
    T: Listable + Clone,
{
    let needle = query.needle();
    let mut items: Vec<&T> = entities
        .iter()
        .filter(|entity| matches_text(*entity, needle.as_deref()))
        .filter(|entity| {
            query
                .predicates
                .iter()
                .all(|predicate| satisfies(*entity, predicate))
        })
        .collect();

    items.sort_by(|a, b| compare(*a, *b, sort));

    ListView::from_items(items.into_iter().cloned().collect())
}

/// Case-insensitive substring match over the entity's text fields.
pub fn matches_text<T: Listable>(entity: &T, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => entity
            .text_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle)),
    }
}

pub fn satisfies<T: Listable>(entity: &T, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Matches { attribute, value } => entity
            .attribute_values(*attribute)
            .into_iter()
            .any(|candidate| candidate == value),
        Predicate::MinRating(threshold) => entity.rating().unwrap_or(0.0) >= *threshold,
        Predicate::PriceWithin(range) => entity
            .min_price()
            .map_or(false, |price| range.contains(price)),
    }
}

fn compare<T: Listable>(a: &T, b: &T, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Rating => {
            let a = a.rating().unwrap_or(0.0);
            let b = b.rating().unwrap_or(0.0);
            b.total_cmp(&a)
        }
        SortKey::Price => match (a.min_price(), b.min_price()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Ranking => {
            let a = a.ranking().unwrap_or(UNRANKED);
            let b = b.ranking().unwrap_or(UNRANKED);
            a.cmp(&b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::query::PriceRange;

    fn college(raw: &str) -> College {
        serde_json::from_str(raw).expect("college fixture")
    }

    fn ids<T: crate::catalog::CatalogEntity>(view: &ListView<T>) -> Vec<&str> {
        view.items
            .iter()
            .map(|item| item.entity_id().as_str())
            .collect()
    }

    fn sample() -> Vec<College> {
        vec![
            college(
                r#"{"id":"a","name":"Alpha Institute","state":"Karnataka","rating":4.5,"nirf_ranking":10,
                "branches":[{"name":"Computer Science","category":"Engineering","fees":{"annual":200000}}]}"#,
            ),
            college(r#"{"id":"b","name":"Beta College","state":"Kerala","rating":3.9}"#),
            college(
                r#"{"id":"c","name":"Gamma University","state":"Karnataka","type":"Private","rating":"n/a","nirf_ranking":4,
                "branches":[{"name":"MBBS","category":"Medical","fees":{"annual":90000}},{"name":"BDS","category":"Medical","fees":{"annual":150000}}]}"#,
            ),
        ]
    }

    #[test]
    fn text_search_covers_branch_names() {
        let colleges = sample();
        let result = view(
            &colleges,
            &ListQuery::new().with_text("mbbs"),
            SortKey::Rating,
        );
        assert_eq!(ids(&result), vec!["c"]);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn rating_sort_is_descending_with_missing_as_zero() {
        let colleges = sample();
        let result = view(&colleges, &ListQuery::new(), SortKey::Rating);
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn price_sort_puts_unpriced_last() {
        let colleges = sample();
        let result = view(&colleges, &ListQuery::new(), SortKey::Price);
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn ranking_sort_puts_unranked_last() {
        let colleges = sample();
        let result = view(&colleges, &ListQuery::new(), SortKey::Ranking);
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn category_predicate_matches_any_branch() {
        let colleges = sample();
        let query = ListQuery::new().matching(Attribute::Category, Some("Medical"));
        let result = view(&colleges, &query, SortKey::Rating);
        assert_eq!(ids(&result), vec!["c"]);
    }

    #[test]
    fn price_range_excludes_unpriced_entities() {
        let colleges = sample();
        let query = ListQuery::new().price_within(PriceRange::new(Some(0.0), Some(1_000_000.0)));
        let result = view(&colleges, &query, SortKey::Rating);
        assert_eq!(ids(&result), vec!["a", "c"]);

        let unfiltered = view(&colleges, &ListQuery::new(), SortKey::Rating);
        assert_eq!(unfiltered.count, 3);
    }

    #[test]
    fn price_range_uses_cheapest_branch() {
        let colleges = sample();
        let query = ListQuery::new().price_within(PriceRange::new(None, Some(100_000.0)));
        let result = view(&colleges, &query, SortKey::Rating);
        assert_eq!(ids(&result), vec!["c"]);
    }
}
