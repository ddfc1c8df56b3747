use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Accommodation, College};

/// Distinct filter-control values for the college search screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollegeFacets {
    pub states: Vec<String>,
    pub branch_categories: Vec<String>,
}

/// Distinct filter-control values for the accommodation search screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccommodationFacets {
    pub localities: Vec<String>,
    pub food_types: Vec<String>,
}

pub fn college_facets(colleges: &[College]) -> CollegeFacets {
    CollegeFacets {
        states: distinct(colleges.iter().map(|college| college.state.as_str())),
        branch_categories: distinct(
            colleges
                .iter()
                .flat_map(|college| college.branches.iter())
                .map(|branch| branch.category.as_str()),
        ),
    }
}

pub fn accommodation_facets(accommodations: &[Accommodation]) -> AccommodationFacets {
    AccommodationFacets {
        localities: distinct(accommodations.iter().map(Accommodation::locality)),
        food_types: distinct(
            accommodations
                .iter()
                .flat_map(|pg| pg.food_type.iter())
                .map(String::as_str),
        ),
    }
}

/// First-seen order, blanks skipped.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_keep_first_seen_order() {
        let colleges: Vec<College> = serde_json::from_str(
            r#"[
                {"id":"1","state":"Kerala","branches":[{"category":"Medical"}]},
                {"id":"2","state":"Delhi","branches":[{"category":"Engineering"},{"category":"Medical"}]},
                {"id":"3","state":"Kerala"},
                {"id":"4","state":""}
            ]"#,
        )
        .expect("fixtures decode");

        let facets = college_facets(&colleges);
        assert_eq!(facets.states, vec!["Kerala", "Delhi"]);
        assert_eq!(facets.branch_categories, vec!["Medical", "Engineering"]);
    }

    #[test]
    fn accommodation_localities_use_city_segment() {
        let pgs: Vec<Accommodation> = serde_json::from_str(
            r#"[
                {"id":"1","location":"Koramangala, Bengaluru","food_type":["Veg"]},
                {"id":"2","location":"HSR Layout, Bengaluru","food_type":["Veg","Non-Veg"]},
                {"id":"3","location":"Pune"}
            ]"#,
        )
        .expect("fixtures decode");

        let facets = accommodation_facets(&pgs);
        assert_eq!(facets.localities, vec!["Bengaluru", "Pune"]);
        assert_eq!(facets.food_types, vec!["Veg", "Non-Veg"]);
    }
}
