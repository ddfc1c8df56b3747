use serde::Deserialize;

use super::query::{Attribute, ListQuery, PriceRange, SortKey};

/// Search-screen controls for the college listing, as sent in the query string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollegeSearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, rename = "type")]
    pub college_type: Option<String>,
    #[serde(default)]
    pub rating_min: Option<f64>,
    #[serde(default)]
    pub fee_min: Option<f64>,
    #[serde(default)]
    pub fee_max: Option<f64>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl CollegeSearchParams {
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new()
            .with_text(self.q.as_deref().unwrap_or_default())
            .matching(Attribute::State, self.state.as_deref())
            .matching(Attribute::Category, self.branch.as_deref())
            .matching(Attribute::Type, self.college_type.as_deref())
            .min_rating(self.rating_min)
            .price_within(PriceRange::new(self.fee_min, self.fee_max))
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }
}

/// Search-screen controls for the accommodation listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccommodationSearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default, rename = "type")]
    pub accommodation_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub food_type: Option<String>,
    /// Comma-separated; every listed amenity is required.
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub rating_min: Option<f64>,
    #[serde(default)]
    pub rent_min: Option<f64>,
    #[serde(default)]
    pub rent_max: Option<f64>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl AccommodationSearchParams {
    pub fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::new()
            .with_text(self.q.as_deref().unwrap_or_default())
            .matching(Attribute::Locality, self.locality.as_deref())
            .matching(Attribute::Type, self.accommodation_type.as_deref())
            .matching(Attribute::Gender, self.gender.as_deref())
            .matching(Attribute::FoodType, self.food_type.as_deref())
            .min_rating(self.rating_min)
            .price_within(PriceRange::new(self.rent_min, self.rent_max));

        for amenity in self.amenities.as_deref().unwrap_or_default().split(',') {
            query = query.matching(Attribute::Amenity, Some(amenity));
        }

        query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }
}
