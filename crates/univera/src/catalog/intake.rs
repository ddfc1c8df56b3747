use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::domain::{
    Accommodation, AccommodationType, Branch, College, CollegeDistance, CollegeType, Contact,
    EntityId, Fees, Gender, Infrastructure, Placement,
};

const MAX_RATING: f64 = 5.0;

static COLLEGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ACCOMMODATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_college_id() -> EntityId {
    let id = COLLEGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntityId(format!("college-{id:06}"))
}

fn next_accommodation_id() -> EntityId {
    let id = ACCOMMODATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntityId(format!("pg-{id:06}"))
}

/// Branch as entered on the admin form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub annual_fee: Option<f64>,
    #[serde(default)]
    pub total_fee: Option<f64>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub cutoff: Option<f64>,
}

/// Admin "add college" form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollegeSubmission {
    pub name: String,
    pub location: String,
    pub state: String,
    #[serde(rename = "type", default)]
    pub college_type: CollegeType,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub established: Option<u32>,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default)]
    pub nirf_ranking: Option<u32>,
    #[serde(default)]
    pub branches: Vec<BranchSubmission>,
    #[serde(default)]
    pub infrastructure: Infrastructure,
    #[serde(default)]
    pub placements: Placement,
    /// Comma-separated, e.g. "WiFi Campus, Cafeteria, Transport".
    #[serde(default)]
    pub facilities: String,
}

/// Admin "add accommodation" form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccommodationSubmission {
    pub name: String,
    pub location: String,
    #[serde(rename = "type", default)]
    pub accommodation_type: AccommodationType,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub rent: Option<f64>,
    #[serde(default)]
    pub security_deposit: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub available_rooms: Option<u32>,
    #[serde(default)]
    pub food_type: String,
    #[serde(default)]
    pub amenities: String,
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub distance_from_colleges: Vec<CollegeDistance>,
    #[serde(default)]
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(f64),
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// Validates admin submissions and turns them into catalog documents with fresh ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogIntake;

impl CatalogIntake {
    pub fn college(&self, submission: CollegeSubmission) -> Result<College, IntakeViolation> {
        let name = required("name", &submission.name)?;
        let location = required("location", &submission.location)?;
        let state = required("state", &submission.state)?;
        let rating = rating(submission.rating)?;

        let mut branches = Vec::with_capacity(submission.branches.len());
        for branch in submission.branches {
            branches.push(Branch {
                name: branch.name.trim().to_string(),
                category: branch.category.trim().to_string(),
                fees: Some(Fees {
                    annual: amount("annual_fee", branch.annual_fee)?,
                    total: amount("total_fee", branch.total_fee)?,
                }),
                seats: branch.seats,
                cutoff: branch.cutoff.filter(|cutoff| cutoff.is_finite()),
            });
        }

        Ok(College {
            id: next_college_id(),
            name,
            location,
            state,
            college_type: submission.college_type,
            rating,
            image: submission.image.trim().to_string(),
            branches,
            infrastructure: submission.infrastructure,
            placements: submission.placements,
            facilities: split_list(&submission.facilities),
            established: submission.established,
            affiliation: submission.affiliation.trim().to_string(),
            nirf_ranking: submission.nirf_ranking,
        })
    }

    pub fn accommodation(
        &self,
        submission: AccommodationSubmission,
    ) -> Result<Accommodation, IntakeViolation> {
        let name = required("name", &submission.name)?;
        let location = required("location", &submission.location)?;

        Ok(Accommodation {
            id: next_accommodation_id(),
            name,
            accommodation_type: submission.accommodation_type,
            location,
            rent: amount("rent", submission.rent)?,
            security_deposit: amount("security_deposit", submission.security_deposit)?,
            gender: submission.gender,
            food_type: split_list(&submission.food_type),
            amenities: split_list(&submission.amenities),
            images: split_list(&submission.images),
            distance_from_colleges: submission.distance_from_colleges,
            contact: submission.contact,
            rating: rating(submission.rating)?,
            available_rooms: submission.available_rooms,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeViolation::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn rating(value: Option<f64>) -> Result<Option<f64>, IntakeViolation> {
    match value {
        Some(rating) if !(0.0..=MAX_RATING).contains(&rating) => {
            Err(IntakeViolation::RatingOutOfRange(rating))
        }
        other => Ok(other),
    }
}

fn amount(field: &'static str, value: Option<f64>) -> Result<Option<f64>, IntakeViolation> {
    match value {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(IntakeViolation::InvalidAmount { field, value })
        }
        other => Ok(other),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_pieces() {
        assert_eq!(
            split_list(" WiFi , ,Cafeteria,"),
            vec!["WiFi".to_string(), "Cafeteria".to_string()]
        );
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn nan_rating_is_out_of_range() {
        assert!(matches!(
            rating(Some(f64::NAN)),
            Err(IntakeViolation::RatingOutOfRange(_))
        ));
        assert_eq!(rating(None), Ok(None));
    }
}
