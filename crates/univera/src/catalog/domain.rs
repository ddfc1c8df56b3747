use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient::{lenient_f64, lenient_list, lenient_or_default, lenient_text, lenient_u32};

/// Identifier wrapper for catalog documents (colleges and accommodations).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminator between the two listing collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "college")]
    College,
    #[serde(rename = "pg")]
    Accommodation,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::College, EntityKind::Accommodation];

    /// Tag used by legacy favorite records (`type` field).
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::College => "college",
            EntityKind::Accommodation => "pg",
        }
    }

    /// Key of the canonical id array inside the profile's `favorites` map.
    pub fn profile_key(self) -> &'static str {
        match self {
            EntityKind::College => "colleges",
            EntityKind::Accommodation => "pgs",
        }
    }

    /// Strict match against the legacy `type` tag; anything else is not a known kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "college" => Some(EntityKind::College),
            "pg" => Some(EntityKind::Accommodation),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Path-segment parsing; accepts both the tag and the profile key spellings.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "college" | "colleges" => Ok(EntityKind::College),
            "pg" | "pgs" | "accommodation" | "accommodations" => Ok(EntityKind::Accommodation),
            other => Err(UnknownEntityKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollegeType {
    Government,
    Private,
    Deemed,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl CollegeType {
    pub fn label(self) -> &'static str {
        match self {
            CollegeType::Government => "Government",
            CollegeType::Private => "Private",
            CollegeType::Deemed => "Deemed",
            CollegeType::Unspecified => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub annual: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: Option<f64>,
}

/// A course offered by a college.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub fees: Option<Fees>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub seats: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cutoff: Option<f64>,
}

impl Branch {
    pub fn annual_fee(&self) -> Option<f64> {
        self.fees.as_ref().and_then(|fees| fees.annual)
    }

    /// Display label: the branch name, falling back to its category.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.category.is_empty() {
            &self.category
        } else {
            "Other"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hostels {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub boys: bool,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub girls: bool,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(default, deserialize_with = "lenient_text")]
    pub campus_area: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub hostels: Hostels,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub library: bool,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub labs: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sports_facilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub auditorium: bool,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub medical_facility: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_package: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub highest_package: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub top_recruiters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub college_type: CollegeType,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub branches: Vec<Branch>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub infrastructure: Infrastructure,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub placements: Placement,
    #[serde(default, deserialize_with = "lenient_list")]
    pub facilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub established: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub affiliation: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub nirf_ranking: Option<u32>,
}

impl College {
    /// Lowest annual fee across branches that carry a numeric fee.
    pub fn min_annual_fee(&self) -> Option<f64> {
        self.branches
            .iter()
            .filter_map(Branch::annual_fee)
            .min_by(f64::total_cmp)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccommodationType {
    #[serde(rename = "PG")]
    Pg,
    Hostel,
    Apartment,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl AccommodationType {
    pub fn label(self) -> &'static str {
        match self {
            AccommodationType::Pg => "PG",
            AccommodationType::Hostel => "Hostel",
            AccommodationType::Apartment => "Apartment",
            AccommodationType::Unspecified => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Boys,
    Girls,
    #[serde(rename = "Co-ed")]
    CoEd,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Boys => "Boys",
            Gender::Girls => "Girls",
            Gender::CoEd => "Co-ed",
            Gender::Unspecified => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeDistance {
    #[serde(default, deserialize_with = "lenient_text")]
    pub college_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub distance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
}

/// Paying-guest, hostel, or apartment listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub accommodation_type: AccommodationType,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub security_deposit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "lenient_list")]
    pub food_type: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub distance_from_colleges: Vec<CollegeDistance>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub available_rooms: Option<u32>,
}

impl Accommodation {
    /// Locality used for grouping: the second comma-separated segment of the
    /// address ("Koramangala, Bengaluru" -> "Bengaluru"), else the whole location.
    pub fn locality(&self) -> &str {
        self.location
            .split(',')
            .nth(1)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&self.location)
    }
}

/// Anything with a stable catalog identity.
pub trait CatalogEntity {
    const KIND: EntityKind;

    fn entity_id(&self) -> &EntityId;
    fn display_name(&self) -> &str;
}

impl CatalogEntity for College {
    const KIND: EntityKind = EntityKind::College;

    fn entity_id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntity for Accommodation {
    const KIND: EntityKind = EntityKind::Accommodation;

    fn entity_id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
