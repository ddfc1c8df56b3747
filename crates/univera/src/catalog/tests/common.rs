use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::accounts::{ProfileRepository, ProfileUpdate, Role, UserId, UserProfile};
use crate::catalog::{
    catalog_router, Accommodation, AccommodationSubmission, BranchSubmission, CatalogRepository,
    CatalogService, College, CollegeSubmission, CollegeType, EntityId, EntityKind,
};
use crate::store::RepositoryError;

pub(super) const ADMIN: &str = "admin-1";
pub(super) const STUDENT: &str = "student-1";

pub(super) fn colleges() -> Vec<College> {
    serde_json::from_value(json!([
        {
            "id": "iitm",
            "name": "IIT Madras",
            "location": "Chennai",
            "state": "Tamil Nadu",
            "type": "Government",
            "rating": 4.8,
            "nirf_ranking": 1,
            "established": 1959,
            "affiliation": "Autonomous",
            "facilities": ["Library", "Hostel", "Sports Complex"],
            "placements": {"percentage": 92},
            "branches": [
                {"name": "Computer Science", "category": "Engineering", "fees": {"annual": 220000}},
                {"name": "Mechanical", "category": "Engineering", "fees": {"annual": 210000}}
            ]
        },
        {
            "id": "cmc",
            "name": "Christian Medical College",
            "location": "Vellore",
            "state": "Tamil Nadu",
            "type": "Private",
            "rating": 4.6,
            "nirf_ranking": 3,
            "facilities": ["Hospital", "Library"],
            "branches": [
                {"name": "MBBS", "category": "Medical", "fees": {"annual": 52000}}
            ]
        },
        {
            "id": "rvce",
            "name": "RV College of Engineering",
            "location": "Bengaluru",
            "state": "Karnataka",
            "type": "Private",
            "rating": "unrated",
            "branches": []
        }
    ]))
    .expect("college fixtures")
}

pub(super) fn accommodations() -> Vec<Accommodation> {
    serde_json::from_value(json!([
        {
            "id": "p1",
            "name": "Sunrise PG",
            "type": "PG",
            "location": "Koramangala, Bengaluru",
            "rent": 12000,
            "gender": "Girls",
            "food_type": ["Veg"],
            "amenities": ["WiFi", "Laundry"],
            "rating": 4.1
        },
        {
            "id": "p2",
            "name": "Campus Nest Hostel",
            "type": "Hostel",
            "location": "Guindy, Chennai",
            "rent": 8000,
            "gender": "Boys",
            "food_type": ["Veg", "Non-Veg"],
            "amenities": ["WiFi"],
            "rating": 3.8
        }
    ]))
    .expect("accommodation fixtures")
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    colleges: Arc<Mutex<Vec<College>>>,
    accommodations: Arc<Mutex<Vec<Accommodation>>>,
}

impl MemoryCatalog {
    pub(super) fn seeded() -> Self {
        Self {
            colleges: Arc::new(Mutex::new(colleges())),
            accommodations: Arc::new(Mutex::new(accommodations())),
        }
    }

    pub(super) fn college_ids(&self) -> Vec<EntityId> {
        let guard = self.colleges.lock().expect("catalog mutex poisoned");
        guard.iter().map(|college| college.id.clone()).collect()
    }
}

impl CatalogRepository for MemoryCatalog {
    fn colleges(&self) -> Result<Vec<College>, RepositoryError> {
        Ok(self.colleges.lock().expect("catalog mutex poisoned").clone())
    }

    fn accommodations(&self) -> Result<Vec<Accommodation>, RepositoryError> {
        Ok(self
            .accommodations
            .lock()
            .expect("catalog mutex poisoned")
            .clone())
    }

    fn insert_college(&self, college: College) -> Result<College, RepositoryError> {
        let mut guard = self.colleges.lock().expect("catalog mutex poisoned");
        if guard.iter().any(|existing| existing.id == college.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(college.clone());
        Ok(college)
    }

    fn insert_accommodation(
        &self,
        accommodation: Accommodation,
    ) -> Result<Accommodation, RepositoryError> {
        let mut guard = self.accommodations.lock().expect("catalog mutex poisoned");
        if guard.iter().any(|existing| existing.id == accommodation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(accommodation.clone());
        Ok(accommodation)
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogRepository for UnavailableCatalog {
    fn colleges(&self) -> Result<Vec<College>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn accommodations(&self) -> Result<Vec<Accommodation>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn insert_college(&self, _college: College) -> Result<College, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn insert_accommodation(
        &self,
        _accommodation: Accommodation,
    ) -> Result<Accommodation, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

#[derive(Clone)]
pub(super) struct StaticProfiles {
    profiles: HashMap<UserId, UserProfile>,
}

impl Default for StaticProfiles {
    fn default() -> Self {
        let mut admin = UserProfile::new(UserId(ADMIN.to_string()), "admin@univera.in", "Admin");
        admin.role = Role::Admin;
        let student = UserProfile::new(UserId(STUDENT.to_string()), "s@univera.in", "Student");

        let profiles = [admin, student]
            .into_iter()
            .map(|profile| (profile.uid.clone(), profile))
            .collect();
        Self { profiles }
    }
}

impl ProfileRepository for StaticProfiles {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.profiles.get(user_id).cloned())
    }

    fn add_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn remove_favorite(
        &self,
        _user_id: &UserId,
        _kind: EntityKind,
        _id: &EntityId,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn update(
        &self,
        _user_id: &UserId,
        _update: &ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("profiles are read-only here".to_string()))
    }
}

pub(super) type MemoryService = CatalogService<MemoryCatalog, StaticProfiles>;

pub(super) fn build_service() -> (MemoryService, MemoryCatalog) {
    let catalog = MemoryCatalog::seeded();
    let service = CatalogService::new(Arc::new(catalog.clone()), Arc::new(StaticProfiles::default()));
    (service, catalog)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    catalog_router(Arc::new(service))
}

pub(super) fn college_submission() -> CollegeSubmission {
    CollegeSubmission {
        name: "  NIT Trichy ".to_string(),
        location: "Tiruchirappalli".to_string(),
        state: "Tamil Nadu".to_string(),
        college_type: CollegeType::Government,
        rating: Some(4.4),
        established: Some(1964),
        nirf_ranking: Some(9),
        facilities: "Library, Hostel, , Sports".to_string(),
        branches: vec![BranchSubmission {
            name: "Civil".to_string(),
            category: "Engineering".to_string(),
            annual_fee: Some(150000.0),
            ..BranchSubmission::default()
        }],
        ..CollegeSubmission::default()
    }
}

pub(super) fn accommodation_submission() -> AccommodationSubmission {
    AccommodationSubmission {
        name: "Lakeview PG".to_string(),
        location: "Adyar, Chennai".to_string(),
        rent: Some(9500.0),
        security_deposit: Some(19000.0),
        food_type: "Veg,Non-Veg".to_string(),
        amenities: "WiFi, AC".to_string(),
        ..AccommodationSubmission::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
