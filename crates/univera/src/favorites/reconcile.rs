use std::collections::HashSet;

use serde::Serialize;

use super::legacy::{LegacyFavoriteRecord, LegacyRecord};
use crate::accounts::ProfileFavorites;
use crate::catalog::{Accommodation, CatalogEntity, College, EntityId, EntityKind};

/// Master entity collections currently loaded for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct MasterLists<'a> {
    pub colleges: &'a [College],
    pub accommodations: &'a [Accommodation],
}

impl<'a> MasterLists<'a> {
    pub fn new(colleges: &'a [College], accommodations: &'a [Accommodation]) -> Self {
        Self {
            colleges,
            accommodations,
        }
    }

    pub fn index(&self) -> MasterIndex<'a> {
        MasterIndex {
            colleges: self.colleges.iter().map(|c| c.id.as_str()).collect(),
            accommodations: self.accommodations.iter().map(|a| a.id.as_str()).collect(),
        }
    }
}

/// Id membership sets built once per reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct MasterIndex<'a> {
    colleges: HashSet<&'a str>,
    accommodations: HashSet<&'a str>,
}

impl MasterIndex<'_> {
    pub fn contains(&self, kind: EntityKind, id: &EntityId) -> bool {
        match kind {
            EntityKind::College => self.colleges.contains(id.as_str()),
            EntityKind::Accommodation => self.accommodations.contains(id.as_str()),
        }
    }
}

/// Deduplicated favorite ids per kind; canonical ids first, legacy-only ids after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedFavorites {
    pub colleges: Vec<EntityId>,
    pub pgs: Vec<EntityId>,
}

impl MergedFavorites {
    pub fn ids(&self, kind: EntityKind) -> &[EntityId] {
        match kind {
            EntityKind::College => &self.colleges,
            EntityKind::Accommodation => &self.pgs,
        }
    }

    fn push_unique(
        &mut self,
        kind: EntityKind,
        id: EntityId,
        seen: &mut HashSet<(EntityKind, EntityId)>,
    ) {
        if seen.insert((kind, id.clone())) {
            match kind {
                EntityKind::College => self.colleges.push(id),
                EntityKind::Accommodation => self.pgs.push(id),
            }
        }
    }
}

/// Merge canonical profile favorites with classified legacy records.
///
/// Pure: malformed or ambiguous legacy records are dropped, never reported.
pub fn reconcile(
    profile: &ProfileFavorites,
    legacy: &[LegacyFavoriteRecord],
    masters: &MasterLists<'_>,
) -> MergedFavorites {
    let index = masters.index();
    let mut merged = MergedFavorites::default();
    let mut seen = HashSet::new();

    for kind in EntityKind::ALL {
        for id in profile.ids(kind) {
            merged.push_unique(kind, id.clone(), &mut seen);
        }
    }

    for record in legacy {
        if let Some((kind, id)) = LegacyRecord::from(record).resolve(&index) {
            merged.push_unique(kind, id, &mut seen);
        }
    }

    merged
}

/// Favorites resolved to full entities for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FavoriteEntities {
    pub colleges: Vec<College>,
    pub accommodations: Vec<Accommodation>,
}

impl FavoriteEntities {
    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty() && self.accommodations.is_empty()
    }
}

/// Resolve merged ids against the master lists, skipping ids with no entity.
pub fn project(merged: &MergedFavorites, masters: &MasterLists<'_>) -> FavoriteEntities {
    FavoriteEntities {
        colleges: resolve_all(&merged.colleges, masters.colleges),
        accommodations: resolve_all(&merged.pgs, masters.accommodations),
    }
}

fn resolve_all<T>(ids: &[EntityId], master: &[T]) -> Vec<T>
where
    T: CatalogEntity + Clone,
{
    ids.iter()
        .filter_map(|id| master.iter().find(|entity| entity.entity_id() == id))
        .cloned()
        .collect()
}
