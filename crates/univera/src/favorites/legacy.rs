use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reconcile::MasterIndex;
use crate::catalog::lenient::lenient_or_default;
use crate::catalog::{EntityId, EntityKind};

/// Document from the per-user legacy favorites collection, as stored.
///
/// Every field except the document id is optional and loosely typed; see
/// [`LegacyRecord`] for how a record is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFavoriteRecord {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub college_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub pg_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LegacyFavoriteRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_college_id(mut self, id: impl Into<String>) -> Self {
        self.college_id = Some(id.into());
        self
    }

    pub fn with_pg_id(mut self, id: impl Into<String>) -> Self {
        self.pg_id = Some(id.into());
        self
    }

    fn reference_for(&self, kind: EntityKind) -> Option<EntityId> {
        let field = match kind {
            EntityKind::College => &self.college_id,
            EntityKind::Accommodation => &self.pg_id,
        };
        non_empty(field.as_deref())
    }

    fn own_id(&self) -> Option<EntityId> {
        non_empty(Some(self.id.as_str()))
    }
}

/// Blank values count as absent; anything else is kept byte for byte.
fn non_empty(value: Option<&str>) -> Option<EntityId> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(EntityId::from)
}

/// Interpretation of a legacy record before it is checked against the master lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyRecord {
    /// Kind-specific foreign key present; trusted without a membership test.
    Explicit { kind: EntityKind, id: EntityId },
    /// Known `type` tag but no foreign key; the document id counts only if it
    /// exists in that kind's master list.
    TypedOwnId { kind: EntityKind, id: EntityId },
    /// Neither tag nor foreign key; the document id must match exactly one master list.
    AmbiguousByOwnId(EntityId),
    Unclassifiable,
}

impl From<&LegacyFavoriteRecord> for LegacyRecord {
    fn from(record: &LegacyFavoriteRecord) -> Self {
        let tagged = record.kind.as_deref().and_then(EntityKind::from_tag);

        if let Some(kind) = tagged {
            if let Some(id) = record.reference_for(kind) {
                return LegacyRecord::Explicit { kind, id };
            }
            return match record.own_id() {
                Some(id) => LegacyRecord::TypedOwnId { kind, id },
                None => LegacyRecord::Unclassifiable,
            };
        }

        for kind in EntityKind::ALL {
            if let Some(id) = record.reference_for(kind) {
                return LegacyRecord::Explicit { kind, id };
            }
        }

        match record.own_id() {
            Some(id) => LegacyRecord::AmbiguousByOwnId(id),
            None => LegacyRecord::Unclassifiable,
        }
    }
}

impl LegacyRecord {
    /// Kind and id this record contributes, or `None` when it must be ignored.
    pub fn resolve(self, masters: &MasterIndex<'_>) -> Option<(EntityKind, EntityId)> {
        match self {
            LegacyRecord::Explicit { kind, id } => Some((kind, id)),
            LegacyRecord::TypedOwnId { kind, id } => {
                masters.contains(kind, &id).then_some((kind, id))
            }
            LegacyRecord::AmbiguousByOwnId(id) => {
                let mut owners = EntityKind::ALL
                    .into_iter()
                    .filter(|kind| masters.contains(*kind, &id));
                match (owners.next(), owners.next()) {
                    (Some(kind), None) => Some((kind, id)),
                    _ => None,
                }
            }
            LegacyRecord::Unclassifiable => None,
        }
    }
}
