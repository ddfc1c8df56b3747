//! Side-by-side college comparison: candidate search, selection bookkeeping and
//! the attribute table rendered for the selected columns.

use serde::Serialize;

use crate::catalog::{College, CollegeType, EntityId};

/// Columns on the comparison page.
pub const MAX_COMPARE: usize = 4;
/// Fewer selected colleges than this renders no table.
pub const MIN_COMPARE: usize = 2;
/// Quick-compare tray capacity on the search page.
pub const TRAY_CAPACITY: usize = 3;
/// Dropdown size for the candidate search.
pub const CANDIDATE_LIMIT: usize = 50;

const MISSING: &str = "—";
const TOP_FACILITIES: usize = 5;

/// Colleges that may still be added: not already selected, matching the trimmed
/// case-insensitive needle on name, location or state.
pub fn comparison_candidates<'a>(
    colleges: &'a [College],
    selected: &[EntityId],
    query: &str,
) -> Vec<&'a College> {
    let needle = query.trim().to_lowercase();
    colleges
        .iter()
        .filter(|college| !selected.contains(&college.id))
        .filter(|college| {
            needle.is_empty()
                || [&college.name, &college.location, &college.state]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(CANDIDATE_LIMIT)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("comparison already holds {capacity} colleges")]
    Full { capacity: usize },
    #[error("college {0} is already selected")]
    Duplicate(EntityId),
}

/// Ordered set of colleges chosen for the comparison page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<EntityId>,
    capacity: usize,
}

impl Default for ComparisonSelection {
    fn default() -> Self {
        Self::with_capacity(MAX_COMPARE)
    }
}

impl ComparisonSelection {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity,
        }
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_comparable(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    pub fn add(&mut self, id: EntityId) -> Result<(), SelectionError> {
        if self.ids.contains(&id) {
            return Err(SelectionError::Duplicate(id));
        }
        if self.ids.len() >= self.capacity {
            return Err(SelectionError::Full {
                capacity: self.capacity,
            });
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        before != self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Append requested colleges that exist in `master`, in master order, skipping
    /// ones already selected and stopping at capacity. Returns how many were added.
    pub fn preselect(&mut self, master: &[College], requested: &[EntityId]) -> usize {
        let mut added = 0;
        for college in master.iter().filter(|college| requested.contains(&college.id)) {
            if self.ids.len() >= self.capacity {
                break;
            }
            if self.add(college.id.clone()).is_ok() {
                added += 1;
            }
        }
        added
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrayToggle {
    Added,
    Removed,
    Full,
}

/// Search-page tray collecting colleges before jumping to the comparison page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareTray {
    ids: Vec<EntityId>,
}

impl CompareTray {
    pub fn toggle(&mut self, id: EntityId) -> TrayToggle {
        if let Some(position) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(position);
            return TrayToggle::Removed;
        }
        if self.ids.len() >= TRAY_CAPACITY {
            return TrayToggle::Full;
        }
        self.ids.push(id);
        TrayToggle::Added
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn is_ready(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("select at least {minimum} colleges to compare (found {found})")]
    TooFew { minimum: usize, found: usize },
    #[error("at most {maximum} colleges can be compared (found {found})")]
    TooMany { maximum: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub key: &'static str,
    pub label: &'static str,
    pub values: Vec<String>,
    /// Columns disagree; the UI highlights these rows.
    pub differs: bool,
}

impl ComparisonRow {
    fn new(key: &'static str, label: &'static str, values: Vec<String>) -> Self {
        let differs = values.windows(2).any(|pair| pair[0] != pair[1]);
        Self {
            key,
            label,
            values,
            differs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn build(colleges: &[&College]) -> Result<Self, ComparisonError> {
        if colleges.len() < MIN_COMPARE {
            return Err(ComparisonError::TooFew {
                minimum: MIN_COMPARE,
                found: colleges.len(),
            });
        }
        if colleges.len() > MAX_COMPARE {
            return Err(ComparisonError::TooMany {
                maximum: MAX_COMPARE,
                found: colleges.len(),
            });
        }

        let columns = colleges
            .iter()
            .map(|college| ComparisonColumn {
                id: college.id.clone(),
                name: college.name.clone(),
            })
            .collect();

        let row = |key, label, cell: fn(&College) -> String| {
            ComparisonRow::new(key, label, colleges.iter().map(|c| cell(c)).collect())
        };

        let mut rows = vec![
            row("type", "Type", type_cell),
            row("location", "City / State", location_cell),
            row("affiliation", "Affiliation", |c| text_cell(&c.affiliation)),
            row("established", "Established", |c| {
                optional_cell(c.established.map(|year| year.to_string()))
            }),
            row("rating", "Overall Rating", |c| {
                optional_cell(c.rating.map(format_number))
            }),
            row("nirf", "NIRF Ranking", |c| {
                optional_cell(c.nirf_ranking.map(|rank| rank.to_string()))
            }),
            row("placement", "Placement %", |c| {
                optional_cell(c.placements.percentage.map(format_number))
            }),
            row("facilities", "Facilities", |c| list_cell(&c.facilities)),
            row("branch_fees", "Branches & Fees (annual)", branch_fees_cell),
        ];

        if colleges.iter().any(|college| !college.branches.is_empty()) {
            rows.push(row("branch_presence", "Branch presence", |c| {
                list_cell(c.branches.iter().map(|branch| branch.label()))
            }));
        }

        rows.push(row("top_facilities", "Top Facilities", |c| {
            list_cell(c.facilities.iter().take(TOP_FACILITIES))
        }));
        rows.push(row("average_fees", "Average Fees", |c| {
            optional_cell(average_annual_fee(c).map(format_inr))
        }));

        Ok(Self { columns, rows })
    }
}

/// Mean over positive annual fees, rounded to the rupee.
pub fn average_annual_fee(college: &College) -> Option<f64> {
    let fees: Vec<f64> = college
        .branches
        .iter()
        .filter_map(|branch| branch.annual_fee())
        .filter(|fee| *fee > 0.0)
        .collect();
    if fees.is_empty() {
        return None;
    }
    Some((fees.iter().sum::<f64>() / fees.len() as f64).round())
}

/// Whole rupees with Indian digit grouping: `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{sign}₹{grouped}")
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn type_cell(college: &College) -> String {
    match college.college_type {
        CollegeType::Unspecified => MISSING.to_string(),
        other => other.label().to_string(),
    }
}

fn location_cell(college: &College) -> String {
    let location = college.location.trim();
    let state = college.state.trim();
    match (location.is_empty(), state.is_empty()) {
        (true, true) => MISSING.to_string(),
        (false, true) => location.to_string(),
        (true, false) => state.to_string(),
        (false, false) => format!("{location}, {state}"),
    }
}

fn branch_fees_cell(college: &College) -> String {
    if college.branches.is_empty() {
        return MISSING.to_string();
    }
    college
        .branches
        .iter()
        .map(|branch| {
            let fee = branch
                .annual_fee()
                .filter(|fee| *fee > 0.0)
                .map(format_inr)
                .unwrap_or_else(|| MISSING.to_string());
            format!("{}: {}", branch.label(), fee)
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn text_cell(value: &str) -> String {
    optional_cell(Some(value.trim().to_string()).filter(|value| !value.is_empty()))
}

fn optional_cell(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}

fn list_cell<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        MISSING.to_string()
    } else {
        joined
    }
}
