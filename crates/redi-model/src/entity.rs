//! Entity kinds and the per-key records reconciliation builds up.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::literal::Literal;

static NULL_LITERAL: Literal = Literal::Null;

/// The entity types the seed dataset is made of.
///
/// Variant order is the order batches are emitted in: referenced tables come
/// before the tables that look them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    OrgUnit,
    Ward,
    AdmittingUnit,
    WardUnitMap,
    Staff,
    Course,
    FacultyMember,
    AlertRule,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::OrgUnit,
        EntityKind::Ward,
        EntityKind::AdmittingUnit,
        EntityKind::WardUnitMap,
        EntityKind::Staff,
        EntityKind::Course,
        EntityKind::FacultyMember,
        EntityKind::AlertRule,
    ];

    /// Short identifier used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::OrgUnit => "org_units",
            EntityKind::Ward => "wards",
            EntityKind::AdmittingUnit => "admitting_units",
            EntityKind::WardUnitMap => "ward_unit_map",
            EntityKind::Staff => "staff",
            EntityKind::Course => "courses",
            EntityKind::FacultyMember => "faculty_members",
            EntityKind::AlertRule => "alert_rules",
        }
    }

    /// Destination table, schema-qualified.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::OrgUnit => "core.org_units",
            EntityKind::Ward => "core.wards",
            EntityKind::AdmittingUnit => "core.admitting_units",
            EntityKind::WardUnitMap => "core.ward_unit_map",
            EntityKind::Staff => "core.staff",
            EntityKind::Course => "training.courses",
            EntityKind::FacultyMember => "training.faculty_members",
            EntityKind::AlertRule => "system.alert_rules",
        }
    }

    /// Human-readable label for section headers and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::OrgUnit => "Org units",
            EntityKind::Ward => "Wards",
            EntityKind::AdmittingUnit => "Admitting units",
            EntityKind::WardUnitMap => "Ward-unit mappings",
            EntityKind::Staff => "Staff",
            EntityKind::Course => "Courses",
            EntityKind::FacultyMember => "Faculty",
            EntityKind::AlertRule => "Alert rules",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown entity kind: {s}"))
    }
}

/// A reconciled record: natural key plus the fields contributed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    key: String,
    fields: BTreeMap<String, Literal>,
}

impl EntityRecord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value; unset fields read as NULL.
    pub fn get(&self, field: &str) -> &Literal {
        self.fields.get(field).unwrap_or(&NULL_LITERAL)
    }

    /// True when the field holds a non-NULL value.
    pub fn has_value(&self, field: &str) -> bool {
        !self.get(field).is_null()
    }

    pub fn set(&mut self, field: impl Into<String>, value: Literal) {
        self.fields.insert(field.into(), value);
    }

    /// Builder form of [`EntityRecord::set`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Literal) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}
