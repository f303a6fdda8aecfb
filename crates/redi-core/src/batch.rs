//! Batch assembly: reconciled stores to upsert batches.
//!
//! Each entity kind has a fixed [`BatchLayout`] naming its destination
//! columns and conflict behaviour. Rows follow store order, which is key
//! first-sighting order.
//!
//! | Table | Key | On conflict |
//! |---|---|---|
//! | core.org_units | id | coalesce, touch updated_at |
//! | core.wards | code | do nothing |
//! | core.admitting_units | code | coalesce |
//! | core.ward_unit_map | ward_id, admitting_unit_id | do nothing |
//! | core.staff | payroll_id | coalesce, touch last_seen_at, updated_at |
//! | training.courses | source_id | coalesce title/type/status, touch updated_at |
//! | training.faculty_members | source_id | do nothing |
//! | system.alert_rules | name | do nothing |

use tracing::warn;

use redi_model::{
    Cell, ConflictRule, EntityKind, EntityRecord, KeyLookup, Literal, UpsertBatch, UpsertRow,
};
use redi_transform::encode_integer;

use crate::relationships::Relationships;
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    Text,
    Integer,
}

/// Where a value column's cell comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    /// The record field of the same name.
    Field(&'static str),
    /// The record field, or a fixed code when it is unset.
    FieldOr(&'static str, &'static str),
    /// Surrogate id looked up in `table` by the record's `field`.
    Lookup {
        column: &'static str,
        field: &'static str,
        table: &'static str,
        key_column: &'static str,
    },
}

impl ValueColumn {
    pub fn name(&self) -> &'static str {
        match self {
            ValueColumn::Field(name) | ValueColumn::FieldOr(name, _) => *name,
            ValueColumn::Lookup { column, .. } => *column,
        }
    }

    fn cell(&self, record: &EntityRecord) -> Cell {
        match self {
            ValueColumn::Field(name) => record.get(name).clone().into(),
            ValueColumn::FieldOr(name, default) => {
                record.get(name).clone().or(Literal::text(*default)).into()
            }
            ValueColumn::Lookup {
                field,
                table,
                key_column,
                ..
            } => KeyLookup::id_by(*table, *key_column, record.get(field).clone()).into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Coalesce {
    pub columns: &'static [&'static str],
    pub touch: &'static [&'static str],
}

/// Destination shape of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct BatchLayout {
    pub entity: EntityKind,
    pub key_column: &'static str,
    pub key_encoding: KeyEncoding,
    pub values: &'static [ValueColumn],
    /// `None` leaves existing rows untouched.
    pub coalesce: Option<Coalesce>,
}

pub const ORG_UNIT_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::OrgUnit,
    key_column: "id",
    key_encoding: KeyEncoding::Integer,
    values: &[
        ValueColumn::Field("name"),
        ValueColumn::Field("directorate"),
        ValueColumn::Field("service_line"),
    ],
    coalesce: Some(Coalesce {
        columns: &["name", "directorate", "service_line"],
        touch: &["updated_at"],
    }),
};

pub const WARD_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::Ward,
    key_column: "code",
    key_encoding: KeyEncoding::Text,
    values: &[],
    coalesce: None,
};

pub const ADMITTING_UNIT_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::AdmittingUnit,
    key_column: "code",
    key_encoding: KeyEncoding::Text,
    values: &[
        ValueColumn::Field("division"),
        ValueColumn::Field("subdivision"),
    ],
    coalesce: Some(Coalesce {
        columns: &["division", "subdivision"],
        touch: &[],
    }),
};

pub const STAFF_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::Staff,
    key_column: "payroll_id",
    key_encoding: KeyEncoding::Text,
    values: &[
        ValueColumn::Field("given_name"),
        ValueColumn::Field("surname"),
        ValueColumn::Field("email"),
        ValueColumn::FieldOr("discipline_stream_code", "other"),
        ValueColumn::Field("job_family_code"),
        ValueColumn::Field("org_unit_id"),
        ValueColumn::Field("facility"),
        ValueColumn::Field("manager_name"),
    ],
    coalesce: Some(Coalesce {
        columns: &[
            "given_name",
            "surname",
            "email",
            "discipline_stream_code",
            "job_family_code",
            "org_unit_id",
            "facility",
            "manager_name",
        ],
        touch: &["last_seen_at", "updated_at"],
    }),
};

pub const COURSE_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::Course,
    key_column: "source_id",
    key_encoding: KeyEncoding::Integer,
    values: &[
        ValueColumn::Field("title"),
        ValueColumn::Field("course_type_code"),
        ValueColumn::Field("course_date"),
        ValueColumn::Field("start_time"),
        ValueColumn::Field("end_time"),
        ValueColumn::Field("duration_hours"),
        ValueColumn::Field("venue"),
        ValueColumn::Field("capacity"),
        ValueColumn::Field("status_code"),
        ValueColumn::Field("outlook_id"),
    ],
    coalesce: Some(Coalesce {
        columns: &["title", "course_type_code", "status_code"],
        touch: &["updated_at"],
    }),
};

pub const FACULTY_MEMBER_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::FacultyMember,
    key_column: "source_id",
    key_encoding: KeyEncoding::Integer,
    values: &[
        ValueColumn::Field("given_name"),
        ValueColumn::Field("surname"),
        ValueColumn::Field("email"),
        ValueColumn::Field("mobile"),
        ValueColumn::Field("payroll_id"),
        ValueColumn::Field("discipline"),
        ValueColumn::Field("discipline_stream_code"),
        ValueColumn::Field("certification_date"),
        ValueColumn::Field("is_inactive"),
        ValueColumn::Lookup {
            column: "staff_id",
            field: "payroll_id",
            table: "core.staff",
            key_column: "payroll_id",
        },
    ],
    coalesce: None,
};

pub const ALERT_RULE_LAYOUT: BatchLayout = BatchLayout {
    entity: EntityKind::AlertRule,
    key_column: "name",
    key_encoding: KeyEncoding::Text,
    values: &[
        ValueColumn::Field("description"),
        ValueColumn::Field("domain"),
        ValueColumn::Field("metric"),
        ValueColumn::Field("group_by"),
        ValueColumn::Field("method"),
        ValueColumn::Field("threshold_value"),
        ValueColumn::Field("lookback_periods"),
    ],
    coalesce: None,
};

impl BatchLayout {
    pub fn conflict_rule(&self) -> ConflictRule {
        match self.coalesce {
            Some(coalesce) => ConflictRule::coalesce(coalesce.columns, coalesce.touch),
            None => ConflictRule::DoNothing,
        }
    }

    fn key_cell(&self, key: &str) -> Literal {
        match self.key_encoding {
            KeyEncoding::Text => Literal::text(key),
            KeyEncoding::Integer => encode_integer(Some(key)),
        }
    }

    /// One row per record, in store order. Records whose key does not encode
    /// are left out with a warning.
    pub fn assemble(&self, store: &EntityStore) -> UpsertBatch {
        let value_columns: Vec<&str> = self.values.iter().map(ValueColumn::name).collect();
        let mut batch = UpsertBatch::new(
            self.entity,
            &[self.key_column],
            &value_columns,
            self.conflict_rule(),
        );
        for record in store.records() {
            let key = self.key_cell(record.key());
            if key.is_null() {
                warn!(
                    entity = %self.entity,
                    key = record.key(),
                    "dropping record with a non-numeric key"
                );
                continue;
            }
            let values = self.values.iter().map(|column| column.cell(record)).collect();
            batch.push(UpsertRow::new(vec![key.into()], values));
        }
        batch
    }
}

/// Everything reconciliation produced, ready for assembly.
#[derive(Debug, Clone, Default)]
pub struct ReconciledData {
    pub org_units: EntityStore,
    /// Wards (left), admitting units (right) and their pairings.
    pub wards_and_units: Relationships,
    pub staff: EntityStore,
    pub courses: EntityStore,
    pub faculty_members: EntityStore,
    pub alert_rules: EntityStore,
}

/// Ward to admitting unit pairs, both sides resolved by code at load time.
pub fn ward_unit_map_batch(relationships: &Relationships) -> UpsertBatch {
    let mut batch = UpsertBatch::new(
        EntityKind::WardUnitMap,
        &["ward_id", "admitting_unit_id"],
        &[],
        ConflictRule::DoNothing,
    );
    let wards = EntityKind::Ward.table();
    let units = EntityKind::AdmittingUnit.table();
    for (ward, unit) in relationships.pairs() {
        let key = vec![
            KeyLookup::id_by(wards, "code", Literal::text(ward)).into(),
            KeyLookup::id_by(units, "code", Literal::text(unit)).into(),
        ];
        batch.push(UpsertRow::new(key, Vec::new()));
    }
    batch
}

/// All batches, in [`EntityKind`] order. Empty batches are kept.
pub fn assemble_batches(data: &ReconciledData) -> Vec<UpsertBatch> {
    vec![
        ORG_UNIT_LAYOUT.assemble(&data.org_units),
        WARD_LAYOUT.assemble(&data.wards_and_units.left_store()),
        ADMITTING_UNIT_LAYOUT.assemble(&data.wards_and_units.right_store()),
        ward_unit_map_batch(&data.wards_and_units),
        STAFF_LAYOUT.assemble(&data.staff),
        COURSE_LAYOUT.assemble(&data.courses),
        FACULTY_MEMBER_LAYOUT.assemble(&data.faculty_members),
        ALERT_RULE_LAYOUT.assemble(&data.alert_rules),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_stream_defaults_to_other() {
        let store: EntityStore = [EntityRecord::new("100234")].into_iter().collect();
        let batch = STAFF_LAYOUT.assemble(&store);
        let stream_idx = batch
            .value_columns
            .iter()
            .position(|c| c == "discipline_stream_code")
            .unwrap();
        assert_eq!(
            batch.rows[0].values[stream_idx],
            Cell::Value(Literal::text("other"))
        );
    }

    #[test]
    fn integer_keys_that_do_not_parse_are_dropped() {
        let store: EntityStore = [EntityRecord::new("4101"), EntityRecord::new("n/a")]
            .into_iter()
            .collect();
        let batch = ORG_UNIT_LAYOUT.assemble(&store);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.rows[0].key, vec![Cell::Value(Literal::Integer(4101))]);
    }
}
