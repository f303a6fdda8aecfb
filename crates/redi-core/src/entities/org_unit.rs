use redi_model::{EntityKind, MergeRule};

use crate::reconcile::{FieldSpec, SourceSpec};

pub const ORG_UNITS: &str = "org_units";

/// Header names of the org unit extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgUnitColumns {
    pub id: String,
    pub name: String,
    pub directorate: String,
    pub service_line: String,
}

impl Default for OrgUnitColumns {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            name: "Name".to_string(),
            directorate: "Directorate".to_string(),
            service_line: "Service Line".to_string(),
        }
    }
}

/// Org units keyed by their numeric id. The single source overwrites.
pub fn org_unit_source(columns: &OrgUnitColumns) -> SourceSpec {
    let rule = MergeRule::Overwrite;
    SourceSpec::keyed_by_integer(ORG_UNITS, EntityKind::OrgUnit, columns.id.as_str())
        .field(FieldSpec::text("name", columns.name.as_str(), rule))
        .field(FieldSpec::text("directorate", columns.directorate.as_str(), rule))
        .field(FieldSpec::text("service_line", columns.service_line.as_str(), rule))
}
