//! Declared sources for each reconciled entity kind.
//!
//! Source order matters: the staff sources are folded in the order
//! [`staff_sources`] returns them.

pub mod alert_rules;
pub mod course;
pub mod faculty;
pub mod org_unit;
pub mod staff;

pub use alert_rules::{ALERT_RULES, AlertRule, alert_rule_store};
pub use course::course_source;
pub use faculty::faculty_member_source;
pub use org_unit::{OrgUnitColumns, org_unit_source};
pub use staff::{
    ALS_CERTIFICATION, BLS_CERTIFICATION, FACULTY_LIST, PARTICIPANTS, staff_sources,
};
