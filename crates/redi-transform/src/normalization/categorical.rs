//! Categorical normalization: free-text source labels to canonical codes.
//!
//! Each [`Normalizer`] is a fixed table plus a [`MissPolicy`]. Matching is
//! exact and case-sensitive; spelling and punctuation variants seen in the
//! extracts are listed explicitly rather than matched loosely.
//!
//! ## Miss policies
//!
//! | Normalizer | On miss |
//! |---|---|
//! | [`STREAM`] | `other` |
//! | [`JOB_FAMILY`] | unresolved |
//! | [`BOOKING_STATUS`] | `enrolled` |
//! | [`COURSE_TYPE`] | unresolved |
//! | [`COURSE_STATUS`] | `closed` |
//! | [`CERT_STATUS`] | `assigned` |

use redi_model::Literal;

/// What a normalizer yields for a label its table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// Fall back to this code.
    Default(&'static str),
    /// Leave the field unset (NULL).
    Unresolved,
}

/// A static label → code table.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    pub name: &'static str,
    entries: &'static [(&'static str, &'static str)],
    pub on_miss: MissPolicy,
}

impl Normalizer {
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, &'static str)],
        on_miss: MissPolicy,
    ) -> Self {
        Self {
            name,
            entries,
            on_miss,
        }
    }

    /// Table lookup only; the miss policy is not applied.
    pub fn lookup(&self, label: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| *code)
    }

    /// Table lookup with the miss policy applied.
    pub fn resolve(&self, label: &str) -> Option<&'static str> {
        self.lookup(label).or(match self.on_miss {
            MissPolicy::Default(code) => Some(code),
            MissPolicy::Unresolved => None,
        })
    }

    /// [`Normalizer::resolve`] as a literal; unresolved labels become NULL.
    pub fn encode(&self, label: &str) -> Literal {
        self.resolve(label).map_or(Literal::Null, Literal::text)
    }

    /// Every label the table recognizes.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(label, _)| *label)
    }

    /// Distinct canonical codes, in table order, including the default.
    pub fn codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = Vec::new();
        let default = match self.on_miss {
            MissPolicy::Default(code) => Some(code),
            MissPolicy::Unresolved => None,
        };
        for code in self.entries.iter().map(|(_, code)| *code).chain(default) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }
}

/// Discipline / stream.
pub const STREAM: Normalizer = Normalizer::new(
    "discipline_stream",
    &[
        ("Medical", "medical"),
        ("Nursing & Midwifery", "nursing"),
        ("Nursing or Midwifery", "nursing"),
        ("Nursing", "nursing"),
        ("Health Practitioner", "allied_health"),
        ("Allied Health", "allied_health"),
        ("Health Practitioners", "allied_health"),
        ("Managerial and Clerical", "admin"),
        ("none", "other"),
        ("", "other"),
    ],
    MissPolicy::Default("other"),
);

/// Payroll job family.
pub const JOB_FAMILY: Normalizer = Normalizer::new(
    "job_family",
    &[
        ("Medical", "medical"),
        ("Visiting Medical Staff", "visiting_medical"),
        ("Registered / Clinical Nurse - Grades 5-6", "rn_cn_5_6"),
        ("Enrolled Nurses - Grades 3-4", "en_3_4"),
        ("Assistant In Nursing - Grades 1-2", "ain_1_2"),
        ("Nurse Manager - Grade 7-8", "nm_7_8"),
        ("Nurse Executive - Grade 9-13", "ne_9_13"),
        ("Health Practitioners", "health_prac"),
        ("Health Clinical Assistants", "health_clin_asst"),
        ("Managerial and Clerical", "admin_clerical"),
    ],
    MissPolicy::Unresolved,
);

/// Course booking / enrolment status.
pub const BOOKING_STATUS: Normalizer = Normalizer::new(
    "booking_status",
    &[
        ("Finalised", "finalised"),
        ("Attended", "attended"),
        ("Completed", "completed"),
        ("Enrolled", "enrolled"),
        ("Booked", "booked"),
        ("Did Not Attend", "did_not_attend"),
        ("Further Assessment Required", "further_assessment"),
        ("Cancel Request", "cancel_request"),
        ("Rejected", "rejected"),
    ],
    MissPolicy::Default("enrolled"),
);

pub const COURSE_TYPE: Normalizer = Normalizer::new(
    "course_type",
    &[
        ("Full Course", "full_course"),
        ("Assessment", "assessment"),
        ("Refresher", "refresher"),
        ("ANZCA Refresher", "anzca_refresher"),
        ("Sim Workshop", "sim_workshop"),
    ],
    MissPolicy::Unresolved,
);

pub const COURSE_STATUS: Normalizer = Normalizer::new(
    "course_status",
    &[
        ("Open", "open"),
        ("Closed", "closed"),
        ("Cancelled", "cancelled"),
    ],
    MissPolicy::Default("closed"),
);

/// Certification completion status.
pub const CERT_STATUS: Normalizer = Normalizer::new(
    "cert_status",
    &[
        ("Acquired", "acquired"),
        ("Overdue", "overdue"),
        ("Assigned", "assigned"),
        ("Expired", "expired"),
        ("In Progress", "in_progress"),
    ],
    MissPolicy::Default("assigned"),
);

/// All normalizers, for listings.
pub const ALL: [&Normalizer; 6] = [
    &STREAM,
    &JOB_FAMILY,
    &BOOKING_STATUS,
    &COURSE_TYPE,
    &COURSE_STATUS,
    &CERT_STATUS,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(STREAM.lookup("Medical"), Some("medical"));
        assert_eq!(STREAM.lookup("medical"), None);
        assert_eq!(STREAM.resolve("medical"), Some("other"));
    }

    #[test]
    fn codes_include_default_once() {
        assert_eq!(
            COURSE_STATUS.codes(),
            vec!["open", "closed", "cancelled"]
        );
        assert_eq!(
            STREAM.codes(),
            vec!["medical", "nursing", "allied_health", "admin", "other"]
        );
    }
}
