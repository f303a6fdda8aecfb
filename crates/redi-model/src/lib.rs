pub mod batch;
pub mod entity;
pub mod literal;
pub mod merge;
pub mod row;

pub use batch::{Cell, ConflictRule, KeyLookup, UpsertBatch, UpsertRow};
pub use entity::{EntityKind, EntityRecord};
pub use literal::{Literal, escape_quotes, format_decimal};
pub use merge::{Candidate, MergeRule};
pub use row::Row;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_reads_unset_fields_as_null() {
        let record = EntityRecord::new("100234").with("surname", Literal::text("Smith"));
        assert_eq!(record.key(), "100234");
        assert!(record.has_value("surname"));
        assert!(!record.has_value("email"));
        assert!(record.get("email").is_null());
    }

    #[test]
    fn row_treats_missing_and_blank_alike() {
        let row = Row::from_pairs([("GivenName", "  Ann "), ("Mail", "   ")]);
        assert_eq!(row.text("GivenName"), "Ann");
        assert!(row.is_blank("Mail"));
        assert!(row.is_blank("Surname"));
        assert_eq!(row.get("Surname"), None);
    }
}
