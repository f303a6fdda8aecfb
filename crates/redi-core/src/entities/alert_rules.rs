//! Sample alert rules shipped with every seed.

use redi_model::{EntityRecord, Literal};

use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertRule {
    pub name: &'static str,
    pub description: &'static str,
    pub domain: &'static str,
    pub metric: &'static str,
    /// `None` aggregates across the whole facility.
    pub group_by: Option<&'static str>,
    pub method: &'static str,
    pub threshold_value: f64,
    pub lookback_periods: i64,
}

pub const ALERT_RULES: [AlertRule; 5] = [
    AlertRule {
        name: "High Escalation Rate - Ward",
        description: "Fires when a ward's daily escalation count exceeds 2 standard deviations above its 30-day mean",
        domain: "escalation",
        metric: "daily_escalation_count",
        group_by: Some("ward"),
        method: "z_score",
        threshold_value: 2.0,
        lookback_periods: 30,
    },
    AlertRule {
        name: "High Escalation Rate - Unit",
        description: "Fires when an admitting unit's daily escalation count exceeds 2 standard deviations above its 30-day mean",
        domain: "escalation",
        metric: "daily_escalation_count",
        group_by: Some("unit"),
        method: "z_score",
        threshold_value: 2.0,
        lookback_periods: 30,
    },
    AlertRule {
        name: "Falling ALS Compliance",
        description: "Fires when an org unit's ALS compliance shows a negative slope over 8 consecutive weeks",
        domain: "training",
        metric: "compliance_pct",
        group_by: Some("org_unit"),
        method: "trend_slope",
        threshold_value: -0.5,
        lookback_periods: 8,
    },
    AlertRule {
        name: "Falling BLS Compliance",
        description: "Fires when an org unit's BLS compliance shows a negative slope over 8 consecutive weeks",
        domain: "training",
        metric: "compliance_pct",
        group_by: Some("org_unit"),
        method: "trend_slope",
        threshold_value: -0.5,
        lookback_periods: 8,
    },
    AlertRule {
        name: "Critical Escalation Spike",
        description: "Fires when total critical escalations (code blue + MET + stroke + trauma) exceed 10 in a single day",
        domain: "escalation",
        metric: "daily_critical_count",
        group_by: None,
        method: "threshold",
        threshold_value: 10.0,
        lookback_periods: 1,
    },
];

impl AlertRule {
    pub fn to_record(&self) -> EntityRecord {
        EntityRecord::new(self.name)
            .with("description", Literal::text(self.description))
            .with("domain", Literal::text(self.domain))
            .with("metric", Literal::text(self.metric))
            .with("group_by", Literal::from(self.group_by))
            .with("method", Literal::text(self.method))
            .with("threshold_value", Literal::Decimal(self.threshold_value))
            .with("lookback_periods", Literal::Integer(self.lookback_periods))
    }
}

pub fn alert_rule_store() -> EntityStore {
    ALERT_RULES.iter().map(AlertRule::to_record).collect()
}
