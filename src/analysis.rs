//! AI health analysis, gated by account tier.
//!
//! Basic accounts see the locked upsell view and no report is generated
//! for them. Premium accounts get the personalized report, which in the
//! current product scope is a fixed demo payload, not a model inference.

use serde::Serialize;

use crate::models::AccountTier;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summary: &'static str,
    pub risk: &'static str,
    pub recommendations: Vec<&'static str>,
}

/// What the analysis view shows for a given account.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisView {
    Locked {
        message: &'static str,
        features: Vec<&'static str>,
    },
    Ready {
        report: AnalysisReport,
    },
}

const LOCKED_MESSAGE: &str = "This feature is available only for Premium users";

const PREMIUM_FEATURES: [&str; 5] = [
    "Full medical history analysis",
    "Disease prediction",
    "Medication tracking",
    "Personalized recommendations",
    "Health risk alerts",
];

pub fn premium_report() -> AnalysisReport {
    AnalysisReport {
        summary: "Patient shows stable diabetes management. Blood sugar under control and vitals are within normal range.",
        risk: "Low Risk",
        recommendations: vec![
            "Continue Metformin",
            "Walk 30 minutes daily",
            "Avoid late night meals",
            "Repeat blood test in 3 months",
        ],
    }
}

pub fn view_for(tier: AccountTier) -> AnalysisView {
    if tier.is_premium() {
        AnalysisView::Ready {
            report: premium_report(),
        }
    } else {
        AnalysisView::Locked {
            message: LOCKED_MESSAGE,
            features: PREMIUM_FEATURES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tier_is_locked() {
        match view_for(AccountTier::Basic) {
            AnalysisView::Locked { message, features } => {
                assert!(message.contains("Premium"));
                assert_eq!(features.len(), 5);
            }
            AnalysisView::Ready { .. } => panic!("basic tier must not get a report"),
        }
    }

    #[test]
    fn premium_tier_gets_populated_report() {
        match view_for(AccountTier::Premium) {
            AnalysisView::Ready { report } => {
                assert!(!report.summary.is_empty());
                assert_eq!(report.risk, "Low Risk");
                assert!(!report.recommendations.is_empty());
            }
            AnalysisView::Locked { .. } => panic!("premium tier must get a report"),
        }
    }

    #[test]
    fn view_serializes_with_status_tag() {
        let locked = serde_json::to_value(view_for(AccountTier::Basic)).unwrap();
        assert_eq!(locked["status"], "locked");

        let ready = serde_json::to_value(view_for(AccountTier::Premium)).unwrap();
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["report"]["risk"], "Low Risk");
    }
}
