//! Funnel step state machine — tracks which page of the signup flow the
//! customer is on.

use serde::{Deserialize, Serialize};

/// The ordered steps of the signup funnel.
///
/// Progresses linearly: CompanyInfo → RecapAndTest → Payment → Confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunnelStep {
    CompanyInfo,
    RecapAndTest,
    Payment,
    Confirmation,
}

impl FunnelStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: FunnelStep) -> bool {
        use FunnelStep::*;
        matches!(
            (self, target),
            (CompanyInfo, RecapAndTest) | (RecapAndTest, Payment) | (Payment, Confirmation)
        )
    }

    /// Whether this step is terminal (the funnel is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmation)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<FunnelStep> {
        use FunnelStep::*;
        match self {
            CompanyInfo => Some(RecapAndTest),
            RecapAndTest => Some(Payment),
            Payment => Some(Confirmation),
            Confirmation => None,
        }
    }

    /// The route path serving this step.
    pub fn route_path(&self) -> &'static str {
        match self {
            Self::CompanyInfo => "company-info",
            Self::RecapAndTest => "recap-and-test",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        }
    }
}

impl Default for FunnelStep {
    fn default() -> Self {
        Self::CompanyInfo
    }
}

impl std::fmt::Display for FunnelStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.route_path())
    }
}
