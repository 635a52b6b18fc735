//! Subscription plan catalog and selection state.
//!
//! Pure selection over a static catalog: no server round-trip, and the
//! recommended flag is advisory only. The selection is an index into the
//! catalog, never a copy of the entry.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::FunnelError;

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOption {
    pub name: String,
    pub monthly_price: Decimal,
    pub features: Vec<String>,
    pub recommended: bool,
}

fn option(
    name: &str,
    monthly_price: Decimal,
    features: &[&str],
    recommended: bool,
) -> SubscriptionOption {
    SubscriptionOption {
        name: name.to_string(),
        monthly_price,
        features: features.iter().map(|f| f.to_string()).collect(),
        recommended,
    }
}

static CATALOG: LazyLock<Vec<SubscriptionOption>> = LazyLock::new(|| {
    vec![
        option(
            "Starter",
            dec!(29),
            &[
                "1 chatbot",
                "500 conversations / month",
                "Email support",
            ],
            false,
        ),
        option(
            "Growth",
            dec!(79),
            &[
                "3 chatbots",
                "5,000 conversations / month",
                "Custom branding",
                "Priority support",
            ],
            true,
        ),
        option(
            "Scale",
            dec!(199),
            &[
                "Unlimited chatbots",
                "50,000 conversations / month",
                "Custom branding",
                "Dedicated support",
                "API access",
            ],
            false,
        ),
    ]
});

/// The static plan catalog, in display order.
pub fn catalog() -> &'static [SubscriptionOption] {
    &CATALOG
}

/// Selection state over the catalog.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSelector {
    selected: Option<usize>,
}

impl SubscriptionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a plan by name. Unknown names are rejected at this boundary.
    pub fn select(&mut self, name: &str) -> Result<&'static SubscriptionOption, FunnelError> {
        let index = catalog()
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| FunnelError::UnknownPlan {
                name: name.to_string(),
            })?;
        self.selected = Some(index);
        Ok(&catalog()[index])
    }

    /// The currently selected catalog entry, if any.
    pub fn current(&self) -> Option<&'static SubscriptionOption> {
        self.selected.map(|i| &catalog()[i])
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_recommended_plan() {
        let recommended: Vec<_> = catalog().iter().filter(|o| o.recommended).collect();
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].name, "Growth");
    }

    #[test]
    fn prices_serialize_as_decimal_strings() {
        let json = serde_json::to_value(&catalog()[0]).unwrap();
        assert_eq!(json["monthlyPrice"], "29");
        assert_eq!(json["name"], "Starter");
    }

    #[test]
    fn select_known_plan() {
        let mut selector = SubscriptionSelector::new();
        assert!(selector.current().is_none());

        let selected = selector.select("Growth").unwrap();
        assert_eq!(selected.monthly_price, dec!(79));
        assert_eq!(selector.current().unwrap().name, "Growth");
    }

    #[test]
    fn selection_is_a_reference_into_the_catalog() {
        let mut selector = SubscriptionSelector::new();
        selector.select("Scale").unwrap();
        assert!(std::ptr::eq(selector.current().unwrap(), &catalog()[2]));
    }

    #[test]
    fn reselect_replaces_previous_choice() {
        let mut selector = SubscriptionSelector::new();
        selector.select("Starter").unwrap();
        selector.select("Scale").unwrap();
        assert_eq!(selector.current().unwrap().name, "Scale");
    }

    #[test]
    fn unknown_plan_is_rejected_and_keeps_selection() {
        let mut selector = SubscriptionSelector::new();
        selector.select("Growth").unwrap();

        let err = selector.select("Enterprise").unwrap_err();
        assert!(matches!(err, FunnelError::UnknownPlan { ref name } if name == "Enterprise"));
        assert_eq!(selector.current().unwrap().name, "Growth");
    }

    #[test]
    fn recommended_flag_does_not_constrain_selection() {
        let mut selector = SubscriptionSelector::new();
        // Selecting a non-recommended plan is fine.
        assert!(selector.select("Starter").is_ok());
    }

    #[test]
    fn clear_resets_selection() {
        let mut selector = SubscriptionSelector::new();
        selector.select("Growth").unwrap();
        selector.clear();
        assert!(selector.current().is_none());
    }
}
