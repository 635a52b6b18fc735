//! WizardController — sequences the funnel steps and gates progression.
//!
//! "Which step am I on" and "can I advance" are answered here and nowhere
//! else: one named-state machine ([`FunnelStep`]) and a single transition
//! function ([`advance`](WizardController::advance)).

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::FunnelError;
use crate::funnel::model::{ChatbotConfig, CompanyInfo};
use crate::funnel::step::FunnelStep;
use crate::funnel::store::ConfigurationStore;
use crate::funnel::trial::TrialSessionGuard;

/// Trial progress as reported to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialStatus {
    pub count: u32,
    pub max: u32,
    pub exhausted: bool,
    pub progress_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// What the recap-and-test step should render.
///
/// `Loading` is the neutral placeholder shown while wizard state is
/// missing; the controller never redirects on its own.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RecapView {
    Ready {
        config: ChatbotConfig,
        company: CompanyInfo,
        trial: TrialStatus,
    },
    Loading,
}

/// Funnel status returned by the REST surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStatus {
    pub step: FunnelStep,
    pub hydrated: bool,
    pub can_advance: bool,
    pub trial: TrialStatus,
}

/// Coordinates the funnel: hydration per page entry, write-through edits,
/// and the quota-gated advance action.
pub struct WizardController {
    store: ConfigurationStore,
    guard: Arc<RwLock<TrialSessionGuard>>,
    step: RwLock<FunnelStep>,
}

impl WizardController {
    /// Build a controller, hydrating the trial counter from storage.
    pub async fn new(store: ConfigurationStore, max_messages: u32) -> Self {
        let count = store.load_trial_count().await;
        let guard = TrialSessionGuard::from_count(count, max_messages);
        Self {
            store,
            guard: Arc::new(RwLock::new(guard)),
            step: RwLock::new(FunnelStep::default()),
        }
    }

    /// The shared trial guard, for wiring into the preview bridge.
    pub fn guard(&self) -> Arc<RwLock<TrialSessionGuard>> {
        self.guard.clone()
    }

    pub async fn current_step(&self) -> FunnelStep {
        *self.step.read().await
    }

    async fn trial_snapshot(&self) -> TrialStatus {
        let guard = self.guard.read().await;
        TrialStatus {
            count: guard.count(),
            max: guard.max(),
            exhausted: guard.is_exhausted(),
            progress_percent: guard.progress_percent(),
            hint: guard.active_hint().map(str::to_string),
        }
    }

    pub async fn status(&self) -> FunnelStatus {
        FunnelStatus {
            step: self.current_step().await,
            hydrated: self.store.hydrate().await.is_ready(),
            can_advance: self.can_advance().await,
            trial: self.trial_snapshot().await,
        }
    }

    /// Validate and persist company information submitted by the form.
    ///
    /// This is the boundary where external input enters the core.
    pub async fn submit_company_info(&self, info: CompanyInfo) -> Result<(), FunnelError> {
        info.validate()?;
        self.store.save_company(&info).await;
        Ok(())
    }

    /// Write through a chatbot configuration edit made during the recap.
    pub async fn save_config(&self, config: ChatbotConfig) {
        self.store.save_config(&config).await;
    }

    /// Hydrate the recap-and-test view.
    ///
    /// Renders interactive content only when both aggregates are present;
    /// otherwise the placeholder, with no further action.
    pub async fn enter_recap(&self) -> RecapView {
        let snapshot = self.store.hydrate().await;
        match (snapshot.config, snapshot.company) {
            (Some(config), Some(company)) => RecapView::Ready {
                config,
                company,
                trial: self.trial_snapshot().await,
            },
            _ => RecapView::Loading,
        }
    }

    /// Whether the advance action is currently enabled.
    ///
    /// RecapAndTest is gated on quota exhaustion and nothing else — an
    /// incomplete recap does not block it. CompanyInfo field validation
    /// happens at submission, not here.
    pub async fn can_advance(&self) -> bool {
        match self.current_step().await {
            FunnelStep::RecapAndTest => self.guard.read().await.is_exhausted(),
            FunnelStep::Confirmation => false,
            _ => true,
        }
    }

    /// The single transition function.
    pub async fn advance(&self) -> Result<FunnelStep, FunnelError> {
        let mut step = self.step.write().await;

        if *step == FunnelStep::RecapAndTest {
            let guard = self.guard.read().await;
            if !guard.is_exhausted() {
                return Err(FunnelError::TrialNotExhausted {
                    count: guard.count(),
                    max: guard.max(),
                });
            }
        }

        let next = step.next().ok_or(FunnelError::AtTerminalStep)?;
        info!(from = %step, to = %next, "Funnel advanced");
        *step = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn acme() -> CompanyInfo {
        CompanyInfo {
            name: "Acme".to_string(),
            industry: "Retail".to_string(),
            description: "Everything store".to_string(),
            contact_email: "hello@acme.test".to_string(),
            website: None,
        }
    }

    async fn controller(max: u32) -> WizardController {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        WizardController::new(store, max).await
    }

    async fn exhaust(controller: &WizardController) {
        let guard = controller.guard();
        let mut guard = guard.write().await;
        while !guard.is_exhausted() {
            guard.record_message();
        }
    }

    #[tokio::test]
    async fn starts_at_company_info() {
        let c = controller(20).await;
        assert_eq!(c.current_step().await, FunnelStep::CompanyInfo);
    }

    #[tokio::test]
    async fn company_info_step_advances_freely() {
        let c = controller(20).await;
        let next = c.advance().await.unwrap();
        assert_eq!(next, FunnelStep::RecapAndTest);
    }

    #[tokio::test]
    async fn recap_blocks_until_quota_spent() {
        let c = controller(3).await;
        c.advance().await.unwrap(); // -> RecapAndTest

        assert!(!c.can_advance().await);
        let err = c.advance().await.unwrap_err();
        assert!(matches!(
            err,
            FunnelError::TrialNotExhausted { count: 0, max: 3 }
        ));
        assert_eq!(c.current_step().await, FunnelStep::RecapAndTest);

        exhaust(&c).await;
        assert!(c.can_advance().await);
        assert_eq!(c.advance().await.unwrap(), FunnelStep::Payment);
    }

    #[tokio::test]
    async fn advance_stops_at_terminal_step() {
        let c = controller(0).await; // zero quota: recap gate is already open
        c.advance().await.unwrap();
        c.advance().await.unwrap();
        c.advance().await.unwrap();
        assert_eq!(c.current_step().await, FunnelStep::Confirmation);

        let err = c.advance().await.unwrap_err();
        assert!(matches!(err, FunnelError::AtTerminalStep));
        assert!(!c.can_advance().await);
    }

    #[tokio::test]
    async fn recap_shows_placeholder_until_hydrated() {
        let store = ConfigurationStore::new(Arc::new(MemoryStore::new()));
        let c = WizardController::new(store.clone(), 20).await;

        assert!(matches!(c.enter_recap().await, RecapView::Loading));

        store.save_config(&ChatbotConfig::default()).await;
        // Still only one aggregate present.
        assert!(matches!(c.enter_recap().await, RecapView::Loading));

        store.save_company(&acme()).await;
        match c.enter_recap().await {
            RecapView::Ready {
                company, trial, ..
            } => {
                assert_eq!(company.name, "Acme");
                assert_eq!(trial.count, 0);
            }
            RecapView::Loading => panic!("expected hydrated recap"),
        }
    }

    #[tokio::test]
    async fn corrupt_config_keeps_recap_on_placeholder() {
        let memory = MemoryStore::new();
        memory
            .insert_raw(crate::funnel::model::storage_keys::CHATBOT_CONFIG, "{bad")
            .await;
        let store = ConfigurationStore::new(Arc::new(memory));
        store.save_company(&acme()).await;

        let c = WizardController::new(store, 20).await;
        assert!(matches!(c.enter_recap().await, RecapView::Loading));
    }

    #[tokio::test]
    async fn submit_rejects_invalid_company_info() {
        let c = controller(20).await;
        let mut info = acme();
        info.contact_email = "nope".to_string();

        assert!(c.submit_company_info(info).await.is_err());
        assert!(!c.status().await.hydrated);
    }

    #[tokio::test]
    async fn trial_counter_hydrates_from_storage() {
        let memory = Arc::new(MemoryStore::new());
        let store = ConfigurationStore::new(memory.clone());
        store.save_trial_count(18).await;

        let c = WizardController::new(ConfigurationStore::new(memory), 20).await;
        let status = c.status().await;
        assert_eq!(status.trial.count, 18);
        assert_eq!(status.trial.hint.as_deref(), Some("Only 2 trial messages left."));
    }

    #[tokio::test]
    async fn status_reflects_exhaustion_gate() {
        let c = controller(1).await;
        c.submit_company_info(acme()).await.unwrap();
        c.save_config(ChatbotConfig::default()).await;
        c.advance().await.unwrap(); // -> RecapAndTest

        let before = c.status().await;
        assert!(before.hydrated);
        assert!(!before.can_advance);

        exhaust(&c).await;
        let after = c.status().await;
        assert!(after.trial.exhausted);
        assert!(after.can_advance);
    }
}
