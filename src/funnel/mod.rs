//! The signup funnel domain: wizard aggregates, trial quota, step machine,
//! and the controller that ties them together.

pub mod controller;
pub mod model;
pub mod routes;
pub mod step;
pub mod store;
pub mod trial;

pub use controller::{FunnelStatus, RecapView, TrialStatus, WizardController};
pub use model::{ChatbotConfig, CompanyInfo};
pub use step::FunnelStep;
pub use store::{ConfigurationStore, WizardSnapshot};
pub use trial::{DEFAULT_MAX_MESSAGES, TrialSessionGuard};
