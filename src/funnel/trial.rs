//! Trial session guard — bounds the number of live preview messages.

/// Default ceiling on trial messages.
pub const DEFAULT_MAX_MESSAGES: u32 = 20;

/// A one-time hint surfaced when a specific number of messages remains.
#[derive(Debug, Clone)]
pub struct TrialHint {
    /// Messages remaining from the ceiling when this hint fires.
    pub remaining: u32,
    pub text: String,
}

/// Tracks how many user messages the trial preview has consumed.
///
/// Invariant: `0 <= count <= max`, monotonically non-decreasing. The ceiling
/// is absorbing: recording past it is a no-op, not an error. Performs no
/// I/O; the caller owns persistence of the counter.
#[derive(Debug, Clone)]
pub struct TrialSessionGuard {
    count: u32,
    max: u32,
    hints: Vec<TrialHint>,
}

fn default_hints() -> Vec<TrialHint> {
    vec![
        TrialHint {
            remaining: 5,
            text: "5 trial messages left — almost there!".to_string(),
        },
        TrialHint {
            remaining: 2,
            text: "Only 2 trial messages left.".to_string(),
        },
        TrialHint {
            remaining: 0,
            text: "Trial limit reached. Continue to pick a plan.".to_string(),
        },
    ]
}

impl Default for TrialSessionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl TrialSessionGuard {
    /// Fresh guard with the default hint thresholds.
    pub fn new(max: u32) -> Self {
        Self {
            count: 0,
            max,
            hints: default_hints(),
        }
    }

    /// Guard hydrated from a persisted count, clamped to the ceiling.
    pub fn from_count(count: u32, max: u32) -> Self {
        Self {
            count: count.min(max),
            max,
            hints: default_hints(),
        }
    }

    /// Guard with custom hints (offsets from the ceiling).
    pub fn with_hints(max: u32, hints: Vec<TrialHint>) -> Self {
        Self {
            count: 0,
            max,
            hints,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Record one user message. A no-op once the ceiling is reached.
    pub fn record_message(&mut self) {
        if self.count < self.max {
            self.count += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.count >= self.max
    }

    /// Percentage of the quota consumed. 0 when the ceiling is 0.
    pub fn progress_percent(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.count) / f64::from(self.max)
    }

    /// The hint whose threshold the count sits on right now, if any.
    ///
    /// This is an exact-equality match, which is sound because
    /// [`record_message`](Self::record_message) only ever advances the count
    /// by one, so no threshold can be stepped over. A caller that ever
    /// batches increments must check every crossed value itself.
    pub fn active_hint(&self) -> Option<&str> {
        self.hints
            .iter()
            .filter(|h| h.remaining <= self.max)
            .find(|h| self.count == self.max - h.remaining)
            .map(|h| h.text.as_str())
    }
}
