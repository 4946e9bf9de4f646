//! Prerequisite gate placed in front of every wizard page.

use crate::core::io::KeyValueStore;
use crate::core::state::{WizardStateStore, WizardStep};
use std::time::Duration;

/// Which earlier steps must be present before a page may render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub difficulty: bool,
    pub universe: bool,
    pub character: bool,
    pub storyline: bool,
}

impl Requirements {
    pub const NONE: Requirements = Requirements {
        difficulty: false,
        universe: false,
        character: false,
        storyline: false,
    };

    /// Everything before `step` is required.
    pub fn for_step(step: WizardStep) -> Self {
        let mut requirements = Self::NONE;
        for prerequisite in step.prerequisites() {
            *requirements.slot(*prerequisite) = true;
        }
        requirements
    }

    pub fn requires(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Difficulty => self.difficulty,
            WizardStep::Universe => self.universe,
            WizardStep::Character => self.character,
            WizardStep::Storyline => self.storyline,
        }
    }

    fn slot(&mut self, step: WizardStep) -> &mut bool {
        match step {
            WizardStep::Difficulty => &mut self.difficulty,
            WizardStep::Universe => &mut self.universe,
            WizardStep::Character => &mut self.character,
            WizardStep::Storyline => &mut self.storyline,
        }
    }
}

/// Required steps with no value in the store, in wizard order.
pub fn missing_prerequisites<S: KeyValueStore>(
    store: &WizardStateStore<S>,
    requirements: &Requirements,
) -> Vec<WizardStep> {
    WizardStep::ALL
        .into_iter()
        .filter(|step| requirements.requires(*step) && !store.has(*step))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    Checking,
    Ready,
    Redirecting,
}

/// What the wrapped page should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Content,
    Blank,
}

/// A navigation the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigate {
    pub to: String,
}

/// Checking → Ready | Redirecting, evaluated once per configuration.
///
/// The host waits [`StepGuard::SETTLE_DELAY`] after mounting, then calls
/// [`StepGuard::check`]. A returned [`Navigate`] must be followed; it is
/// produced at most once until the guard is reconfigured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepGuard {
    requirements: Requirements,
    redirect_to: String,
    phase: GuardPhase,
}

impl StepGuard {
    pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

    pub fn new(requirements: Requirements) -> Self {
        Self {
            requirements,
            redirect_to: WizardStep::Difficulty.path().to_string(),
            phase: GuardPhase::Checking,
        }
    }

    pub fn for_step(step: WizardStep) -> Self {
        Self::new(Requirements::for_step(step))
    }

    pub fn with_redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Replaces the configuration. Any change sends the guard back to
    /// Checking; returns whether that happened.
    pub fn configure(&mut self, requirements: Requirements, redirect_to: &str) -> bool {
        if self.requirements == requirements && self.redirect_to == redirect_to {
            return false;
        }
        self.requirements = requirements;
        self.redirect_to = redirect_to.to_string();
        self.phase = GuardPhase::Checking;
        true
    }

    /// Runs the deferred evaluation. Does nothing outside of Checking.
    pub fn check<S: KeyValueStore>(&mut self, store: &WizardStateStore<S>) -> Option<Navigate> {
        if self.phase != GuardPhase::Checking {
            return None;
        }

        let missing = missing_prerequisites(store, &self.requirements);
        if missing.is_empty() {
            self.phase = GuardPhase::Ready;
            return None;
        }

        log::info!(
            "Missing {:?}, redirecting to {}",
            missing,
            self.redirect_to
        );
        self.phase = GuardPhase::Redirecting;
        Some(Navigate {
            to: self.redirect_to.clone(),
        })
    }

    pub fn view(&self) -> GuardView {
        match self.phase {
            GuardPhase::Checking => GuardView::Loading,
            GuardPhase::Ready => GuardView::Content,
            GuardPhase::Redirecting => GuardView::Blank,
        }
    }
}
