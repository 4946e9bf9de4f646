use crate::core::io::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four wizard steps, in the order they are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Difficulty,
    Universe,
    Character,
    Storyline,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Difficulty,
        WizardStep::Universe,
        WizardStep::Character,
        WizardStep::Storyline,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            WizardStep::Difficulty => "rpg-difficulty",
            WizardStep::Universe => "rpg-universe",
            WizardStep::Character => "rpg-character",
            WizardStep::Storyline => "rpg-storyline",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            WizardStep::Difficulty => "/",
            WizardStep::Universe => "/universe",
            WizardStep::Character => "/character",
            WizardStep::Storyline => "/storyline",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.path() == path)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Steps that must be complete before this one may be shown.
    pub fn prerequisites(self) -> &'static [WizardStep] {
        const STEPS: &[WizardStep] = &WizardStep::ALL;
        &STEPS[..self.index()]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Difficulty => "difficulty",
            WizardStep::Universe => "universe",
            WizardStep::Character => "character",
            WizardStep::Storyline => "storyline",
        };
        f.write_str(name)
    }
}

/// Typed view over the wizard's persisted progress.
///
/// Values are stored as JSON under [`WizardStep::storage_key`]. Nothing here
/// enforces step ordering; that is the job of
/// [`StepGuard`](crate::services::guard::StepGuard). Backend failures are
/// logged and otherwise behave like an absent value.
#[derive(Debug, Clone)]
pub struct WizardStateStore<S> {
    backend: S,
}

impl<S: KeyValueStore> WizardStateStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn set<T: Serialize + ?Sized>(&self, step: WizardStep, value: &T) {
        let key = step.storage_key();
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize {} value: {}", step, e);
                return;
            }
        };
        if let Err(e) = self.backend.set_item(key, &json) {
            log::warn!("Failed to persist {}: {}", key, e);
        }
    }

    pub fn get<T: DeserializeOwned>(&self, step: WizardStep) -> Option<T> {
        let raw = self.raw(step)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            // Plain strings written without JSON quoting.
            Err(_) => match serde_json::from_value(serde_json::Value::String(raw)) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::debug!("Ignoring unreadable {} value: {}", step, e);
                    None
                }
            },
        }
    }

    /// Whether anything non-empty is stored for `step`. This is a raw lookup,
    /// not `get(..).is_some()`: a corrupt value counts as present here while
    /// `get` reports it absent, matching how the browser flow checks keys.
    pub fn has(&self, step: WizardStep) -> bool {
        self.raw(step).is_some()
    }

    pub fn clear(&self, step: WizardStep) {
        if let Err(e) = self.backend.remove_item(step.storage_key()) {
            log::warn!("Failed to clear {}: {}", step.storage_key(), e);
        }
    }

    pub fn clear_all(&self) {
        for step in WizardStep::ALL {
            self.clear(step);
        }
    }

    pub fn completed_steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL.into_iter().filter(|s| self.has(*s)).collect()
    }

    /// The earliest step with no stored value, if any.
    pub fn first_incomplete(&self) -> Option<WizardStep> {
        WizardStep::ALL.into_iter().find(|s| !self.has(*s))
    }

    fn raw(&self, step: WizardStep) -> Option<String> {
        match self.backend.get_item(step.storage_key()) {
            Ok(Some(raw)) if !raw.is_empty() => Some(raw),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", step.storage_key(), e);
                None
            }
        }
    }
}
