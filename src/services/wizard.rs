//! Forward/back moves between wizard pages.

use crate::core::io::KeyValueStore;
use crate::core::models::{Character, Storyline};
use crate::core::state::{WizardStateStore, WizardStep};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Go to this path.
    Navigate(&'static str),
    /// The last step was confirmed; the adventure can begin.
    Complete,
    /// Nothing selected, nothing written.
    Blocked,
}

/// Persists the selection for `step` and says where to go next.
pub fn confirm<S, T>(store: &WizardStateStore<S>, step: WizardStep, selection: Option<&T>) -> Transition
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let Some(selection) = selection else {
        return Transition::Blocked;
    };
    store.set(step, selection);
    match step.next() {
        Some(next) => Transition::Navigate(next.path()),
        None => Transition::Complete,
    }
}

/// Going back is always allowed and never touches the store.
pub fn back(step: WizardStep) -> Transition {
    Transition::Navigate(step.previous().unwrap_or(WizardStep::Difficulty).path())
}

pub fn restart<S: KeyValueStore>(store: &WizardStateStore<S>) -> Transition {
    store.clear_all();
    Transition::Navigate(WizardStep::Difficulty.path())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventureSummary {
    pub character: String,
    pub storyline: String,
    pub difficulty: String,
    pub universe: String,
}

impl AdventureSummary {
    pub fn message(&self) -> String {
        format!(
            "Adventure begins! You are {} in \"{}\"\n\nDifficulty: {}\nUniverse: {}\n\nGet ready for an epic journey!",
            self.character, self.storyline, self.difficulty, self.universe
        )
    }
}

/// Collects the four choices. Fails with the steps that have no usable value.
pub fn begin_adventure<S: KeyValueStore>(
    store: &WizardStateStore<S>,
) -> Result<AdventureSummary, Vec<WizardStep>> {
    let difficulty = store.get::<String>(WizardStep::Difficulty);
    let universe = store.get::<String>(WizardStep::Universe);
    let character = store.get::<Character>(WizardStep::Character);
    let storyline = store.get::<Storyline>(WizardStep::Storyline);

    match (difficulty, universe, character, storyline) {
        (Some(difficulty), Some(universe), Some(character), Some(storyline)) => Ok(AdventureSummary {
            character: character.record.name,
            storyline: storyline.title,
            difficulty,
            universe,
        }),
        (difficulty, universe, character, storyline) => {
            let present = [
                difficulty.is_some(),
                universe.is_some(),
                character.is_some(),
                storyline.is_some(),
            ];
            Err(WizardStep::ALL
                .into_iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(step, _)| step)
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::io::MemoryStore;
    use crate::core::models::{Difficulty, Universe};

    fn store() -> WizardStateStore<MemoryStore> {
        WizardStateStore::new(MemoryStore::new())
    }

    fn hero() -> Character {
        Character {
            record: catalog::fallback_characters(Universe::StarWars)[0].clone(),
            power_level: 80,
            complexity: 50,
        }
    }

    #[test]
    fn confirm_without_selection_is_blocked() {
        let s = store();
        let t = confirm::<_, Difficulty>(&s, WizardStep::Difficulty, None);
        assert_eq!(t, Transition::Blocked);
        assert!(!s.has(WizardStep::Difficulty));
    }

    #[test]
    fn walk_the_whole_wizard() {
        let s = store();
        assert_eq!(
            confirm(&s, WizardStep::Difficulty, Some(&Difficulty::Hard)),
            Transition::Navigate("/universe")
        );
        assert_eq!(
            confirm(&s, WizardStep::Universe, Some(&Universe::StarWars)),
            Transition::Navigate("/character")
        );
        assert_eq!(
            confirm(&s, WizardStep::Character, Some(&hero())),
            Transition::Navigate("/storyline")
        );
        let storyline = catalog::storylines(Universe::StarWars).remove(0);
        assert_eq!(
            confirm(&s, WizardStep::Storyline, Some(&storyline)),
            Transition::Complete
        );

        let summary = begin_adventure(&s).unwrap();
        assert_eq!(summary.character, hero().record.name);
        assert_eq!(summary.storyline, storyline.title);
        assert_eq!(summary.difficulty, "hard");
        assert_eq!(summary.universe, "star-wars");
        assert!(summary.message().contains(&format!("in \"{}\"", storyline.title)));
    }

    #[test]
    fn begin_adventure_reports_missing_steps() {
        let s = store();
        s.set(WizardStep::Difficulty, "easy");
        s.set(WizardStep::Character, &hero());
        assert_eq!(
            begin_adventure(&s),
            Err(vec![WizardStep::Universe, WizardStep::Storyline])
        );
    }

    #[test]
    fn back_goes_to_previous_page_and_keeps_state() {
        let s = store();
        s.set(WizardStep::Difficulty, "easy");
        assert_eq!(back(WizardStep::Character), Transition::Navigate("/universe"));
        assert_eq!(back(WizardStep::Universe), Transition::Navigate("/"));
        assert_eq!(back(WizardStep::Difficulty), Transition::Navigate("/"));
        assert!(s.has(WizardStep::Difficulty));
    }

    #[test]
    fn history_paths_map_back_to_their_pages() {
        for step in WizardStep::ALL {
            let Transition::Navigate(path) = back(step) else {
                panic!("back is always a navigation");
            };
            let page = WizardStep::from_path(path).unwrap();
            assert_eq!(page, step.previous().unwrap_or(WizardStep::Difficulty));
        }
    }

    #[test]
    fn restart_clears_everything() {
        let s = store();
        s.set(WizardStep::Difficulty, "easy");
        s.set(WizardStep::Universe, "dc");
        assert_eq!(restart(&s), Transition::Navigate("/"));
        assert!(s.completed_steps().is_empty());
    }
}
