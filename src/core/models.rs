use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Perfect for beginners. Experience the story with gentle challenges and helpful guidance.",
            Difficulty::Medium => "For experienced players. Balanced challenges that test your skills without being overwhelming.",
            Difficulty::Hard => "For the brave. Face intense challenges with permanent consequences and no safety nets.",
        }
    }

    pub fn features(self) -> [&'static str; 4] {
        match self {
            Difficulty::Easy => ["Auto-save enabled", "Hint system available", "Forgiving gameplay", "Unlimited retries"],
            Difficulty::Medium => ["Limited hints", "Strategic decisions", "Moderate challenges", "Consequence system"],
            Difficulty::Hard => ["No hints", "Permanent consequences", "Expert-level challenges", "Ironman mode"],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The closed set of settings a run can take place in. Doubles as the
/// category selector for character generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Universe {
    Marvel,
    Dc,
    StarWars,
    HarryPotter,
    LordOfTheRings,
    GameOfThrones,
}

impl Universe {
    pub const ALL: [Universe; 6] = [
        Universe::Marvel,
        Universe::Dc,
        Universe::StarWars,
        Universe::HarryPotter,
        Universe::LordOfTheRings,
        Universe::GameOfThrones,
    ];

    /// Used whenever a category identifier is not recognized.
    pub const DEFAULT: Universe = Universe::Marvel;

    pub fn id(self) -> &'static str {
        match self {
            Universe::Marvel => "marvel",
            Universe::Dc => "dc",
            Universe::StarWars => "star-wars",
            Universe::HarryPotter => "harry-potter",
            Universe::LordOfTheRings => "lord-of-the-rings",
            Universe::GameOfThrones => "game-of-thrones",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Universe::Marvel => "Marvel Universe",
            Universe::Dc => "DC Universe",
            Universe::StarWars => "Star Wars",
            Universe::HarryPotter => "Harry Potter",
            Universe::LordOfTheRings => "Lord of the Rings",
            Universe::GameOfThrones => "Game of Thrones",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Universe::Marvel => "Enter the world of superheroes, villains, and cosmic adventures across the multiverse.",
            Universe::Dc => "Explore the dark and gritty world of Gotham, Metropolis, and beyond with legendary heroes.",
            Universe::StarWars => "Journey to a galaxy far, far away where the Force guides your destiny.",
            Universe::HarryPotter => "Discover the magic of Hogwarts and the wizarding world in this enchanting universe.",
            Universe::LordOfTheRings => "Embark on an epic quest through Middle-earth in this timeless fantasy adventure.",
            Universe::GameOfThrones => "Navigate the treacherous politics of Westeros where winter is coming.",
        }
    }

    /// Setting summary handed to the character generator.
    pub fn generation_description(self) -> &'static str {
        match self {
            Universe::Marvel => "Marvel Universe with superheroes, villains, and cosmic adventures",
            Universe::Dc => "DC Universe with iconic heroes like Batman, Superman, Wonder Woman, and their villains",
            Universe::StarWars => "Star Wars galaxy with Jedi, Sith, rebels, and various alien species",
            Universe::HarryPotter => "Harry Potter wizarding world with witches, wizards, and magical creatures",
            Universe::LordOfTheRings => "Middle-earth with hobbits, elves, dwarves, men, and dark forces",
            Universe::GameOfThrones => "Game of Thrones world of Westeros with noble houses, dragons, and political intrigue",
        }
    }

    pub fn themes(self) -> [&'static str; 4] {
        match self {
            Universe::Marvel => ["Superheroes", "Cosmic Adventures", "Multiverse", "Epic Battles"],
            Universe::Dc => ["Dark Heroes", "Gothic Cities", "Justice League", "Iconic Villains"],
            Universe::StarWars => ["Jedi vs Sith", "Space Opera", "Rebellion", "The Force"],
            Universe::HarryPotter => ["Wizardry", "Hogwarts", "Magical Creatures", "Dark Arts"],
            Universe::LordOfTheRings => ["Epic Quest", "Middle-earth", "Fellowship", "Ancient Evil"],
            Universe::GameOfThrones => ["Political Intrigue", "Dragons", "Winter is Coming", "Iron Throne"],
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One generated (or pre-authored) character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    pub name: String,
    pub description: String,
    pub role: String,
    pub abilities: Vec<String>,
    pub personality: Vec<String>,
}

impl GeneratedRecord {
    /// Checks that every field is present and non-blank. Returns the name of
    /// the first offending field.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name");
        }
        if self.description.trim().is_empty() {
            return Err("description");
        }
        if self.role.trim().is_empty() {
            return Err("role");
        }
        if self.abilities.is_empty() || self.abilities.iter().any(|a| a.trim().is_empty()) {
            return Err("abilities");
        }
        if self.personality.is_empty() || self.personality.iter().any(|p| p.trim().is_empty()) {
            return Err("personality");
        }
        Ok(())
    }
}

/// A record as shown and stored by the character step, with display scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(flatten)]
    pub record: GeneratedRecord,
    pub power_level: u8,
    pub complexity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storyline {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub duration: String,
    pub difficulty: String,
    pub themes: Vec<String>,
    pub hook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epicness: Option<u8>,
}

/// Body of `POST /api/characters`. Older clients send `universe`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharactersRequest {
    #[serde(default, alias = "universe")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersResponse {
    pub characters: Vec<GeneratedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GeneratedRecord {
        GeneratedRecord {
            name: "A".to_string(),
            description: "d".to_string(),
            role: "r".to_string(),
            abilities: vec!["x".to_string(), "y".to_string()],
            personality: vec!["p".to_string(), "q".to_string(), "s".to_string()],
        }
    }

    #[test]
    fn universe_ids_are_the_wire_format() {
        for universe in Universe::ALL {
            let json = serde_json::to_string(&universe).unwrap();
            assert_eq!(json, format!("\"{}\"", universe.id()));
            assert_eq!(Universe::from_id(universe.id()), Some(universe));
        }
        assert_eq!(Universe::from_id("star-trek"), None);
    }

    #[test]
    fn difficulty_round_trips_through_id() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_id(difficulty.id()), Some(difficulty));
        }
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }

    #[test]
    fn check_flags_first_blank_field() {
        assert_eq!(record().check(), Ok(()));

        let mut r = record();
        r.role = "  ".to_string();
        assert_eq!(r.check(), Err("role"));

        let mut r = record();
        r.abilities.clear();
        assert_eq!(r.check(), Err("abilities"));

        let mut r = record();
        r.personality.push(String::new());
        assert_eq!(r.check(), Err("personality"));
    }

    #[test]
    fn character_serializes_flat_with_camel_case_scores() {
        let character = Character {
            record: record(),
            power_level: 72,
            complexity: 41,
        };
        let value = serde_json::to_value(&character).unwrap();
        assert_eq!(value["name"], "A");
        assert_eq!(value["powerLevel"], 72);
        assert_eq!(value["complexity"], 41);

        let back: Character = serde_json::from_value(value).unwrap();
        assert_eq!(back, character);
    }
}
