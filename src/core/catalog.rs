//! Static content: the fallback character roster and the storylines on offer.

use crate::core::models::{GeneratedRecord, Storyline, Universe};

fn character(
    name: &str,
    description: &str,
    role: &str,
    abilities: &[&str],
    personality: &[&str],
) -> GeneratedRecord {
    GeneratedRecord {
        name: name.to_string(),
        description: description.to_string(),
        role: role.to_string(),
        abilities: abilities.iter().map(|s| s.to_string()).collect(),
        personality: personality.iter().map(|s| s.to_string()).collect(),
    }
}

/// Pre-authored characters served when generation is unavailable.
pub fn fallback_characters(universe: Universe) -> Vec<GeneratedRecord> {
    match universe {
        Universe::Marvel => vec![
            character(
                "Captain Cosmic",
                "A legendary hero with the power to manipulate cosmic energy and protect the galaxy from threats.",
                "Superhero",
                &["Cosmic Energy Manipulation", "Flight", "Super Strength"],
                &["Brave", "Noble", "Protective", "Determined"],
            ),
            character(
                "Shadow Walker",
                "A mysterious vigilante who moves through shadows and fights crime in the darkest corners of the city.",
                "Vigilante",
                &["Shadow Manipulation", "Stealth", "Enhanced Agility"],
                &["Mysterious", "Brooding", "Loyal", "Strategic"],
            ),
            character(
                "Quantum Sage",
                "A brilliant scientist who gained the ability to manipulate quantum physics and reality itself.",
                "Scientist Hero",
                &["Reality Manipulation", "Quantum Physics", "Time Travel"],
                &["Intelligent", "Curious", "Responsible", "Innovative"],
            ),
        ],
        Universe::Dc => vec![
            character(
                "Night Guardian",
                "A dark protector who watches over the city streets, dispensing justice to those who prey on the innocent.",
                "Vigilante",
                &["Enhanced Senses", "Martial Arts", "Tactical Genius"],
                &["Determined", "Brooding", "Protective", "Strategic"],
            ),
            character(
                "Solar Flare",
                "A hero blessed with solar powers who brings light and hope to the darkest corners of the world.",
                "Superhero",
                &["Solar Energy", "Flight", "Healing Factor"],
                &["Optimistic", "Noble", "Compassionate", "Courageous"],
            ),
            character(
                "Tech Phantom",
                "A master hacker and inventor who uses technology to fight crime and protect the innocent.",
                "Tech Hero",
                &["Hacking", "Invention", "Tactical Analysis"],
                &["Brilliant", "Resourceful", "Dedicated", "Innovative"],
            ),
        ],
        Universe::StarWars => vec![
            character(
                "Jedi Master Kael",
                "A wise and powerful Jedi Knight who has spent decades mastering the Force and training new padawans.",
                "Jedi Master",
                &["Force Mastery", "Lightsaber Combat", "Battle Meditation"],
                &["Wise", "Patient", "Disciplined", "Compassionate"],
            ),
            character(
                "Smuggler Rex",
                "A charismatic rogue who navigates the galaxy's underworld, always looking for the next big score.",
                "Smuggler",
                &["Piloting", "Marksmanship", "Persuasion"],
                &["Charismatic", "Cunning", "Loyal", "Rebellious"],
            ),
            character(
                "Senator Vex",
                "A skilled diplomat and politician working to bring peace and justice to the galaxy through political means.",
                "Politician",
                &["Diplomacy", "Strategy", "Leadership"],
                &["Diplomatic", "Strategic", "Charismatic", "Idealistic"],
            ),
        ],
        Universe::HarryPotter => vec![
            character(
                "Professor Eldrin",
                "A powerful wizard and master of ancient magic who teaches at Hogwarts and protects its students.",
                "Professor",
                &["Ancient Magic", "Potion Brewing", "Magical Theory"],
                &["Wise", "Patient", "Mysterious", "Protective"],
            ),
            character(
                "Auror Swift",
                "A skilled dark wizard hunter who tracks down dark wizards and protects the wizarding world.",
                "Auror",
                &["Combat Magic", "Investigation", "Stealth"],
                &["Brave", "Determined", "Skilled", "Protective"],
            ),
            character(
                "Herbologist Sage",
                "A master of magical plants and herbs who creates powerful potions and remedies.",
                "Herbologist",
                &["Plant Magic", "Potion Brewing", "Healing"],
                &["Knowledgeable", "Patient", "Nurturing", "Wise"],
            ),
        ],
        Universe::LordOfTheRings => vec![
            character(
                "Ranger Elara",
                "A skilled ranger who protects the borders of civilized lands from dark creatures and ancient evils.",
                "Ranger",
                &["Archery", "Tracking", "Survival"],
                &["Vigilant", "Skilled", "Independent", "Protective"],
            ),
            character(
                "Loremaster Theron",
                "A wise scholar who studies ancient texts and prophecies to understand the coming darkness.",
                "Scholar",
                &["Ancient Knowledge", "Languages", "Prophecy"],
                &["Wise", "Learned", "Observant", "Strategic"],
            ),
            character(
                "Captain Borin",
                "A brave warrior and leader of men who stands against the forces of darkness with sword and shield.",
                "Warrior",
                &["Combat", "Leadership", "Strategy"],
                &["Brave", "Honorable", "Strong", "Protective"],
            ),
        ],
        Universe::GameOfThrones => vec![
            character(
                "Ser Valerius",
                "A noble knight sworn to protect the innocent and uphold honor in a world of political intrigue.",
                "Knight",
                &["Swordsmanship", "Strategy", "Leadership"],
                &["Honorable", "Brave", "Loyal", "Determined"],
            ),
            character(
                "Whisper Lyra",
                "A master spy and assassin who navigates the deadly politics of Westeros with skill and cunning.",
                "Spy",
                &["Stealth", "Poison", "Information Gathering"],
                &["Cunning", "Patient", "Observant", "Adaptable"],
            ),
            character(
                "Maester Elias",
                "A learned scholar and healer who serves as advisor to lords and tends to the sick and wounded.",
                "Maester",
                &["Healing", "Knowledge", "Alchemy", "Strategy"],
                &["Wise", "Learned", "Compassionate", "Strategic"],
            ),
        ],
    }
}

/// Fallback roster for a raw category identifier. Unknown identifiers get the
/// default universe's roster.
pub fn fallback_for_category(category: &str) -> Vec<GeneratedRecord> {
    fallback_characters(Universe::from_id(category).unwrap_or(Universe::DEFAULT))
}

// (id, title, description, genre, duration, difficulty, themes, hook, intensity, epicness)
type StorylineRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    [&'static str; 4],
    &'static str,
    u8,
    u8,
);

fn storyline(row: &StorylineRow) -> Storyline {
    let (id, title, description, genre, duration, difficulty, themes, hook, intensity, epicness) = *row;
    Storyline {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        genre: genre.to_string(),
        duration: duration.to_string(),
        difficulty: difficulty.to_string(),
        themes: themes.iter().map(|t| t.to_string()).collect(),
        hook: hook.to_string(),
        intensity: Some(intensity),
        epicness: Some(epicness),
    }
}

const MARVEL_STORYLINES: [StorylineRow; 3] = [
    ("cosmic-threat", "The Cosmic Threat", "A powerful cosmic entity threatens to destroy the universe. Only you and your allies can stop it before it's too late.", "Epic Adventure", "Long", "Hard", ["Cosmic Horror", "Teamwork", "Sacrifice", "Destiny"], "The stars themselves are screaming as an ancient evil awakens...", 95, 90),
    ("civil-war", "Civil War", "A devastating conflict divides the hero community. Choose your side and fight for what you believe is right.", "Political Drama", "Medium", "Medium", ["Morality", "Loyalty", "Conflict", "Consequences"], "When heroes fight heroes, who will be left to save the world?", 75, 80),
    ("street-level", "Street Level Justice", "Take to the streets to fight crime and corruption in your city. Every decision affects the lives of ordinary people.", "Crime Drama", "Short", "Easy", ["Justice", "Community", "Redemption", "Hope"], "In the shadows of the city, real heroes are born...", 60, 65),
];

const DC_STORYLINES: [StorylineRow; 3] = [
    ("gotham-war", "Gotham's Darkest Hour", "Gotham City faces its greatest threat as all villains unite. Can you restore order to the chaotic streets?", "Dark Thriller", "Long", "Hard", ["Darkness", "Justice", "Fear", "Redemption"], "When the night is darkest, even shadows have shadows...", 90, 85),
    ("metropolis-crisis", "Metropolis in Peril", "A brilliant mastermind threatens the city of tomorrow. Use your wits and powers to save the day.", "Action Adventure", "Medium", "Medium", ["Hope", "Innovation", "Heroism", "Progress"], "The city of tomorrow needs heroes today...", 70, 75),
    ("atlantis-rising", "Atlantis Rising", "The underwater kingdom emerges, threatening the surface world. Navigate ancient politics and prevent a global catastrophe.", "Fantasy Adventure", "Medium", "Medium", ["Ancient Powers", "Diplomacy", "War", "Legacy"], "From the depths of the ocean, an ancient power stirs...", 75, 80),
];

const STAR_WARS_STORYLINES: [StorylineRow; 3] = [
    ("force-awakens", "The Force Awakens", "A new disturbance in the Force calls you to adventure. Will you embrace the light or succumb to the dark side?", "Space Opera", "Long", "Hard", ["Destiny", "Power", "Choice", "Balance"], "The Force calls to you... but which path will you choose?", 85, 95),
    ("rebellion", "Spark of Rebellion", "Join the fight against tyranny in a galaxy far, far away. Every small act of rebellion matters.", "Rebellion Story", "Medium", "Medium", ["Freedom", "Hope", "Sacrifice", "Unity"], "In a galaxy ruled by fear, one spark can ignite a revolution...", 70, 85),
    ("outer-rim", "Outer Rim Adventures", "Navigate the dangerous Outer Rim territories where fortune and danger go hand in hand.", "Space Western", "Short", "Easy", ["Survival", "Opportunity", "Danger", "Freedom"], "Beyond the reach of empire, anything is possible...", 55, 60),
];

const HARRY_POTTER_STORYLINES: [StorylineRow; 3] = [
    ("dark-lord-rises", "The Dark Lord's Return", "Ancient evil stirs once more. Gather allies and master your magic to face the growing darkness.", "Dark Fantasy", "Long", "Hard", ["Dark Magic", "Friendship", "Courage", "Destiny"], "The shadows grow longer... and ancient evil stirs...", 85, 90),
    ("magical-mystery", "Hogwarts Mystery", "Strange events plague Hogwarts. Uncover the truth behind the magical mysteries within the castle walls.", "Mystery", "Medium", "Medium", ["Mystery", "Friendship", "Discovery", "Magic"], "Within these ancient walls, secrets wait to be discovered...", 65, 70),
    ("quidditch-cup", "Quidditch World Cup", "Lead your team to victory in the ultimate magical sporting event. Glory, rivalry, and magical sportsmanship await.", "Sports Adventure", "Short", "Easy", ["Competition", "Teamwork", "Glory", "Sportsmanship"], "The stadium roars... the golden snitch awaits...", 50, 55),
];

const LORD_OF_THE_RINGS_STORYLINES: [StorylineRow; 3] = [
    ("shadow-return", "The Shadow Returns", "A new darkness spreads across Middle-earth. Rally the free peoples and stand against the growing shadow.", "Epic Fantasy", "Long", "Hard", ["Good vs Evil", "Courage", "Friendship", "Sacrifice"], "The One Ring may be destroyed, but evil never truly dies...", 90, 100),
    ("dwarf-kingdom", "The Dwarf Kingdoms", "Journey deep beneath the mountains to reclaim ancient dwarf halls from creatures of darkness.", "Adventure", "Medium", "Medium", ["Heritage", "Greed", "Courage", "Kingdom"], "Deep beneath the earth, ancient treasures and terrible dangers await...", 70, 80),
    ("shire-peace", "Peace in the Shire", "Protect the peaceful Shire from creeping threats. Sometimes the smallest heroes make the biggest difference.", "Heartwarming Adventure", "Short", "Easy", ["Peace", "Home", "Courage", "Simplicity"], "Even in the quietest corners, adventure finds a way...", 45, 50),
];

const GAME_OF_THRONES_STORYLINES: [StorylineRow; 3] = [
    ("iron-throne", "Game of Thrones", "The ultimate game of politics and power begins. Navigate deadly alliances and betrayals to claim the Iron Throne.", "Political Drama", "Long", "Hard", ["Power", "Betrayal", "Politics", "Survival"], "When you play the game of thrones, you win or you die...", 95, 95),
    ("white-walker", "The Long Night", "Ancient horrors march south. Unite the realm against the true enemy that threatens all humanity.", "Survival Horror", "Long", "Hard", ["Survival", "Unity", "Ancient Evil", "Sacrifice"], "Winter is coming... and it brings death with it...", 100, 100),
    ("dragon-queen", "The Dragon's Legacy", "Ancient dragons return to the world. Will you be their ally or their enemy in the coming age of fire and blood?", "Fantasy Adventure", "Medium", "Medium", ["Power", "Legacy", "Dragons", "Conquest"], "Fire and blood will reshape the world...", 80, 90),
];

pub fn storylines(universe: Universe) -> Vec<Storyline> {
    let rows = match universe {
        Universe::Marvel => &MARVEL_STORYLINES,
        Universe::Dc => &DC_STORYLINES,
        Universe::StarWars => &STAR_WARS_STORYLINES,
        Universe::HarryPotter => &HARRY_POTTER_STORYLINES,
        Universe::LordOfTheRings => &LORD_OF_THE_RINGS_STORYLINES,
        Universe::GameOfThrones => &GAME_OF_THRONES_STORYLINES,
    };
    rows.iter().map(storyline).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_record_is_valid() {
        for universe in Universe::ALL {
            let roster = fallback_characters(universe);
            assert_eq!(roster.len(), 3, "{universe}");
            for record in &roster {
                assert_eq!(record.check(), Ok(()), "{} in {universe}", record.name);
            }
        }
    }

    #[test]
    fn unknown_category_uses_default_roster() {
        assert_eq!(fallback_for_category("star-trek"), fallback_characters(Universe::Marvel));
        assert_eq!(fallback_for_category("dc"), fallback_characters(Universe::Dc));
    }

    #[test]
    fn storylines_have_unique_ids_per_universe() {
        for universe in Universe::ALL {
            let lines = storylines(universe);
            assert_eq!(lines.len(), 3);
            let mut ids: Vec<_> = lines.iter().map(|s| s.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 3, "{universe}");
        }
    }
}
