//! Ability scores and the bonuses derived from them.
//!
//! All functions are pure. Scores are constrained to 1-20 by the character
//! validator, but the arithmetic here accepts any integer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Abilities
// ---------------------------------------------------------------------------

/// One of the six D&D abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// The fixed set of abilities, in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Lowercase full name, as used for saving throw keys (e.g. `"constitution"`).
    pub fn name(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Look up an ability by full name or abbreviation, ignoring case.
    pub fn parse(value: &str) -> Option<Ability> {
        let value = value.trim().to_ascii_lowercase();
        Ability::ALL
            .into_iter()
            .find(|a| a.name() == value || a.abbreviation() == value)
    }

    /// Three-letter abbreviation used by saving throw lists (e.g. `"con"`).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }
}

/// The six raw ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Ability modifier: `floor((score - 10) / 2)`.
///
/// Rounds toward negative infinity, so a score of 9 yields -1.
pub fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Apply [`modifier`] to every ability, keyed by the same six abilities.
pub fn modifiers(scores: &AbilityScores) -> BTreeMap<Ability, i32> {
    Ability::ALL
        .iter()
        .map(|&ability| (ability, modifier(scores.get(ability))))
        .collect()
}

/// Proficiency bonus for a total character level: +2 at levels 1-4, rising
/// by one every four levels to +6 at 17-20.
pub fn proficiency_bonus_for_level(total_level: i32) -> i32 {
    let level = total_level.clamp(1, 20);
    2 + (level - 1) / 4
}

/// Total bonus for a skill check. Expertise doubles the proficiency bonus.
pub fn skill_modifier(
    ability_modifier: i32,
    proficiency_bonus: i32,
    proficient: bool,
    expertise: bool,
) -> i32 {
    if expertise {
        ability_modifier + proficiency_bonus * 2
    } else if proficient {
        ability_modifier + proficiency_bonus
    } else {
        ability_modifier
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_spot_values() {
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(20), 5);
        assert_eq!(modifier(1), -5);
    }

    #[test]
    fn modifier_floors_for_every_legal_score() {
        for score in 1..=20 {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            assert_eq!(modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn modifiers_cover_all_six_abilities() {
        let scores = AbilityScores {
            strength: 8,
            dexterity: 14,
            constitution: 15,
            intelligence: 10,
            wisdom: 12,
            charisma: 3,
        };
        let mods = modifiers(&scores);

        assert_eq!(mods.len(), 6);
        assert_eq!(mods[&Ability::Strength], -1);
        assert_eq!(mods[&Ability::Dexterity], 2);
        assert_eq!(mods[&Ability::Constitution], 2);
        assert_eq!(mods[&Ability::Intelligence], 0);
        assert_eq!(mods[&Ability::Wisdom], 1);
        assert_eq!(mods[&Ability::Charisma], -4);
    }

    #[test]
    fn proficiency_bonus_scales_with_level() {
        assert_eq!(proficiency_bonus_for_level(1), 2);
        assert_eq!(proficiency_bonus_for_level(4), 2);
        assert_eq!(proficiency_bonus_for_level(5), 3);
        assert_eq!(proficiency_bonus_for_level(9), 4);
        assert_eq!(proficiency_bonus_for_level(13), 5);
        assert_eq!(proficiency_bonus_for_level(17), 6);
        assert_eq!(proficiency_bonus_for_level(20), 6);
        // Out-of-range levels clamp rather than extrapolate.
        assert_eq!(proficiency_bonus_for_level(0), 2);
        assert_eq!(proficiency_bonus_for_level(30), 6);
    }

    #[test]
    fn expertise_doubles_proficiency() {
        assert_eq!(skill_modifier(3, 2, false, false), 3);
        assert_eq!(skill_modifier(3, 2, true, false), 5);
        assert_eq!(skill_modifier(3, 2, true, true), 7);
        assert_eq!(skill_modifier(-1, 3, false, true), 5);
    }

    #[test]
    fn parse_accepts_names_and_abbreviations() {
        assert_eq!(Ability::parse("con"), Some(Ability::Constitution));
        assert_eq!(Ability::parse("Wisdom"), Some(Ability::Wisdom));
        assert_eq!(Ability::parse(" DEX "), Some(Ability::Dexterity));
        assert_eq!(Ability::parse("luck"), None);
    }

    #[test]
    fn abbreviations_are_lowercase_three_letters() {
        for ability in Ability::ALL {
            let abbr = ability.abbreviation();
            assert_eq!(abbr.len(), 3);
            assert_eq!(abbr, abbr.to_lowercase());
        }
    }
}
