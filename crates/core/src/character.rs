//! Character sheet schema.
//!
//! [`CharacterSheet`] is the normalized document produced by
//! [`crate::validation`]: every field is present, absent inputs take the
//! defaults below, and field rules are declared with `validator` attributes.
//! Map-shaped collections and cross-field invariants are checked by the
//! validator module itself.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::abilities::AbilityScores;
use crate::death_saves::DeathSaves;
use crate::types::{DbId, Timestamp};

/// Highest total character level across all classes.
pub const MAX_TOTAL_LEVEL: i32 = 20;

// ---------------------------------------------------------------------------
// Persisted entity
// ---------------------------------------------------------------------------

/// A stored character: the sheet plus identity and ownership.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(flatten)]
    pub sheet: CharacterSheet,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Sheet
// ---------------------------------------------------------------------------

/// Rules edition the sheet was built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edition {
    #[default]
    #[serde(rename = "2014")]
    V2014,
    #[serde(rename = "2024")]
    V2024,
}

impl Edition {
    pub fn as_str(self) -> &'static str {
        match self {
            Edition::V2014 => "2014",
            Edition::V2024 => "2024",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2014" => Ok(Edition::V2014),
            "2024" => Ok(Edition::V2024),
            other => Err(format!("Unknown edition '{other}'")),
        }
    }
}

/// The full character document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterSheet {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    pub race: String,
    pub background: Option<Background>,
    pub alignment: String,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub edition: Edition,

    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub level: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub experience: i32,

    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub strength: i32,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub dexterity: i32,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub constitution: i32,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub intelligence: i32,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub wisdom: i32,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub charisma: i32,

    #[validate(range(min = 0, message = "must not be negative"))]
    pub hit_points: i32,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub max_hit_points: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub armor_class: i32,
    #[validate(range(min = 0, max = 3, message = "must be between 0 and 3"))]
    pub death_save_successes: i32,
    #[validate(range(min = 0, max = 3, message = "must be between 0 and 3"))]
    pub death_save_failures: i32,

    #[validate(nested)]
    pub classes: Vec<ClassEntry>,
    #[validate(nested)]
    pub hit_dice: HitDicePool,
    #[validate(range(min = 0, max = 10, message = "must be between 0 and 10"))]
    pub proficiency_bonus: i32,

    pub skills: BTreeMap<String, SkillProficiency>,
    pub saving_throws: BTreeMap<String, SavingThrowProficiency>,

    /// Known spells keyed by spell level (0 = cantrips).
    pub spells: BTreeMap<u8, Vec<SpellDescriptor>>,
    /// Slots keyed by slot level (1-9).
    pub spell_slots: BTreeMap<u8, SpellSlot>,
    pub spell_save_dc: Option<i32>,
    pub spell_attack_bonus: Option<i32>,

    #[validate(nested)]
    pub feats: Vec<Feat>,
    /// Free-form, not inspected.
    pub class_features: serde_json::Map<String, serde_json::Value>,

    #[validate(nested)]
    pub inventory: Vec<InventoryItem>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub current_weight: f64,

    pub proficient_skills: Vec<String>,
    pub expertise_skills: Vec<String>,
    pub proficient_saving_throws: Vec<String>,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        let scores = AbilityScores::default();
        Self {
            name: String::new(),
            race: "Human".to_string(),
            background: None,
            alignment: "Neutral".to_string(),
            image_url: None,
            notes: None,
            edition: Edition::default(),
            level: 1,
            experience: 0,
            strength: scores.strength,
            dexterity: scores.dexterity,
            constitution: scores.constitution,
            intelligence: scores.intelligence,
            wisdom: scores.wisdom,
            charisma: scores.charisma,
            hit_points: 10,
            max_hit_points: 10,
            armor_class: 10,
            death_save_successes: 0,
            death_save_failures: 0,
            classes: Vec::new(),
            hit_dice: HitDicePool::default(),
            proficiency_bonus: 2,
            skills: BTreeMap::new(),
            saving_throws: BTreeMap::new(),
            spells: BTreeMap::new(),
            spell_slots: BTreeMap::new(),
            spell_save_dc: None,
            spell_attack_bonus: None,
            feats: Vec::new(),
            class_features: serde_json::Map::new(),
            inventory: Vec::new(),
            current_weight: 0.0,
            proficient_skills: Vec::new(),
            expertise_skills: Vec::new(),
            proficient_saving_throws: Vec::new(),
        }
    }
}

impl CharacterSheet {
    pub fn ability_scores(&self) -> AbilityScores {
        AbilityScores {
            strength: self.strength,
            dexterity: self.dexterity,
            constitution: self.constitution,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            charisma: self.charisma,
        }
    }

    /// Sum of levels across all class entries, saturating at `i32::MAX`.
    pub fn total_class_level(&self) -> i32 {
        self.classes
            .iter()
            .fold(0i32, |total, c| total.saturating_add(c.levels))
    }

    pub fn death_saves(&self) -> DeathSaves {
        DeathSaves::new(self.death_save_successes, self.death_save_failures)
    }

    pub fn set_death_saves(&mut self, saves: DeathSaves) {
        self.death_save_successes = saves.successes;
        self.death_save_failures = saves.failures;
    }
}

// ---------------------------------------------------------------------------
// Nested documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub index: String,
    pub name: String,
    pub traits: Vec<String>,
}

/// One class in a (possibly multiclass) character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClassEntry {
    pub index: String,
    pub name: String,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub levels: i32,
    pub subclass: Option<String>,
}

impl Default for ClassEntry {
    fn default() -> Self {
        Self {
            index: String::new(),
            name: String::new(),
            levels: 1,
            subclass: None,
        }
    }
}

/// Remaining hit dice by die size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HitDicePool {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub d6: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub d8: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub d10: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub d12: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillProficiency {
    pub modifier: i32,
    pub proficient: bool,
    pub expertise: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingThrowProficiency {
    pub modifier: i32,
    pub proficient: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpellDescriptor {
    pub index: String,
    pub name: String,
    pub level: i32,
    pub school: String,
    pub casting_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellSlot {
    pub max: i32,
    pub used: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Feat {
    pub index: String,
    pub name: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub level: i32,
    pub description: String,
}

impl Default for Feat {
    fn default() -> Self {
        Self {
            index: String::new(),
            name: String::new(),
            level: 1,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InventoryItem {
    pub id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub weight: Option<f64>,
    pub equipped: bool,
    pub notes: String,
}

impl Default for InventoryItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            quantity: 1,
            weight: None,
            equipped: false,
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_schema() {
        let sheet = CharacterSheet::default();
        assert_eq!(sheet.race, "Human");
        assert_eq!(sheet.alignment, "Neutral");
        assert_eq!(sheet.edition, Edition::V2014);
        assert_eq!(sheet.level, 1);
        assert_eq!(sheet.proficiency_bonus, 2);
        assert_eq!(sheet.ability_scores(), AbilityScores::default());
        assert_eq!(InventoryItem::default().quantity, 1);
    }

    #[test]
    fn edition_round_trips_through_str() {
        for edition in [Edition::V2014, Edition::V2024] {
            assert_eq!(edition.as_str().parse::<Edition>(), Ok(edition));
        }
        assert!("5e".parse::<Edition>().is_err());
    }

    #[test]
    fn sheet_serializes_camel_case() {
        let json = serde_json::to_value(CharacterSheet::default()).expect("serialize");
        assert!(json.get("maxHitPoints").is_some());
        assert!(json.get("deathSaveSuccesses").is_some());
        assert!(json.get("proficientSavingThrows").is_some());
        assert_eq!(json["edition"], "2014");
    }

    #[test]
    fn total_class_level_sums_entries() {
        let sheet = CharacterSheet {
            classes: vec![
                ClassEntry {
                    levels: 3,
                    ..ClassEntry::default()
                },
                ClassEntry {
                    levels: 2,
                    ..ClassEntry::default()
                },
            ],
            ..CharacterSheet::default()
        };
        assert_eq!(sheet.total_class_level(), 5);
    }
}
