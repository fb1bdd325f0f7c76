//! Character row model.
//!
//! Scalar sheet fields map to columns; nested collections are stored as JSONB
//! documents through [`sqlx::types::Json`].

use std::collections::BTreeMap;

use grimoire_core::character::{
    Background, Character, CharacterSheet, ClassEntry, Feat, HitDicePool, InventoryItem,
    SavingThrowProficiency, SkillProficiency, SpellDescriptor, SpellSlot,
};
use grimoire_core::error::CoreError;
use grimoire_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterRow {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub race: String,
    pub background: Option<Json<Background>>,
    pub alignment: String,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub edition: String,
    pub level: i32,
    pub experience: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub armor_class: i32,
    pub death_save_successes: i32,
    pub death_save_failures: i32,
    pub classes: Json<Vec<ClassEntry>>,
    pub hit_dice: Json<HitDicePool>,
    pub proficiency_bonus: i32,
    pub skills: Json<BTreeMap<String, SkillProficiency>>,
    pub saving_throws: Json<BTreeMap<String, SavingThrowProficiency>>,
    pub spells: Json<BTreeMap<u8, Vec<SpellDescriptor>>>,
    pub spell_slots: Json<BTreeMap<u8, SpellSlot>>,
    pub spell_save_dc: Option<i32>,
    pub spell_attack_bonus: Option<i32>,
    pub feats: Json<Vec<Feat>>,
    pub class_features: Json<serde_json::Map<String, serde_json::Value>>,
    pub inventory: Json<Vec<InventoryItem>>,
    pub current_weight: f64,
    pub proficient_skills: Vec<String>,
    pub expertise_skills: Vec<String>,
    pub proficient_saving_throws: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<CharacterRow> for Character {
    type Error = CoreError;

    fn try_from(row: CharacterRow) -> Result<Self, Self::Error> {
        let edition = row.edition.parse().map_err(|e: String| {
            CoreError::Internal(format!("Character {} has invalid edition: {e}", row.id))
        })?;

        let sheet = CharacterSheet {
            name: row.name,
            race: row.race,
            background: row.background.map(|Json(b)| b),
            alignment: row.alignment,
            image_url: row.image_url,
            notes: row.notes,
            edition,
            level: row.level,
            experience: row.experience,
            strength: row.strength,
            dexterity: row.dexterity,
            constitution: row.constitution,
            intelligence: row.intelligence,
            wisdom: row.wisdom,
            charisma: row.charisma,
            hit_points: row.hit_points,
            max_hit_points: row.max_hit_points,
            armor_class: row.armor_class,
            death_save_successes: row.death_save_successes,
            death_save_failures: row.death_save_failures,
            classes: row.classes.0,
            hit_dice: row.hit_dice.0,
            proficiency_bonus: row.proficiency_bonus,
            skills: row.skills.0,
            saving_throws: row.saving_throws.0,
            spells: row.spells.0,
            spell_slots: row.spell_slots.0,
            spell_save_dc: row.spell_save_dc,
            spell_attack_bonus: row.spell_attack_bonus,
            feats: row.feats.0,
            class_features: row.class_features.0,
            inventory: row.inventory.0,
            current_weight: row.current_weight,
            proficient_skills: row.proficient_skills,
            expertise_skills: row.expertise_skills,
            proficient_saving_throws: row.proficient_saving_throws,
        };

        Ok(Character {
            id: row.id,
            user_id: row.user_id,
            sheet,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
