//! Repository for the `characters` table.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

use grimoire_core::character::CharacterSheet;
use grimoire_core::types::DbId;

use crate::models::character::CharacterRow;

/// Sheet columns in bind order. Placeholders for these start at `$2` on
/// insert (after `user_id`) and at `$3` on update (after `id`, `user_id`).
const SHEET_COLUMNS: &str = "\
    name, race, background, alignment, image_url, notes, edition, \
    level, experience, \
    strength, dexterity, constitution, intelligence, wisdom, charisma, \
    hit_points, max_hit_points, armor_class, death_save_successes, death_save_failures, \
    classes, hit_dice, proficiency_bonus, skills, saving_throws, \
    spells, spell_slots, spell_save_dc, spell_attack_bonus, \
    feats, class_features, inventory, current_weight, \
    proficient_skills, expertise_skills, proficient_saving_throws";

/// Column list for SELECT / RETURNING.
const COLUMNS: &str = "\
    id, user_id, \
    name, race, background, alignment, image_url, notes, edition, \
    level, experience, \
    strength, dexterity, constitution, intelligence, wisdom, charisma, \
    hit_points, max_hit_points, armor_class, death_save_successes, death_save_failures, \
    classes, hit_dice, proficiency_bonus, skills, saving_throws, \
    spells, spell_slots, spell_save_dc, spell_attack_bonus, \
    feats, class_features, inventory, current_weight, \
    proficient_skills, expertise_skills, proficient_saving_throws, \
    created_at, updated_at";

type CharacterQuery<'q> = QueryAs<'q, Postgres, CharacterRow, PgArguments>;

/// Provides CRUD operations for characters, always scoped to an owner.
pub struct CharacterRepo;

impl CharacterRepo {
    /// List all characters owned by a user, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a character by id if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CharacterRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new character, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        sheet: &CharacterSheet,
    ) -> Result<CharacterRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (user_id, {SHEET_COLUMNS}) \
             VALUES ($1, {}) \
             RETURNING {COLUMNS}",
            placeholders(2)
        );
        let q = sqlx::query_as::<_, CharacterRow>(&query).bind(user_id);
        bind_sheet(q, sheet).fetch_one(pool).await
    }

    /// Replace every sheet column of an owned character.
    ///
    /// Returns `None` if no row matches both `id` and `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        sheet: &CharacterSheet,
    ) -> Result<Option<CharacterRow>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET ({SHEET_COLUMNS}) = ({}), updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}",
            placeholders(3)
        );
        let q = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .bind(user_id);
        bind_sheet(q, sheet).fetch_optional(pool).await
    }

    /// Delete an owned character. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `$first, $first+1, ...` for each entry of [`SHEET_COLUMNS`].
fn placeholders(first: usize) -> String {
    let count = SHEET_COLUMNS.split(',').count();
    (first..first + count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind sheet values in [`SHEET_COLUMNS`] order.
fn bind_sheet<'q>(query: CharacterQuery<'q>, sheet: &CharacterSheet) -> CharacterQuery<'q> {
    query
        .bind(sheet.name.clone())
        .bind(sheet.race.clone())
        .bind(sheet.background.clone().map(Json))
        .bind(sheet.alignment.clone())
        .bind(sheet.image_url.clone())
        .bind(sheet.notes.clone())
        .bind(sheet.edition.as_str())
        .bind(sheet.level)
        .bind(sheet.experience)
        .bind(sheet.strength)
        .bind(sheet.dexterity)
        .bind(sheet.constitution)
        .bind(sheet.intelligence)
        .bind(sheet.wisdom)
        .bind(sheet.charisma)
        .bind(sheet.hit_points)
        .bind(sheet.max_hit_points)
        .bind(sheet.armor_class)
        .bind(sheet.death_save_successes)
        .bind(sheet.death_save_failures)
        .bind(Json(sheet.classes.clone()))
        .bind(Json(sheet.hit_dice.clone()))
        .bind(sheet.proficiency_bonus)
        .bind(Json(sheet.skills.clone()))
        .bind(Json(sheet.saving_throws.clone()))
        .bind(Json(sheet.spells.clone()))
        .bind(Json(sheet.spell_slots.clone()))
        .bind(sheet.spell_save_dc)
        .bind(sheet.spell_attack_bonus)
        .bind(Json(sheet.feats.clone()))
        .bind(Json(sheet.class_features.clone()))
        .bind(Json(sheet.inventory.clone()))
        .bind(sheet.current_weight)
        .bind(sheet.proficient_skills.clone())
        .bind(sheet.expertise_skills.clone())
        .bind(sheet.proficient_saving_throws.clone())
}
