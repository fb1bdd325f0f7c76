//! Derived statistics computed on demand from a stored sheet.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::abilities::{self, Ability};
use crate::character::CharacterSheet;
use crate::hit_points;

/// Values derived from a sheet; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub ability_modifiers: BTreeMap<Ability, i32>,
    /// Sum of class levels, or the sheet's `level` when no classes are set.
    pub total_level: i32,
    pub proficiency_bonus: i32,
    /// Maximum hit points recomputed from class hit dice.
    pub computed_max_hit_points: i32,
    pub is_dead: bool,
    pub is_stable: bool,
}

pub fn derive_stats(sheet: &CharacterSheet) -> CharacterStats {
    let ability_modifiers = abilities::modifiers(&sheet.ability_scores());
    let con_modifier = ability_modifiers[&Ability::Constitution];

    let total_level = if sheet.classes.is_empty() {
        sheet.level
    } else {
        sheet.total_class_level()
    };

    let hit_dice = hit_points::class_hit_dice(&sheet.classes);
    let saves = sheet.death_saves();

    CharacterStats {
        computed_max_hit_points: hit_points::max_hit_points(&hit_dice, con_modifier),
        proficiency_bonus: abilities::proficiency_bonus_for_level(total_level),
        ability_modifiers,
        total_level,
        is_dead: saves.is_dead(),
        is_stable: saves.is_stable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::ClassEntry;

    fn class(index: &str, levels: i32) -> ClassEntry {
        ClassEntry {
            index: index.into(),
            name: index.into(),
            levels,
            subclass: None,
        }
    }

    #[test]
    fn stats_for_multiclass_character() {
        let sheet = CharacterSheet {
            name: "Regdar".into(),
            constitution: 14,
            classes: vec![class("fighter", 5), class("rogue", 2)],
            death_save_failures: 3,
            ..CharacterSheet::default()
        };
        let stats = derive_stats(&sheet);

        assert_eq!(stats.ability_modifiers[&Ability::Constitution], 2);
        assert_eq!(stats.total_level, 7);
        assert_eq!(stats.proficiency_bonus, 3);
        // 10 + 2, then 4 * (5 + 1 + 2), then 2 * (4 + 1 + 2).
        assert_eq!(stats.computed_max_hit_points, 12 + 32 + 14);
        assert!(stats.is_dead);
        assert!(!stats.is_stable);
    }

    #[test]
    fn classless_sheet_uses_level_field() {
        let sheet = CharacterSheet {
            name: "Villager".into(),
            level: 9,
            ..CharacterSheet::default()
        };
        let stats = derive_stats(&sheet);
        assert_eq!(stats.total_level, 9);
        assert_eq!(stats.proficiency_bonus, 4);
        assert_eq!(stats.computed_max_hit_points, 1);
    }
}
