//! Maximum hit point calculation and hit point transitions.

use crate::character::ClassEntry;

/// Hit die used for classes not in the SRD table.
pub const DEFAULT_HIT_DIE: i32 = 8;

/// One class's contribution to the hit point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassHitDice {
    /// Die size (6, 8, 10 or 12).
    pub hit_die: i32,
    pub level: i32,
}

/// Compute maximum hit points across all class entries.
///
/// The first entry is the starting class: its first level grants the full
/// hit die plus the constitution modifier. Every other level, in that class
/// or any later one, grants the fixed average `hit_die / 2 + 1` plus the
/// constitution modifier. The result never drops below 1.
pub fn max_hit_points(classes: &[ClassHitDice], con_modifier: i32) -> i32 {
    let Some((first, rest)) = classes.split_first() else {
        return (1 + con_modifier).max(1);
    };

    let mut total = first.hit_die + con_modifier;
    total += (first.level - 1).max(0) * average_per_level(first.hit_die, con_modifier);
    for class in rest {
        total += class.level.max(0) * average_per_level(class.hit_die, con_modifier);
    }

    total.max(1)
}

fn average_per_level(hit_die: i32, con_modifier: i32) -> i32 {
    hit_die / 2 + 1 + con_modifier
}

/// Hit die size for an SRD class index (e.g. `"barbarian"` -> 12).
pub fn hit_die_for_class(index: &str) -> Option<i32> {
    match index {
        "barbarian" => Some(12),
        "fighter" | "paladin" | "ranger" => Some(10),
        "bard" | "cleric" | "druid" | "monk" | "rogue" | "warlock" => Some(8),
        "sorcerer" | "wizard" => Some(6),
        _ => None,
    }
}

/// Build calculator input from a character's class list, preserving order.
pub fn class_hit_dice(classes: &[ClassEntry]) -> Vec<ClassHitDice> {
    classes
        .iter()
        .map(|c| ClassHitDice {
            hit_die: hit_die_for_class(&c.index).unwrap_or(DEFAULT_HIT_DIE),
            level: c.levels,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Current hit points after taking `amount` damage. Never below zero.
pub fn apply_damage(current: i32, amount: i32) -> i32 {
    (current - amount.max(0)).max(0)
}

/// Current hit points after `amount` healing. Never above `maximum`, and
/// never lower than before.
pub fn apply_healing(current: i32, maximum: i32, amount: i32) -> i32 {
    current.saturating_add(amount.max(0)).min(maximum.max(current))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
