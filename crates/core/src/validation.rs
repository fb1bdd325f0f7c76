//! Character record validation and normalization. Pure logic, no database access.
//!
//! Untrusted JSON goes through four stages:
//!
//! 1. Typed deserialization into [`CharacterSheet`] with defaults for every
//!    absent field. Type errors are attributed to the offending top-level key.
//! 2. Unknown-key detection (create only; on update unknown keys are dropped).
//! 3. Field rules declared on the schema (`validator` derive) plus the checks
//!    that cannot be expressed as attributes: map-shaped collections, total
//!    class level, spell slot usage.
//! 4. Proficiency sync between the `skills`/`savingThrows` maps and the
//!    simplified name lists.
//!
//! Every invalid field is reported, not just the first one. A field that
//! breaks several rules carries the first message found for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::abilities::Ability;
use crate::character::{CharacterSheet, MAX_TOTAL_LEVEL};
use crate::error::CoreError;

/// Highest spell level (and spell slot level).
pub const MAX_SPELL_LEVEL: u8 = 9;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path with list indices, e.g. `classes[1].levels`. Empty for the
    /// document root.
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate a create request. `name` is required and unknown keys are rejected.
pub fn validate_create(input: &Value) -> Result<CharacterSheet, CoreError> {
    validate_document(input, Mode::Create)
}

/// Validate a full-replace update request against the stored sheet.
///
/// Omitted fields revert to their defaults, except `name`, which keeps the
/// stored value. Unknown keys are ignored.
pub fn validate_update(input: &Value, existing: &CharacterSheet) -> Result<CharacterSheet, CoreError> {
    match input {
        Value::Object(object) if !object.contains_key("name") => {
            let mut object = object.clone();
            object.insert("name".to_string(), Value::String(existing.name.clone()));
            validate_document(&Value::Object(object), Mode::Update)
        }
        _ => validate_document(input, Mode::Update),
    }
}

fn validate_document(input: &Value, mode: Mode) -> Result<CharacterSheet, CoreError> {
    let Some(object) = input.as_object() else {
        return Err(CoreError::InvalidFields(vec![FieldViolation::new(
            "",
            "must be a JSON object",
        )]));
    };

    let mut violations = Vec::new();
    if !object.contains_key("name") {
        violations.push(FieldViolation::new("name", "is required"));
    }

    let mut sheet = match CharacterSheet::deserialize(input) {
        Ok(sheet) => sheet,
        Err(err) => {
            violations.extend(locate_type_errors(object, &err));
            return Err(finish(violations));
        }
    };

    if mode == Mode::Create {
        let normalized = serde_json::to_value(&sheet)
            .map_err(|e| CoreError::Internal(format!("Sheet serialization failed: {e}")))?;
        collect_unknown_keys(input, &normalized, "", &mut violations);
    }

    if let Err(errors) = sheet.validate() {
        collect_rule_errors("", &errors, &mut violations);
    }
    violations.extend(check_collections(&sheet));

    if !violations.is_empty() {
        return Err(finish(violations));
    }

    sync_proficiencies(&mut sheet);
    Ok(sheet)
}

/// Sort violations by path and drop repeats on the same field, keeping the
/// first message.
fn finish(mut violations: Vec<FieldViolation>) -> CoreError {
    let mut seen = std::collections::HashSet::new();
    violations.retain(|v| seen.insert(v.field.clone()));
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    CoreError::InvalidFields(violations)
}

// ---------------------------------------------------------------------------
// Stage 1: type errors
// ---------------------------------------------------------------------------

/// Find which top-level keys fail to deserialize on their own.
fn locate_type_errors(
    object: &serde_json::Map<String, Value>,
    whole: &serde_json::Error,
) -> Vec<FieldViolation> {
    let found: Vec<FieldViolation> = object
        .iter()
        .filter_map(|(key, value)| {
            let single = Value::Object(serde_json::Map::from_iter([(key.clone(), value.clone())]));
            CharacterSheet::deserialize(&single)
                .err()
                .map(|err| FieldViolation::new(key.clone(), err.to_string()))
        })
        .collect();

    if found.is_empty() {
        vec![FieldViolation::new("", whole.to_string())]
    } else {
        found
    }
}

// ---------------------------------------------------------------------------
// Stage 2: unknown keys
// ---------------------------------------------------------------------------

/// Report every key in `input` that does not survive normalization.
///
/// The normalized document always contains every known field, so anything
/// missing from it was not part of the schema.
fn collect_unknown_keys(input: &Value, normalized: &Value, path: &str, out: &mut Vec<FieldViolation>) {
    match (input, normalized) {
        (Value::Object(given), Value::Object(known)) => {
            for (key, value) in given {
                let child = join_path(path, key);
                match known.get(key) {
                    Some(known_value) => collect_unknown_keys(value, known_value, &child, out),
                    None => out.push(FieldViolation::new(child, "is not allowed")),
                }
            }
        }
        (Value::Array(given), Value::Array(known)) => {
            for (i, (value, known_value)) in given.iter().zip(known).enumerate() {
                collect_unknown_keys(value, known_value, &format!("{path}[{i}]"), out);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Stage 3: field rules and invariants
// ---------------------------------------------------------------------------

fn collect_rule_errors(path: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let field_path = join_path(path, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    out.push(FieldViolation::new(field_path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_rule_errors(&field_path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_rule_errors(&format!("{field_path}[{index}]"), inner, out);
                }
            }
        }
    }
}

/// Checks the schema attributes cannot express.
fn check_collections(sheet: &CharacterSheet) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    let total = sheet.total_class_level();
    if total > MAX_TOTAL_LEVEL {
        out.push(FieldViolation::new(
            "classes",
            format!("total class levels must not exceed {MAX_TOTAL_LEVEL} (got {total})"),
        ));
    }

    for (level, spells) in &sheet.spells {
        if *level > MAX_SPELL_LEVEL {
            out.push(FieldViolation::new(
                format!("spells.{level}"),
                "spell level must be between 0 and 9",
            ));
        }
        for (i, spell) in spells.iter().enumerate() {
            if !(0..=i32::from(MAX_SPELL_LEVEL)).contains(&spell.level) {
                out.push(FieldViolation::new(
                    format!("spells.{level}[{i}].level"),
                    "must be between 0 and 9",
                ));
            }
        }
    }

    for (level, slot) in &sheet.spell_slots {
        let path = format!("spellSlots.{level}");
        if !(1..=MAX_SPELL_LEVEL).contains(level) {
            out.push(FieldViolation::new(&path, "slot level must be between 1 and 9"));
        }
        if slot.max < 0 {
            out.push(FieldViolation::new(format!("{path}.max"), "must not be negative"));
        }
        if slot.used < 0 {
            out.push(FieldViolation::new(format!("{path}.used"), "must not be negative"));
        } else if slot.used > slot.max {
            out.push(FieldViolation::new(
                format!("{path}.used"),
                format!("must not exceed max ({})", slot.max),
            ));
        }
    }

    for key in sheet.saving_throws.keys() {
        if Ability::parse(key).is_none() {
            out.push(FieldViolation::new(
                format!("savingThrows.{key}"),
                "is not an ability",
            ));
        }
    }
    for (i, abbr) in sheet.proficient_saving_throws.iter().enumerate() {
        if Ability::parse(abbr).is_none() {
            out.push(FieldViolation::new(
                format!("proficientSavingThrows[{i}]"),
                format!("'{abbr}' is not an ability"),
            ));
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Stage 4: proficiency sync
// ---------------------------------------------------------------------------

/// Make the simplified proficiency lists agree with the maps.
///
/// Names in the lists are merged into the maps first, expertise implies
/// proficiency, then the lists are rebuilt from the maps in sorted order.
/// Running this twice gives the same result as running it once.
pub fn sync_proficiencies(sheet: &mut CharacterSheet) {
    for name in std::mem::take(&mut sheet.proficient_skills) {
        sheet.skills.entry(name).or_default().proficient = true;
    }
    for name in std::mem::take(&mut sheet.expertise_skills) {
        sheet.skills.entry(name).or_default().expertise = true;
    }
    for skill in sheet.skills.values_mut() {
        if skill.expertise {
            skill.proficient = true;
        }
    }

    for abbr in std::mem::take(&mut sheet.proficient_saving_throws) {
        let Some(ability) = Ability::parse(&abbr) else {
            continue;
        };
        let key = sheet
            .saving_throws
            .keys()
            .find(|k| Ability::parse(k) == Some(ability))
            .cloned()
            .unwrap_or_else(|| ability.name().to_string());
        sheet.saving_throws.entry(key).or_default().proficient = true;
    }

    sheet.proficient_skills = sheet
        .skills
        .iter()
        .filter(|(_, s)| s.proficient)
        .map(|(name, _)| name.clone())
        .collect();
    sheet.expertise_skills = sheet
        .skills
        .iter()
        .filter(|(_, s)| s.expertise)
        .map(|(name, _)| name.clone())
        .collect();

    let mut saves: Vec<Ability> = sheet
        .saving_throws
        .iter()
        .filter(|(_, s)| s.proficient)
        .filter_map(|(key, _)| Ability::parse(key))
        .collect();
    saves.sort();
    saves.dedup();
    sheet.proficient_saving_throws = saves
        .into_iter()
        .map(|a| a.abbreviation().to_string())
        .collect();
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
