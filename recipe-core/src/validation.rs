//! Schema rules for recipe writes.
//!
//! [`validate`] is the only path from client input to [`RecipeFields`]. It
//! never touches storage, so every rule here can be tested in isolation.

use crate::error::{FieldViolation, ValidationError};
use crate::types::{Category, Difficulty, RecipeCandidate, RecipeFields};

pub const NAME_MAX_CHARS: usize = 100;
pub const INSTRUCTIONS_MIN_CHARS: usize = 10;

pub const DEFAULT_PREP_TIME: i64 = 0;
pub const DEFAULT_COOK_TIME: i64 = 0;
pub const DEFAULT_SERVINGS: i64 = 1;

/// Check a candidate against every field rule.
///
/// Returns the normalized field set, with defaults applied to absent
/// optional fields, or every violation found (at most one per field, in
/// field order).
pub fn validate(candidate: RecipeCandidate) -> Result<RecipeFields, ValidationError> {
    let mut violations = Vec::new();

    let name = check_name(candidate.name, &mut violations);
    let ingredients = check_ingredients(candidate.ingredients, &mut violations);
    let instructions = check_instructions(candidate.instructions, &mut violations);
    let prep_time = check_min(
        candidate.prep_time,
        DEFAULT_PREP_TIME,
        0,
        "prepTime",
        "Preparation time cannot be negative",
        &mut violations,
    );
    let cook_time = check_min(
        candidate.cook_time,
        DEFAULT_COOK_TIME,
        0,
        "cookTime",
        "Cooking time cannot be negative",
        &mut violations,
    );
    let servings = check_min(
        candidate.servings,
        DEFAULT_SERVINGS,
        1,
        "servings",
        "Servings must be at least 1",
        &mut violations,
    );
    let category = check_enum(
        candidate.category,
        Category::parse,
        "category",
        "is not a valid category",
        &mut violations,
    );
    let difficulty = check_enum(
        candidate.difficulty,
        Difficulty::parse,
        "difficulty",
        "is not a valid difficulty level",
        &mut violations,
    );
    let image_url = candidate
        .image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    Ok(RecipeFields {
        name,
        ingredients,
        instructions,
        prep_time,
        cook_time,
        servings,
        category,
        difficulty,
        image_url,
    })
}

/// Lower-case and trim an enum value before comparison.
pub fn normalize_enum_value(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn violation(violations: &mut Vec<FieldViolation>, field: &'static str, message: impl Into<String>) {
    violations.push(FieldViolation {
        field,
        message: message.into(),
    });
}

fn check_name(raw: Option<String>, violations: &mut Vec<FieldViolation>) -> String {
    let name = raw.map(|n| n.trim().to_string()).unwrap_or_default();

    if name.is_empty() {
        violation(violations, "name", "Recipe name is required");
    } else if name.chars().count() > NAME_MAX_CHARS {
        violation(
            violations,
            "name",
            format!("Recipe name cannot exceed {} characters", NAME_MAX_CHARS),
        );
    }

    name
}

fn check_ingredients(raw: Option<Vec<String>>, violations: &mut Vec<FieldViolation>) -> Vec<String> {
    match raw {
        None => {
            violation(violations, "ingredients", "At least one ingredient is required");
            Vec::new()
        }
        Some(ingredients) if ingredients.is_empty() => {
            violation(
                violations,
                "ingredients",
                "Recipe must have at least one ingredient",
            );
            ingredients
        }
        Some(ingredients) => ingredients,
    }
}

fn check_instructions(raw: Option<String>, violations: &mut Vec<FieldViolation>) -> String {
    let instructions = raw.unwrap_or_default();

    if instructions.is_empty() {
        violation(violations, "instructions", "Cooking instructions are required");
    } else if instructions.chars().count() < INSTRUCTIONS_MIN_CHARS {
        violation(
            violations,
            "instructions",
            format!(
                "Instructions must be at least {} characters long",
                INSTRUCTIONS_MIN_CHARS
            ),
        );
    }

    instructions
}

fn check_min(
    raw: Option<i64>,
    default: i64,
    min: i64,
    field: &'static str,
    message: &str,
    violations: &mut Vec<FieldViolation>,
) -> i64 {
    let value = raw.unwrap_or(default);
    if value < min {
        violation(violations, field, message);
    }
    value
}

fn check_enum<T: Default>(
    raw: Option<String>,
    parse: fn(&str) -> Option<T>,
    field: &'static str,
    suffix: &str,
    violations: &mut Vec<FieldViolation>,
) -> T {
    let Some(raw) = raw else {
        return T::default();
    };

    let normalized = normalize_enum_value(&raw);
    match parse(&normalized) {
        Some(value) => value,
        None => {
            violation(violations, field, format!("{} {}", normalized, suffix));
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RecipeCandidate {
        RecipeCandidate {
            name: Some("Pancakes".to_string()),
            ingredients: Some(vec!["flour".to_string(), "milk".to_string()]),
            instructions: Some("Whisk everything and fry.".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_apply_to_absent_fields() {
        let fields = validate(minimal()).unwrap();
        assert_eq!(fields.prep_time, 0);
        assert_eq!(fields.cook_time, 0);
        assert_eq!(fields.servings, 1);
        assert_eq!(fields.category, Category::Other);
        assert_eq!(fields.difficulty, Difficulty::Medium);
        assert_eq!(fields.image_url, None);
    }

    #[test]
    fn test_name_is_trimmed() {
        let fields = validate(RecipeCandidate {
            name: Some("  Pancakes  ".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(fields.name, "Pancakes");
    }

    #[test]
    fn test_whitespace_name_is_missing() {
        let err = validate(RecipeCandidate {
            name: Some("   ".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Recipe name is required");
    }

    #[test]
    fn test_name_length_counts_characters_after_trim() {
        let exactly_max = format!("  {}  ", "é".repeat(NAME_MAX_CHARS));
        assert!(validate(RecipeCandidate {
            name: Some(exactly_max),
            ..minimal()
        })
        .is_ok());

        let err = validate(RecipeCandidate {
            name: Some("a".repeat(NAME_MAX_CHARS + 1)),
            ..minimal()
        })
        .unwrap_err();
        assert_eq!(
            err.field("name").unwrap().message,
            "Recipe name cannot exceed 100 characters"
        );
    }

    #[test]
    fn test_numeric_minimums_are_inclusive() {
        let fields = validate(RecipeCandidate {
            prep_time: Some(0),
            cook_time: Some(0),
            servings: Some(1),
            ..minimal()
        })
        .unwrap();
        assert_eq!(fields.total_time(), 0);
        assert_eq!(fields.servings, 1);
    }

    #[test]
    fn test_enum_message_names_normalized_value() {
        let err = validate(RecipeCandidate {
            category: Some("  Brunch ".to_string()),
            difficulty: Some("EXTREME".to_string()),
            ..minimal()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "brunch is not a valid category, extreme is not a valid difficulty level"
        );
    }

    #[test]
    fn test_empty_image_url_is_dropped() {
        let fields = validate(RecipeCandidate {
            image_url: Some("   ".to_string()),
            ..minimal()
        })
        .unwrap();
        assert_eq!(fields.image_url, None);
    }
}
