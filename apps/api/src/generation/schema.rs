//! Declarative shape of a `GeneratedCv` and a checker that walks it.
//!
//! The table below is the single statement of the document contract: field
//! presence, type, enum membership, numeric range and list non-emptiness.
//! An empty list counts as an omitted field.

use serde_json::Value;

use crate::generation::models::CvFormat;
use crate::generation::normalizer::MalformedResponseError;

#[derive(Debug)]
pub enum Shape {
    Text { non_empty: bool },
    Integer { min: i64, max: i64 },
    OneOf(&'static [&'static str]),
    List(&'static Shape),
    Object(&'static [Field]),
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub shape: Shape,
}

const fn required(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        required: true,
        shape,
    }
}

const fn optional(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        required: false,
        shape,
    }
}

const LABEL: Shape = Shape::Text { non_empty: true };
const FREE_TEXT: Shape = Shape::Text { non_empty: false };

const EXPERIENCE_ENTRY: &[Field] = &[
    required("title", LABEL),
    required("company", LABEL),
    required("location", FREE_TEXT),
    required("period", FREE_TEXT),
    required("achievements", Shape::List(&LABEL)),
];

const SKILL_CATEGORY: &[Field] = &[
    required("category", LABEL),
    required("skills", Shape::List(&LABEL)),
];

const WARNING: &[Field] = &[
    required("type", LABEL),
    required("message", LABEL),
    optional("recommendations", Shape::List(&LABEL)),
];

const EXPERIENCE_ENTRY_SHAPE: Shape = Shape::Object(EXPERIENCE_ENTRY);
const SKILL_CATEGORY_SHAPE: Shape = Shape::Object(SKILL_CATEGORY);
const WARNING_SHAPE: Shape = Shape::Object(WARNING);

const GENERATED_CV_FIELDS: &[Field] = &[
    required("format", Shape::OneOf(CvFormat::VARIANTS)),
    required("summary", LABEL),
    required("experience", Shape::List(&EXPERIENCE_ENTRY_SHAPE)),
    required("skills", Shape::List(&SKILL_CATEGORY_SHAPE)),
    required("keywords", Shape::List(&LABEL)),
    optional("matchedSkills", Shape::List(&LABEL)),
    optional("missingSkills", Shape::List(&LABEL)),
    required("atsScore", Shape::Integer { min: 0, max: 100 }),
    optional("warnings", Shape::List(&WARNING_SHAPE)),
];

pub const GENERATED_CV: Shape = Shape::Object(GENERATED_CV_FIELDS);

/// Checks `value` against `shape`, returning the first violation found in
/// declaration order.
pub fn check(value: &Value, shape: &Shape) -> Result<(), MalformedResponseError> {
    check_at(value, shape, "$")
}

fn check_at(value: &Value, shape: &Shape, path: &str) -> Result<(), MalformedResponseError> {
    match shape {
        Shape::Text { non_empty } => {
            let text = value.as_str().ok_or_else(|| {
                violation(path, format!("expected a string, found {}", kind(value)))
            })?;
            if *non_empty && text.trim().is_empty() {
                return Err(violation(path, "must not be empty"));
            }
            Ok(())
        }
        Shape::Integer { min, max } => {
            let number = value.as_i64().ok_or_else(|| {
                violation(path, format!("expected an integer, found {}", kind(value)))
            })?;
            if number < *min || number > *max {
                return Err(violation(
                    path,
                    format!("must be between {min} and {max}, found {number}"),
                ));
            }
            Ok(())
        }
        Shape::OneOf(allowed) => {
            let text = value.as_str().ok_or_else(|| {
                violation(path, format!("expected a string, found {}", kind(value)))
            })?;
            if !allowed.iter().any(|a| *a == text) {
                return Err(violation(
                    path,
                    format!("must be one of {}, found '{text}'", allowed.join(", ")),
                ));
            }
            Ok(())
        }
        Shape::List(item) => {
            let items = value.as_array().ok_or_else(|| {
                violation(path, format!("expected a list, found {}", kind(value)))
            })?;
            for (index, element) in items.iter().enumerate() {
                check_at(element, item, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        Shape::Object(fields) => {
            let object = value.as_object().ok_or_else(|| {
                violation(path, format!("expected an object, found {}", kind(value)))
            })?;
            for field in fields.iter() {
                let field_path = join(path, field.name);
                match object.get(field.name) {
                    None if field.required => {
                        return Err(violation(&field_path, "is required"));
                    }
                    None => {}
                    Some(Value::Array(items)) if items.is_empty() => {
                        if field.required {
                            return Err(violation(&field_path, "must not be empty"));
                        }
                    }
                    Some(inner) => check_at(inner, &field.shape, &field_path)?,
                }
            }
            Ok(())
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path == "$" {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a decimal number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn violation(path: &str, reason: impl Into<String>) -> MalformedResponseError {
    MalformedResponseError::SchemaViolation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path_of(result: Result<(), MalformedResponseError>) -> String {
        match result {
            Err(MalformedResponseError::SchemaViolation { path, .. }) => path,
            other => panic!("expected a schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_range_is_inclusive() {
        let shape = Shape::Integer { min: 0, max: 100 };
        assert!(check(&json!(0), &shape).is_ok());
        assert!(check(&json!(100), &shape).is_ok());
        assert!(check(&json!(101), &shape).is_err());
        assert!(check(&json!(-1), &shape).is_err());
    }

    #[test]
    fn test_integer_rejects_decimals_and_strings() {
        let shape = Shape::Integer { min: 0, max: 100 };
        assert!(check(&json!(72.5), &shape).is_err());
        assert!(check(&json!(72.0), &shape).is_err());
        assert!(check(&json!("72"), &shape).is_err());
    }

    #[test]
    fn test_null_is_a_type_error_not_an_omission() {
        let result = check(
            &json!({"type": "skill-gap", "message": "m", "recommendations": null}),
            &WARNING_SHAPE,
        );
        assert_eq!(path_of(result), "recommendations");
    }

    #[test]
    fn test_empty_optional_list_counts_as_omitted() {
        let warning = json!({"type": "skill-gap", "message": "m", "recommendations": []});
        assert!(check(&warning, &WARNING_SHAPE).is_ok());
    }

    #[test]
    fn test_nested_paths_are_reported() {
        let entry = json!({
            "title": "Intern",
            "company": "Acme",
            "location": "Remote",
            "period": "2024",
            "achievements": ["Shipped 3 features", 42]
        });
        let result = check(&json!([entry]), &Shape::List(&EXPERIENCE_ENTRY_SHAPE));
        assert_eq!(path_of(result), "$[0].achievements[1]");
    }

    #[test]
    fn test_blank_label_rejected() {
        let result = check(
            &json!({"category": "  ", "skills": ["Rust"]}),
            &SKILL_CATEGORY_SHAPE,
        );
        assert_eq!(path_of(result), "category");
    }
}
