//! Field-list normalization and answer checking for dynamic forms.

use super::dtos::{AnswerInput, FieldInput};
use crate::validation::{clean_optional, validate_phone};
use crate::{AppError, AppResult};
use chrono::NaiveDate;
use ecclesia_core::entities::{form_fields, sea_orm_active_enums::FieldType};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

const TEXT_MAX_LEN: usize = 1000;
const TEXTAREA_MAX_LEN: usize = 10_000;

/// A field definition ready to be stored, with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedField {
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub order: i32,
}

/// Validates a submitted field list and assigns contiguous positions `0..n`.
///
/// Fields without an explicit `order` take their array index. Explicit orders
/// only decide relative position and must not repeat.
pub fn normalize_fields(inputs: Vec<FieldInput>) -> AppResult<Vec<NormalizedField>> {
    let mut seen_orders = HashSet::new();
    let mut keyed = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.into_iter().enumerate() {
        input.validate()?;

        let label = input.label.trim().to_string();
        if label.is_empty() {
            return Err(AppError::Validation(format!("Field {} has an empty label", index)));
        }

        if let Some(order) = input.order {
            if order < 0 {
                return Err(AppError::Validation(format!("Field '{}' has a negative order", label)));
            }
            if !seen_orders.insert(order) {
                return Err(AppError::Validation(format!("Duplicate field order {}", order)));
            }
        }

        let options = if input.field_type.requires_options() {
            let mut cleaned: Vec<String> = Vec::new();
            for option in input.options.unwrap_or_default() {
                let option = option.trim().to_string();
                if option.is_empty() || cleaned.contains(&option) {
                    continue;
                }
                cleaned.push(option);
            }
            if cleaned.is_empty() {
                return Err(AppError::Validation(format!(
                    "Field '{}' needs at least one option",
                    label
                )));
            }
            Some(cleaned)
        } else {
            None
        };

        let sort_key = input.order.unwrap_or(index as i32);
        keyed.push((
            sort_key,
            index,
            NormalizedField {
                label,
                field_type: input.field_type,
                required: input.required,
                placeholder: clean_optional(input.placeholder),
                help_text: clean_optional(input.help_text),
                options,
                order: 0,
            },
        ));
    }

    keyed.sort_by_key(|(key, index, _)| (*key, *index));

    Ok(keyed
        .into_iter()
        .enumerate()
        .map(|(position, (_, _, mut field))| {
            field.order = position as i32;
            field
        })
        .collect())
}

/// An answer that passed its field's checks, in stored form.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedAnswer {
    pub field_id: Uuid,
    pub field_label: String,
    pub value: String,
}

/// Checks submitted answers against the form's fields.
///
/// Returns answers for the fields that were filled in, in field order. All
/// problems are reported together.
pub fn check_answers(
    fields: &[form_fields::Model],
    answers: Vec<AnswerInput>,
) -> AppResult<Vec<CheckedAnswer>> {
    let known: HashSet<Uuid> = fields.iter().map(|f| f.id).collect();
    let mut by_field: HashMap<Uuid, Value> = HashMap::new();

    for answer in answers {
        if !known.contains(&answer.field_id) {
            return Err(AppError::Validation(format!("Unknown field {}", answer.field_id)));
        }
        if by_field.insert(answer.field_id, answer.value).is_some() {
            return Err(AppError::Validation(format!(
                "Field {} answered more than once",
                answer.field_id
            )));
        }
    }

    let mut ordered: Vec<&form_fields::Model> = fields.iter().collect();
    ordered.sort_by_key(|f| f.order);

    let mut problems = Vec::new();
    let mut checked = Vec::new();

    for field in ordered {
        let raw = by_field.remove(&field.id).unwrap_or(Value::Null);
        match check_value(field, raw) {
            Ok(Some(value)) => checked.push(CheckedAnswer {
                field_id: field.id,
                field_label: field.label.clone(),
                value,
            }),
            Ok(None) if field.required => {
                problems.push(format!("'{}' is required", field.label));
            }
            Ok(None) => {}
            Err(problem) => problems.push(format!("'{}' {}", field.label, problem)),
        }
    }

    if problems.is_empty() {
        Ok(checked)
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

fn scalar_text(value: Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err("must be a single value"),
    }
}

/// `Ok(None)` means the field was left blank.
fn check_value(field: &form_fields::Model, raw: Value) -> Result<Option<String>, String> {
    if field.field_type == FieldType::Checkbox {
        let picked: Vec<String> = match raw {
            Value::Null => Vec::new(),
            Value::Array(items) => {
                let mut picked = Vec::new();
                for item in items {
                    match item {
                        Value::String(s) if !s.trim().is_empty() => picked.push(s.trim().to_string()),
                        Value::String(_) => {}
                        _ => return Err("must be a list of options".to_string()),
                    }
                }
                picked
            }
            Value::String(s) if s.trim().is_empty() => Vec::new(),
            Value::String(s) => vec![s.trim().to_string()],
            _ => return Err("must be a list of options".to_string()),
        };

        if picked.is_empty() {
            return Ok(None);
        }

        let options = field.option_labels();
        if let Some(bad) = picked.iter().find(|p| !options.contains(p)) {
            return Err(format!("has an invalid option '{}'", bad));
        }

        return serde_json::to_string(&picked)
            .map(Some)
            .map_err(|e| e.to_string());
    }

    let text = match scalar_text(raw).map_err(str::to_string)? {
        Some(text) => text,
        None => return Ok(None),
    };

    match field.field_type {
        FieldType::Text if text.chars().count() > TEXT_MAX_LEN => {
            Err(format!("must be at most {} characters", TEXT_MAX_LEN))
        }
        FieldType::Textarea if text.chars().count() > TEXTAREA_MAX_LEN => {
            Err(format!("must be at most {} characters", TEXTAREA_MAX_LEN))
        }
        FieldType::Email if !text.validate_email() => Err("must be a valid email".to_string()),
        FieldType::Number if !text.parse::<f64>().map(f64::is_finite).unwrap_or(false) => {
            Err("must be a number".to_string())
        }
        FieldType::Phone if validate_phone(&text).is_err() => {
            Err("must be a valid phone number".to_string())
        }
        FieldType::Date if NaiveDate::parse_from_str(&text, "%Y-%m-%d").is_err() => {
            Err("must be a date (YYYY-MM-DD)".to_string())
        }
        FieldType::Select if !field.option_labels().contains(&text) => {
            Err(format!("has an invalid option '{}'", text))
        }
        _ => Ok(Some(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(label: &str, field_type: FieldType, order: Option<i32>) -> FieldInput {
        FieldInput {
            label: label.to_string(),
            field_type,
            required: false,
            placeholder: None,
            help_text: None,
            options: None,
            order,
        }
    }

    fn field(label: &str, field_type: FieldType, required: bool, order: i32) -> form_fields::Model {
        form_fields::Model {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            label: label.to_string(),
            field_type,
            required,
            placeholder: None,
            help_text: None,
            options: None,
            order,
        }
    }

    #[test]
    fn test_orders_follow_submission_when_omitted() {
        let result = normalize_fields(vec![
            input("Nome", FieldType::Text, None),
            input("Email", FieldType::Email, None),
            input("Idade", FieldType::Number, None),
        ])
        .unwrap();

        let orders: Vec<i32> = result.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(result[0].label, "Nome");
        assert_eq!(result[2].label, "Idade");
    }

    #[test]
    fn test_explicit_orders_are_renumbered_contiguously() {
        let result = normalize_fields(vec![
            input("C", FieldType::Text, Some(30)),
            input("A", FieldType::Text, Some(10)),
            input("B", FieldType::Text, Some(20)),
        ])
        .unwrap();

        let labels: Vec<&str> = result.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        let orders: Vec<i32> = result.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_orders_rejected() {
        let err = normalize_fields(vec![
            input("A", FieldType::Text, Some(1)),
            input("B", FieldType::Text, Some(1)),
        ])
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_choice_fields_need_options() {
        let err = normalize_fields(vec![input("Camiseta", FieldType::Select, None)]).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let mut with_options = input("Camiseta", FieldType::Select, None);
        with_options.options = Some(vec![" P ".into(), "M".into(), "M".into(), "".into()]);
        let result = normalize_fields(vec![with_options]).unwrap();
        assert_eq!(result[0].options, Some(vec!["P".to_string(), "M".to_string()]));

        let mut text_with_options = input("Nome", FieldType::Text, None);
        text_with_options.options = Some(vec!["ignored".into()]);
        let result = normalize_fields(vec![text_with_options]).unwrap();
        assert_eq!(result[0].options, None);
    }

    #[test]
    fn test_check_answers_required_and_types() {
        let name = field("Nome", FieldType::Text, true, 0);
        let email = field("Email", FieldType::Email, false, 1);
        let age = field("Idade", FieldType::Number, false, 2);
        let fields = vec![name.clone(), email.clone(), age.clone()];

        let ok = check_answers(
            &fields,
            vec![
                AnswerInput { field_id: name.id, value: json!("  João ") },
                AnswerInput { field_id: age.id, value: json!(42) },
            ],
        )
        .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[0].value, "João");
        assert_eq!(ok[1].value, "42");

        let missing = check_answers(&fields, vec![]).unwrap_err();
        assert!(missing.to_string().contains("'Nome' is required"));

        let bad = check_answers(
            &fields,
            vec![
                AnswerInput { field_id: name.id, value: json!("João") },
                AnswerInput { field_id: email.id, value: json!("not-an-email") },
                AnswerInput { field_id: age.id, value: json!("quarenta") },
            ],
        )
        .unwrap_err();
        let message = bad.to_string();
        assert!(message.contains("'Email' must be a valid email"));
        assert!(message.contains("'Idade' must be a number"));
    }

    #[test]
    fn test_check_answers_choices() {
        let mut size = field("Tamanho", FieldType::Select, true, 0);
        size.options = Some(json!(["P", "M", "G"]));
        let mut days = field("Dias", FieldType::Checkbox, false, 1);
        days.options = Some(json!(["Sábado", "Domingo"]));
        let fields = vec![size.clone(), days.clone()];

        let ok = check_answers(
            &fields,
            vec![
                AnswerInput { field_id: size.id, value: json!("M") },
                AnswerInput { field_id: days.id, value: json!(["Sábado", "Domingo"]) },
            ],
        )
        .unwrap();
        assert_eq!(ok[1].value, r#"["Sábado","Domingo"]"#);

        let bad = check_answers(
            &fields,
            vec![AnswerInput { field_id: size.id, value: json!("XG") }],
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let fields = vec![field("Nome", FieldType::Text, false, 0)];
        let err = check_answers(
            &fields,
            vec![AnswerInput { field_id: Uuid::new_v4(), value: json!("x") }],
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
