use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::{coalesce_to_empty_string, interpret_as_boolean, parse_float_prefix};
use crate::fmt::serialize_pairs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Age,
    Pincode,
    State,
    AgreeTerms,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Age,
        FormField::Pincode,
        FormField::State,
        FormField::AgreeTerms,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Age => "age",
            FormField::Pincode => "pincode",
            FormField::State => "state",
            FormField::AgreeTerms => "agreeTerms",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FormField::Name => "Name must be 2-50 characters",
            FormField::Email => "Invalid email format",
            FormField::Phone => "Invalid Indian phone number",
            FormField::Age => "Age must be an integer between 16 and 100",
            FormField::Pincode => "Invalid Indian pincode",
            FormField::State => "State is required",
            FormField::AgreeTerms => "Must agree to terms",
        }
    }
}

impl AsRef<str> for FormField {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

/// Raw form submission. Every field is kept as supplied so each rule can
/// decide for itself how to treat missing or mistyped values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Map<String, Value>,
}

impl FormData {
    /// Non-object input behaves like a form with every field missing.
    pub fn from_value(value: &Value) -> Self {
        FormData {
            fields: value.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FormField) -> Option<&Value> {
        self.fields.get(field.key())
    }

    pub fn is_valid_field(&self, field: FormField) -> bool {
        let value = self.get(field);
        match field {
            FormField::Name => is_valid_name(value),
            FormField::Email => is_valid_email(value),
            FormField::Phone => is_valid_phone(value),
            FormField::Age => is_valid_age(value),
            FormField::Pincode => is_valid_pincode(value),
            FormField::State => is_valid_state(value),
            FormField::AgreeTerms => interpret_as_boolean(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(serialize_with = "serialize_pairs")]
    pub errors: Vec<(FormField, &'static str)>,
}

impl ValidationResult {
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn is_valid_name(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map(|s| (2..=50).contains(&s.trim().chars().count()))
        .unwrap_or(false)
}

/// Exactly one `@`, with a `.` somewhere after it.
fn is_valid_email(value: Option<&Value>) -> bool {
    let Some(email) = value.and_then(Value::as_str) else {
        return false;
    };
    let Some((_, domain)) = email.split_once('@') else {
        return false;
    };
    !domain.contains('@') && domain.contains('.')
}

fn is_valid_phone(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map(|s| {
            s.len() == 10
                && s.bytes().all(|b| b.is_ascii_digit())
                && matches!(s.as_bytes()[0], b'6'..=b'9')
        })
        .unwrap_or(false)
}

fn is_valid_age(value: Option<&Value>) -> bool {
    parse_float_prefix(value)
        .map(|age| age.fract() == 0.0 && (16.0..=100.0).contains(&age))
        .unwrap_or(false)
}

fn is_valid_pincode(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .map(|s| s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) && !s.starts_with('0'))
        .unwrap_or(false)
}

fn is_valid_state(value: Option<&Value>) -> bool {
    coalesce_to_empty_string(value)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Run every field rule, collecting all failures in field order.
pub fn validate_form(value: &Value) -> ValidationResult {
    let form = FormData::from_value(value);
    let errors: Vec<(FormField, &'static str)> = FormField::ALL
        .iter()
        .filter(|f| !form.is_valid_field(**f))
        .map(|f| (*f, f.message()))
        .collect();
    if !errors.is_empty() {
        debug!(failed = errors.len(), "form has invalid fields");
    }
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good_form() -> Value {
        json!({
            "name": "Rahul Sharma",
            "email": "rahul@gmail.com",
            "phone": "9876543210",
            "age": 20,
            "pincode": "400001",
            "state": "Maharashtra",
            "agreeTerms": true
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut form = good_form();
        form[field] = value;
        form
    }

    #[test]
    fn test_valid_form() {
        let result = validate_form(&good_form());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_everything_wrong() {
        let result = validate_form(&json!({
            "name": "", "email": "bad-email", "phone": "12345", "age": 10,
            "pincode": "0123", "state": null, "agreeTerms": false
        }));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 7);
        assert_eq!(result.error(FormField::Name), Some("Name must be 2-50 characters"));
        assert_eq!(result.error(FormField::Email), Some("Invalid email format"));
        assert_eq!(result.error(FormField::Phone), Some("Invalid Indian phone number"));
        assert_eq!(
            result.error(FormField::Age),
            Some("Age must be an integer between 16 and 100")
        );
        assert_eq!(result.error(FormField::Pincode), Some("Invalid Indian pincode"));
        assert_eq!(result.error(FormField::State), Some("State is required"));
        assert_eq!(result.error(FormField::AgreeTerms), Some("Must agree to terms"));
    }

    #[test]
    fn test_non_object_input_fails_every_field() {
        let result = validate_form(&json!(null));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), FormField::ALL.len());
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_form(&with("name", json!("  Al  "))).is_valid);
        assert!(!validate_form(&with("name", json!(" A "))).is_valid);
        assert!(validate_form(&with("name", json!("x".repeat(50)))).is_valid);
        assert!(!validate_form(&with("name", json!("x".repeat(51)))).is_valid);
        assert!(!validate_form(&with("name", json!(42))).is_valid);
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_form(&with("email", json!("a.b@mail.co.in"))).is_valid);
        assert!(!validate_form(&with("email", json!("a@b@c.com"))).is_valid);
        assert!(!validate_form(&with("email", json!("first.last@localhost"))).is_valid);
        assert!(!validate_form(&with("email", json!("no-at.com"))).is_valid);
        assert!(!validate_form(&with("email", json!(null))).is_valid);
    }

    #[test]
    fn test_phone_rules() {
        for ok in ["6000000000", "7123456789", "8123456789", "9999999999"] {
            assert!(validate_form(&with("phone", json!(ok))).is_valid, "{ok}");
        }
        for bad in ["5123456789", "98765432101", "98765-4321", "98765432ab"] {
            assert!(!validate_form(&with("phone", json!(bad))).is_valid, "{bad}");
        }
        assert!(!validate_form(&with("phone", json!(9876543210u64))).is_valid);
    }

    #[test]
    fn test_age_coercion() {
        assert!(validate_form(&with("age", json!("22"))).is_valid);
        assert!(validate_form(&with("age", json!("22 years"))).is_valid);
        assert!(validate_form(&with("age", json!(16))).is_valid);
        assert!(validate_form(&with("age", json!(100))).is_valid);
        assert!(!validate_form(&with("age", json!(15))).is_valid);
        assert!(!validate_form(&with("age", json!(101))).is_valid);
        assert!(!validate_form(&with("age", json!(20.5))).is_valid);
        assert!(!validate_form(&with("age", json!("twenty"))).is_valid);
        assert!(!validate_form(&with("age", json!(null))).is_valid);
        assert!(validate_form(&with("age", json!([22]))).is_valid);
        assert!(validate_form(&with("age", json!(["30"]))).is_valid);
        assert!(!validate_form(&with("age", json!([]))).is_valid);
        assert!(!validate_form(&with("age", json!([15]))).is_valid);
    }

    #[test]
    fn test_pincode_rules() {
        assert!(!validate_form(&with("pincode", json!("012345"))).is_valid);
        assert!(!validate_form(&with("pincode", json!("40000"))).is_valid);
        assert!(!validate_form(&with("pincode", json!("40000A"))).is_valid);
        assert!(!validate_form(&with("pincode", json!(400001))).is_valid);
    }

    #[test]
    fn test_state_rules() {
        assert!(!validate_form(&with("state", json!(""))).is_valid);
        assert!(!validate_form(&with("state", json!(7))).is_valid);
        let mut form = good_form();
        form.as_object_mut().unwrap().remove("state");
        assert_eq!(validate_form(&form).error(FormField::State), Some("State is required"));
    }

    #[test]
    fn test_agree_terms_truthiness() {
        for truthy in [json!(true), json!(1), json!("yes"), json!([])] {
            assert!(validate_form(&with("agreeTerms", truthy)).is_valid);
        }
        for falsy in [json!(false), json!(0), json!(""), json!(null)] {
            assert!(!validate_form(&with("agreeTerms", falsy)).is_valid);
        }
    }

    #[test]
    fn test_fields_are_independent() {
        let result = validate_form(&with("phone", json!("123")));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, FormField::Phone);

        let broken = validate_form(&json!({ "phone": "123" }));
        let fixed = validate_form(&json!({ "phone": "9876543210" }));
        assert_eq!(broken.errors.len(), fixed.errors.len() + 1);
        assert!(fixed.error(FormField::Phone).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let result = validate_form(&with("state", json!(null)));
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v, json!({ "isValid": false, "errors": { "state": "State is required" } }));
        let ok = serde_json::to_value(validate_form(&good_form())).unwrap();
        assert_eq!(ok, json!({ "isValid": true, "errors": {} }));
    }
}
