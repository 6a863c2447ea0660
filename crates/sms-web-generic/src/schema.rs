//! Structural validation of the `POST /send-sms` body.
//!
//! Errors are reported per field in the `{"loc", "msg", "type"}` shape HTTP
//! clients of the service already parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendSmsPayload {
    /// Recipient, e.g. "09123456789". Its format is checked by the handler, not here.
    pub phone: String,

    #[validate(length(min = 1, max = 500))]
    pub message: String,
}

impl SendSmsPayload {
    const FIELDS: [&'static str; 2] = ["phone", "message"];

    /// Length of a string field, in characters.
    fn char_len(&self, field: &str) -> Option<u64> {
        let value = match field {
            "phone" => &self.phone,
            "message" => &self.message,
            _ => return None,
        };
        Some(value.chars().count() as u64)
    }
}

/// One failing field of a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn body(kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    fn field(field: &str, kind: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

/// Decode and structurally validate a raw request body.
pub fn decode_payload(body: &[u8]) -> Result<SendSmsPayload, Vec<FieldError>> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        vec![FieldError::body(
            "json_invalid",
            format!("JSON decode error: {}", e),
        )]
    })?;

    let Value::Object(fields) = &value else {
        return Err(vec![FieldError::body(
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
        )]);
    };

    let mut errors = Vec::new();
    for name in SendSmsPayload::FIELDS {
        match fields.get(name) {
            None => errors.push(FieldError::field(name, "missing", "Field required")),
            Some(Value::String(_)) => {}
            Some(_) => errors.push(FieldError::field(
                name,
                "string_type",
                "Input should be a valid string",
            )),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let payload: SendSmsPayload = serde_json::from_value(value)
        .map_err(|e| vec![FieldError::body("json_invalid", e.to_string())])?;
    payload
        .validate()
        .map_err(|e| length_errors(&payload, &e))?;
    Ok(payload)
}

fn length_errors(payload: &SendSmsPayload, errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let param = |key: &str| err.params.get(key).and_then(Value::as_u64);
            let error = match (payload.char_len(&field), param("min"), param("max")) {
                (Some(len), Some(min), _) if len < min => FieldError::field(
                    &field,
                    "string_too_short",
                    format!("String should have at least {} character(s)", min),
                ),
                (_, _, Some(max)) => FieldError::field(
                    &field,
                    "string_too_long",
                    format!("String should have at most {} characters", max),
                ),
                _ => FieldError::field(&field, &err.code, err.code.to_string()),
            };
            out.push(error);
        }
    }
    out.sort_by(|a, b| a.loc.cmp(&b.loc));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(errors: &[FieldError]) -> Vec<(&str, &str)> {
        errors
            .iter()
            .map(|e| (e.loc.last().unwrap().as_str(), e.kind.as_str()))
            .collect()
    }

    #[test]
    fn decodes_valid_payload() {
        let payload = decode_payload(br#"{"phone":"09123456789","message":"hi"}"#).unwrap();
        assert_eq!(payload.phone, "09123456789");
        assert_eq!(payload.message, "hi");
    }

    #[test]
    fn ignores_unknown_fields() {
        let payload =
            decode_payload(br#"{"phone":"09123456789","message":"hi","extra":1}"#).unwrap();
        assert_eq!(payload.message, "hi");
    }

    #[test]
    fn reports_missing_fields() {
        let errors = decode_payload(br#"{"message":"hi"}"#).unwrap_err();
        assert_eq!(kinds(&errors), vec![("phone", "missing")]);

        let errors = decode_payload(b"{}").unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![("phone", "missing"), ("message", "missing")]
        );
    }

    #[test]
    fn reports_non_string_fields() {
        let errors = decode_payload(br#"{"phone":9123456789,"message":"hi"}"#).unwrap_err();
        assert_eq!(kinds(&errors), vec![("phone", "string_type")]);
    }

    #[test]
    fn rejects_empty_message() {
        let errors = decode_payload(br#"{"phone":"09123456789","message":""}"#).unwrap_err();
        assert_eq!(kinds(&errors), vec![("message", "string_too_short")]);
        assert_eq!(errors[0].loc, vec!["body", "message"]);
    }

    #[test]
    fn message_bounds_count_characters() {
        let at_limit = format!(
            r#"{{"phone":"09123456789","message":"{}"}}"#,
            "س".repeat(500)
        );
        assert!(decode_payload(at_limit.as_bytes()).is_ok());

        let over_limit = format!(
            r#"{{"phone":"09123456789","message":"{}"}}"#,
            "a".repeat(501)
        );
        let errors = decode_payload(over_limit.as_bytes()).unwrap_err();
        assert_eq!(kinds(&errors), vec![("message", "string_too_long")]);
    }

    #[test]
    fn rejects_malformed_json_and_non_objects() {
        let errors = decode_payload(b"{not json").unwrap_err();
        assert_eq!(errors[0].kind, "json_invalid");
        assert_eq!(errors[0].loc, vec!["body"]);

        let errors = decode_payload(b"[1, 2]").unwrap_err();
        assert_eq!(errors[0].kind, "model_attributes_type");
    }

    #[test]
    fn phone_format_is_not_a_schema_concern() {
        assert!(decode_payload(br#"{"phone":"123","message":"hi"}"#).is_ok());
    }
}
