//! Schema validation for resume payloads.
//!
//! Payloads are checked as raw JSON against a static field table before they
//! are deserialized, so a single response can report every violated field
//! instead of stopping at the first serde error.

use std::collections::HashSet;
use std::fmt;

use email_address::{EmailAddress, Options};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::resume::{Proficiency, ResumeDraft, ResumePatch};

/// Field name used when the violation concerns the request body itself.
const BODY_FIELD: &str = "body";


#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    ExpectedString,
    ExpectedBoolean,
    ExpectedArray,
    ExpectedObject,
    NonEmpty,
    Email,
    Proficiency,
    DuplicateId,
    UnknownField,
    ReadOnly,
    Malformed,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rule::Required => "is required",
            Rule::ExpectedString => "must be a string",
            Rule::ExpectedBoolean => "must be a boolean",
            Rule::ExpectedArray => "must be an array",
            Rule::ExpectedObject => "must be an object",
            Rule::NonEmpty => "must not be empty",
            Rule::Email => "must be a valid email address",
            Rule::Proficiency => "must be one of Basic, Conversational, Fluent, Native",
            Rule::DuplicateId => "duplicates the id of an earlier entry",
            Rule::UnknownField => "is not a recognized field",
            Rule::ReadOnly => "is assigned by the server and cannot be set",
            Rule::Malformed => "could not be decoded",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub rule: Rule,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }
}

/// Every violation found in one payload, in document order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", describe(.0))]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self(violations)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    #[cfg(test)]
    pub fn has(&self, field: &str, rule: Rule) -> bool {
        self.0.iter().any(|v| v.field == field && v.rule == rule)
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.rule))
        .collect::<Vec<_>>()
        .join("; ")
}

// ────────────────────────────────────────────────────────────────────────────
// Field tables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Kind {
    Text,
    NonEmptyText,
    Email,
    Flag,
    TextList,
    Proficiency,
    Object(&'static [Field]),
    Collection(&'static [Field]),
}

impl Kind {
    /// Optional scalars accept an explicit `null` as "absent".
    fn nullable(self) -> bool {
        matches!(self, Kind::Text | Kind::NonEmptyText | Kind::Email)
    }
}

#[derive(Clone, Copy)]
struct Field {
    name: &'static str,
    kind: Kind,
    required: bool,
}

const fn required(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

const PERSONAL_INFO: &[Field] = &[
    required("fullName", Kind::Text),
    required("email", Kind::Email),
    required("phone", Kind::Text),
    required("location", Kind::Text),
    optional("website", Kind::Text),
    optional("linkedin", Kind::Text),
    optional("github", Kind::Text),
    optional("summary", Kind::Text),
];

const EXPERIENCE: &[Field] = &[
    required("id", Kind::Text),
    required("company", Kind::Text),
    required("position", Kind::Text),
    required("startDate", Kind::Text),
    optional("endDate", Kind::Text),
    required("current", Kind::Flag),
    required("location", Kind::Text),
    required("description", Kind::Text),
];

const EDUCATION: &[Field] = &[
    required("id", Kind::Text),
    required("institution", Kind::Text),
    required("degree", Kind::Text),
    required("field", Kind::Text),
    required("startDate", Kind::Text),
    optional("endDate", Kind::Text),
    required("current", Kind::Flag),
    optional("gpa", Kind::Text),
];

const SKILL_CATEGORY: &[Field] = &[
    required("id", Kind::Text),
    required("category", Kind::Text),
    required("items", Kind::TextList),
];

const PROJECT: &[Field] = &[
    required("id", Kind::Text),
    required("name", Kind::Text),
    required("description", Kind::Text),
    required("technologies", Kind::TextList),
    optional("url", Kind::Text),
    optional("github", Kind::Text),
];

const CERTIFICATION: &[Field] = &[
    required("id", Kind::Text),
    required("name", Kind::Text),
    required("issuer", Kind::Text),
    required("date", Kind::Text),
    optional("url", Kind::Text),
];

const LANGUAGE: &[Field] = &[
    required("id", Kind::Text),
    required("language", Kind::Text),
    required("proficiency", Kind::Proficiency),
];

const RESUME_DRAFT: &[Field] = &[
    required("title", Kind::NonEmptyText),
    required("templateId", Kind::Text),
    required("personalInfo", Kind::Object(PERSONAL_INFO)),
    optional("experience", Kind::Collection(EXPERIENCE)),
    optional("education", Kind::Collection(EDUCATION)),
    optional("skills", Kind::Collection(SKILL_CATEGORY)),
    optional("projects", Kind::Collection(PROJECT)),
    optional("certifications", Kind::Collection(CERTIFICATION)),
    optional("languages", Kind::Collection(LANGUAGE)),
];

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Validates a creation payload and returns the normalized draft.
pub fn validate_draft(value: Value) -> Result<ResumeDraft, ValidationErrors> {
    let mut checker = Checker::default();
    match value.as_object() {
        Some(map) => checker.check_object("", map, RESUME_DRAFT),
        None => checker.fail("", Rule::ExpectedObject),
    }
    checker.finish()?;

    decode::<ResumeDraft>(value).map(ResumeDraft::normalize)
}

/// Validates a partial update. Only fields present in the payload are checked;
/// a present field must satisfy the same rules as in a full draft.
pub fn validate_patch(value: Value) -> Result<ResumePatch, ValidationErrors> {
    let mut checker = Checker::default();
    match value.as_object() {
        Some(map) => {
            for (key, field_value) in map {
                match RESUME_DRAFT.iter().find(|f| f.name == key) {
                    Some(field) => {
                        let present = Field {
                            required: true,
                            ..*field
                        };
                        checker.check_field(key, Some(field_value), &present);
                    }
                    None => checker.fail(key, unknown_key_rule("", key)),
                }
            }
        }
        None => checker.fail("", Rule::ExpectedObject),
    }
    checker.finish()?;

    decode::<ResumePatch>(value).map(ResumePatch::normalize)
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ValidationErrors> {
    serde_json::from_value(value)
        .map_err(|_| ValidationErrors::new(vec![FieldViolation::new(BODY_FIELD, Rule::Malformed)]))
}

fn unknown_key_rule(path: &str, key: &str) -> Rule {
    if path.is_empty() && key == "id" {
        Rule::ReadOnly
    } else {
        Rule::UnknownField
    }
}

/// A bare `local@domain.tld` address. Display names, domain literals and
/// quoted local parts are rejected.
fn is_plain_email(s: &str) -> bool {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    !s.starts_with('"') && EmailAddress::parse_with_options(s, options).is_ok()
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Checker
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    fn fail(&mut self, path: &str, rule: Rule) {
        let field = if path.is_empty() { BODY_FIELD } else { path };
        self.violations.push(FieldViolation::new(field, rule));
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.violations))
        }
    }

    fn check_object(&mut self, path: &str, map: &Map<String, Value>, fields: &[Field]) {
        for key in map.keys() {
            if !fields.iter().any(|f| f.name == key) {
                self.fail(&join(path, key), unknown_key_rule(path, key));
            }
        }
        for field in fields {
            self.check_field(&join(path, field.name), map.get(field.name), field);
        }
    }

    fn check_field(&mut self, path: &str, value: Option<&Value>, field: &Field) {
        match value {
            None if field.required => self.fail(path, Rule::Required),
            None => {}
            Some(Value::Null) if field.required => self.fail(path, Rule::Required),
            Some(Value::Null) if field.kind.nullable() => {}
            Some(v) => self.check_value(path, v, field.kind),
        }
    }

    fn check_value(&mut self, path: &str, value: &Value, kind: Kind) {
        match kind {
            Kind::Text => {
                if !value.is_string() {
                    self.fail(path, Rule::ExpectedString);
                }
            }
            Kind::NonEmptyText => match value.as_str() {
                None => self.fail(path, Rule::ExpectedString),
                Some(s) if s.trim().is_empty() => self.fail(path, Rule::NonEmpty),
                Some(_) => {}
            },
            Kind::Email => match value.as_str() {
                None => self.fail(path, Rule::ExpectedString),
                Some(s) if !is_plain_email(s) => self.fail(path, Rule::Email),
                Some(_) => {}
            },
            Kind::Flag => {
                if !value.is_boolean() {
                    self.fail(path, Rule::ExpectedBoolean);
                }
            }
            Kind::TextList => match value.as_array() {
                None => self.fail(path, Rule::ExpectedArray),
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            self.fail(&format!("{path}[{i}]"), Rule::ExpectedString);
                        }
                    }
                }
            },
            Kind::Proficiency => match value.as_str() {
                None => self.fail(path, Rule::ExpectedString),
                Some(s) if !Proficiency::ALL.contains(&s) => self.fail(path, Rule::Proficiency),
                Some(_) => {}
            },
            Kind::Object(fields) => match value.as_object() {
                None => self.fail(path, Rule::ExpectedObject),
                Some(map) => self.check_object(path, map, fields),
            },
            Kind::Collection(fields) => match value.as_array() {
                None => self.fail(path, Rule::ExpectedArray),
                Some(items) => self.check_collection(path, items, fields),
            },
        }
    }

    fn check_collection(&mut self, path: &str, items: &[Value], fields: &[Field]) {
        let mut seen_ids = HashSet::new();
        for (i, item) in items.iter().enumerate() {
            let entry_path = format!("{path}[{i}]");
            let Some(map) = item.as_object() else {
                self.fail(&entry_path, Rule::ExpectedObject);
                continue;
            };
            self.check_object(&entry_path, map, fields);
            if let Some(id) = map.get("id").and_then(Value::as_str) {
                if !seen_ids.insert(id) {
                    self.fail(&join(&entry_path, "id"), Rule::DuplicateId);
                }
            }
        }
    }
}
