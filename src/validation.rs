//! Field constraints for the two lead-capture forms.
//!
//! The constraint set is declared once per entity as a rule table
//! (`CONSULTATION_RULES`, `CREDIT_REPORT_RULES`) and interpreted by a single
//! pure checker, so the server-side guard and any generated client checks
//! share one source of truth. All failing fields are aggregated into a
//! `ValidationErrors` value rather than stopping at the first failure.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::models::{NewConsultationRequest, NewCreditReportAnalysisRequest};

/// A single declarative field constraint.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Minimum string length in characters.
    MinLen {
        min: usize,
        message: &'static str,
    },
    /// Syntactically valid email address.
    Email {
        message: &'static str,
    },
    /// Exactly `len` ASCII digits.
    Digits {
        len: usize,
        length_message: &'static str,
        charset_message: &'static str,
    },
    /// Consent flag must be present and true.
    Consent {
        message: &'static str,
    },
}

/// Rules for the free consultation form.
pub const CONSULTATION_RULES: &[(&str, Rule)] = &[
    (
        "firstName",
        Rule::MinLen {
            min: 2,
            message: "First name must be at least 2 characters",
        },
    ),
    (
        "lastName",
        Rule::MinLen {
            min: 2,
            message: "Last name must be at least 2 characters",
        },
    ),
    (
        "email",
        Rule::Email {
            message: "Please enter a valid email address",
        },
    ),
    (
        "phone",
        Rule::MinLen {
            min: 10,
            message: "Please enter a valid phone number",
        },
    ),
    (
        "consentGiven",
        Rule::Consent {
            message: "You must consent to being contacted",
        },
    ),
];

/// Rules for the credit-report-analysis form (also used by the paid
/// investigation order, which submits the same fields).
pub const CREDIT_REPORT_RULES: &[(&str, Rule)] = &[
    (
        "firstName",
        Rule::MinLen {
            min: 2,
            message: "First name must be at least 2 characters",
        },
    ),
    (
        "lastName",
        Rule::MinLen {
            min: 2,
            message: "Last name must be at least 2 characters",
        },
    ),
    (
        "idNumber",
        Rule::Digits {
            len: 13,
            length_message: "SA ID number must be 13 digits",
            charset_message: "SA ID number must contain only numbers",
        },
    ),
    (
        "email",
        Rule::Email {
            message: "Please enter a valid email address",
        },
    ),
    (
        "phone",
        Rule::MinLen {
            min: 10,
            message: "Please enter a valid phone number",
        },
    ),
    (
        "consentGiven",
        Rule::Consent {
            message: "You must consent to credit report analysis",
        },
    ),
];

/// A field that failed its rule, with the user-facing message.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// All failing fields for one submission, in rule-table order.
#[derive(Debug, Clone)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// The value a rule is checked against.
#[derive(Debug, Clone, Copy)]
enum FieldValue<'a> {
    Text(&'a str),
    Flag(Option<bool>),
}

/// Validate email address syntax.
///
/// Requires a local part, an `@`, and a dotted domain. No deliverability or
/// fake-pattern checks; the forms only need syntactic rejection.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex, compiled once
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let email_regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email regex is valid")
    });

    email_regex.is_match(email)
}

/// Check one field against one rule. Pure; returns the failure if any.
fn check(field: &'static str, value: FieldValue<'_>, rule: Rule) -> Option<FieldError> {
    match (rule, value) {
        (Rule::MinLen { min, message }, FieldValue::Text(s)) => {
            if s.chars().count() < min {
                Some(FieldError { field, message })
            } else {
                None
            }
        }
        (Rule::Email { message }, FieldValue::Text(s)) => {
            if is_valid_email(s) {
                None
            } else {
                Some(FieldError { field, message })
            }
        }
        (
            Rule::Digits {
                len,
                length_message,
                charset_message,
            },
            FieldValue::Text(s),
        ) => {
            if s.len() != len {
                Some(FieldError {
                    field,
                    message: length_message,
                })
            } else if !s.bytes().all(|b| b.is_ascii_digit()) {
                Some(FieldError {
                    field,
                    message: charset_message,
                })
            } else {
                None
            }
        }
        (Rule::Consent { message }, FieldValue::Flag(flag)) => {
            if flag == Some(true) {
                None
            } else {
                Some(FieldError { field, message })
            }
        }
        // Rule tables never pair a rule with the wrong value kind
        _ => None,
    }
}

fn run_rules<'a>(
    rules: &[(&'static str, Rule)],
    lookup: impl Fn(&str) -> FieldValue<'a>,
) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = rules
        .iter()
        .copied()
        .filter_map(|(field, rule)| check(field, lookup(field), rule))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Validate a consultation-request submission against `CONSULTATION_RULES`.
///
/// `primaryConcern` and `additionalDetails` pass through unchecked.
pub fn validate_consultation_request(
    input: &NewConsultationRequest,
) -> Result<(), ValidationErrors> {
    run_rules(CONSULTATION_RULES, |field| match field {
        "firstName" => FieldValue::Text(&input.first_name),
        "lastName" => FieldValue::Text(&input.last_name),
        "email" => FieldValue::Text(&input.email),
        "phone" => FieldValue::Text(&input.phone),
        "consentGiven" => FieldValue::Flag(input.consent_given),
        _ => FieldValue::Text(""),
    })
}

/// Validate a credit-report-analysis submission (or a paid investigation
/// order) against `CREDIT_REPORT_RULES`.
pub fn validate_credit_report_analysis_request(
    input: &NewCreditReportAnalysisRequest,
) -> Result<(), ValidationErrors> {
    run_rules(CREDIT_REPORT_RULES, |field| match field {
        "firstName" => FieldValue::Text(&input.first_name),
        "lastName" => FieldValue::Text(&input.last_name),
        "idNumber" => FieldValue::Text(&input.id_number),
        "email" => FieldValue::Text(&input.email),
        "phone" => FieldValue::Text(&input.phone),
        "consentGiven" => FieldValue::Flag(input.consent_given),
        _ => FieldValue::Text(""),
    })
}
