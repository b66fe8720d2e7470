/// Unit tests for the form validators
/// Covers the field rules, the consent flag wire formats, and failure
/// aggregation for both submission kinds.
use credit_leads_api::models::{NewConsultationRequest, NewCreditReportAnalysisRequest};
use credit_leads_api::validation::{
    is_valid_email, validate_consultation_request, validate_credit_report_analysis_request,
};
use serde_json::json;

fn valid_consultation() -> NewConsultationRequest {
    serde_json::from_value(json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "phone": "0821234567",
        "consentGiven": "true"
    }))
    .expect("valid consultation body deserializes")
}

fn valid_analysis() -> NewCreditReportAnalysisRequest {
    serde_json::from_value(json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "idNumber": "9307245011085",
        "email": "jane@example.com",
        "phone": "0821234567",
        "consentGiven": "true"
    }))
    .expect("valid analysis body deserializes")
}

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails() {
        // Missing @ or domain segment
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email(""));

        // Malformed
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
    }
}

#[cfg(test)]
mod consultation_tests {
    use super::*;

    #[test]
    fn test_valid_consultation_passes() {
        assert!(validate_consultation_request(&valid_consultation()).is_ok());
    }

    #[test]
    fn test_short_first_name_rejected() {
        let mut input = valid_consultation();
        input.first_name = "J".to_string();
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].field, "firstName");
        assert!(errors.0[0].message.contains("First name"));
    }

    #[test]
    fn test_short_last_name_rejected() {
        let mut input = valid_consultation();
        input.last_name = "D".to_string();
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0[0].field, "lastName");
    }

    #[test]
    fn test_missing_name_fields_rejected() {
        // Absent fields deserialize as empty strings and fail the length rule
        let input: NewConsultationRequest = serde_json::from_value(json!({
            "email": "jane@example.com",
            "phone": "0821234567",
            "consentGiven": true
        }))
        .unwrap();
        let errors = validate_consultation_request(&input).unwrap_err();
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"firstName"));
        assert!(fields.contains(&"lastName"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut input = valid_consultation();
        input.email = "missing@domain".to_string();
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0[0].field, "email");
        assert_eq!(errors.0[0].message, "Please enter a valid email address");
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut input = valid_consultation();
        input.phone = "12345".to_string();
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0[0].field, "phone");
    }

    #[test]
    fn test_consent_enforced_for_consultation() {
        // Consent enforcement is uniform across forms
        let mut input = valid_consultation();
        input.consent_given = Some(false);
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0[0].field, "consentGiven");

        input.consent_given = None;
        assert!(validate_consultation_request(&input).is_err());
    }

    #[test]
    fn test_optional_fields_pass_through_unchecked() {
        let mut input = valid_consultation();
        input.primary_concern = Some("Something not on the dropdown".to_string());
        input.additional_details = Some("".to_string());
        assert!(validate_consultation_request(&input).is_ok());
    }

    #[test]
    fn test_failures_are_aggregated() {
        let input: NewConsultationRequest = serde_json::from_value(json!({
            "firstName": "J",
            "lastName": "D",
            "email": "not-an-email",
            "phone": "123",
            "consentGiven": "false"
        }))
        .unwrap();
        let errors = validate_consultation_request(&input).unwrap_err();
        assert_eq!(errors.0.len(), 5);

        // Display joins every message for the error response body
        let message = errors.to_string();
        assert!(message.contains("First name"));
        assert!(message.contains("Last name"));
        assert!(message.contains("email"));
        assert!(message.contains("phone number"));
        assert!(message.contains("consent"));
    }
}

#[cfg(test)]
mod credit_report_tests {
    use super::*;

    #[test]
    fn test_valid_analysis_passes() {
        assert!(validate_credit_report_analysis_request(&valid_analysis()).is_ok());
    }

    #[test]
    fn test_id_number_too_short_rejected() {
        let mut input = valid_analysis();
        input.id_number = "123".to_string();
        let errors = validate_credit_report_analysis_request(&input).unwrap_err();
        assert_eq!(errors.0[0].field, "idNumber");
        assert!(errors.0[0].message.contains("13"));
    }

    #[test]
    fn test_id_number_too_long_rejected() {
        let mut input = valid_analysis();
        input.id_number = "12345678901234".to_string();
        let errors = validate_credit_report_analysis_request(&input).unwrap_err();
        assert_eq!(errors.0[0].message, "SA ID number must be 13 digits");
    }

    #[test]
    fn test_id_number_with_letter_rejected() {
        let mut input = valid_analysis();
        input.id_number = "930724501108A".to_string();
        let errors = validate_credit_report_analysis_request(&input).unwrap_err();
        assert_eq!(
            errors.0[0].message,
            "SA ID number must contain only numbers"
        );
    }

    #[test]
    fn test_format_valid_id_number_accepted_without_checksum() {
        // Only the 13-digit format is verified, no checksum
        let mut input = valid_analysis();
        input.id_number = "9307245011085".to_string();
        assert!(validate_credit_report_analysis_request(&input).is_ok());

        input.id_number = "0000000000000".to_string();
        assert!(validate_credit_report_analysis_request(&input).is_ok());
    }

    #[test]
    fn test_consent_false_rejected() {
        let mut input = valid_analysis();
        input.consent_given = Some(false);
        let errors = validate_credit_report_analysis_request(&input).unwrap_err();
        assert_eq!(
            errors.0[0].message,
            "You must consent to credit report analysis"
        );
    }

    #[test]
    fn test_consent_missing_rejected() {
        let input: NewCreditReportAnalysisRequest = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "idNumber": "9307245011085",
            "email": "jane@example.com",
            "phone": "0821234567"
        }))
        .unwrap();
        assert!(validate_credit_report_analysis_request(&input).is_err());
    }
}

#[cfg(test)]
mod consent_wire_format_tests {
    use super::*;

    #[test]
    fn test_consent_accepts_bool_and_legacy_string() {
        let from_bool: NewConsultationRequest = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "0821234567",
            "consentGiven": true
        }))
        .unwrap();
        assert_eq!(from_bool.consent_given, Some(true));

        let from_string = valid_consultation();
        assert_eq!(from_string.consent_given, Some(true));

        let false_string: NewConsultationRequest = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "0821234567",
            "consentGiven": "false"
        }))
        .unwrap();
        assert_eq!(false_string.consent_given, Some(false));
    }

    #[test]
    fn test_consent_rejects_other_strings() {
        let result: Result<NewConsultationRequest, _> = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "0821234567",
            "consentGiven": "yes"
        }));
        assert!(result.is_err());
    }
}
