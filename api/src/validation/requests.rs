//! `Validatable` wiring for the contact-form request type.

use shared::{ContactRequest, NewSubmission, SubmissionSource};

use super::sanitizers::{
    clean_phone_optional, normalize_email, sanitize_text, sanitize_text_optional, trim_optional,
};
use super::validators::{
    validate_budget_optional, validate_email, validate_length, validate_name_chars,
    validate_phone_optional, validate_required, validate_source_optional,
};
use super::{FieldError, Validatable, ValidationBuilder};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;
const MIN_MESSAGE_LENGTH: usize = 10;
const MAX_MESSAGE_LENGTH: usize = 5000;
const MAX_COMPANY_LENGTH: usize = 200;
const MAX_SERVICE_LENGTH: usize = 200;

/// Cap stored user agents; anything longer is noise.
pub const MAX_USER_AGENT_LENGTH: usize = 500;

impl Validatable for ContactRequest {
    fn sanitize(&mut self) {
        self.name = sanitize_text(&self.name);
        self.email = normalize_email(&self.email);
        clean_phone_optional(&mut self.phone);
        sanitize_text_optional(&mut self.company);
        sanitize_text_optional(&mut self.service);
        self.message = sanitize_text(&self.message);
        // Budget keeps its exact content; the empty string is a valid
        // "unselected" choice.
        trim_optional(&mut self.budget);
        trim_optional(&mut self.source);
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        builder.check("name", || {
            validate_required(&self.name, "name")?;
            validate_length(&self.name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;
            validate_name_chars(&self.name)
        });

        builder.check("email", || validate_email(&self.email));

        builder.check("message", || {
            validate_required(&self.message, "message")?;
            validate_length(&self.message, MIN_MESSAGE_LENGTH, MAX_MESSAGE_LENGTH)
        });

        builder.check("phone", || validate_phone_optional(&self.phone));

        if let Some(ref company) = self.company {
            builder.check("company", || {
                validate_length(company, 0, MAX_COMPANY_LENGTH)
            });
        }

        if let Some(ref service) = self.service {
            builder.check("service", || {
                validate_length(service, 0, MAX_SERVICE_LENGTH)
            });
        }

        builder.check("budget", || validate_budget_optional(&self.budget));
        builder.check("source", || validate_source_optional(&self.source));

        builder.build()
    }
}

/// Convert a sanitized, validated request into a storable submission,
/// attaching the client metadata captured at intake.
pub fn build_submission(
    req: ContactRequest,
    ip_address: Option<String>,
    user_agent: Option<String>,
) -> NewSubmission {
    let source = req
        .source
        .as_deref()
        .and_then(SubmissionSource::parse)
        .unwrap_or_default();

    let user_agent =
        user_agent.map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect::<String>());

    NewSubmission {
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
        budget: req.budget,
        service: req.service,
        message: req.message,
        source,
        ip_address,
        user_agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            message: "Interested in a website redesign for my bakery.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_request_passes() {
        let mut req = valid_request();
        req.sanitize();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_all_reported() {
        let mut req = ContactRequest::default();
        req.sanitize();
        let errors = req.validate().unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"message"));
    }

    #[test]
    fn email_is_lowercased_during_sanitize() {
        let mut req = valid_request();
        req.email = "  Jane@Example.COM ".to_string();
        req.sanitize();
        assert_eq!(req.email, "jane@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn bad_email_rejected() {
        let mut req = valid_request();
        req.email = "not-an-email".to_string();
        req.sanitize();
        let errors = req.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "email"));
    }

    #[test]
    fn html_in_name_is_stripped_before_validation() {
        let mut req = valid_request();
        req.name = "  <b>Jane</b> Doe  ".to_string();
        req.sanitize();
        assert_eq!(req.name, "Jane Doe");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn phone_with_separators_is_cleaned_and_accepted() {
        let mut req = valid_request();
        req.phone = Some("+91 98765-43210".to_string());
        req.sanitize();
        assert_eq!(req.phone.as_deref(), Some("+919876543210"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn short_message_rejected() {
        let mut req = valid_request();
        req.message = "Hi".to_string();
        req.sanitize();
        let errors = req.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "message"));
    }

    #[test]
    fn unknown_budget_and_source_rejected_together() {
        let mut req = valid_request();
        req.budget = Some("one million".to_string());
        req.source = Some("carrier-pigeon".to_string());
        req.sanitize();
        let errors = req.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"budget"));
        assert!(fields.contains(&"source"));
    }

    #[test]
    fn submission_defaults_source_to_website() {
        let req = valid_request();
        let submission = build_submission(req, Some("203.0.113.9".into()), None);
        assert_eq!(submission.source, SubmissionSource::Website);
        assert_eq!(submission.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn submission_keeps_declared_source() {
        let mut req = valid_request();
        req.source = Some("service-page".to_string());
        let submission = build_submission(req, None, None);
        assert_eq!(submission.source, SubmissionSource::ServicePage);
    }

    #[test]
    fn user_agent_truncated_to_500_chars() {
        let req = valid_request();
        let long_ua = "Mozilla/5.0 ".repeat(100);
        let submission = build_submission(req, None, Some(long_ua));
        assert_eq!(
            submission.user_agent.unwrap().chars().count(),
            MAX_USER_AGENT_LENGTH
        );
    }
}
