// src/validation.rs
//! Field-level validation for the resume form.
//!
//! Failures are reported per field (dotted path into the document) and
//! never discard entered data; the controller only blocks export on them.

use serde::Serialize;

use crate::types::ResumeData;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate the whole document. An empty result means export may proceed.
pub fn validate_resume(data: &ResumeData) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let personal = &data.personal_details;
    require(&mut errors, "personal_details.name", &personal.name, "Name is required");
    require(
        &mut errors,
        "personal_details.address",
        &personal.address,
        "Address is required",
    );
    require(&mut errors, "personal_details.phone", &personal.phone, "Phone is required");

    if personal.email.trim().is_empty() {
        errors.push(FieldError::new("personal_details.email", "Email is required"));
    } else if !is_email_shaped(&personal.email) {
        errors.push(FieldError::new("personal_details.email", "Invalid email address"));
    }

    if !personal.linkedin.trim().is_empty() && !is_url_shaped(&personal.linkedin) {
        errors.push(FieldError::new(
            "personal_details.linkedin",
            "Invalid LinkedIn URL",
        ));
    }

    let professional = &data.professional_details;

    for (i, edu) in professional.education.iter().enumerate() {
        let base = format!("professional_details.education[{}]", i);
        require(
            &mut errors,
            format!("{}.institution", base),
            &edu.institution,
            "Institution is required",
        );
        require(&mut errors, format!("{}.degree", base), &edu.degree, "Degree is required");
        require(
            &mut errors,
            format!("{}.graduation_year", base),
            &edu.graduation_year,
            "Graduation year is required",
        );
    }

    for (i, exp) in professional.experience.iter().enumerate() {
        let base = format!("professional_details.experience[{}]", i);
        require(&mut errors, format!("{}.company", base), &exp.company, "Company is required");
        require(&mut errors, format!("{}.role", base), &exp.role, "Role is required");
        require(
            &mut errors,
            format!("{}.duration", base),
            &exp.duration,
            "Duration is required",
        );

        if exp.responsibilities.is_empty() {
            errors.push(FieldError::new(
                format!("{}.responsibilities", base),
                "At least one responsibility is required",
            ));
        }
        for (j, resp) in exp.responsibilities.iter().enumerate() {
            if resp.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("{}.responsibilities[{}]", base, j),
                    "Responsibility cannot be empty",
                ));
            }
        }
    }

    for (name, list) in [
        ("skills", &professional.skills),
        ("strengths", &professional.strengths),
        ("weaknesses", &professional.weaknesses),
        ("achievements", &professional.achievements),
    ] {
        for (i, item) in list.iter().enumerate() {
            if item.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("professional_details.{}[{}]", name, i),
                    format!("{} entry cannot be empty", capitalize(name)),
                ));
            }
        }
    }

    errors
}

fn require(errors: &mut Vec<FieldError>, field: impl Into<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

/// Shape check only: `local@domain.tld` with a dot in the domain part.
fn is_email_shaped(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !value.contains(char::is_whitespace)
}

fn is_url_shaped(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EducationEntry, ExperienceEntry};

    fn minimal_valid() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_details.name = "Jane Q. Doe".into();
        data.personal_details.address = "1 Main St".into();
        data.personal_details.phone = "555-0100".into();
        data.personal_details.email = "jane@example.com".into();
        data
    }

    #[test]
    fn test_minimal_valid_resume_passes() {
        assert!(validate_resume(&minimal_valid()).is_empty());
    }

    #[test]
    fn test_missing_required_fields_reported_per_field() {
        let errors = validate_resume(&ResumeData::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"personal_details.name"));
        assert!(fields.contains(&"personal_details.email"));
        assert!(fields.contains(&"personal_details.phone"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("a@b.co"));
        assert!(!is_email_shaped("a@b"));
        assert!(!is_email_shaped("not-an-email"));
        assert!(!is_email_shaped("@b.co"));
        assert!(!is_email_shaped("a b@c.de"));
    }

    #[test]
    fn test_linkedin_optional_but_shape_checked() {
        let mut data = minimal_valid();
        data.personal_details.linkedin = String::new();
        assert!(validate_resume(&data).is_empty());

        data.personal_details.linkedin = "linkedin.com/in/jane".into();
        let errors = validate_resume(&data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "personal_details.linkedin");

        data.personal_details.linkedin = "https://linkedin.com/in/jane".into();
        assert!(validate_resume(&data).is_empty());
    }

    #[test]
    fn test_experience_requires_responsibilities() {
        let mut data = minimal_valid();
        let mut exp = ExperienceEntry::empty();
        exp.company = "Acme".into();
        exp.role = "Engineer".into();
        exp.duration = "2020 - 2024".into();
        exp.responsibilities.clear();
        data.professional_details.experience.push(exp);

        let errors = validate_resume(&data);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.ends_with(".responsibilities"));
    }

    #[test]
    fn test_education_entry_fields() {
        let mut data = minimal_valid();
        data.professional_details.education.push(EducationEntry::empty());
        let errors = validate_resume(&data);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.field.starts_with("professional_details.education[0]")));
    }

    #[test]
    fn test_blank_list_entries_rejected() {
        let mut data = minimal_valid();
        data.professional_details.skills = vec!["Rust".into(), "  ".into()];
        let errors = validate_resume(&data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "professional_details.skills[1]");
    }
}
