//! Field-format validation pre-pass.
//!
//! Runs before anything reaches the auth core; the core treats well-formed
//! fields as a precondition. Failures collect every violated rule so the
//! caller sees them all at once.

use crate::app::dto::{CreateRoleRequest, RegisterRequest, TokenRequest, UpdateRoleRequest};

const MAX_ROLE_NAME_CHARS: usize = 100;

pub fn validate_register(req: &RegisterRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if req.email.is_empty() {
        errors.push("Email is required.".into());
    } else if !is_valid_email(&req.email) {
        errors.push("A valid email address is required.".into());
    }

    if req.password.is_empty() {
        errors.push("Password is required.".into());
    } else {
        if req.password.chars().count() < 6 {
            errors.push("Password must be at least 6 characters long.".into());
        }
        if !req.password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("Password must contain at least one capital letter.".into());
        }
        if !req.password.chars().any(|c| !c.is_ascii_digit()) {
            errors.push("Password must contain at least one non-numerical character.".into());
        }
    }

    if req.role.is_empty() {
        errors.push("Role is required.".into());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_token(req: &TokenRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if req.email.is_empty() {
        errors.push("Email is required.".into());
    } else if !is_valid_email(&req.email) {
        errors.push("A valid email address is required.".into());
    }

    if req.password.is_empty() {
        errors.push("Password is required.".into());
    }

    if req.audience.is_empty() {
        errors.push("Audience is required.".into());
    }

    // Never clamped downstream: a non-positive override stops here.
    if let Some(duration) = req.duration_minutes {
        if duration <= 0 {
            errors.push("Duration must be greater than 0.".into());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_create_role(req: &CreateRoleRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    validate_role_name(&req.role_name, "Role name", &mut errors);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_update_role(req: &UpdateRoleRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if req.old_role_name.is_empty() {
        errors.push("Old role name is required.".into());
    }
    validate_role_name(&req.new_role_name, "New role name", &mut errors);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_role_name(name: &str, field: &str, errors: &mut Vec<String>) {
    if name.is_empty() {
        errors.push(format!("{field} is required."));
    } else if name.chars().count() > MAX_ROLE_NAME_CHARS {
        errors.push(format!("{field} must not exceed {MAX_ROLE_NAME_CHARS} characters."));
    }
}

/// Shape check: `local@domain.tld`, no whitespace, exactly one `@`, and a
/// dot somewhere in the domain.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    fn token(email: &str, password: &str, audience: &str, d: Option<i64>) -> TokenRequest {
        TokenRequest {
            email: email.into(),
            password: password.into(),
            audience: audience.into(),
            duration_minutes: d,
        }
    }

    #[test]
    fn well_formed_register_passes() {
        assert!(validate_register(&register("a@x.com", "Passw0rd!", "Admin")).is_ok());
    }

    #[test]
    fn register_collects_all_violations() {
        let errors = validate_register(&register("", "", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["plainaddress", "a @x.com", "a@x", "@x.com", "a@b@c.com"] {
            let errors = validate_register(&register(email, "Passw0rd!", "Admin")).unwrap_err();
            assert_eq!(errors, vec!["A valid email address is required.".to_string()], "{email}");
        }
    }

    #[test]
    fn weak_passwords_are_rejected() {
        let errors = validate_register(&register("a@x.com", "abc", "Admin")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least 6")));

        let errors = validate_register(&register("a@x.com", "abcdef", "Admin")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("capital letter")));

        let errors = validate_register(&register("a@x.com", "123456", "Admin")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("non-numerical")));
    }

    #[test]
    fn well_formed_token_request_passes() {
        assert!(validate_token(&token("a@x.com", "pw", "app", None)).is_ok());
        assert!(validate_token(&token("a@x.com", "pw", "app", Some(30))).is_ok());
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        for d in [0, -5] {
            let errors = validate_token(&token("a@x.com", "pw", "app", Some(d))).unwrap_err();
            assert_eq!(errors, vec!["Duration must be greater than 0.".to_string()]);
        }
    }

    #[test]
    fn missing_audience_is_rejected() {
        let errors = validate_token(&token("a@x.com", "pw", "", None)).unwrap_err();
        assert_eq!(errors, vec!["Audience is required.".to_string()]);
    }

    #[test]
    fn overlong_role_name_is_rejected() {
        let req = CreateRoleRequest {
            role_name: "r".repeat(101),
        };
        let errors = validate_create_role(&req).unwrap_err();
        assert!(errors[0].contains("must not exceed 100"));
    }

    #[test]
    fn update_role_requires_both_names() {
        let req = UpdateRoleRequest {
            old_role_name: "".into(),
            new_role_name: "".into(),
        };
        let errors = validate_update_role(&req).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
