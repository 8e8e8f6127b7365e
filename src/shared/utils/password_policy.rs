/// Password strength policy. Violations come back as a list of messages so
/// the caller can attach them all to the password field at once.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub reject_all_numeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            reject_all_numeric: true,
        }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < self.min_length {
            errors.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if self.reject_all_numeric
            && !password.is_empty()
            && password.chars().all(|c| c.is_ascii_digit())
        {
            errors.push("This password is entirely numeric.".to_string());
        }

        errors
    }
}
