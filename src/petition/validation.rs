//! Petitioner form validation.
//!
//! Collects every failing field so the caller can show all problems at once.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Validation error with a user-facing Turkish message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_name(field: &str) -> Self {
        Self::new(field, "Geçerli bir isim giriniz")
    }

    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, "Geçerli bir telefon numarası giriniz")
    }

    pub fn too_short(field: &str, label: &str, min: usize) -> Self {
        Self::new(field, format!("{} en az {} karakter olmalıdır", label, min))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Doğrulama başarısız: {} hata bulundu",
            self.errors.len()
        )];
        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }
        parts.join("\n")
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-ZğüşıöçĞÜŞİÖÇ\s]+$").expect("valid name regex"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\+90|0)?[0-9]{10}$").expect("valid phone regex"))
}

/// At least two characters, letters (Turkish included) and spaces only.
pub fn validate_name(value: &str, field: &str, errors: &mut ValidationErrors) {
    if value.chars().count() < 2 || !name_pattern().is_match(value) {
        errors.add(ValidationError::invalid_name(field));
    }
}

/// Turkish phone number, whitespace ignored: optional `+90` or `0`, then ten digits.
pub fn validate_phone(value: &str, field: &str, errors: &mut ValidationErrors) {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !phone_pattern().is_match(&compact) {
        errors.add(ValidationError::invalid_phone(field));
    }
}

pub fn validate_min_length(
    value: &str,
    min: usize,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    if value.chars().count() < min {
        errors.add(ValidationError::too_short(field, label, min));
    }
}
