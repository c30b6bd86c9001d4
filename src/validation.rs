use std::collections::BTreeMap;

use crate::document::{CoverFields, FieldRole};

/// Per-field error messages currently shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<FieldRole, String>,
}

impl FieldErrors {
    /// Required-field check over all five fields
    pub fn check(fields: &CoverFields) -> Self {
        let messages = FieldRole::ALL
            .into_iter()
            .filter(|role| fields.get(*role).trim().is_empty())
            .map(|role| (role, role.required_message().to_owned()))
            .collect();
        Self { messages }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, role: FieldRole) -> Option<&str> {
        self.messages.get(&role).map(String::as_str)
    }

    pub fn roles(&self) -> Vec<FieldRole> {
        self.messages.keys().copied().collect()
    }

    /// Drop the error for `role` once its text is non-empty. Empty text never
    /// adds an error here; only a full check does.
    pub fn clear_if_filled(&mut self, role: FieldRole, text: &str) {
        if !text.trim().is_empty() {
            self.messages.remove(&role);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_fields() -> CoverFields {
        CoverFields {
            name: "  ".into(),
            subject: String::new(),
            class_name: "\t".into(),
            school_name: "\n".into(),
            school_year: String::new(),
        }
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let errors = FieldErrors::check(&blank_fields());
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(FieldRole::Subject), Some("المادة مطلوبة."));
    }

    #[test]
    fn filled_fields_pass() {
        assert!(FieldErrors::check(&CoverFields::default()).is_empty());
    }

    #[test]
    fn clearing_requires_real_text() {
        let mut errors = FieldErrors::check(&blank_fields());
        errors.clear_if_filled(FieldRole::Name, "   ");
        assert!(errors.get(FieldRole::Name).is_some());
        errors.clear_if_filled(FieldRole::Name, " Lina ");
        assert!(errors.get(FieldRole::Name).is_none());
        assert_eq!(errors.len(), 4);
    }
}
