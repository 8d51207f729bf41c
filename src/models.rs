use serde::{Deserialize, Serialize};

/// A single named form field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
}

impl FormField {
    pub fn new(key: &str, value: &str) -> Self {
        FormField {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Identifies one editable field of the contact form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Extra(usize),
    Message,
}

/// Raw contact form contents.
///
/// `name`, `email` and `message` are required; `extra` fields are sent
/// along untouched and never validated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,
    pub extra: Vec<FormField>,
}

impl FormInput {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        FormInput {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            extra: Vec::new(),
        }
    }

    /// Empty form carrying the given extra field names
    pub fn with_extra_fields(keys: &[String]) -> Self {
        FormInput {
            extra: keys.iter().map(|k| FormField::new(k, "")).collect(),
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, key: &str, value: &str) -> Self {
        self.extra.push(FormField::new(key, value));
        self
    }

    /// True when every required field is non-empty after trimming
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    /// Every field as a `(key, value)` pair, in form order
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
        ];
        pairs.extend(self.extra.iter().map(|f| (f.key.clone(), f.value.clone())));
        pairs.push(("message".to_string(), self.message.clone()));
        pairs
    }

    /// Clear every value, keeping the extra field names
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        for field in &mut self.extra {
            field.value.clear();
        }
    }

    /// Field ids in display order
    pub fn field_ids(&self) -> Vec<FieldId> {
        let mut ids = vec![FieldId::Name, FieldId::Email];
        ids.extend((0..self.extra.len()).map(FieldId::Extra));
        ids.push(FieldId::Message);
        ids
    }

    pub fn label(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Message => "message",
            FieldId::Extra(i) => self.extra.get(i).map(|f| f.key.as_str()).unwrap_or(""),
        }
    }

    pub fn is_required(id: FieldId) -> bool {
        !matches!(id, FieldId::Extra(_))
    }

    pub fn value(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
            FieldId::Extra(i) => self.extra.get(i).map(|f| f.value.as_str()).unwrap_or(""),
        }
    }

    pub fn value_mut(&mut self, id: FieldId) -> Option<&mut String> {
        match id {
            FieldId::Name => Some(&mut self.name),
            FieldId::Email => Some(&mut self.email),
            FieldId::Message => Some(&mut self.message),
            FieldId::Extra(i) => self.extra.get_mut(i).map(|f| &mut f.value),
        }
    }
}

/// Color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Indicator shown in the header
    pub fn icon(&self) -> &str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
        }
    }
}

/// Language of user-facing status messages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "id" => Ok(Locale::Id),
            other => Err(anyhow::anyhow!("unsupported locale: {}", other)),
        }
    }
}

/// Status line texts for one locale
#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessages {
    pub missing_fields: &'static str,
    pub sending: &'static str,
    pub thank_you: &'static str,
    pub rejected: &'static str,
    pub network_error: &'static str,
}

impl StatusMessages {
    pub fn english() -> Self {
        StatusMessages {
            missing_fields: "Please complete all fields.",
            sending: "Sending...",
            thank_you: "Thank you, your message has been sent.",
            rejected: "Submission failed. Please try again or contact us via email.",
            network_error: "A network error occurred. Please try again later.",
        }
    }

    pub fn indonesian() -> Self {
        StatusMessages {
            missing_fields: "Mohon lengkapi semua kolom.",
            sending: "Mengirim...",
            thank_you: "Terima kasih, pesan Anda telah terkirim.",
            rejected: "Gagal mengirim. Silakan coba lagi atau hubungi via email.",
            network_error: "Terjadi kesalahan jaringan. Silakan coba lagi nanti.",
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::english(),
            Locale::Id => Self::indonesian(),
        }
    }
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_fields_are_incomplete() {
        assert!(!FormInput::new("  ", "a@b.com", "Hi").is_complete());
        assert!(!FormInput::new("Ada", "\t\n", "Hi").is_complete());
        assert!(!FormInput::new("Ada", "a@b.com", "").is_complete());
        assert!(FormInput::new(" Ada ", "a@b.com", "Hi").is_complete());
    }

    #[test]
    fn test_extra_fields_do_not_affect_completeness() {
        let form = FormInput::new("Ada", "a@b.com", "Hi").with_extra("subject", "");
        assert!(form.is_complete());
    }

    #[test]
    fn test_fields_keep_form_order_and_raw_values() {
        let form = FormInput::new(" Ada", "a@b.com", "Hi").with_extra("subject", "Hello");
        let keys: Vec<_> = form.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "email", "subject", "message"]);
        assert_eq!(form.fields()[0].1, " Ada");
    }

    #[test]
    fn test_clear_keeps_extra_keys() {
        let mut form = FormInput::new("Ada", "a@b.com", "Hi").with_extra("subject", "Hello");
        form.clear();
        assert_eq!(form.value(FieldId::Name), "");
        assert_eq!(form.value(FieldId::Message), "");
        assert_eq!(form.extra, vec![FormField::new("subject", "")]);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ID".parse::<Locale>().unwrap(), Locale::Id);
        assert!("fr".parse::<Locale>().is_err());
    }
}
