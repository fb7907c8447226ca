use std::fmt;

/// Language currently rendered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::De];

    /// Parses an exact language code. Anything but `en`/`de` is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            _ => None,
        }
    }

    /// Maps a browser locale such as `de-DE` to a supported language.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let primary = locale.split(['-', '_']).next()?.to_ascii_lowercase();
        Self::from_code(&primary)
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Suffix appended to section ids for this language's DOM variant.
    pub fn suffix(self) -> &'static str {
        match self {
            Language::En => "",
            Language::De => "-de",
        }
    }

    pub fn section_id(self, section: &str) -> String {
        format!("{section}{}", self.suffix())
    }

    /// Id of the content block holding this language's copy.
    pub fn content_id(self) -> String {
        format!("{}-content", self.code())
    }

    /// Attribute carrying the translated text of an element.
    pub fn text_attribute(self) -> String {
        format!("data-{}", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Stored preference first, then browser locale, then English. An invalid
/// stored value is treated as absent.
pub fn resolve_initial(stored: Option<&str>, locale: Option<&str>) -> Language {
    stored
        .and_then(Language::from_code)
        .or_else(|| locale.and_then(Language::from_locale))
        .unwrap_or_default()
}
