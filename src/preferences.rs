use crate::store::Store;

pub const COLOR_SCHEME_KEY: &str = "colorScheme";
pub const LANGUAGE_KEY: &str = "language";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    System,
    Light,
    Dark,
}

impl ColorScheme {
    pub fn to_key(self) -> &'static str {
        match self {
            ColorScheme::System => "system",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "system" => Some(ColorScheme::System),
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::System, ColorScheme::Light, ColorScheme::Dark]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    System,
    English,
    Chinese,
    Japanese,
}

impl Language {
    pub fn to_key(self) -> &'static str {
        match self {
            Language::System => "system",
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "system" => Some(Language::System),
            "en" => Some(Language::English),
            "zh" => Some(Language::Chinese),
            "ja" => Some(Language::Japanese),
            _ => None,
        }
    }

    pub fn all() -> &'static [Language] {
        &[
            Language::System,
            Language::English,
            Language::Chinese,
            Language::Japanese,
        ]
    }
}

/// Display preferences. Unrecognized saved values read back as the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub color_scheme: ColorScheme,
    pub language: Language,
}

impl Preferences {
    pub fn load(store: &dyn Store) -> Self {
        Self {
            color_scheme: read_tag(store, COLOR_SCHEME_KEY, ColorScheme::from_key),
            language: read_tag(store, LANGUAGE_KEY, Language::from_key),
        }
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme, store: &mut dyn Store) {
        self.color_scheme = scheme;
        write_tag(store, COLOR_SCHEME_KEY, scheme.to_key());
    }

    pub fn set_language(&mut self, language: Language, store: &mut dyn Store) {
        self.language = language;
        write_tag(store, LANGUAGE_KEY, language.to_key());
    }
}

fn read_tag<T: Default>(store: &dyn Store, key: &str, parse: fn(&str) -> Option<T>) -> T {
    match store.get(key) {
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            tracing::debug!(key, raw = %raw, "ignoring unrecognized preference");
            T::default()
        }),
        None => T::default(),
    }
}

fn write_tag(store: &mut dyn Store, key: &str, tag: &str) {
    if let Err(e) = store.set(key, tag) {
        tracing::warn!(key, error = %e, "failed to persist preference");
    }
}
