use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::TriggerConfig;
use crate::model::{CustomSearch, TimeZone};
use crate::world_clock::OFFSET_RANGE;

pub const AI_PROVIDERS: [&str; 6] = [
    "volcengine",
    "gemini",
    "openai",
    "claude",
    "huggingface",
    "custom",
];

pub const TRANSLATION_SERVICES: [&str; 2] = ["google", "googlecloud"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub api_url: &'static str,
    pub model: &'static str,
    pub doc_url: &'static str,
}

/// Endpoint and model preset for a known AI provider. `custom` has none.
pub fn provider_defaults(provider: &str) -> Option<ProviderDefaults> {
    let defaults = match provider {
        "volcengine" => ProviderDefaults {
            api_url: "https://ark.cn-beijing.volces.com",
            model: "doubao-1.5-pro-256k-250115",
            doc_url: "https://console.volcengine.com/ark",
        },
        "gemini" => ProviderDefaults {
            api_url: "https://generativelanguage.googleapis.com/v1beta",
            model: "gemini-2.0-flash-lite",
            doc_url: "https://aistudio.google.com/app/apikey",
        },
        "openai" => ProviderDefaults {
            api_url: "https://api.openai.com/v1",
            model: "gpt-3.5-turbo",
            doc_url: "https://platform.openai.com/account/api-keys",
        },
        "claude" => ProviderDefaults {
            api_url: "https://api.anthropic.com/v1",
            model: "claude-instant",
            doc_url: "https://console.anthropic.com/",
        },
        "huggingface" => ProviderDefaults {
            api_url: "https://api-inference.huggingface.co/models",
            model: "Qwen/QwQ-32B",
            doc_url: "https://huggingface.co/settings/tokens",
        },
        _ => return None,
    };
    Some(defaults)
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "settings io error: {error}"),
            Self::Parse(error) => write!(f, "settings parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid settings: {error}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// User-facing preferences as they are persisted by the options page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub translate_source_lang: String,
    pub translate_target_lang: String,
    pub translate_api_key: String,
    pub translate_service: String,
    pub translate_keyword: String,
    pub custom_searches: Vec<CustomSearch>,
    pub ai_chat_enabled: bool,
    pub ai_chat_provider: String,
    pub ai_chat_api_url: String,
    pub ai_chat_api_key: String,
    pub ai_chat_keyword: String,
    pub ai_chat_model: String,
    pub time_keyword: String,
    pub time_zones: Vec<TimeZone>,
}

impl Default for Settings {
    fn default() -> Self {
        let provider = provider_defaults("volcengine");
        Self {
            translate_source_lang: "auto".to_string(),
            translate_target_lang: "en".to_string(),
            translate_api_key: String::new(),
            translate_service: "google".to_string(),
            translate_keyword: "translate".to_string(),
            custom_searches: vec![CustomSearch::new(
                "search",
                "https://www.google.com/search?q=%s",
                "Google",
            )],
            ai_chat_enabled: false,
            ai_chat_provider: "volcengine".to_string(),
            ai_chat_api_url: provider.map(|p| p.api_url).unwrap_or_default().to_string(),
            ai_chat_api_key: String::new(),
            ai_chat_keyword: "aichat".to_string(),
            ai_chat_model: provider.map(|p| p.model).unwrap_or_default().to_string(),
            time_keyword: "time".to_string(),
            time_zones: default_time_zones(),
        }
    }
}

pub fn default_time_zones() -> Vec<TimeZone> {
    vec![
        TimeZone::new("shanghai", "Shanghai", "Asia", 8.0),
        TimeZone::new("singapore", "Singapore", "Asia", 8.0),
        TimeZone::new("tokyo", "Tokyo", "Asia", 9.0),
        TimeZone::new("new_york", "New York", "Americas", -4.0),
        TimeZone::new("los_angeles", "Los Angeles", "Americas", -7.0),
        TimeZone::new("london", "London", "Europe", 1.0),
        TimeZone::new("paris", "Paris", "Europe", 2.0),
        TimeZone::new("sydney", "Sydney", "Others", 10.0),
        TimeZone::new("brazil", "Brazil", "Others", -3.0),
    ]
}

impl Settings {
    /// Parses a settings document. JSON5 is accepted so hand-edited files
    /// may carry comments and trailing commas. Missing keys keep defaults.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            json5::from_str(raw).map_err(|e| SettingsError::Parse(e.to_string()))?;
        validate(&settings).map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        validate(self).map_err(SettingsError::Invalid)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn trigger_config(&self) -> TriggerConfig {
        TriggerConfig {
            translate_keyword: self.translate_keyword.clone(),
            ai_chat_keyword: self.ai_chat_keyword.clone(),
            custom_searches: self.custom_searches.clone(),
        }
    }

    pub fn add_custom_search(&mut self, search: CustomSearch) -> Result<(), String> {
        if search.keyword.is_empty() || search.url.is_empty() || search.name.is_empty() {
            return Err("Please fill all fields for custom search.".to_string());
        }
        if self
            .custom_searches
            .iter()
            .any(|existing| existing.keyword == search.keyword)
        {
            return Err(format!("Keyword '{}' already exists.", search.keyword));
        }
        validate_keyword(&search.keyword)?;
        validate_search_url(&search.url)?;

        self.custom_searches.push(search);
        Ok(())
    }

    pub fn remove_custom_search(&mut self, keyword: &str) -> bool {
        let before = self.custom_searches.len();
        self.custom_searches
            .retain(|search| search.keyword != keyword);
        self.custom_searches.len() != before
    }

    /// Switches provider and, for known providers, resets URL and model to
    /// that provider's preset.
    pub fn set_ai_provider(&mut self, provider: &str) -> Result<(), String> {
        if !AI_PROVIDERS.contains(&provider) {
            return Err(format!("Unsupported AI provider '{provider}'."));
        }
        self.ai_chat_provider = provider.to_string();
        if let Some(defaults) = provider_defaults(provider) {
            self.ai_chat_api_url = defaults.api_url.to_string();
            self.ai_chat_model = defaults.model.to_string();
        }
        Ok(())
    }
}

pub fn validate(settings: &Settings) -> Result<(), String> {
    validate_keyword(&settings.translate_keyword)
        .map_err(|e| format!("translateKeyword: {e}"))?;
    validate_keyword(&settings.ai_chat_keyword).map_err(|e| format!("aiChatKeyword: {e}"))?;
    validate_keyword(&settings.time_keyword).map_err(|e| format!("timeKeyword: {e}"))?;

    if !TRANSLATION_SERVICES.contains(&settings.translate_service.as_str()) {
        return Err(format!(
            "translateService: unsupported service '{}'.",
            settings.translate_service
        ));
    }
    if !AI_PROVIDERS.contains(&settings.ai_chat_provider.as_str()) {
        return Err(format!(
            "aiChatProvider: unsupported provider '{}'.",
            settings.ai_chat_provider
        ));
    }

    for zone in &settings.time_zones {
        validate_offset(zone.offset).map_err(|e| format!("timeZones '{}': {e}", zone.id))?;
    }

    let mut seen = BTreeSet::new();
    for search in &settings.custom_searches {
        if search.name.trim().is_empty() {
            return Err(format!("customSearches: '{}' has no name.", search.keyword));
        }
        validate_keyword(&search.keyword).map_err(|e| format!("customSearches: {e}"))?;
        validate_search_url(&search.url)
            .map_err(|e| format!("customSearches '{}': {e}", search.keyword))?;
        if !seen.insert(search.keyword.as_str()) {
            return Err(format!(
                "customSearches: duplicate keyword '{}'.",
                search.keyword
            ));
        }
    }

    Ok(())
}

pub fn validate_offset(offset: f64) -> Result<(), String> {
    if !offset.is_finite() || !OFFSET_RANGE.contains(&offset) {
        return Err(format!("Offset {offset} must be between -12 and 14 hours."));
    }
    Ok(())
}

pub fn validate_keyword(keyword: &str) -> Result<(), String> {
    if keyword.is_empty() {
        return Err("Keyword is required.".to_string());
    }
    if keyword.chars().any(char::is_whitespace) {
        return Err(format!("Keyword '{keyword}' must not contain whitespace."));
    }
    Ok(())
}

pub fn validate_search_url(url: &str) -> Result<(), String> {
    if !url.contains("%s") {
        return Err("Search URL must contain '%s' for the query.".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("Search URL must start with http:// or https://.".to_string());
    }
    Ok(())
}
