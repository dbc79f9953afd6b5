use serde::{Deserialize, Serialize};

use crate::expression;
use crate::model::CustomSearch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub translate_keyword: String,
    pub ai_chat_keyword: String,
    pub custom_searches: Vec<CustomSearch>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        crate::settings::Settings::default().trigger_config()
    }
}

/// The single interaction mode a query resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Classification {
    Translate { payload: String },
    AiChat { prompt: String },
    Calculate { expression: String, value: String },
    CustomSearch { engine: CustomSearch, term: String },
    DefaultSearch { query_text: String },
}

impl Classification {
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "translate",
            Self::AiChat { .. } => "ai_chat",
            Self::Calculate { .. } => "calculate",
            Self::CustomSearch { .. } => "custom_search",
            Self::DefaultSearch { .. } => "default_search",
        }
    }
}

/// Resolves `query` to exactly one mode.
///
/// Rules are tried in order and the first hit wins: translate, AI chat,
/// calculator, custom search, default search.
pub fn classify(query: &str, config: &TriggerConfig) -> Classification {
    if let Some(rest) = strip_trigger(query, &config.translate_keyword) {
        return Classification::Translate {
            payload: rest.trim().to_string(),
        };
    }

    if !config.ai_chat_keyword.is_empty() && query == config.ai_chat_keyword {
        return Classification::AiChat {
            prompt: String::new(),
        };
    }
    if let Some(rest) = strip_trigger(query, &config.ai_chat_keyword) {
        return Classification::AiChat {
            prompt: rest.to_string(),
        };
    }

    if let Some(calculation) = expression::calculate(query) {
        return Classification::Calculate {
            expression: calculation.expression,
            value: calculation.value,
        };
    }

    let matched = config.custom_searches.iter().find_map(|engine| {
        strip_trigger(query, &engine.keyword)
            .filter(|term| !term.is_empty())
            .map(|term| (engine, term))
    });
    if let Some((engine, term)) = matched {
        return Classification::CustomSearch {
            engine: engine.clone(),
            term: term.to_string(),
        };
    }

    Classification::DefaultSearch {
        query_text: query.to_string(),
    }
}

/// Returns the text after `"<keyword> "` when `query` starts with it.
fn strip_trigger<'a>(query: &'a str, keyword: &str) -> Option<&'a str> {
    if keyword.is_empty() {
        return None;
    }
    query.strip_prefix(keyword)?.strip_prefix(' ')
}
