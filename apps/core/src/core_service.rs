use chrono::{DateTime, Utc};

use crate::classifier::{classify, Classification, TriggerConfig};
use crate::config::{validate, Config};
use crate::contract::{
    ClockResponse, CoreRequest, CoreResponse, CustomSearchesResponse, FilterResponse,
};
use crate::fuzzy::fuzzy_filter;
use crate::logging;
use crate::session::{evaluate_query, BrowserData, QueryOutcome};
use crate::settings::{Settings, SettingsError};
use crate::world_clock::{world_clock, RegionClock};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Settings(SettingsError),
    InvalidRequest(String),
    NotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Settings(error) => write!(f, "settings error: {error}"),
            Self::InvalidRequest(error) => write!(f, "invalid request: {error}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<SettingsError> for ServiceError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

pub struct CoreService {
    config: Config,
    settings: Settings,
    triggers: TriggerConfig,
    persist: bool,
}

impl CoreService {
    /// Loads settings from `config.settings_path`; later edits are written back.
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let settings = Settings::load(&config.settings_path)?;
        let mut service = Self::with_settings(config, settings)?;
        service.persist = true;
        Ok(service)
    }

    /// Keeps settings in memory only.
    pub fn with_settings(config: Config, settings: Settings) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        crate::settings::validate(&settings)
            .map_err(|e| ServiceError::Settings(SettingsError::Invalid(e)))?;
        let triggers = settings.trigger_config();
        Ok(Self {
            config,
            settings,
            triggers,
            persist: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn classify(&self, query: &str) -> Classification {
        classify(query, &self.triggers)
    }

    pub fn evaluate(&self, query: &str, data: &dyn BrowserData) -> QueryOutcome {
        evaluate_query(query, &self.triggers, data, &self.config)
    }

    pub fn clock(&self, now: DateTime<Utc>) -> Result<Vec<RegionClock>, ServiceError> {
        world_clock(now, &self.settings.time_zones).map_err(ServiceError::InvalidRequest)
    }

    pub fn handle_command(&mut self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Classify(request) => {
                Ok(CoreResponse::Classify(self.classify(&request.query)))
            }
            CoreRequest::Evaluate(request) => Ok(CoreResponse::Evaluate(
                self.evaluate(&request.query, &request.data),
            )),
            CoreRequest::Filter(request) => Ok(CoreResponse::Filter(FilterResponse {
                matches: fuzzy_filter(&request.query, &request.candidates),
            })),
            CoreRequest::Clock(request) => {
                let now = match request.now_epoch_secs {
                    Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
                        ServiceError::InvalidRequest(format!("timestamp out of range: {secs}"))
                    })?,
                    None => Utc::now(),
                };
                Ok(CoreResponse::Clock(ClockResponse {
                    regions: self.clock(now)?,
                }))
            }
            CoreRequest::AddCustomSearch(search) => {
                let keyword = search.keyword.clone();
                let mut next = self.settings.clone();
                next.add_custom_search(search)
                    .map_err(ServiceError::InvalidRequest)?;
                self.commit_settings(next)?;
                logging::info(&format!("custom search added keyword={keyword}"));
                Ok(self.custom_searches_response())
            }
            CoreRequest::RemoveCustomSearch(request) => {
                let mut next = self.settings.clone();
                if !next.remove_custom_search(&request.keyword) {
                    return Err(ServiceError::NotFound(format!(
                        "custom search '{}'",
                        request.keyword
                    )));
                }
                self.commit_settings(next)?;
                logging::info(&format!(
                    "custom search removed keyword={}",
                    request.keyword
                ));
                Ok(self.custom_searches_response())
            }
        }
    }

    /// Persists `next` first; the in-memory settings only change once the
    /// write succeeded.
    fn commit_settings(&mut self, next: Settings) -> Result<(), ServiceError> {
        if self.persist {
            if let Err(error) = next.save(&self.config.settings_path) {
                logging::warn(&format!("settings not saved, keeping previous: {error}"));
                return Err(error.into());
            }
        }
        self.triggers = next.trigger_config();
        self.settings = next;
        Ok(())
    }

    fn custom_searches_response(&self) -> CoreResponse {
        CoreResponse::CustomSearches(CustomSearchesResponse {
            custom_searches: self.settings.custom_searches.clone(),
        })
    }
}
