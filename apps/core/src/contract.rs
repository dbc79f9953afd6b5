use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::model::CustomSearch;
use crate::session::{QueryOutcome, StaticBrowserData};
use crate::world_clock::RegionClock;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluateRequest {
    pub query: String,
    #[serde(default)]
    pub data: StaticBrowserData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterRequest {
    pub query: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockRequest {
    pub now_epoch_secs: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveCustomSearchRequest {
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreRequest {
    Classify(ClassifyRequest),
    Evaluate(EvaluateRequest),
    Filter(FilterRequest),
    Clock(ClockRequest),
    AddCustomSearch(CustomSearch),
    RemoveCustomSearch(RemoveCustomSearchRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterResponse {
    pub matches: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClockResponse {
    pub regions: Vec<RegionClock>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomSearchesResponse {
    pub custom_searches: Vec<CustomSearch>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    Classify(Classification),
    Evaluate(QueryOutcome),
    Filter(FilterResponse),
    Clock(ClockResponse),
    CustomSearches(CustomSearchesResponse),
}
