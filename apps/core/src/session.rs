use serde::{Deserialize, Serialize};

use crate::classifier::{classify, Classification, TriggerConfig};
use crate::config::Config;
use crate::fuzzy::filter_candidates;
use crate::model::{Bookmark, HistoryItem, ResultCategory, Tab};

/// Source of the records the palette lists.
pub trait BrowserData {
    fn tabs(&self) -> Vec<Tab>;
    fn bookmarks(&self) -> Vec<Bookmark>;
    fn history(&self) -> Vec<HistoryItem>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticBrowserData {
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

impl BrowserData for StaticBrowserData {
    fn tabs(&self) -> Vec<Tab> {
        self.tabs.clone()
    }

    fn bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks.clone()
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.history.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub query: String,
    pub classification: Classification,
    pub tabs: Vec<Tab>,
    pub bookmarks: Vec<Bookmark>,
    pub history: Vec<HistoryItem>,
}

/// Classifies `query` and, in default-search mode, filters the three lists.
///
/// An empty query lists every tab and clears bookmarks and history. Only
/// history is capped. Other modes leave all lists empty.
pub fn evaluate_query(
    query: &str,
    triggers: &TriggerConfig,
    data: &dyn BrowserData,
    limits: &Config,
) -> QueryOutcome {
    let classification = classify(query, triggers);
    let mut outcome = QueryOutcome {
        query: query.to_string(),
        classification,
        tabs: Vec::new(),
        bookmarks: Vec::new(),
        history: Vec::new(),
    };

    if let Classification::DefaultSearch { query_text } = &outcome.classification {
        if query_text.trim().is_empty() {
            outcome.tabs = data.tabs();
        } else {
            outcome.tabs = filter_candidates(query_text, &data.tabs());
            outcome.bookmarks = filter_candidates(query_text, &data.bookmarks());
            outcome.history = filter_candidates(query_text, &data.history());
            outcome.history.truncate(limits.max_history_results as usize);
        }
    }

    outcome
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpenTarget {
    Tab { tab_id: i64, window_id: i64 },
    Url { url: String },
}

/// Palette state between keystrokes.
#[derive(Debug, Clone)]
pub struct Session {
    last_seq: Option<u64>,
    outcome: Option<QueryOutcome>,
    category: ResultCategory,
    selected_index: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            last_seq: None,
            outcome: None,
            category: ResultCategory::Tabs,
            selected_index: 0,
        }
    }
}

impl Session {
    /// Installs `outcome` unless a newer sequence number was already applied.
    /// Returns whether the outcome was accepted.
    pub fn apply(&mut self, seq: u64, outcome: QueryOutcome) -> bool {
        if self.last_seq.is_some_and(|last| seq < last) {
            return false;
        }
        self.last_seq = Some(seq);
        self.outcome = Some(outcome);
        self.selected_index = 0;
        true
    }

    pub fn outcome(&self) -> Option<&QueryOutcome> {
        self.outcome.as_ref()
    }

    pub fn category(&self) -> ResultCategory {
        self.category
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn set_category(&mut self, category: ResultCategory) {
        self.category = category;
        self.selected_index = 0;
    }

    pub fn cycle_category(&mut self) -> ResultCategory {
        self.set_category(self.category.next());
        self.category
    }

    pub fn move_selection(&mut self, direction: i32) -> usize {
        self.selected_index =
            next_selection_index(self.selected_index, self.active_len(), direction);
        self.selected_index
    }

    pub fn selected_target(&self) -> Option<OpenTarget> {
        let outcome = self.outcome.as_ref()?;
        match self.category {
            ResultCategory::Tabs => outcome.tabs.get(self.selected_index).map(|tab| {
                OpenTarget::Tab {
                    tab_id: tab.id,
                    window_id: tab.window_id,
                }
            }),
            ResultCategory::Bookmarks => outcome
                .bookmarks
                .get(self.selected_index)
                .and_then(|bookmark| bookmark.url.clone())
                .map(|url| OpenTarget::Url { url }),
            ResultCategory::History => outcome
                .history
                .get(self.selected_index)
                .map(|item| OpenTarget::Url {
                    url: item.url.clone(),
                }),
        }
    }

    fn active_len(&self) -> usize {
        let Some(outcome) = self.outcome.as_ref() else {
            return 0;
        };
        match self.category {
            ResultCategory::Tabs => outcome.tabs.len(),
            ResultCategory::Bookmarks => outcome.bookmarks.len(),
            ResultCategory::History => outcome.history.len(),
        }
    }
}

fn next_selection_index(current: usize, len: usize, direction: i32) -> usize {
    if len == 0 {
        return 0;
    }

    let max = len - 1;
    if direction < 0 {
        current.saturating_sub(1).min(max)
    } else if direction > 0 {
        (current + 1).min(max)
    } else {
        current.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::next_selection_index;

    #[test]
    fn selection_index_bounds_are_stable() {
        assert_eq!(next_selection_index(0, 0, 1), 0);
        assert_eq!(next_selection_index(0, 3, -1), 0);
        assert_eq!(next_selection_index(1, 3, -1), 0);
        assert_eq!(next_selection_index(1, 3, 1), 2);
        assert_eq!(next_selection_index(2, 3, 1), 2);
        assert_eq!(next_selection_index(1, 3, 0), 1);
        assert_eq!(next_selection_index(5, 3, 0), 2);
    }
}
