use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: i64,
    pub window_id: i64,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub last_visit_time: f64,
    pub visit_count: u32,
}

/// Anything the palette lists and filters by its title and URL.
pub trait Candidate {
    fn title(&self) -> &str;
    fn url(&self) -> Option<&str>;

    /// Text handed to the matcher. Title and URL are joined by a newline so
    /// tokens (which never contain whitespace) cannot straddle the two.
    fn haystack(&self) -> String {
        match self.url() {
            Some(url) if !url.is_empty() => format!("{}\n{}", self.title(), url),
            _ => self.title().to_string(),
        }
    }
}

impl Candidate for Tab {
    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }
}

impl Candidate for Bookmark {
    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Candidate for HistoryItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomSearch {
    pub keyword: String,
    pub url: String,
    pub name: String,
}

impl CustomSearch {
    pub fn new(keyword: &str, url: &str, name: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            url: url.to_string(),
            name: name.to_string(),
        }
    }

    /// Fills the first `%s` placeholder with the percent-encoded term.
    pub fn search_url(&self, term: &str) -> Option<String> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        let encoded = urlencoding::encode(term);
        Some(self.url.replacen("%s", &encoded, 1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeZone {
    pub id: String,
    pub name: String,
    pub region: String,
    /// Hours east of UTC; fractional offsets such as 5.5 are allowed.
    pub offset: f64,
}

impl TimeZone {
    pub fn new(id: &str, name: &str, region: &str, offset: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    Tabs,
    Bookmarks,
    History,
}

impl ResultCategory {
    pub fn next(self) -> Self {
        match self {
            Self::Tabs => Self::Bookmarks,
            Self::Bookmarks => Self::History,
            Self::History => Self::Tabs,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::Bookmarks => "bookmarks",
            Self::History => "history",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tabs" | "tab" => Some(Self::Tabs),
            "bookmarks" | "bookmark" => Some(Self::Bookmarks),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bookmark, Candidate, CustomSearch, ResultCategory};

    #[test]
    fn search_url_encodes_term_into_placeholder() {
        let engine = CustomSearch::new("google", "https://www.google.com/search?q=%s", "Google");
        assert_eq!(
            engine.search_url(" hello world ").as_deref(),
            Some("https://www.google.com/search?q=hello%20world")
        );
        assert!(engine.search_url("   ").is_none());
    }

    #[test]
    fn bookmark_folder_haystack_is_title_only() {
        let folder = Bookmark {
            id: "1".into(),
            title: "Work".into(),
            url: None,
            date_added: None,
        };
        assert_eq!(folder.haystack(), "Work");
    }

    #[test]
    fn category_cycles_through_all_lists() {
        assert_eq!(ResultCategory::Tabs.next(), ResultCategory::Bookmarks);
        assert_eq!(ResultCategory::Bookmarks.next(), ResultCategory::History);
        assert_eq!(ResultCategory::History.next(), ResultCategory::Tabs);
    }
}
