//! Filter index for the conversation list.
//!
//! A pure derivation of the visible threads from the current tab and search
//! query. Nothing here mutates threads or the selection, so it is safe to call
//! on every render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Thread, ThreadKind};

/// Tabs above the conversation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Unread,
    Groups,
    Communities,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::All, Tab::Unread, Tab::Groups, Tab::Communities];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Unread => "unread",
            Tab::Groups => "groups",
            Tab::Communities => "communities",
        }
    }

    /// Whether a thread belongs under this tab.
    pub fn matches(&self, thread: &Thread) -> bool {
        match self {
            Tab::All => true,
            Tab::Unread => thread.unread_count > 0,
            Tab::Groups => thread.kind == ThreadKind::Group,
            Tab::Communities => thread.kind == ThreadKind::Community,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "unread" => Ok(Tab::Unread),
            "groups" | "group" => Ok(Tab::Groups),
            "communities" | "community" => Ok(Tab::Communities),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

/// Current tab and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub tab: Tab,
    pub query: String,
}

impl FilterState {
    pub fn new(tab: Tab, query: impl Into<String>) -> Self {
        Self {
            tab,
            query: query.into(),
        }
    }

    /// Apply this filter to `threads`.
    pub fn apply<'a>(&self, threads: impl IntoIterator<Item = &'a Thread>) -> Vec<&'a Thread> {
        visible(threads, self.tab, &self.query)
    }
}

/// Case-insensitive substring match over display name and subtitle.
/// A blank query matches everything.
pub fn matches_query(thread: &Thread, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    thread.display_name.to_lowercase().contains(&needle)
        || thread.subtitle.to_lowercase().contains(&needle)
}

/// Threads passing both the tab and the query, in input order.
pub fn visible<'a>(
    threads: impl IntoIterator<Item = &'a Thread>,
    tab: Tab,
    query: &str,
) -> Vec<&'a Thread> {
    threads
        .into_iter()
        .filter(|t| tab.matches(t))
        .filter(|t| matches_query(t, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageHistory;

    fn thread(id: &str, name: &str, subtitle: &str, kind: ThreadKind, unread: u32) -> Thread {
        Thread {
            id: id.to_string(),
            kind,
            display_name: name.to_string(),
            subtitle: subtitle.to_string(),
            avatar_glyph: "X".to_string(),
            unread_count: unread,
            last_message_preview: String::new(),
            last_message_time: None,
            messages: MessageHistory::Unloaded,
            is_self: false,
        }
    }

    fn sample() -> Vec<Thread> {
        vec![
            thread("t1", "Ada Lovelace", "Recruiter", ThreadKind::Direct, 1),
            thread("t2", "Rust Guild", "Weekly meetup", ThreadKind::Group, 0),
            thread("t3", "Open Source", "Community of makers", ThreadKind::Community, 0),
        ]
    }

    fn ids(threads: Vec<&Thread>) -> Vec<&str> {
        threads.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_unread_tab_keeps_only_unread() {
        let threads = sample();
        assert_eq!(ids(visible(&threads, Tab::Unread, "")), vec!["t1"]);
    }

    #[test]
    fn test_kind_tabs() {
        let threads = sample();
        assert_eq!(ids(visible(&threads, Tab::Groups, "")), vec!["t2"]);
        assert_eq!(ids(visible(&threads, Tab::Communities, "")), vec!["t3"]);
        assert_eq!(ids(visible(&threads, Tab::All, "")), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_query_is_case_insensitive_on_name_and_subtitle() {
        let threads = sample();
        assert_eq!(ids(visible(&threads, Tab::All, "ADA")), vec!["t1"]);
        assert_eq!(ids(visible(&threads, Tab::All, "meetUP")), vec!["t2"]);
        assert_eq!(ids(visible(&threads, Tab::All, "o")), vec!["t1", "t2", "t3"]);
        assert!(visible(&threads, Tab::All, "zzz").is_empty());
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let threads = sample();
        assert_eq!(visible(&threads, Tab::All, "   ").len(), 3);
    }

    #[test]
    fn test_tab_and_query_combine() {
        let threads = sample();
        assert!(visible(&threads, Tab::Unread, "guild").is_empty());
        assert_eq!(ids(visible(&threads, Tab::Groups, "guild")), vec!["t2"]);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let threads = sample();
        let before = threads.clone();
        let _ = FilterState::new(Tab::Unread, "ada").apply(&threads);
        assert_eq!(threads, before);
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("Unread".parse::<Tab>(), Ok(Tab::Unread));
        assert_eq!("community".parse::<Tab>(), Ok(Tab::Communities));
        assert!("archived".parse::<Tab>().is_err());
        for tab in Tab::ALL {
            assert_eq!(tab.to_string().parse::<Tab>(), Ok(tab));
        }
    }
}
