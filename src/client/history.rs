use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::local_storage::LocalStorage;

/// Placeholder stored when the optional context/keywords field was left blank.
pub const NONE_PLACEHOLDER: &str = "None";

/// An entry kept in a client-local history list.
pub trait HistoryRecord: Serialize + DeserializeOwned + Clone {
    /// Local storage key holding the JSON array.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    /// Fields matched by `search`.
    fn searchable(&self) -> [&str; 3];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub id: i64,
    pub subject: String,
    pub tone: String,
    pub length: u32,
    pub context: String,
    pub content: String,
    pub date: String,
}

impl HistoryRecord for EmailEntry {
    const STORAGE_KEY: &'static str = "emailHistory";

    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn searchable(&self) -> [&str; 3] {
        [self.subject.as_str(), self.content.as_str(), self.context.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogEntry {
    pub id: i64,
    pub title: String,
    pub tone: String,
    pub length: u32,
    pub keywords: String,
    pub content: String,
    pub date: String,
}

impl HistoryRecord for BlogEntry {
    const STORAGE_KEY: &'static str = "blogHistory";

    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn searchable(&self) -> [&str; 3] {
        [self.title.as_str(), self.content.as_str(), self.keywords.as_str()]
    }
}

/// Blank optional fields are stored as `"None"`.
pub fn or_none(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NONE_PLACEHOLDER)
        .to_string()
}

pub fn now_iso() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Most-recent-first list of entries of one kind.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
}

impl<T: HistoryRecord> History<T> {
    /// A missing key reads as an empty history.
    pub fn load(storage: &LocalStorage) -> anyhow::Result<Self> {
        let raw = storage.get_item(T::STORAGE_KEY).unwrap_or("[]");
        let entries = serde_json::from_str(raw)
            .with_context(|| format!("parse {}", T::STORAGE_KEY))?;
        Ok(Self { entries })
    }

    pub fn save(&self, storage: &mut LocalStorage) -> anyhow::Result<()> {
        storage.set_item(T::STORAGE_KEY, serde_json::to_string(&self.entries)?)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends `entry` with a fresh millisecond id, kept strictly above the
    /// newest existing id so ids stay unique.
    pub fn push(&mut self, mut entry: T) -> &T {
        let newest = self.entries.first().map(|e| e.id()).unwrap_or(i64::MIN);
        entry.set_id(now_millis().max(newest.saturating_add(1)));
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Case-insensitive substring match; an empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&T> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                term.is_empty()
                    || e.searchable().iter().any(|f| f.to_lowercase().contains(&term))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::local_storage::temp_storage_path;

    fn blog(title: &str, keywords: Option<&str>) -> BlogEntry {
        BlogEntry {
            id: 0,
            title: title.into(),
            tone: "informative".into(),
            length: 500,
            keywords: or_none(keywords),
            content: format!("# {}\nBody", title),
            date: now_iso(),
        }
    }

    #[test]
    fn push_is_most_recent_first_with_unique_ids() {
        let path = temp_storage_path("push");
        let storage = LocalStorage::open(&path).unwrap();
        let mut history = History::<BlogEntry>::load(&storage).unwrap();
        assert!(history.is_empty());

        history.push(blog("first", None));
        history.push(blog("second", None));
        history.push(blog("third", None));

        let titles: Vec<_> = history.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
        let ids: Vec<_> = history.entries().iter().map(|e| e.id).collect();
        assert!(ids[0] > ids[1] && ids[1] > ids[2]);
    }

    #[test]
    fn storage_round_trip_preserves_entries_and_order() {
        let path = temp_storage_path("roundtrip");
        let mut storage = LocalStorage::open(&path).unwrap();
        let mut history = History::<EmailEntry>::load(&storage).unwrap();
        for subject in ["Kickoff", "Meeting Follow-up"] {
            history.push(EmailEntry {
                id: 0,
                subject: subject.into(),
                tone: "formal".into(),
                length: 150,
                context: or_none(None),
                content: "Hello".into(),
                date: now_iso(),
            });
        }
        history.save(&mut storage).unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        let loaded = History::<EmailEntry>::load(&reopened).unwrap();
        assert_eq!(loaded.entries(), history.entries());
        assert_eq!(loaded.entries()[0].subject, "Meeting Follow-up");
        assert_eq!(loaded.entries()[0].context, "None");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn clear_leaves_an_empty_list() {
        let path = temp_storage_path("clear");
        let mut storage = LocalStorage::open(&path).unwrap();
        let mut history = History::<BlogEntry>::load(&storage).unwrap();
        history.push(blog("a", None));
        history.save(&mut storage).unwrap();

        history.clear();
        history.save(&mut storage).unwrap();

        assert_eq!(storage.get_item(BlogEntry::STORAGE_KEY), Some("[]"));
        assert!(History::<BlogEntry>::load(&storage).unwrap().is_empty());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn remove_by_id() {
        let path = temp_storage_path("remove");
        let storage = LocalStorage::open(&path).unwrap();
        let mut history = History::<BlogEntry>::load(&storage).unwrap();
        let keep = history.push(blog("keep", None)).id;
        let drop = history.push(blog("drop", None)).id;

        assert!(history.remove(drop));
        assert!(!history.remove(drop));
        assert!(history.get(keep).is_some());
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn search_matches_title_content_and_keywords() {
        let path = temp_storage_path("search");
        let storage = LocalStorage::open(&path).unwrap();
        let mut history = History::<BlogEntry>::load(&storage).unwrap();
        history.push(blog("Async Rust", Some("tokio, futures")));
        history.push(blog("Gardening", None));

        assert_eq!(history.search("TOKIO").len(), 1);
        assert_eq!(history.search("garden")[0].title, "Gardening");
        assert_eq!(history.search("body").len(), 2);
        assert_eq!(history.search("").len(), 2);
        assert!(history.search("cobol").is_empty());
    }
}
