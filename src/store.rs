//! Host note-store interface and a JSON dump implementation

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::constants as C;
use crate::error::Result;

/// One page of a paginated host listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T: Clone> Page<T> {
    /// Cut page `page` (1-based) out of `all`
    pub fn slice(all: &[T], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let start = page.saturating_sub(1).saturating_mul(page_size).min(all.len());
        let end = start.saturating_add(page_size).min(all.len());
        Page {
            items: all[start..end].to_vec(),
            has_more: end < all.len(),
        }
    }
}

/// Narrow view of the host note store
pub trait NoteStore {
    /// Raw item records, page numbers start at 1
    fn item_page(&self, page: usize) -> Result<Page<Value>>;

    /// Tag titles of one note, page numbers start at 1
    fn tag_page(&self, note_id: &str, page: usize) -> Result<Page<String>>;
}

/// Collect every tag of a note, in store order
pub fn fetch_tags<S: NoteStore + ?Sized>(store: &S, note_id: &str) -> Result<Vec<String>> {
    let mut tags = Vec::new();
    for page in 1..=C::MAX_TAG_PAGES {
        let Page { items, has_more } = store.tag_page(note_id, page)?;
        tags.extend(items);
        if !has_more {
            return Ok(tags);
        }
    }
    warn!(note = note_id, pages = C::MAX_TAG_PAGES, "tag listing did not end, truncating");
    Ok(tags)
}

#[derive(Debug, Default, Deserialize)]
struct Dump {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    tags: HashMap<String, Vec<String>>,
}

/// Note store backed by a JSON dump file:
///
/// ```json
/// { "items": [ { "type": "folder", "id": "...", ... } ],
///   "tags":  { "<note id>": ["x", "y"] } }
/// ```
///
/// Relative resource `location`s are resolved against the dump's directory.
#[derive(Debug)]
pub struct JsonDumpStore {
    items: Vec<Value>,
    tags: HashMap<String, Vec<String>>,
    page_size: usize,
}

impl JsonDumpStore {
    /// Load a dump file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, &base)
    }

    /// Parse dump content; `base` anchors relative resource locations
    pub fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut dump: Dump = serde_json::from_str(content)?;
        for item in &mut dump.items {
            anchor_location(item, base);
        }
        Ok(Self {
            items: dump.items,
            tags: dump.tags,
            page_size: C::DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn anchor_location(item: &mut Value, base: &Path) {
    let Some(location) = item.get_mut("location") else {
        return;
    };
    let Some(raw) = location.as_str() else {
        return;
    };
    let path = PathBuf::from(raw);
    if path.is_relative() && !raw.is_empty() {
        *location = Value::String(base.join(path).to_string_lossy().into_owned());
    }
}

impl NoteStore for JsonDumpStore {
    fn item_page(&self, page: usize) -> Result<Page<Value>> {
        Ok(Page::slice(&self.items, page, self.page_size))
    }

    fn tag_page(&self, note_id: &str, page: usize) -> Result<Page<String>> {
        let tags = self.tags.get(note_id).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Page::slice(tags, page, self.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    #[test]
    fn test_page_slice() {
        let all = vec![1, 2, 3, 4, 5];
        assert_eq!(Page::slice(&all, 1, 2), Page { items: vec![1, 2], has_more: true });
        assert_eq!(Page::slice(&all, 3, 2), Page { items: vec![5], has_more: false });
        assert_eq!(Page::slice(&all, 9, 2), Page { items: vec![], has_more: false });
    }

    #[test]
    fn test_fetch_tags_walks_pages() {
        let dump = r#"{"items": [], "tags": {"n1": ["a", "b", "c", "d", "e"]}}"#;
        let store = JsonDumpStore::parse(dump, Path::new("")).unwrap().with_page_size(2);
        assert_eq!(fetch_tags(&store, "n1").unwrap(), vec!["a", "b", "c", "d", "e"]);
        assert!(fetch_tags(&store, "other").unwrap().is_empty());
    }

    struct EndlessTags;

    impl NoteStore for EndlessTags {
        fn item_page(&self, _page: usize) -> Result<Page<Value>> {
            Ok(Page { items: vec![], has_more: false })
        }

        fn tag_page(&self, _note_id: &str, _page: usize) -> Result<Page<String>> {
            Ok(Page { items: vec!["t".to_string()], has_more: true })
        }
    }

    #[test]
    fn test_fetch_tags_is_bounded() {
        let tags = fetch_tags(&EndlessTags, "n1").unwrap();
        assert_eq!(tags.len(), C::MAX_TAG_PAGES);
    }

    #[test]
    fn test_relative_location_anchored() {
        let dump = r#"{"items": [{"type": "resource", "id": "r", "location": "res/a.png"}]}"#;
        let store = JsonDumpStore::parse(dump, Path::new("/dump")).unwrap();
        let page = store.item_page(1).unwrap();
        assert_eq!(page.items[0]["location"], Value::String("/dump/res/a.png".into()));
    }

    #[test]
    fn test_invalid_dump() {
        let err = JsonDumpStore::parse("{", Path::new("")).unwrap_err();
        assert!(matches!(err, ExportError::Dump(_)));
    }
}
