//! Shortcut grid data model.
//!
//! The root list is an ordered sequence of links and folders. Folders hold
//! links only, so nesting depth is capped at one by construction: a
//! `Folder` cannot be placed inside `Folder::children`.
//!
//! The wire format (local storage slot and export documents) is the flat
//! `{ id, title, url, icon?, type?, children? }` object. `type` defaults to
//! `"link"` when absent and `children` is only read for folders.

use std::collections::HashSet;
use std::slice;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::ShortcutId;

// ============================================================================
// Entries
// ============================================================================

/// A plain bookmark tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id: ShortcutId,
    title: String,
    url: String,
    icon: Option<String>,
}

impl Link {
    #[must_use]
    pub fn new(id: ShortcutId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            icon: None,
        }
    }

    /// Attach a local icon reference. Without one the renderer falls back to
    /// [`Link::favicon_url`].
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &ShortcutId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// `scheme://host[:port]/favicon.ico` for the link's site, if the URL parses.
    #[must_use]
    pub fn favicon_url(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let origin = match parsed.port() {
            Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
            None => format!("{}://{host}", parsed.scheme()),
        };
        Some(format!("{origin}/favicon.ico"))
    }
}

/// A folder tile grouping one or more links.
///
/// Children may be empty only transiently; the store prunes empty folders
/// after every operation that can empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: ShortcutId,
    title: String,
    children: Vec<Link>,
}

impl Folder {
    /// Title given to folders synthesized by a merge.
    pub const DEFAULT_TITLE: &'static str = "Folder";

    #[must_use]
    pub fn new(id: ShortcutId, title: impl Into<String>, children: Vec<Link>) -> Self {
        Self {
            id,
            title: title.into(),
            children,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Link>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn id(&self) -> &ShortcutId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn children(&self) -> &[Link] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, id: &ShortcutId) -> Option<&Link> {
        self.children.iter().find(|child| child.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn into_children(self) -> Vec<Link> {
        self.children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Link,
    Folder,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Folder => "folder",
        }
    }
}

/// One tile in the root list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub enum ShortcutEntry {
    Link(Link),
    Folder(Folder),
}

impl ShortcutEntry {
    #[must_use]
    pub fn id(&self) -> &ShortcutId {
        match self {
            Self::Link(link) => link.id(),
            Self::Folder(folder) => folder.id(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Link(link) => link.title(),
            Self::Folder(folder) => folder.title(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Link(_) => EntryKind::Link,
            Self::Folder(_) => EntryKind::Folder,
        }
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    #[must_use]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            Self::Folder(_) => None,
        }
    }

    #[must_use]
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::Link(_) => None,
        }
    }

    /// The entry's own id followed by the ids of any folder children.
    pub fn ids(&self) -> impl Iterator<Item = &ShortcutId> {
        let children = match self {
            Self::Folder(folder) => folder.children(),
            Self::Link(_) => &[][..],
        };
        std::iter::once(self.id()).chain(children.iter().map(Link::id))
    }
}

impl From<Link> for ShortcutEntry {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}

impl From<Folder> for ShortcutEntry {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("folder {folder} contains nested folder {child}")]
    NestedFolder {
        folder: ShortcutId,
        child: ShortcutId,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEntry {
    id: ShortcutId,
    title: String,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<EntryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawEntry>>,
}

impl RawEntry {
    fn into_link(self) -> Link {
        Link {
            id: self.id,
            title: self.title,
            url: self.url,
            icon: self.icon,
        }
    }
}

impl TryFrom<RawEntry> for ShortcutEntry {
    type Error = EntryError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        match raw.kind.unwrap_or_default() {
            EntryKind::Link => Ok(Self::Link(raw.into_link())),
            EntryKind::Folder => {
                let mut children = Vec::new();
                for child in raw.children.unwrap_or_default() {
                    if child.kind == Some(EntryKind::Folder) {
                        return Err(EntryError::NestedFolder {
                            folder: raw.id,
                            child: child.id,
                        });
                    }
                    children.push(child.into_link());
                }
                Ok(Self::Folder(Folder {
                    id: raw.id,
                    title: raw.title,
                    children,
                }))
            }
        }
    }
}

impl From<Link> for RawEntry {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            icon: link.icon,
            kind: Some(EntryKind::Link),
            children: None,
        }
    }
}

impl From<ShortcutEntry> for RawEntry {
    fn from(entry: ShortcutEntry) -> Self {
        match entry {
            ShortcutEntry::Link(link) => link.into(),
            ShortcutEntry::Folder(folder) => Self {
                id: folder.id,
                title: folder.title,
                url: String::new(),
                icon: None,
                kind: Some(EntryKind::Folder),
                children: Some(folder.children.into_iter().map(RawEntry::from).collect()),
            },
        }
    }
}

// ============================================================================
// Root list
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutListError {
    #[error("duplicate shortcut id {0}")]
    DuplicateId(ShortcutId),
}

/// Where an id lives inside a [`ShortcutList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Root(usize),
    InFolder { folder: usize, child: usize },
}

/// The ordered root sequence of the grid.
///
/// Invariant: ids are unique across the root and all folder children
/// combined (checked on every construction). Order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShortcutEntry>", into = "Vec<ShortcutEntry>")]
pub struct ShortcutList(Vec<ShortcutEntry>);

impl ShortcutList {
    pub fn new(entries: Vec<ShortcutEntry>) -> Result<Self, ShortcutListError> {
        let mut seen = HashSet::new();
        for id in entries.iter().flat_map(ShortcutEntry::ids) {
            if !seen.insert(id) {
                return Err(ShortcutListError::DuplicateId(id.clone()));
            }
        }
        Ok(Self(entries))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn entries(&self) -> &[ShortcutEntry] {
        &self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, ShortcutEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Root index of `id`. Folder children are not searched.
    #[must_use]
    pub fn position(&self, id: &ShortcutId) -> Option<usize> {
        self.0.iter().position(|entry| entry.id() == id)
    }

    /// Root-level entry with `id`.
    #[must_use]
    pub fn get(&self, id: &ShortcutId) -> Option<&ShortcutEntry> {
        self.0.iter().find(|entry| entry.id() == id)
    }

    /// Finds `id` at the root or inside any folder.
    #[must_use]
    pub fn locate(&self, id: &ShortcutId) -> Option<Location> {
        for (index, entry) in self.0.iter().enumerate() {
            if entry.id() == id {
                return Some(Location::Root(index));
            }
            if let ShortcutEntry::Folder(folder) = entry
                && let Some(child) = folder.children().iter().position(|c| c.id() == id)
            {
                return Some(Location::InFolder {
                    folder: index,
                    child,
                });
            }
        }
        None
    }

    #[must_use]
    pub fn contains(&self, id: &ShortcutId) -> bool {
        self.locate(id).is_some()
    }

    /// Every id in the list, root entries and folder children alike.
    pub fn ids(&self) -> impl Iterator<Item = &ShortcutId> {
        self.0.iter().flat_map(ShortcutEntry::ids)
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<ShortcutEntry> {
        self.0
    }
}

impl TryFrom<Vec<ShortcutEntry>> for ShortcutList {
    type Error = ShortcutListError;

    fn try_from(entries: Vec<ShortcutEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ShortcutList> for Vec<ShortcutEntry> {
    fn from(list: ShortcutList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a ShortcutList {
    type Item = &'a ShortcutEntry;
    type IntoIter = slice::Iter<'a, ShortcutEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
