//! Resource-stream collaborator: addressing, providers, load errors.
//!
//! Stylesheets and markup documents are read through a [`ResourceProvider`],
//! addressed as `path` or `group:path`. Opening is the only step that can
//! fail the load; everything after it degrades gracefully.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the load entry points.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("resource not found: {group}:{name}")]
    NotFound { name: String, group: String },
    #[error("resource unreadable: {name}: {source}")]
    Unreadable {
        name: String,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// ResourceAddress
// ---------------------------------------------------------------------------

/// A parsed `group:path` or bare `path` address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    pub group: Option<String>,
    pub path: String,
}

impl ResourceAddress {
    /// Parse an address. A leading `group:` is split off only when both sides
    /// are non-empty.
    pub fn parse(address: &str) -> Self {
        let address = address.trim();
        match address.split_once(':') {
            Some((group, path)) if !group.trim().is_empty() && !path.trim().is_empty() => Self {
                group: Some(group.trim().to_owned()),
                path: path.trim().to_owned(),
            },
            _ => Self {
                group: None,
                path: address.to_owned(),
            },
        }
    }

    /// The explicit group, or `default` if the address has none.
    pub fn group_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.group.as_deref().unwrap_or(default)
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{group}:{}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// A line-readable, exhaustible text stream.
pub trait ResourceStream {
    /// Read the next line without its terminator.
    fn read_line(&mut self) -> io::Result<String>;

    /// Whether every line has been read.
    fn eof(&self) -> bool;
}

/// A [`ResourceStream`] over text already in memory.
#[derive(Debug, Clone, Default)]
pub struct LineStream {
    lines: VecDeque<String>,
}

impl LineStream {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }
}

impl ResourceStream for LineStream {
    fn read_line(&mut self) -> io::Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream"))
    }

    fn eof(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Drain a stream into lines, naming the resource in any error.
pub fn read_all(stream: &mut dyn ResourceStream, name: &str) -> Result<Vec<String>, LoadError> {
    let mut lines = Vec::new();
    while !stream.eof() {
        let line = stream.read_line().map_err(|source| LoadError::Unreadable {
            name: name.to_owned(),
            source,
        })?;
        lines.push(line);
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

/// Opens named resources within resource groups.
pub trait ResourceProvider {
    fn open(&self, name: &str, group: &str) -> Result<Box<dyn ResourceStream>, LoadError>;
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn open(&self, name: &str, group: &str) -> Result<Box<dyn ResourceStream>, LoadError> {
        (**self).open(name, group)
    }
}

/// Resources held in memory, keyed by group and name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    entries: HashMap<(String, String), String>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, group: &str, name: &str, text: impl Into<String>) {
        self.entries
            .insert((group.to_owned(), name.to_owned()), text.into());
    }

    /// Add a resource (builder).
    pub fn with(mut self, group: &str, name: &str, text: impl Into<String>) -> Self {
        self.insert(group, name, text);
        self
    }
}

impl ResourceProvider for MemoryResources {
    fn open(&self, name: &str, group: &str) -> Result<Box<dyn ResourceStream>, LoadError> {
        self.entries
            .get(&(group.to_owned(), name.to_owned()))
            .map(|text| Box::new(LineStream::new(text)) as Box<dyn ResourceStream>)
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_owned(),
                group: group.to_owned(),
            })
    }
}

/// Resources read from disk; each group maps to a directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResources {
    groups: HashMap<String, PathBuf>,
}

impl DirectoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a group name to a directory (builder).
    pub fn with_group(mut self, group: &str, root: impl Into<PathBuf>) -> Self {
        self.groups.insert(group.to_owned(), root.into());
        self
    }
}

impl ResourceProvider for DirectoryResources {
    fn open(&self, name: &str, group: &str) -> Result<Box<dyn ResourceStream>, LoadError> {
        let not_found = || LoadError::NotFound {
            name: name.to_owned(),
            group: group.to_owned(),
        };
        let root = self.groups.get(group).ok_or_else(not_found)?;
        let path = root.join(name);
        if !path.is_file() {
            return Err(not_found());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Unreadable {
            name: name.to_owned(),
            source,
        })?;
        Ok(Box::new(LineStream::new(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ResourceAddress ──────────────────────────────────────────────

    #[test]
    fn address_with_group() {
        let addr = ResourceAddress::parse("Popular:ui/dialog.mcss");
        assert_eq!(addr.group.as_deref(), Some("Popular"));
        assert_eq!(addr.path, "ui/dialog.mcss");
        assert_eq!(addr.to_string(), "Popular:ui/dialog.mcss");
    }

    #[test]
    fn address_without_group_uses_default() {
        let addr = ResourceAddress::parse("dialog.mcss");
        assert_eq!(addr.group, None);
        assert_eq!(addr.group_or("General"), "General");
    }

    #[test]
    fn address_with_empty_side_is_a_path() {
        assert_eq!(ResourceAddress::parse(":x").path, ":x");
        assert_eq!(ResourceAddress::parse("x:").group, None);
    }

    // ── Streams ──────────────────────────────────────────────────────

    #[test]
    fn line_stream_reads_to_eof() {
        let mut stream = LineStream::new("a\nb\r\nc");
        assert_eq!(read_all(&mut stream, "t").unwrap(), vec!["a", "b", "c"]);
        assert!(stream.eof());
        assert!(stream.read_line().is_err());
    }

    #[test]
    fn empty_stream_is_eof() {
        assert!(LineStream::new("").eof());
    }

    // ── Providers ────────────────────────────────────────────────────

    #[test]
    fn memory_open_found_and_missing() {
        let res = MemoryResources::new().with("General", "a.css", "x {}");
        let mut stream = res.open("a.css", "General").unwrap();
        assert_eq!(stream.read_line().unwrap(), "x {}");

        let err = res.open("a.css", "Other").err().unwrap();
        assert!(matches!(err, LoadError::NotFound { ref group, .. } if group == "Other"));
        assert_eq!(err.to_string(), "resource not found: Other:a.css");
    }

    #[test]
    fn directory_open() {
        let dir = std::env::temp_dir().join(format!("hudkit-res-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("hud.maml"), "#a\n #b\n").unwrap();

        let res = DirectoryResources::new().with_group("General", &dir);
        let mut stream = res.open("hud.maml", "General").unwrap();
        assert_eq!(read_all(stream.as_mut(), "hud.maml").unwrap(), vec!["#a", " #b"]);

        assert!(matches!(
            res.open("missing.maml", "General"),
            Err(LoadError::NotFound { .. })
        ));
        assert!(matches!(
            res.open("hud.maml", "Nope"),
            Err(LoadError::NotFound { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
