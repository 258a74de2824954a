//! Read-only asset trees the resolver serves from.

use std::borrow::Cow;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Lookup over a read-only hierarchical byte store. Paths are
/// slash-separated and relative, with no leading slash.
///
/// Implementations must be consistent: a path for which [`contains`] returns
/// true must stay readable for the lifetime of the tree.
///
/// [`contains`]: AssetTree::contains
pub trait AssetTree {
    fn contains(&self, path: &str) -> bool;
    fn read(&self, path: &str) -> Option<Cow<'static, [u8]>>;
}

/// Adapter over a `rust_embed` derive, the production packaging collaborator.
pub struct EmbeddedTree<E> {
    _marker: PhantomData<E>,
}

impl<E> EmbeddedTree<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for EmbeddedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: rust_embed::RustEmbed> AssetTree for EmbeddedTree<E> {
    fn contains(&self, path: &str) -> bool {
        E::get(path).is_some()
    }

    fn read(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        E::get(path).map(|file| file.data)
    }
}

/// In-memory tree for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), data.into());
        self
    }
}

impl AssetTree for MemoryTree {
    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.files.get(path).map(|data| Cow::Owned(data.clone()))
    }
}

/// View of a tree limited to one subtree. Every lookup path is cleaned
/// before being joined under the root, so a lookup can never name anything
/// outside the scope.
#[derive(Debug)]
pub(crate) struct ScopedTree<T> {
    inner: T,
    root: String,
}

impl<T: AssetTree> ScopedTree<T> {
    pub(crate) fn new(inner: T, root: &str) -> Self {
        Self {
            inner,
            root: root.trim_matches('/').to_string(),
        }
    }

    fn locate(&self, path: &str) -> Option<String> {
        let rel = clean_path(path);
        if rel.is_empty() {
            return None;
        }
        if self.root.is_empty() {
            Some(rel)
        } else {
            Some(format!("{}/{}", self.root, rel))
        }
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.locate(path)
            .is_some_and(|full| self.inner.contains(&full))
    }

    pub(crate) fn read(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.inner.read(&self.locate(path)?)
    }
}

/// Clean a slash-separated path: drop empty and `.` segments, resolve `..`
/// without ever climbing above the start.
pub(crate) fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
