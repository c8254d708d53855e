use indexmap::IndexMap;

use crate::types::ByteString;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathComponent {
    Key(ByteString),
    Index(usize),
}

impl From<&str> for PathComponent {
    fn from(key: &str) -> Self {
        PathComponent::Key(key.into())
    }
}

impl From<ByteString> for PathComponent {
    fn from(key: ByteString) -> Self {
        PathComponent::Key(key)
    }
}

impl From<usize> for PathComponent {
    fn from(index: usize) -> Self {
        PathComponent::Index(index)
    }
}

/// A finite set of positions within a value tree, stored as a trie of
/// [`PathComponent`]s. The decoder's `top_level_keys` option is its
/// flat, keys-only specialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSet {
    children: IndexMap<PathComponent, PathSet>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn get(&self, component: &PathComponent) -> Option<&PathSet> {
        self.children.get(component)
    }

    pub fn get_key(&self, key: &str) -> Option<&PathSet> {
        self.children.get(&PathComponent::from(key))
    }

    pub fn get_index(&self, index: usize) -> Option<&PathSet> {
        self.children.get(&PathComponent::Index(index))
    }

    /// Inserting an existing component is idempotent.
    pub fn insert(&mut self, component: impl Into<PathComponent>) -> &mut PathSet {
        self.children.entry(component.into()).or_default()
    }

    pub fn components(&self) -> impl Iterator<Item = &PathComponent> {
        self.children.keys()
    }
}

impl<P> FromIterator<P> for PathSet
where
    P: IntoIterator,
    P::Item: Into<PathComponent>,
{
    fn from_iter<I: IntoIterator<Item = P>>(paths: I) -> Self {
        let mut root = PathSet::new();
        for path in paths {
            let mut node = &mut root;
            for component in path {
                node = node.insert(component);
            }
        }
        root
    }
}
