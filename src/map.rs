use crate::array::DynamicArray;
use crate::errors::AllocError;
use std::fmt;
use std::mem;

/// A prefix-compressed trie keyed by byte strings.
///
/// Keys are never copied: every node's prefix is a sub-slice of a key that was handed
/// to [RadixMap::insert], so the map borrows those buffers for `'k`. When used as the
/// storage of a JSON object the keys point straight into the parsed document.
///
/// Among the children of a node no two prefixes start with the same byte, which is what
/// allows lookups to pick the next node by looking at a single byte per level.
#[derive(Clone)]
pub struct RadixMap<'k, V> {
    // Boxed so that a map can be stored inside its own values
    root: Box<Node<'k, V>>,
    len: usize,
}

#[derive(Debug, Clone)]
struct Node<'k, V> {
    prefix: &'k [u8],
    kind: NodeKind<'k, V>,
}

#[derive(Debug, Clone)]
enum NodeKind<'k, V> {
    // Only ever seen at the root of a map that has no keys yet
    Empty,
    Leaf(V),
    Tree(DynamicArray<Node<'k, V>>),
}

#[derive(Debug, PartialEq, Eq)]
enum Difference {
    Equal,
    At(usize),
}

impl<'k, V> RadixMap<'k, V> {
    pub fn new() -> Self {
        Self {
            root: Box::new(Node {
                prefix: &[],
                kind: NodeKind::Empty,
            }),
            len: 0,
        }
    }

    /// Number of distinct keys stored in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` under `key`. Inserting an existing key replaces its value.
    pub fn insert(&mut self, key: &'k [u8], value: V) -> Result<(), AllocError> {
        if self.root.insert(key, value)? {
            self.len += 1;
        }
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.root.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.root.get_mut(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Walks the trie depth-first, calling `f` with the full key and the value of every
    /// entry. Siblings are visited in the order they were created.
    pub fn visit<'s, F: FnMut(&[u8], &'s V)>(&'s self, mut f: F) {
        let mut key = Vec::new();
        self.root.visit(&mut key, &mut f);
    }

    /// Hands every stored value to `release` and frees the trie.
    pub fn destroy_with<F: FnMut(V)>(self, mut release: F) {
        (*self.root).destroy_with(&mut release);
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.root.check_invariants(true);
    }
}

impl<'k, V> Node<'k, V> {
    fn leaf(prefix: &'k [u8], value: V) -> Self {
        Self {
            prefix,
            kind: NodeKind::Leaf(value),
        }
    }

    fn dispatches(&self, rest: &[u8]) -> bool {
        /* Siblings never share a leading byte, so looking at the first one is enough.
         * An empty remainder can only continue into a child with an empty prefix. */
        match (rest.first(), self.prefix.first()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }

    fn insert(&mut self, key: &'k [u8], value: V) -> Result<bool, AllocError> {
        /* Returns whether a new key was added, as opposed to an existing value being replaced */
        if let NodeKind::Empty = self.kind {
            // First insert into a fresh map: become a leaf instead of splitting around
            // the placeholder's empty prefix
            self.prefix = key;
            self.kind = NodeKind::Leaf(value);
            return Ok(true);
        }

        let prefix_len = self.prefix.len();
        let diff = match first_difference(key, self.prefix) {
            Difference::Equal => {
                if let NodeKind::Leaf(stored) = &mut self.kind {
                    *stored = value;
                    return Ok(false);
                }
                prefix_len
            }
            Difference::At(i) => i,
        };

        match &mut self.kind {
            NodeKind::Tree(children) if diff == prefix_len => {
                let rest = &key[diff..];
                let matching = children.iter().position(|child| child.dispatches(rest));
                match matching.and_then(|i| children.get_mut(i)) {
                    Some(child) => child.insert(rest, value),
                    None => {
                        children.append(Node::leaf(rest, value))?;
                        Ok(true)
                    }
                }
            }
            _ => {
                self.split(key, diff, value)?;
                Ok(true)
            }
        }
    }

    fn split(&mut self, key: &'k [u8], at: usize, value: V) -> Result<(), AllocError> {
        /* Turns this node into a tree whose prefix is the shared part of `key` and the current
         * prefix. The current contents (a single value or a whole child list) move down into
         * a node holding the rest of the old prefix, next to a new leaf for the rest of the key. */
        let mut children = DynamicArray::with_capacity(2)?;
        let prefix = self.prefix;
        let old = Node {
            prefix: &prefix[at..],
            kind: mem::replace(&mut self.kind, NodeKind::Empty),
        };

        children.append(Node::leaf(&key[at..], value))?;
        children.append(old)?;

        self.prefix = &prefix[..at];
        self.kind = NodeKind::Tree(children);
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Option<&V> {
        let rest = key.strip_prefix(self.prefix)?;
        match &self.kind {
            NodeKind::Empty => None,
            NodeKind::Leaf(value) => rest.is_empty().then_some(value),
            NodeKind::Tree(children) => children
                .iter()
                .find(|child| child.dispatches(rest))?
                .get(rest),
        }
    }

    fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let rest = key.strip_prefix(self.prefix)?;
        match &mut self.kind {
            NodeKind::Empty => None,
            NodeKind::Leaf(value) => rest.is_empty().then_some(value),
            NodeKind::Tree(children) => children
                .iter_mut()
                .find(|child| child.dispatches(rest))?
                .get_mut(rest),
        }
    }

    fn visit<'s, F: FnMut(&[u8], &'s V)>(&'s self, key: &mut Vec<u8>, f: &mut F) {
        let mark = key.len();
        key.extend_from_slice(self.prefix);
        match &self.kind {
            NodeKind::Empty => {}
            NodeKind::Leaf(value) => f(key.as_slice(), value),
            NodeKind::Tree(children) => children.iter().for_each(|child| child.visit(key, f)),
        }
        key.truncate(mark);
    }

    fn destroy_with<F: FnMut(V)>(self, release: &mut F) {
        match self.kind {
            NodeKind::Empty => {}
            NodeKind::Leaf(value) => release(value),
            NodeKind::Tree(children) => children.destroy_with(|child| child.destroy_with(release)),
        }
    }

    #[cfg(test)]
    fn check_invariants(&self, is_root: bool) {
        match &self.kind {
            NodeKind::Empty => assert!(is_root, "placeholder node below the root"),
            NodeKind::Leaf(_) => {}
            NodeKind::Tree(children) => {
                assert!(children.len() >= 2, "tree node with fewer than two children");
                let mut firsts = Vec::new();
                for child in children {
                    assert!(
                        !matches!(child.kind, NodeKind::Empty),
                        "placeholder node below the root"
                    );
                    if child.prefix.is_empty() {
                        assert!(matches!(child.kind, NodeKind::Leaf(_)), "empty-prefix tree");
                    }
                    let first = child.prefix.first().copied();
                    assert!(!firsts.contains(&first), "siblings share a leading byte");
                    firsts.push(first);
                    child.check_invariants(false);
                }
            }
        }
    }
}

fn first_difference(a: &[u8], b: &[u8]) -> Difference {
    /* Index of the first byte where `a` and `b` differ. If one is a prefix of the other,
     * that's the length of the shorter one. */
    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    if shared == a.len() && shared == b.len() {
        Difference::Equal
    } else {
        Difference::At(shared)
    }
}

impl<V> Default for RadixMap<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for RadixMap<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        /* Two maps are equal when they hold the same entries, regardless of the order the
         * keys were inserted in (which changes the shape of the trie). */
        if self.len != other.len {
            return false;
        }
        let mut equal = true;
        self.visit(|key, value| equal &= other.get(key) == Some(value));
        equal
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixMap<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Vec::with_capacity(self.len);
        self.visit(|key, value| entries.push((String::from_utf8_lossy(key).into_owned(), value)));
        f.debug_map()
            .entries(entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
