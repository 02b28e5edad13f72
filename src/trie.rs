//! A prefix trie keyed by decimal digits.
//!
//! Range-table keys (EAN.UCC prefixes and registration groups) are short,
//! variable-width digit strings. Storing them in a trie lets the element
//! parser walk one digit at a time and know immediately when no longer key
//! can match, instead of rebuilding and re-hashing a growing substring.

use std::collections::BTreeMap;

/// A node in a digit-keyed trie; the root represents the empty key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitTrie<T> {
    value: Option<T>,
    children: BTreeMap<u8, DigitTrie<T>>,
}

impl<T> Default for DigitTrie<T> {
    fn default() -> Self {
        DigitTrie {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<T> DigitTrie<T> {
    /// Create an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no key has been stored below this node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// The value stored at this node, if this node ends a key.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Step to the child for one ASCII digit (`b'0'..=b'9'`).
    #[must_use]
    pub fn child(&self, digit: u8) -> Option<&DigitTrie<T>> {
        self.children.get(&digit)
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        key.bytes()
            .try_fold(self, |node, digit| node.child(digit))
            .and_then(DigitTrie::value)
    }

    /// Get the value stored under `key`, inserting one built by `make` when absent.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> T) -> &mut T {
        self.node_mut(key).value.get_or_insert_with(make)
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        self.node_mut(key).value.replace(value)
    }

    /// Number of keys stored in this trie.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.value.is_some()) + self.children.values().map(DigitTrie::len).sum::<usize>()
    }

    fn node_mut(&mut self, key: &str) -> &mut DigitTrie<T> {
        key.bytes().fold(self, |node, digit| {
            node.children.entry(digit).or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut trie = DigitTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.insert("978", "bookland"), None);
        assert_eq!(trie.insert("979", "bookland 2"), None);
        assert_eq!(trie.get("978"), Some(&"bookland"));
        assert_eq!(trie.get("97"), None);
        assert_eq!(trie.get("9781"), None);
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.insert("978", "replaced"), Some("bookland"));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_stepwise_walk() {
        let mut trie = DigitTrie::new();
        trie.insert("88", 1);
        trie.insert("99936", 2);

        let node = trie.child(b'8').unwrap();
        assert_eq!(node.value(), None);
        assert_eq!(node.child(b'8').and_then(DigitTrie::value), Some(&1));
        assert!(trie.child(b'7').is_none());
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut trie: DigitTrie<Vec<u32>> = DigitTrie::new();
        trie.get_or_insert_with("0", Vec::new).push(1);
        trie.get_or_insert_with("0", Vec::new).push(2);
        assert_eq!(trie.get("0"), Some(&vec![1, 2]));
    }
}
