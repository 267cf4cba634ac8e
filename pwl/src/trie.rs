//! Prefix-compressed trie over Unicode scalar values.
//!
//! The absent subtrie is `None` in whatever slot owns it. A single stored
//! string lives in a [`TrieNode::Leaf`] holding the remaining suffix; two or
//! more strings share a [`TrieNode::Branch`] mapping the next scalar of each
//! string to the subtrie holding its rest. `word_end` marks that a stored
//! word terminates exactly at that branch.

use std::collections::BTreeMap;

use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TrieNode {
    Leaf(SmolStr),
    Branch {
        word_end: bool,
        children: BTreeMap<char, TrieNode>,
    },
}

impl TrieNode {
    /// Inserts an NFD-normalized `word`, producing the new subtrie.
    pub(crate) fn insert(node: Option<TrieNode>, word: &str) -> TrieNode {
        match node {
            None => TrieNode::Leaf(SmolStr::new(word)),
            Some(TrieNode::Leaf(value)) if value == word => TrieNode::Leaf(value),
            Some(TrieNode::Leaf(value)) => {
                // Promote the leaf to a branch and reinsert both strings.
                let mut word_end = false;
                let mut children = BTreeMap::new();
                insert_into(&mut word_end, &mut children, &value);
                insert_into(&mut word_end, &mut children, word);
                TrieNode::Branch { word_end, children }
            }
            Some(TrieNode::Branch {
                mut word_end,
                mut children,
            }) => {
                insert_into(&mut word_end, &mut children, word);
                TrieNode::Branch { word_end, children }
            }
        }
    }

    /// Removes an NFD-normalized `word` from the subtrie. Returns true when
    /// the node no longer stores anything and must be dropped by its parent.
    pub(crate) fn remove(&mut self, word: &str) -> bool {
        let merged = match self {
            TrieNode::Leaf(value) => return value == word,
            TrieNode::Branch { word_end, children } => {
                let mut chars = word.chars();
                match chars.next() {
                    None => *word_end = false,
                    Some(head) => {
                        if let Some(child) = children.get_mut(&head) {
                            if child.remove(chars.as_str()) {
                                children.remove(&head);
                            }
                        }
                    }
                }

                if !*word_end && children.is_empty() {
                    return true;
                }

                // A branch left with a single leaf child and no word-end
                // mark collapses into a leaf carrying the joined suffix.
                if !*word_end && children.len() == 1 {
                    match children.pop_first() {
                        Some((key, TrieNode::Leaf(suffix))) => {
                            let mut value = String::with_capacity(key.len_utf8() + suffix.len());
                            value.push(key);
                            value.push_str(&suffix);
                            Some(TrieNode::Leaf(SmolStr::from(value)))
                        }
                        Some((key, child)) => {
                            children.insert(key, child);
                            None
                        }
                        None => None,
                    }
                } else {
                    None
                }
            }
        };

        if let Some(leaf) = merged {
            *self = leaf;
        }
        false
    }
}

fn insert_into(word_end: &mut bool, children: &mut BTreeMap<char, TrieNode>, word: &str) {
    let mut chars = word.chars();
    match chars.next() {
        None => *word_end = true,
        Some(head) => {
            let child = children.remove(&head);
            children.insert(head, TrieNode::insert(child, chars.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> Option<TrieNode> {
        let mut node = None;
        for word in words {
            node = Some(TrieNode::insert(node.take(), word));
        }
        node
    }

    fn leaf(s: &str) -> TrieNode {
        TrieNode::Leaf(SmolStr::new(s))
    }

    #[test]
    fn single_word_is_a_leaf() {
        assert_eq!(build(&["hello"]), Some(leaf("hello")));
    }

    #[test]
    fn duplicate_insert_is_a_noop() {
        assert_eq!(build(&["hello", "hello"]), Some(leaf("hello")));
    }

    #[test]
    fn second_word_promotes_the_leaf() {
        let node = build(&["ab", "cd"]).unwrap();
        match node {
            TrieNode::Branch { word_end, children } => {
                assert!(!word_end);
                assert_eq!(children.get(&'a'), Some(&leaf("b")));
                assert_eq!(children.get(&'c'), Some(&leaf("d")));
            }
            other => panic!("expected a branch, got {other:?}"),
        }
    }

    #[test]
    fn prefix_word_sets_word_end() {
        let node = build(&["ab", "a"]).unwrap();
        let TrieNode::Branch { children, .. } = &node else {
            panic!("expected a branch");
        };
        match children.get(&'a') {
            Some(TrieNode::Branch { word_end, children }) => {
                assert!(*word_end);
                assert_eq!(children.get(&'b'), Some(&leaf("")));
            }
            other => panic!("expected a word-end branch, got {other:?}"),
        }
    }

    #[test]
    fn remove_collapses_back_to_a_leaf() {
        let mut node = build(&["hello", "help"]).unwrap();
        assert!(!node.remove("help"));
        assert_eq!(node, leaf("hello"));
    }

    #[test]
    fn remove_last_word_empties_the_node() {
        let mut node = build(&["hello"]).unwrap();
        assert!(node.remove("hello"));
    }

    #[test]
    fn remove_of_absent_word_is_a_noop() {
        let mut node = build(&["hello", "help"]).unwrap();
        let before = node.clone();
        assert!(!node.remove("helm"));
        assert!(!node.remove("h"));
        assert_eq!(node, before);
    }

    #[test]
    fn remove_clears_word_end_without_collapsing_a_branch_child() {
        let mut node = build(&["ab", "ax", "a"]).unwrap();
        assert!(!node.remove("a"));
        let TrieNode::Branch { children, .. } = &node else {
            panic!("expected a branch");
        };
        match children.get(&'a') {
            Some(TrieNode::Branch { word_end, children }) => {
                assert!(!word_end);
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected a branch, got {other:?}"),
        }
    }

    #[test]
    fn insert_remove_round_trip() {
        let reference = build(&["hello", "help", "hell"]);
        let mut node = build(&["hello", "help", "hell"]).unwrap();
        node = TrieNode::insert(Some(node), "helm");
        assert!(!node.remove("helm"));
        assert_eq!(Some(node), reference);
    }
}
