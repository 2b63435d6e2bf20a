//! Per-row exact-token index.
//!
//! A character trie over the row's tokens, stored as an arena of nodes. Each
//! terminal node remembers the leftmost position its token occupied, which is
//! what the phrase order check compares.
use canonical::Token;
use fxhash::FxHashMap;

const ROOT: usize = 0;

#[derive(Debug, Default, Clone)]
struct Node {
    children: FxHashMap<char, u32>,
    /// Set on the first insert that ends at this node; later duplicates keep it.
    first_position: Option<usize>,
}

/// Exact whole-token membership for one row.
///
/// Built in O(total token length); lookups are O(query length) and never
/// report prefix hits ("cat" is not found in a row containing "category").
#[derive(Debug, Clone)]
pub struct TokenIndex {
    nodes: Vec<Node>,
    distinct: usize,
}

impl TokenIndex {
    pub fn build(tokens: &[Token]) -> Self {
        let mut index = Self {
            nodes: vec![Node::default()],
            distinct: 0,
        };
        for token in tokens {
            index.insert(&token.text, token.position);
        }
        index
    }

    fn insert(&mut self, text: &str, position: usize) {
        let mut node = ROOT;
        for ch in text.chars() {
            let existing = self.nodes[node].children.get(&ch).copied();
            node = match existing {
                Some(child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(ch, child as u32);
                    child
                }
            };
        }
        let slot = &mut self.nodes[node].first_position;
        if slot.is_none() {
            *slot = Some(position);
            self.distinct += 1;
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.first_position(token).is_some()
    }

    /// Leftmost position of `token` in the row, if present.
    pub fn first_position(&self, token: &str) -> Option<usize> {
        let mut node = ROOT;
        for ch in token.chars() {
            node = *self.nodes[node].children.get(&ch)? as usize;
        }
        self.nodes[node].first_position
    }

    /// Number of distinct tokens in the row.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }
}
