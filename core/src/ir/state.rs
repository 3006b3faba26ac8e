//! Arrangement (state) representation
//!
//! An [`Arrangement`] is an ordered collection of stacks, each stack ordered
//! bottom-to-top. Arrangements are immutable values during search: every
//! transition builds a new one, so states already sitting in the frontier or
//! the visited set are never disturbed.

use super::symbols::{BlockId, BlockTable};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// What a block rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Support {
    /// Bottommost block of its stack
    Table,
    /// Resting directly on another block
    On(BlockId),
}

/// Block -> supporter, one entry per block in the arrangement
pub type SupportMap = FxHashMap<BlockId, Support>;

/// Whether the order of stacks inside an arrangement matters for equality
///
/// `Significant` treats `[[A], [B]]` and `[[B], [A]]` as different states,
/// which is what the goal test and visited set do by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StackOrder {
    #[default]
    Significant,
    Ignored,
}

/// Canonical, hashable key of an arrangement
///
/// Each stack is encoded as its length followed by its block ids, so the
/// encoding is unambiguous and two fingerprints are equal exactly when the
/// arrangements are structurally equal (under the chosen [`StackOrder`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(Box<[u32]>);

impl Fingerprint {
    fn encode<'a, I>(stacks: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = &'a Vec<BlockId>>,
    {
        let mut words = Vec::with_capacity(capacity);
        for stack in stacks {
            words.push(stack.len() as u32);
            words.extend(stack.iter().map(|b| b.0));
        }
        Fingerprint(words.into_boxed_slice())
    }

    /// Stable 64-bit summary for logs and exported plans (not used for dedupe)
    pub fn digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

/// Ordered collection of stacks partitioning a set of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<BlockId>>", into = "Vec<Vec<BlockId>>")]
pub struct Arrangement {
    stacks: Vec<Vec<BlockId>>,
}

impl From<Vec<Vec<BlockId>>> for Arrangement {
    fn from(stacks: Vec<Vec<BlockId>>) -> Self {
        Self::new(stacks)
    }
}

impl From<Arrangement> for Vec<Vec<BlockId>> {
    fn from(state: Arrangement) -> Self {
        state.stacks
    }
}

impl Arrangement {
    /// Create an arrangement from bottom-to-top stacks, dropping empty ones
    pub fn new(stacks: Vec<Vec<BlockId>>) -> Self {
        Self {
            stacks: stacks.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }

    /// Build an arrangement from string labels, interning them into `table`
    pub fn from_labels<T, S>(table: &mut BlockTable, stacks: &[T]) -> Self
    where
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let stacks = stacks
            .iter()
            .map(|stack| {
                stack
                    .as_ref()
                    .iter()
                    .map(|label| table.get_or_intern(label.as_ref()))
                    .collect()
            })
            .collect();
        Self::new(stacks)
    }

    /// Render back to string labels
    pub fn to_labels(&self, table: &BlockTable) -> Vec<Vec<String>> {
        self.stacks
            .iter()
            .map(|stack| stack.iter().map(|&b| table.display(b)).collect())
            .collect()
    }

    /// Compact one-line rendering, e.g. `[A B] [C]`
    pub fn render(&self, table: &BlockTable) -> String {
        self.to_labels(table)
            .iter()
            .map(|stack| format!("[{}]", stack.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn from_stacks(stacks: Vec<Vec<BlockId>>) -> Self {
        debug_assert!(stacks.iter().all(|s| !s.is_empty()));
        Self { stacks }
    }

    pub fn stacks(&self) -> &[Vec<BlockId>] {
        &self.stacks
    }

    pub fn num_stacks(&self) -> usize {
        self.stacks.len()
    }

    /// Total number of block occurrences across all stacks
    pub fn num_blocks(&self) -> usize {
        self.stacks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// All blocks, stack by stack, bottom to top
    pub fn blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.stacks.iter().flat_map(|s| s.iter().copied())
    }

    /// The exposed top block of every stack, in stack order
    pub fn tops(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.stacks.iter().filter_map(|s| s.last().copied())
    }

    /// Canonical fingerprint used as the visited-set key
    pub fn fingerprint(&self, order: StackOrder) -> Fingerprint {
        let capacity = self.num_blocks() + self.stacks.len();
        match order {
            StackOrder::Significant => Fingerprint::encode(&self.stacks, capacity),
            StackOrder::Ignored => {
                let mut sorted: Vec<&Vec<BlockId>> = self.stacks.iter().collect();
                sorted.sort();
                Fingerprint::encode(sorted, capacity)
            }
        }
    }

    /// Structural equality, consistent with [`Arrangement::fingerprint`]
    pub fn same_as(&self, other: &Arrangement, order: StackOrder) -> bool {
        match order {
            StackOrder::Significant => self == other,
            StackOrder::Ignored => {
                self.stacks.len() == other.stacks.len()
                    && self.fingerprint(order) == other.fingerprint(order)
            }
        }
    }

    /// Map every block to the block directly beneath it, or the table
    pub fn support_map(&self) -> SupportMap {
        let mut map = SupportMap::default();
        map.reserve(self.num_blocks());

        for stack in &self.stacks {
            for (i, &block) in stack.iter().enumerate() {
                let support = if i == 0 {
                    Support::Table
                } else {
                    Support::On(stack[i - 1])
                };
                map.insert(block, support);
            }
        }

        map
    }
}
