//! Probabilistic skip list for strata.
//!
//! A [`SkipList`] keeps a sorted set of values across several forward-linked
//! levels. Level 0 holds every value; each higher level holds a geometrically
//! shrinking subset, so a lookup can skip ahead on the sparse levels before
//! dropping down. Search, insertion and removal run in expected `O(log n)`.
//!
//! Nodes live in a dense arena and link to each other by index. The random
//! source that decides node heights is injected at construction, so a seeded
//! list is fully reproducible.
//!
//! ```
//! use strata_skiplist::{SkipList, SkipListError};
//!
//! let mut list = SkipList::with_seed(7);
//! list.insert(3);
//! list.insert(7);
//! list.insert(5);
//! assert_eq!(list.to_vec(), vec![3, 5, 7]);
//! assert_eq!(list.search(&5), Some(&5));
//!
//! assert_eq!(list.remove(&7), Ok(7));
//! assert_eq!(list.remove(&7), Err(SkipListError::NotFound));
//! assert_eq!(list.to_vec(), vec![3, 5]);
//! ```

mod error;
mod iter;
mod level;

use std::fmt;

use strata_config::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, validate_params};

pub use error::SkipListError;
pub use iter::{IntoIter, Iter};
pub use level::LevelGenerator;
pub use strata_config::{ConfigError, SkipListConfig};
pub use strata_logging::{LogCollector, LogEntry, LogLevel, LoggingConfig};
pub use strata_prng::{RandomSource, SeededRng};

/// Component name attached to log entries.
const COMPONENT: &str = "skiplist";

/// Arena index of the next node, `None` for the end of a level. In the
/// update vector `None` stands for the header instead.
pub(crate) type Link = Option<usize>;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// One link per level, `0..=height`.
    pub(crate) forward: Box<[Link]>,
}

/// An ordered set backed by a skip list.
///
/// `R` is the random source used to draw node heights; the default is an
/// entropy- or seed-initialised [`SeededRng`].
#[derive(Clone)]
pub struct SkipList<T, R = SeededRng> {
    nodes: Vec<Node<T>>,
    head: Box<[Link]>,
    update: Vec<Link>,
    level: usize,
    levels: LevelGenerator<R>,
    log: Option<LogCollector>,
}

impl<T: Ord> SkipList<T> {
    /// Create an empty list with default parameters and an entropy-seeded source.
    pub fn new() -> Self {
        Self::build(
            DEFAULT_MAX_LEVEL,
            DEFAULT_PROBABILITY,
            SeededRng::from_entropy(),
        )
    }

    /// Create an empty list with default parameters and a reproducible source.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, SeededRng::new(seed))
    }

    /// Create an empty list from a validated configuration.
    pub fn from_config(config: &SkipListConfig) -> Result<Self, SkipListError> {
        config.validate()?;
        let source = config
            .seed
            .map_or_else(SeededRng::from_entropy, SeededRng::new);
        let mut list = Self::build(config.max_level, config.probability, source);
        if let Some(logging) = &config.logging {
            list.log = Some(LogCollector::with_config(logging.clone()));
        }

        let (max_level, probability, seeded) =
            (config.max_level, config.probability, config.seed.is_some());
        list.log_event(LogLevel::Info, "constructed", move |e| {
            e.with_field("max_level", max_level)
                .with_field("probability", probability)
                .with_field("seeded", seeded)
        });
        Ok(list)
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> SkipList<T, R> {
    fn build(max_level: usize, probability: f64, source: R) -> Self {
        Self {
            nodes: Vec::new(),
            head: vec![None; max_level + 1].into_boxed_slice(),
            update: vec![None; max_level + 1],
            level: 0,
            levels: LevelGenerator::new(max_level, probability, source),
            log: None,
        }
    }

    /// Attach an operation log.
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.log = Some(LogCollector::with_config(config));
        self
    }

    /// The operation log, if one is attached.
    pub fn log(&self) -> Option<&LogCollector> {
        self.log.as_ref()
    }

    pub fn log_mut(&mut self) -> Option<&mut LogCollector> {
        self.log.as_mut()
    }

    /// Number of values in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Highest level currently holding a node; `0` when empty.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    pub fn probability(&self) -> f64 {
        self.levels.probability()
    }

    /// Ascending iterator over the values. Each call starts from the smallest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head[0])
    }

    /// Collect the values in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// The smallest value.
    pub fn first(&self) -> Option<&T> {
        self.head[0].map(|id| &self.nodes[id].value)
    }

    /// The largest value, found by running right along each level.
    pub fn last(&self) -> Option<&T> {
        let mut at = None;
        for lvl in (0..=self.level).rev() {
            while let Some(next) = self.next(at, lvl) {
                at = Some(next);
            }
        }
        at.map(|id| &self.nodes[id].value)
    }

    /// Remove every value and reset the level to 0.
    pub fn clear(&mut self) {
        let removed = self.nodes.len();
        self.nodes.clear();
        self.head.fill(None);
        self.update.fill(None);
        self.level = 0;
        self.log_event(LogLevel::Debug, "cleared", move |e| {
            e.with_field("removed", removed)
        });
    }

    fn next(&self, at: Link, lvl: usize) -> Link {
        match at {
            None => self.head[lvl],
            Some(id) => self.nodes[id].forward[lvl],
        }
    }

    fn set_next(&mut self, at: Link, lvl: usize, to: Link) {
        match at {
            None => self.head[lvl] = to,
            Some(id) => self.nodes[id].forward[lvl] = to,
        }
    }

    fn log_event(
        &mut self,
        level: LogLevel,
        message: &str,
        fields: impl FnOnce(LogEntry) -> LogEntry,
    ) {
        if let Some(log) = self.log.as_mut() {
            if log.enabled(level, COMPONENT) {
                log.push(fields(LogEntry::with_component(level, COMPONENT, message)));
            }
        }
    }
}

impl<T: Ord, R> SkipList<T, R> {
    /// Look up `value`. The returned reference is the handle to the stored value.
    pub fn search(&self, value: &T) -> Option<&T> {
        let candidate = self.walk(value, |_, _| {})?;
        let node = &self.nodes[candidate];
        (node.value == *value).then_some(&node.value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Remove `value`, returning it.
    ///
    /// Fails with [`SkipListError::NotFound`] when the value is absent; the
    /// list is left untouched in that case.
    pub fn remove(&mut self, value: &T) -> Result<T, SkipListError> {
        let target = match self.descend(value) {
            Some(id) if self.nodes[id].value == *value => id,
            _ => {
                let len = self.len();
                self.log_event(LogLevel::Debug, "remove missed", move |e| {
                    e.with_field("len", len)
                });
                return Err(SkipListError::NotFound);
            }
        };

        let height = self.nodes[target].forward.len() - 1;
        for lvl in 0..=self.level {
            let at = self.update[lvl];
            if self.next(at, lvl) != Some(target) {
                break;
            }
            let after = self.nodes[target].forward[lvl];
            self.set_next(at, lvl, after);
        }

        let from = self.level;
        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }
        if self.level < from {
            let to = self.level;
            self.log_event(LogLevel::Debug, "level shrunk", move |e| {
                e.with_field("from", from).with_field("to", to)
            });
        }

        let removed = self.release(target);
        let len = self.len();
        self.log_event(LogLevel::Trace, "removed", move |e| {
            e.with_field("height", height).with_field("len", len)
        });
        Ok(removed)
    }

    /// Descend from the top level, calling `visit(level, predecessor)` each
    /// time the walk drops a level. Returns the first node on level 0 whose
    /// value is not less than `value`.
    fn walk(&self, value: &T, mut visit: impl FnMut(usize, Link)) -> Link {
        let mut at = None;
        for lvl in (0..=self.level).rev() {
            while let Some(next) = self.next(at, lvl) {
                if self.nodes[next].value < *value {
                    at = Some(next);
                } else {
                    break;
                }
            }
            visit(lvl, at);
        }
        self.next(at, 0)
    }

    /// [`walk`](Self::walk) that records each level's predecessor in the update vector.
    fn descend(&mut self, value: &T) -> Link {
        let mut update = std::mem::take(&mut self.update);
        let candidate = self.walk(value, |lvl, at| update[lvl] = at);
        self.update = update;
        candidate
    }

    /// Free the arena slot of an unlinked node.
    ///
    /// The last node moves into the hole, so every link to it is repointed
    /// first. Its predecessors are found by descending on its value.
    fn release(&mut self, id: usize) -> T {
        let last = self.nodes.len() - 1;
        if id != last {
            let mut preds = std::mem::take(&mut self.update);
            self.walk(&self.nodes[last].value, |lvl, at| preds[lvl] = at);
            for (lvl, &at) in preds
                .iter()
                .enumerate()
                .take(self.nodes[last].forward.len())
            {
                self.set_next(at, lvl, Some(id));
            }
            self.update = preds;
        }
        self.nodes.swap_remove(id).value
    }
}

impl<T: Ord, R: RandomSource> SkipList<T, R> {
    /// Create an empty list with explicit parameters and random source.
    ///
    /// `max_level` is the highest level index a node may reach; `0` gives a
    /// plain sorted linked list. `probability` must lie strictly inside `(0, 1)`.
    pub fn with_params(
        max_level: usize,
        probability: f64,
        source: R,
    ) -> Result<Self, SkipListError> {
        validate_params(max_level, probability)?;
        Ok(Self::build(max_level, probability, source))
    }

    /// Insert `value`. Returns `false` and changes nothing if it is already present.
    pub fn insert(&mut self, value: T) -> bool {
        if let Some(id) = self.descend(&value) {
            if self.nodes[id].value == value {
                let len = self.len();
                self.log_event(LogLevel::Trace, "duplicate ignored", move |e| {
                    e.with_field("len", len)
                });
                return false;
            }
        }

        let height = self.levels.random_level();
        if height > self.level {
            self.update[self.level + 1..=height].fill(None);
            let from = self.level;
            self.level = height;
            self.log_event(LogLevel::Debug, "level raised", move |e| {
                e.with_field("from", from).with_field("to", height)
            });
        }

        let id = self.nodes.len();
        let forward = (0..=height)
            .map(|lvl| self.next(self.update[lvl], lvl))
            .collect();
        self.nodes.push(Node { value, forward });
        for lvl in 0..=height {
            let at = self.update[lvl];
            self.set_next(at, lvl, Some(id));
        }

        let len = self.len();
        self.log_event(LogLevel::Trace, "inserted", move |e| {
            e.with_field("height", height).with_field("len", len)
        });
        true
    }
}

impl<'a, T, R> IntoIterator for &'a SkipList<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, R> IntoIterator for SkipList<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut at = self.head[0];
        while let Some(id) = at {
            order.push(id);
            at = self.nodes[id].forward[0];
        }

        let mut slots: Vec<Option<T>> = self.nodes.into_iter().map(|n| Some(n.value)).collect();
        IntoIter::new(order.into_iter().filter_map(|id| slots[id].take()).collect())
    }
}

impl<T: Ord, R: RandomSource> Extend<T> for SkipList<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug, R> fmt::Debug for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One line per level, top level first: `Level 1: 3 -> 9`.
impl<T: fmt::Display, R> fmt::Display for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lvl in (0..=self.level).rev() {
            write!(f, "Level {lvl}:")?;
            let mut at = self.head[lvl];
            let mut sep = " ";
            while let Some(id) = at {
                write!(f, "{sep}{}", self.nodes[id].value)?;
                sep = " -> ";
                at = self.nodes[id].forward[lvl];
            }
            if lvl > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strata_prng::FixedSequence;

    /// Check every structural invariant of the list.
    fn assert_well_formed<T: Ord + fmt::Debug, R>(list: &SkipList<T, R>) {
        assert!(list.level <= list.max_level());
        assert_eq!(list.head.len(), list.max_level() + 1);

        for lvl in 0..=list.max_level() {
            let mut at = list.head[lvl];
            let mut prev: Option<&T> = None;
            let mut count = 0;
            while let Some(id) = at {
                let node = &list.nodes[id];
                assert!(node.forward.len() > lvl, "node {id} linked above its height");
                if let Some(prev) = prev {
                    assert!(prev < &node.value, "level {lvl} out of order");
                }
                prev = Some(&node.value);
                count += 1;
                at = node.forward[lvl];
            }
            let expected = list.nodes.iter().filter(|n| n.forward.len() > lvl).count();
            assert_eq!(count, expected, "level {lvl} misses nodes");
            if lvl > list.level {
                assert!(list.head[lvl].is_none(), "level {lvl} occupied above level");
            }
        }

        if list.is_empty() {
            assert_eq!(list.level, 0);
        } else {
            assert!(list.head[list.level].is_some());
        }
    }

    fn pinned(max_level: usize, draws: impl IntoIterator<Item = f64>) -> SkipList<i32, FixedSequence> {
        SkipList::with_params(max_level, 0.5, FixedSequence::new(draws)).unwrap()
    }

    #[test]
    fn test_skiplist_empty() {
        let list: SkipList<i32> = SkipList::with_seed(1);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.level(), 0);
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_well_formed(&list);
    }

    #[test]
    fn insert_search_remove_scenario() {
        let mut list = SkipList::with_seed(42);
        list.insert(3);
        list.insert(7);
        list.insert(5);
        assert_eq!(list.to_vec(), vec![3, 5, 7]);
        assert_eq!(list.search(&5), Some(&5));
        assert_eq!(list.remove(&7), Ok(7));
        assert_eq!(list.to_vec(), vec![3, 5]);
        assert_well_formed(&list);
    }

    #[test]
    fn empty_list_misses() {
        let mut list: SkipList<i32> = SkipList::with_seed(1);
        assert_eq!(list.remove(&1), Err(SkipListError::NotFound));
        assert_eq!(list.search(&1), None);
        assert!(!list.contains(&1));
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut list = SkipList::with_seed(9);
        assert!(list.insert(4));
        assert!(!list.insert(4));
        assert_eq!(list.len(), 1);
        assert_eq!(list.to_vec(), vec![4]);
    }

    #[test]
    fn duplicate_insert_consumes_no_draws() {
        let mut list = pinned(4, [0.1, 0.9]);
        list.insert(1);
        list.insert(1);
        assert_eq!(list.levels.source_mut().remaining(), 0);
        assert_eq!(list.level(), 1);
    }

    #[test]
    fn second_remove_fails() {
        let mut list = SkipList::with_seed(3);
        list.insert(10);
        assert_eq!(list.remove(&10), Ok(10));
        assert_eq!(list.remove(&10), Err(SkipListError::NotFound));
        assert!(!list.contains(&10));
    }

    #[test]
    fn removing_only_element_resets_level() {
        let mut list = pinned(8, [0.1, 0.1, 0.1, 0.9]);
        list.insert(5);
        assert_eq!(list.level(), 3);
        list.remove(&5).unwrap();
        assert_eq!(list.level(), 0);
        assert!(list.is_empty());
        assert_well_formed(&list);
    }

    #[test]
    fn level_shrinks_only_when_top_empties() {
        // heights: 1 -> 2, 2 -> 0, 3 -> 1
        let mut list = pinned(4, [0.1, 0.1, 0.9, 0.9, 0.1, 0.9]);
        list.insert(1);
        list.insert(2);
        list.insert(3);
        assert_eq!(list.level(), 2);

        list.remove(&2).unwrap();
        assert_eq!(list.level(), 2);
        list.remove(&1).unwrap();
        assert_eq!(list.level(), 1);
        assert_eq!(list.to_vec(), vec![3]);
        assert_well_formed(&list);
    }

    #[test]
    fn raised_levels_link_from_header() {
        let mut list = pinned(6, [0.9, 0.1, 0.1, 0.1, 0.9]);
        list.insert(10);
        list.insert(20);
        assert_eq!(list.level(), 3);
        for lvl in 1..=3 {
            let id = list.head[lvl].unwrap();
            assert_eq!(list.nodes[id].value, 20);
        }
        assert_well_formed(&list);
    }

    #[test]
    fn zero_max_level_is_a_sorted_linked_list() {
        let mut list = SkipList::with_params(0, 0.5, SeededRng::new(5)).unwrap();
        for v in [9, 2, 7, 4, 4, 1] {
            list.insert(v);
        }
        assert!(list.nodes.iter().all(|n| n.forward.len() == 1));
        assert_eq!(list.level(), 0);
        assert_eq!(list.to_vec(), vec![1, 2, 4, 7, 9]);
        assert_eq!(list.search(&7), Some(&7));
        assert_eq!(list.remove(&2), Ok(2));
        assert_eq!(list.remove(&3), Err(SkipListError::NotFound));
        assert_eq!(list.to_vec(), vec![1, 4, 7, 9]);
        assert_well_formed(&list);
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(matches!(
            SkipList::<i32, _>::with_params(4, 0.0, SeededRng::new(1)),
            Err(SkipListError::InvalidConfiguration(ConfigError::InvalidProbability(_)))
        ));
        assert!(matches!(
            SkipList::<i32, _>::with_params(4, 1.0, SeededRng::new(1)),
            Err(SkipListError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SkipList::<i32, _>::with_params(65, 0.5, SeededRng::new(1)),
            Err(SkipListError::InvalidConfiguration(ConfigError::MaxLevelTooLarge(65)))
        ));
    }

    #[test]
    fn first_and_last() {
        let mut list = SkipList::with_seed(11);
        list.extend([50, 10, 40, 20, 30]);
        assert_eq!(list.first(), Some(&10));
        assert_eq!(list.last(), Some(&50));
        list.remove(&50).unwrap();
        assert_eq!(list.last(), Some(&40));
    }

    #[test]
    fn iteration_is_restartable() {
        let mut list = SkipList::with_seed(8);
        list.extend([3, 1, 2]);
        let first: Vec<_> = list.iter().copied().collect();
        let second: Vec<_> = (&list).into_iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(list.iter().len(), 3);
    }

    #[test]
    fn owning_iterator_is_ascending() {
        let mut list = SkipList::with_seed(12);
        list.extend(["pear", "apple", "fig", "kiwi"]);
        list.remove(&"fig").unwrap();
        let values: Vec<_> = list.into_iter().collect();
        assert_eq!(values, vec!["apple", "kiwi", "pear"]);
    }

    #[test]
    fn clear_resets_state() {
        let mut list = SkipList::with_seed(13);
        list.extend(0..50);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.level(), 0);
        assert_eq!(list.iter().next(), None);
        assert_well_formed(&list);

        list.insert(1);
        assert_eq!(list.to_vec(), vec![1]);
    }

    #[test]
    fn release_repoints_moved_node() {
        // Removing an early-inserted value moves the last arena slot.
        let mut list = SkipList::with_seed(21);
        list.extend([5, 1, 9, 3, 7]);
        list.remove(&5).unwrap();
        assert_well_formed(&list);
        assert_eq!(list.to_vec(), vec![1, 3, 7, 9]);
        for v in [1, 3, 7, 9] {
            assert!(list.contains(&v));
        }
    }

    #[test]
    fn display_dumps_levels_top_down() {
        // heights: 1 -> 1, 2 -> 0, 3 -> 2
        let mut list = pinned(4, [0.1, 0.9, 0.9, 0.1, 0.1, 0.9]);
        list.extend([1, 2, 3]);
        insta::assert_snapshot!(list.to_string(), @r"
        Level 2: 3
        Level 1: 1 -> 3
        Level 0: 1 -> 2 -> 3
        ");

        list.remove(&3).unwrap();
        insta::assert_snapshot!(list.to_string(), @r"
        Level 1: 1
        Level 0: 1 -> 2
        ");
    }

    #[test]
    fn display_empty() {
        let list: SkipList<i32> = SkipList::with_seed(0);
        assert_eq!(list.to_string(), "Level 0:");
    }

    #[test]
    fn debug_lists_values() {
        let mut list = SkipList::with_seed(4);
        list.extend([2, 1]);
        assert_eq!(format!("{list:?}"), "{1, 2}");
    }

    #[test]
    fn from_config_applies_parameters() {
        let config = SkipListConfig::new()
            .with_max_level(3)
            .with_probability(0.25)
            .with_seed(77);
        let mut list: SkipList<u32> = SkipList::from_config(&config).unwrap();
        assert_eq!(list.max_level(), 3);
        assert_eq!(list.probability(), 0.25);
        assert!(list.log().is_none());

        list.extend(0..200);
        assert!(list.level() <= 3);
        assert_well_formed(&list);
    }

    #[test]
    fn from_config_is_reproducible_with_seed() {
        let config = SkipListConfig::new().with_seed(5);
        let mut a: SkipList<u32> = SkipList::from_config(&config).unwrap();
        let mut b: SkipList<u32> = SkipList::from_config(&config).unwrap();
        a.extend(0..100);
        b.extend(0..100);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn from_config_rejects_invalid() {
        let config = SkipListConfig::new().with_probability(2.0);
        assert!(matches!(
            SkipList::<u32>::from_config(&config),
            Err(SkipListError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn operation_log_records_events() {
        let logging = LoggingConfig::new()
            .with_level(LogLevel::Trace)
            .with_timestamps(false);
        let mut list = pinned(4, [0.1, 0.9, 0.9]).with_logging(logging);
        list.insert(1);
        list.insert(2);
        list.insert(2);
        list.remove(&1).unwrap();
        assert!(list.remove(&1).is_err());
        list.clear();

        let log = list.log().unwrap();
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "level raised",
                "inserted",
                "inserted",
                "duplicate ignored",
                "level shrunk",
                "removed",
                "remove missed",
                "cleared",
            ]
        );
        let raised = log.entries().next().unwrap();
        assert_eq!(raised.field("from"), Some("0"));
        assert_eq!(raised.field("to"), Some("1"));
        assert!(log.entries().all(|e| e.component.as_deref() == Some("skiplist")));
    }

    #[test]
    fn operation_log_respects_level() {
        let config = SkipListConfig::new()
            .with_seed(1)
            .with_logging(LoggingConfig::new().with_level(LogLevel::Info));
        let mut list: SkipList<i32> = SkipList::from_config(&config).unwrap();
        list.extend(0..20);
        let _ = list.remove(&100);

        let log = list.log().unwrap();
        assert_eq!(log.len(), 1);
        let entry = log.entries().next().unwrap();
        assert_eq!(entry.message, "constructed");
        assert_eq!(entry.field("seeded"), Some("true"));
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_after_every_op(
            ops in proptest::collection::vec((any::<bool>(), 0i32..64), 0..200),
            max_level in 0usize..6,
            seed in any::<u64>(),
        ) {
            let mut list = SkipList::with_params(max_level, 0.5, SeededRng::new(seed)).unwrap();
            for (is_insert, v) in ops {
                if is_insert {
                    list.insert(v);
                } else {
                    let _ = list.remove(&v);
                }
                assert_well_formed(&list);
                prop_assert_eq!(list.len(), list.iter().count());
            }
        }
    }
}
