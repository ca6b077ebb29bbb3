use strata_prng::RandomSource;

/// Draws node heights from a geometric distribution.
///
/// Each draw below `probability` promotes the node one level; the first
/// draw at or above it stops the trial. Heights never exceed `max_level`.
#[derive(Debug, Clone)]
pub struct LevelGenerator<R> {
    max_level: usize,
    probability: f64,
    source: R,
}

impl<R> LevelGenerator<R> {
    /// Parameters are not checked here; `SkipList` validates them first.
    pub fn new(max_level: usize, probability: f64, source: R) -> Self {
        Self {
            max_level,
            probability,
            source,
        }
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }
}

impl<R: RandomSource> LevelGenerator<R> {
    /// Draw the highest level index for a new node.
    pub fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.source.next_f64() < self.probability {
            level += 1;
        }
        level
    }
}
