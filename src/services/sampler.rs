//! Strategy dispatch over an owned vocabulary and random generator.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::sampling;
use crate::domain::errors::SamplingResult;
use crate::domain::models::{Sample, SamplingRequest, Vocabulary};

/// Runs sampling requests against one vocabulary.
///
/// The vocabulary is never mutated; the only state that changes between runs
/// is the random generator.
#[derive(Debug)]
pub struct Sampler<R = StdRng> {
    vocabulary: Vocabulary,
    rng: R,
}

impl Sampler<StdRng> {
    /// A sampler backed by [`StdRng`], seeded when `seed` is given and from
    /// entropy otherwise.
    pub fn with_seed(vocabulary: Vocabulary, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(vocabulary, rng)
    }
}

impl<R: Rng> Sampler<R> {
    pub const fn new(vocabulary: Vocabulary, rng: R) -> Self {
        Self { vocabulary, rng }
    }

    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Run one request.
    #[instrument(skip_all, fields(strategy = request.kind().id()))]
    pub fn run(&mut self, request: &SamplingRequest) -> SamplingResult<Sample> {
        let lexicon = &self.vocabulary.lexicon;
        let clusters = &self.vocabulary.clusters;
        let rng = &mut self.rng;

        let result = match request {
            SamplingRequest::Greedy => Ok(sampling::greedy(lexicon)),
            SamplingRequest::Beam => sampling::beam(lexicon, rng),
            SamplingRequest::SimpleRandom => sampling::simple_random(lexicon, rng),
            SamplingRequest::TopK { k } => sampling::top_k(lexicon, *k, rng),
            SamplingRequest::TopP { p } => sampling::top_p(lexicon, *p, rng),
            SamplingRequest::Systematic { n } => sampling::systematic(lexicon, *n),
            SamplingRequest::Stratified {
                categories,
                per_category,
            } => sampling::stratified(lexicon, clusters, categories, *per_category, rng),
            SamplingRequest::Temperature { level } => sampling::temperature(lexicon, *level, rng),
            SamplingRequest::Cluster {
                num_clusters,
                num_words,
            } => sampling::cluster(lexicon, clusters, *num_clusters, *num_words, rng),
            SamplingRequest::BestOfN { n } => sampling::best_of_n(lexicon, *n, rng),
        };

        if let Err(err) = &result {
            warn!(error = %err, "sampling request rejected");
        }
        result
    }

    /// Run `request` `runs` times and tally the results.
    ///
    /// `on_progress` is called once per completed run.
    pub fn simulate(
        &mut self,
        request: &SamplingRequest,
        runs: usize,
        mut on_progress: impl FnMut(),
    ) -> SamplingResult<Tally> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..runs {
            let sample = self.run(request)?;
            *counts.entry(sample.to_string()).or_default() += 1;
            on_progress();
        }

        let tally = Tally::from_counts(counts, runs);
        info!(
            strategy = request.kind().id(),
            runs,
            distinct = tally.rows.len(),
            "simulation complete"
        );
        Ok(tally)
    }
}

/// Frequency of each distinct result over a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    pub runs: usize,
    pub rows: Vec<TallyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyRow {
    pub result: String,
    pub count: usize,
    pub share: f64,
}

impl Tally {
    fn from_counts(counts: HashMap<String, usize>, runs: usize) -> Self {
        let mut rows: Vec<TallyRow> = counts
            .into_iter()
            .map(|(result, count)| TallyRow {
                share: if runs == 0 {
                    0.0
                } else {
                    count as f64 / runs as f64
                },
                result,
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.result.cmp(&b.result)));
        Self { runs, rows }
    }

    /// Times `result` came up.
    pub fn count_of(&self, result: &str) -> usize {
        self.rows
            .iter()
            .find(|row| row.result == result)
            .map_or(0, |row| row.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SamplingError;
    use crate::domain::models::{SamplingDefaults, StrategyKind, TemperatureLevel};

    fn sampler(seed: u64) -> Sampler {
        Sampler::with_seed(Vocabulary::builtin(), Some(seed))
    }

    #[test]
    fn test_every_default_request_runs() {
        let defaults = SamplingDefaults::default();
        let mut sampler = sampler(1);
        for kind in StrategyKind::ALL {
            let request = kind.default_request(&defaults);
            let sample = sampler.run(&request).unwrap();
            for token in sample.tokens() {
                assert!(sampler.vocabulary().lexicon.contains(token));
            }
        }
    }

    #[test]
    fn test_same_seed_same_results() {
        let request = SamplingRequest::Cluster {
            num_clusters: 2,
            num_words: 3,
        };
        let mut first = sampler(99);
        let mut second = sampler(99);
        for _ in 0..20 {
            assert_eq!(first.run(&request).unwrap(), second.run(&request).unwrap());
        }
    }

    #[test]
    fn test_validation_errors_surface() {
        let mut sampler = sampler(1);
        assert_eq!(
            sampler.run(&SamplingRequest::TopP { p: 0.0 }).unwrap_err(),
            SamplingError::InvalidTopP(0.0)
        );
        assert!(sampler
            .run(&SamplingRequest::Systematic { n: 20 })
            .is_err());
    }

    #[test]
    fn test_simulate_tally() {
        let mut sampler = sampler(3);
        let mut ticks = 0;
        let tally = sampler
            .simulate(&SamplingRequest::Greedy, 25, || ticks += 1)
            .unwrap();
        assert_eq!(ticks, 25);
        assert_eq!(tally.runs, 25);
        assert_eq!(tally.rows.len(), 1);
        assert_eq!(tally.count_of("explore"), 25);
        assert!((tally.rows[0].share - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_simulate_rows_sorted_by_count() {
        let mut sampler = sampler(5);
        let tally = sampler
            .simulate(
                &SamplingRequest::Temperature {
                    level: TemperatureLevel::Medium,
                },
                500,
                || {},
            )
            .unwrap();
        let total: usize = tally.rows.iter().map(|row| row.count).sum();
        assert_eq!(total, 500);
        assert!(tally.rows.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
