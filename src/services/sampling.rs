//! Token sampling strategies.
//!
//! Every strategy is a free function over an immutable [`Lexicon`] (and, for
//! the category-based ones, a [`ClusterMap`]). Randomness is always injected
//! through `rng`, so a seeded generator gives reproducible results.
//!
//! Parameter misuse is reported as a [`SamplingError`]. Requests that are well
//! formed but cannot be satisfied by the data yield a sentinel [`Sample`].

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::Rng;
use tracing::debug;

use crate::domain::errors::{SamplingError, SamplingResult};
use crate::domain::models::{ClusterMap, Lexicon, LexiconEntry, Sample, TemperatureLevel};

/// Number of candidates kept by beam search.
pub const BEAM_WIDTH: usize = 3;

/// Highest-weight token. Ties go to the earliest declared token.
pub fn greedy(lexicon: &Lexicon) -> Sample {
    // Lexicon::new rejects empty input, so this branch is never taken
    let Some(best) = heaviest(lexicon.entries().iter()) else {
        return Sample::NoValidSelection;
    };
    debug!(token = %best.token, weight = best.weight, "greedy pick");
    Sample::token(&best.token)
}

/// Candidates considered by beam search: the top [`BEAM_WIDTH`] by weight.
pub fn beam_candidates(lexicon: &Lexicon) -> Vec<&LexiconEntry> {
    lexicon.ranked().into_iter().take(BEAM_WIDTH).collect()
}

/// Uniform pick among the beam candidates.
pub fn beam<R: Rng + ?Sized>(lexicon: &Lexicon, rng: &mut R) -> SamplingResult<Sample> {
    let candidates = beam_candidates(lexicon);
    let pick = uniform(&candidates, rng);
    debug!(candidates = candidates.len(), token = %pick.token, "beam pick");
    Ok(Sample::token(&pick.token))
}

/// One draw proportional to raw weight over the whole lexicon.
pub fn simple_random<R: Rng + ?Sized>(lexicon: &Lexicon, rng: &mut R) -> SamplingResult<Sample> {
    let entries: Vec<&LexiconEntry> = lexicon.entries().iter().collect();
    let pick = weighted(&entries, rng)?;
    debug!(token = %pick.token, "simple random pick");
    Ok(Sample::token(&pick.token))
}

/// Candidates considered by top-k sampling. `k` beyond the vocabulary size
/// is clamped to it.
pub fn top_k_candidates(lexicon: &Lexicon, k: usize) -> SamplingResult<Vec<&LexiconEntry>> {
    if k == 0 {
        return Err(SamplingError::ZeroTopK);
    }
    Ok(lexicon.ranked().into_iter().take(k).collect())
}

/// Weighted draw among the `k` heaviest tokens. Weights are not renormalized.
pub fn top_k<R: Rng + ?Sized>(lexicon: &Lexicon, k: usize, rng: &mut R) -> SamplingResult<Sample> {
    let candidates = top_k_candidates(lexicon, k)?;
    let pick = weighted(&candidates, rng)?;
    debug!(k, candidates = candidates.len(), token = %pick.token, "top-k pick");
    Ok(Sample::token(&pick.token))
}

/// Candidates considered by top-p sampling.
///
/// Raw weights are accumulated in descending order until the running sum
/// reaches `p`; the token that crosses the threshold is included. Weights are
/// not normalized first, so `p` is a threshold on raw weight rather than on
/// probability mass.
pub fn top_p_candidates(lexicon: &Lexicon, p: f64) -> SamplingResult<Vec<&LexiconEntry>> {
    if p.is_nan() || p <= 0.0 || p > 1.0 {
        return Err(SamplingError::InvalidTopP(p));
    }

    let mut cumulative = 0.0;
    let mut candidates = Vec::new();
    for entry in lexicon.ranked() {
        cumulative += entry.weight;
        candidates.push(entry);
        if cumulative >= p {
            break;
        }
    }
    Ok(candidates)
}

/// Uniform pick among the top-p candidates.
pub fn top_p<R: Rng + ?Sized>(lexicon: &Lexicon, p: f64, rng: &mut R) -> SamplingResult<Sample> {
    let candidates = top_p_candidates(lexicon, p)?;
    let pick = uniform(&candidates, rng);
    debug!(p, candidates = candidates.len(), token = %pick.token, "top-p pick");
    Ok(Sample::token(&pick.token))
}

/// The `n`-th token (1-based) in declaration order.
pub fn systematic(lexicon: &Lexicon, n: usize) -> SamplingResult<Sample> {
    let entry = n
        .checked_sub(1)
        .and_then(|i| lexicon.entries().get(i))
        .ok_or(SamplingError::SystematicOutOfRange {
            n,
            vocabulary_size: lexicon.len(),
        })?;
    debug!(n, token = %entry.token, "systematic pick");
    Ok(Sample::token(&entry.token))
}

/// Stratified sampling over the requested categories.
///
/// Up to `per_category` tokens are drawn without replacement from each
/// category; the result is a uniform pick over everything collected, not one
/// token per category.
pub fn stratified<S, R>(
    lexicon: &Lexicon,
    clusters: &ClusterMap,
    categories: &[S],
    per_category: usize,
    rng: &mut R,
) -> SamplingResult<Sample>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if per_category == 0 {
        return Err(SamplingError::ZeroPerCategory);
    }

    let mut collected: Vec<&str> = Vec::new();
    for category in categories {
        let category = category.as_ref();
        if !clusters.has_category(category) {
            return Err(SamplingError::UnknownCategory(category.to_string()));
        }
        let pool: Vec<&str> = clusters
            .tokens_in(category)
            .into_iter()
            .filter(|token| lexicon.contains(token))
            .collect();
        let amount = per_category.min(pool.len());
        collected.extend(index::sample(rng, pool.len(), amount).into_iter().map(|i| pool[i]));
    }

    if collected.is_empty() {
        debug!(categories = categories.len(), "stratified sampling collected nothing");
        return Ok(Sample::NoValidSelection);
    }

    let pick = collected[rng.gen_range(0..collected.len())];
    debug!(collected = collected.len(), token = pick, "stratified pick");
    Ok(Sample::token(pick))
}

/// Weighted draw after reshaping weights by `level` and renormalizing.
pub fn temperature<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    level: TemperatureLevel,
    rng: &mut R,
) -> SamplingResult<Sample> {
    let exponent = level.exponent();
    let adjusted: Vec<f64> = lexicon
        .entries()
        .iter()
        .map(|entry| entry.weight.powf(exponent))
        .collect();
    let total: f64 = adjusted.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return Err(SamplingError::DegenerateWeights);
    }

    let dist = WeightedIndex::new(adjusted.iter().map(|w| w / total))?;
    let pick = &lexicon.entries()[dist.sample(rng)];
    debug!(level = %level, token = %pick.token, "temperature pick");
    Ok(Sample::token(&pick.token))
}

/// Cluster sampling.
///
/// Chooses `num_clusters` distinct categories, pools their tokens and draws
/// `num_words` of them without replacement. The phrase keeps draw order.
pub fn cluster<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    clusters: &ClusterMap,
    num_clusters: usize,
    num_words: usize,
    rng: &mut R,
) -> SamplingResult<Sample> {
    if num_clusters == 0 {
        return Err(SamplingError::ZeroClusters);
    }
    if num_words == 0 {
        return Err(SamplingError::ZeroWords);
    }

    let categories = clusters.categories();
    if num_clusters > categories.len() {
        return Err(SamplingError::TooManyClusters {
            requested: num_clusters,
            available: categories.len(),
        });
    }

    let selected: HashSet<&str> = index::sample(rng, categories.len(), num_clusters)
        .into_iter()
        .map(|i| categories[i])
        .collect();
    let pool: Vec<&str> = clusters
        .assignments()
        .filter(|(token, category)| selected.contains(category) && lexicon.contains(token))
        .map(|(token, _)| token)
        .collect();

    if pool.len() < num_words {
        debug!(pool = pool.len(), num_words, "cluster pool too small");
        return Ok(Sample::NotEnoughWords);
    }

    let words: Vec<String> = index::sample(rng, pool.len(), num_words)
        .into_iter()
        .map(|i| pool[i].to_string())
        .collect();
    debug!(clusters = ?selected, pool = pool.len(), "cluster phrase drawn");
    Ok(Sample::Phrase(words))
}

/// Draws `n` tokens by raw weight and keeps the heaviest one drawn.
///
/// Ties go to the earliest draw.
pub fn best_of_n<R: Rng + ?Sized>(lexicon: &Lexicon, n: usize, rng: &mut R) -> SamplingResult<Sample> {
    if n == 0 {
        return Err(SamplingError::ZeroBestOfN);
    }

    let entries = lexicon.entries();
    let dist = WeightedIndex::new(entries.iter().map(|entry| entry.weight))?;
    let best = heaviest((0..n).map(|_| &entries[dist.sample(rng)]))
        .ok_or(SamplingError::ZeroBestOfN)?;
    debug!(n, token = %best.token, "best-of-n pick");
    Ok(Sample::token(&best.token))
}

/// First entry with the maximum weight, or `None` for an empty iterator.
fn heaviest<'a>(entries: impl Iterator<Item = &'a LexiconEntry>) -> Option<&'a LexiconEntry> {
    entries.reduce(|best, entry| if entry.weight > best.weight { entry } else { best })
}

/// Uniform pick. `candidates` must not be empty.
fn uniform<'a, R: Rng + ?Sized>(candidates: &[&'a LexiconEntry], rng: &mut R) -> &'a LexiconEntry {
    candidates[rng.gen_range(0..candidates.len())]
}

/// Pick proportional to raw weight.
fn weighted<'a, R: Rng + ?Sized>(
    candidates: &[&'a LexiconEntry],
    rng: &mut R,
) -> SamplingResult<&'a LexiconEntry> {
    let dist = WeightedIndex::new(candidates.iter().map(|entry| entry.weight))?;
    Ok(candidates[dist.sample(rng)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> Lexicon {
        Lexicon::new([("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_greedy_picks_heaviest() {
        assert_eq!(greedy(&abc()), Sample::token("a"));
        assert_eq!(greedy(&Lexicon::builtin()), Sample::token("explore"));
    }

    #[test]
    fn test_greedy_ties_go_to_first_declared() {
        let lexicon = Lexicon::new([("x", 0.1), ("y", 0.4), ("z", 0.4)]).unwrap();
        assert_eq!(greedy(&lexicon), Sample::token("y"));
    }

    #[test]
    fn test_beam_candidates() {
        let lexicon = Lexicon::builtin();
        let tokens: Vec<&str> = beam_candidates(&lexicon)
            .iter()
            .map(|e| e.token.as_str())
            .collect();
        // explore (0.3), then the first two 0.2 entries in declaration order
        assert_eq!(tokens, vec!["explore", "ancient", "inn"]);

        let small = Lexicon::new([("a", 0.5), ("b", 0.3)]).unwrap();
        assert_eq!(beam_candidates(&small).len(), 2);
    }

    #[test]
    fn test_beam_stays_in_beam() {
        let lexicon = Lexicon::builtin();
        let mut rng = rng();
        for _ in 0..200 {
            let sample = beam(&lexicon, &mut rng).unwrap();
            assert!(["explore", "ancient", "inn"].contains(&sample.as_token().unwrap()));
        }
    }

    #[test]
    fn test_top_k_one_is_greedy() {
        let lexicon = abc();
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(top_k(&lexicon, 1, &mut rng).unwrap(), Sample::token("a"));
        }
    }

    #[test]
    fn test_top_k_rejects_zero() {
        assert_eq!(
            top_k(&abc(), 0, &mut rng()).unwrap_err(),
            SamplingError::ZeroTopK
        );
    }

    #[test]
    fn test_top_k_clamps_to_vocabulary() {
        assert_eq!(top_k_candidates(&abc(), 99).unwrap().len(), 3);
    }

    #[test]
    fn test_top_p_threshold_is_inclusive() {
        let lexicon = abc();
        let tokens: Vec<&str> = top_p_candidates(&lexicon, 0.7)
            .unwrap()
            .iter()
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(tokens, vec!["a", "b"]);

        assert_eq!(top_p_candidates(&lexicon, 0.5).unwrap().len(), 1);
        assert_eq!(top_p_candidates(&lexicon, 1.0).unwrap().len(), 3);
    }

    #[test]
    fn test_top_p_uses_raw_weights() {
        // 0.3 + 0.2 + 0.2 + 0.2 accumulates to 0.8999999999999999 in f64,
        // so the threshold is only crossed by the fifth token
        let lexicon = Lexicon::builtin();
        let tokens: Vec<&str> = top_p_candidates(&lexicon, 0.9)
            .unwrap()
            .iter()
            .map(|e| e.token.as_str())
            .collect();
        assert_eq!(
            tokens,
            vec!["explore", "ancient", "inn", "towering", "mountains"]
        );
    }

    #[test]
    fn test_top_p_rejects_out_of_range() {
        for p in [0.0, -0.2, 1.01, f64::NAN] {
            assert!(matches!(
                top_p(&abc(), p, &mut rng()),
                Err(SamplingError::InvalidTopP(_))
            ));
        }
    }

    #[test]
    fn test_systematic() {
        let lexicon = abc();
        assert_eq!(systematic(&lexicon, 1).unwrap(), Sample::token("a"));
        assert_eq!(systematic(&lexicon, 2).unwrap(), Sample::token("b"));
        assert_eq!(
            systematic(&lexicon, 4).unwrap_err(),
            SamplingError::SystematicOutOfRange {
                n: 4,
                vocabulary_size: 3
            }
        );
        assert!(systematic(&lexicon, 0).is_err());
    }

    #[test]
    fn test_stratified_without_categories() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        let none: [&str; 0] = [];
        let sample = stratified(&vocabulary.lexicon, &vocabulary.clusters, &none, 1, &mut rng()).unwrap();
        assert_eq!(sample, Sample::NoValidSelection);
    }

    #[test]
    fn test_stratified_stays_in_category() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        let mut rng = rng();
        for _ in 0..100 {
            let sample = stratified(
                &vocabulary.lexicon,
                &vocabulary.clusters,
                &["Relaxation"],
                2,
                &mut rng,
            )
            .unwrap();
            assert!(["rest", "quiet", "inn"].contains(&sample.as_token().unwrap()));
        }
    }

    #[test]
    fn test_stratified_unknown_category() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        let err = stratified(
            &vocabulary.lexicon,
            &vocabulary.clusters,
            &["Exploration", "Cooking"],
            1,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err, SamplingError::UnknownCategory("Cooking".to_string()));
    }

    #[test]
    fn test_temperature_levels_stay_in_lexicon() {
        let lexicon = Lexicon::builtin();
        let mut rng = rng();
        for level in [TemperatureLevel::Low, TemperatureLevel::Medium, TemperatureLevel::High] {
            let sample = temperature(&lexicon, level, &mut rng).unwrap();
            assert!(lexicon.contains(sample.as_token().unwrap()));
        }
    }

    #[test]
    fn test_cluster_phrase_is_distinct_words() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        let mut rng = rng();
        for _ in 0..50 {
            let sample = cluster(&vocabulary.lexicon, &vocabulary.clusters, 2, 3, &mut rng).unwrap();
            let words = sample.tokens();
            assert_eq!(words.len(), 3);
            let unique: HashSet<&str> = words.iter().copied().collect();
            assert_eq!(unique.len(), 3);
            assert!(words.iter().all(|w| vocabulary.clusters.category_of(w).is_some()));
        }
    }

    #[test]
    fn test_cluster_not_enough_words() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        // all three categories hold 16 tokens in total
        let sample = cluster(&vocabulary.lexicon, &vocabulary.clusters, 3, 17, &mut rng()).unwrap();
        assert_eq!(sample, Sample::NotEnoughWords);
    }

    #[test]
    fn test_cluster_too_many_clusters() {
        let vocabulary = crate::domain::models::Vocabulary::builtin();
        let err = cluster(&vocabulary.lexicon, &vocabulary.clusters, 4, 1, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            SamplingError::TooManyClusters {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_best_of_one_matches_simple_random() {
        let lexicon = Lexicon::builtin();
        for seed in 0..20 {
            let single = simple_random(&lexicon, &mut StdRng::seed_from_u64(seed)).unwrap();
            let best = best_of_n(&lexicon, 1, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(single, best);
        }
    }

    #[test]
    fn test_best_of_n_large_n_finds_heaviest() {
        // draws are folded one at a time, so n is bounded only by running time
        let sample = best_of_n(&abc(), 200_000, &mut rng()).unwrap();
        assert_eq!(sample, Sample::token("a"));
    }

    #[test]
    fn test_heaviest_of_nothing() {
        assert!(heaviest(std::iter::empty()).is_none());

        let lexicon = abc();
        let entries = lexicon.entries();
        let drawn = [&entries[2], &entries[1], &entries[1]];
        assert_eq!(heaviest(drawn.into_iter()).map(|e| e.token.as_str()), Some("b"));
    }

    #[test]
    fn test_best_of_n_rejects_zero() {
        assert_eq!(
            best_of_n(&abc(), 0, &mut rng()).unwrap_err(),
            SamplingError::ZeroBestOfN
        );
    }
}
