//! CLI command implementations.

pub mod interactive;
pub mod methods;
pub mod sample;
pub mod simulate;
pub mod vocab;

use anyhow::{bail, Result};
use clap::Args;

use crate::domain::models::{SamplingDefaults, SamplingRequest, StrategyKind};

/// Strategy parameters shared by `sample` and `simulate`.
///
/// Unset values fall back to the configured defaults. Supplying a parameter
/// the chosen method does not take is an error.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ParamArgs {
    /// Candidates kept by top-k sampling
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Cumulative weight threshold for top-p sampling, in (0, 1]
    #[arg(short, long)]
    pub p: Option<f64>,

    /// Position for systematic sampling, or draws for best-of-n
    #[arg(short, long)]
    pub n: Option<usize>,

    /// Category for stratified sampling (repeatable)
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Tokens drawn from each category by stratified sampling
    #[arg(long)]
    pub per_category: Option<usize>,

    /// Categories pooled by cluster sampling
    #[arg(long)]
    pub clusters: Option<usize>,

    /// Phrase length produced by cluster sampling
    #[arg(long)]
    pub words: Option<usize>,
}

impl ParamArgs {
    /// Build the request for `kind`, filling gaps from `defaults`.
    pub fn to_request(
        &self,
        kind: StrategyKind,
        defaults: &SamplingDefaults,
    ) -> Result<SamplingRequest> {
        let allowed: &[&str] = match kind {
            StrategyKind::TopK => &["k"],
            StrategyKind::TopP => &["p"],
            StrategyKind::Systematic | StrategyKind::BestOfN => &["n"],
            StrategyKind::Stratified => &["category", "per-category"],
            StrategyKind::Cluster => &["clusters", "words"],
            _ => &[],
        };
        if let Some(flag) = self.supplied().into_iter().find(|flag| !allowed.contains(flag)) {
            bail!("--{flag} does not apply to {kind}");
        }

        let request = match kind.default_request(defaults) {
            SamplingRequest::TopK { k } => SamplingRequest::TopK {
                k: self.k.unwrap_or(k),
            },
            SamplingRequest::TopP { p } => SamplingRequest::TopP {
                p: self.p.unwrap_or(p),
            },
            SamplingRequest::Systematic { n } => SamplingRequest::Systematic {
                n: self.n.unwrap_or(n),
            },
            SamplingRequest::BestOfN { n } => SamplingRequest::BestOfN {
                n: self.n.unwrap_or(n),
            },
            SamplingRequest::Stratified { per_category, .. } => SamplingRequest::Stratified {
                categories: self.categories.clone(),
                per_category: self.per_category.unwrap_or(per_category),
            },
            SamplingRequest::Cluster {
                num_clusters,
                num_words,
            } => SamplingRequest::Cluster {
                num_clusters: self.clusters.unwrap_or(num_clusters),
                num_words: self.words.unwrap_or(num_words),
            },
            other => other,
        };
        Ok(request)
    }

    fn supplied(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.k.is_some() {
            flags.push("k");
        }
        if self.p.is_some() {
            flags.push("p");
        }
        if self.n.is_some() {
            flags.push("n");
        }
        if !self.categories.is_empty() {
            flags.push("category");
        }
        if self.per_category.is_some() {
            flags.push("per-category");
        }
        if self.clusters.is_some() {
            flags.push("clusters");
        }
        if self.words.is_some() {
            flags.push("words");
        }
        flags
    }
}
