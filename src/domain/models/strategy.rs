use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::SamplingDefaults;
use crate::domain::errors::SamplingError;

/// How strongly temperature sampling reshapes the weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureLevel {
    Low,
    Medium,
    High,
}

impl TemperatureLevel {
    /// Exponent applied to every weight before normalization.
    ///
    /// Low sharpens (cube), high flattens (0.3 power), medium is the identity.
    pub const fn exponent(self) -> f64 {
        match self {
            Self::Low => 3.0,
            Self::Medium => 1.0,
            Self::High => 0.3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TemperatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The methods offered by the picker.
///
/// Temperature sampling appears three times, once per level, mirroring the
/// menu a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Greedy,
    Beam,
    SimpleRandom,
    TopK,
    TopP,
    Systematic,
    Stratified,
    LowTemperature,
    MediumTemperature,
    HighTemperature,
    Cluster,
    BestOfN,
}

impl StrategyKind {
    /// Every method in menu order.
    pub const ALL: [Self; 12] = [
        Self::Greedy,
        Self::Beam,
        Self::SimpleRandom,
        Self::TopK,
        Self::TopP,
        Self::Systematic,
        Self::Stratified,
        Self::LowTemperature,
        Self::MediumTemperature,
        Self::HighTemperature,
        Self::Cluster,
        Self::BestOfN,
    ];

    /// Stable identifier accepted on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Beam => "beam",
            Self::SimpleRandom => "random",
            Self::TopK => "top-k",
            Self::TopP => "top-p",
            Self::Systematic => "systematic",
            Self::Stratified => "stratified",
            Self::LowTemperature => "low-temperature",
            Self::MediumTemperature => "medium-temperature",
            Self::HighTemperature => "high-temperature",
            Self::Cluster => "cluster",
            Self::BestOfN => "best-of-n",
        }
    }

    /// Menu label.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Greedy => "Greedy Search",
            Self::Beam => "Beam Search",
            Self::SimpleRandom => "Simple Random Sampling",
            Self::TopK => "Top-k Sampling",
            Self::TopP => "Top-p Sampling",
            Self::Systematic => "Systematic Sampling",
            Self::Stratified => "Stratified Sampling",
            Self::LowTemperature => "Low Temperature Sampling",
            Self::MediumTemperature => "Medium Temperature Sampling",
            Self::HighTemperature => "High Temperature Sampling",
            Self::Cluster => "Cluster Sampling",
            Self::BestOfN => "Best of n Sampling",
        }
    }

    /// Short description of the parameters the method takes.
    pub const fn parameters(self) -> &'static str {
        match self {
            Self::Greedy
            | Self::Beam
            | Self::SimpleRandom
            | Self::LowTemperature
            | Self::MediumTemperature
            | Self::HighTemperature => "-",
            Self::TopK => "k",
            Self::TopP => "p",
            Self::Systematic | Self::BestOfN => "n",
            Self::Stratified => "categories, per-category",
            Self::Cluster => "clusters, words",
        }
    }

    /// A request for this method with every parameter at its default.
    pub fn default_request(self, defaults: &SamplingDefaults) -> SamplingRequest {
        match self {
            Self::Greedy => SamplingRequest::Greedy,
            Self::Beam => SamplingRequest::Beam,
            Self::SimpleRandom => SamplingRequest::SimpleRandom,
            Self::TopK => SamplingRequest::TopK { k: defaults.top_k },
            Self::TopP => SamplingRequest::TopP { p: defaults.top_p },
            Self::Systematic => SamplingRequest::Systematic {
                n: defaults.systematic_n,
            },
            Self::Stratified => SamplingRequest::Stratified {
                categories: Vec::new(),
                per_category: defaults.per_category,
            },
            Self::LowTemperature => SamplingRequest::Temperature {
                level: TemperatureLevel::Low,
            },
            Self::MediumTemperature => SamplingRequest::Temperature {
                level: TemperatureLevel::Medium,
            },
            Self::HighTemperature => SamplingRequest::Temperature {
                level: TemperatureLevel::High,
            },
            Self::Cluster => SamplingRequest::Cluster {
                num_clusters: defaults.num_clusters,
                num_words: defaults.num_words,
            },
            Self::BestOfN => SamplingRequest::BestOfN {
                n: defaults.best_of_n,
            },
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StrategyKind {
    type Err = SamplingError;

    /// Accepts the identifier or the menu label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted || kind.display_name().to_lowercase() == wanted)
            .ok_or_else(|| SamplingError::UnknownMethod(s.to_string()))
    }
}

/// A fully parameterized strategy invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SamplingRequest {
    Greedy,
    Beam,
    SimpleRandom,
    TopK { k: usize },
    TopP { p: f64 },
    Systematic { n: usize },
    Stratified {
        categories: Vec<String>,
        per_category: usize,
    },
    Temperature { level: TemperatureLevel },
    Cluster { num_clusters: usize, num_words: usize },
    BestOfN { n: usize },
}

impl SamplingRequest {
    /// The picker entry this request corresponds to.
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Greedy => StrategyKind::Greedy,
            Self::Beam => StrategyKind::Beam,
            Self::SimpleRandom => StrategyKind::SimpleRandom,
            Self::TopK { .. } => StrategyKind::TopK,
            Self::TopP { .. } => StrategyKind::TopP,
            Self::Systematic { .. } => StrategyKind::Systematic,
            Self::Stratified { .. } => StrategyKind::Stratified,
            Self::Temperature { level } => match level {
                TemperatureLevel::Low => StrategyKind::LowTemperature,
                TemperatureLevel::Medium => StrategyKind::MediumTemperature,
                TemperatureLevel::High => StrategyKind::HighTemperature,
            },
            Self::Cluster { .. } => StrategyKind::Cluster,
            Self::BestOfN { .. } => StrategyKind::BestOfN,
        }
    }

    /// Whether the same request can produce different results.
    pub const fn is_random(&self) -> bool {
        !matches!(self, Self::Greedy | Self::Systematic { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_id_and_label() {
        assert_eq!("top-k".parse::<StrategyKind>().unwrap(), StrategyKind::TopK);
        assert_eq!(
            "Best of n Sampling".parse::<StrategyKind>().unwrap(),
            StrategyKind::BestOfN
        );
        assert_eq!(" RANDOM ".parse::<StrategyKind>().unwrap(), StrategyKind::SimpleRandom);
        assert!(matches!(
            "nucleus".parse::<StrategyKind>(),
            Err(SamplingError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in StrategyKind::ALL.iter().enumerate() {
            for b in &StrategyKind::ALL[i + 1..] {
                assert_ne!(a.id(), b.id());
            }
        }
    }

    #[test]
    fn test_default_request_round_trips_kind() {
        let defaults = SamplingDefaults::default();
        for kind in StrategyKind::ALL {
            assert_eq!(kind.default_request(&defaults).kind(), kind);
        }
    }

    #[test]
    fn test_temperature_levels() {
        assert!((TemperatureLevel::Low.exponent() - 3.0).abs() < f64::EPSILON);
        assert!((TemperatureLevel::Medium.exponent() - 1.0).abs() < f64::EPSILON);
        assert!((TemperatureLevel::High.exponent() - 0.3).abs() < f64::EPSILON);
        assert_eq!(TemperatureLevel::High.to_string(), "high");
        assert_eq!(
            serde_json::to_value(TemperatureLevel::Medium).unwrap(),
            serde_json::json!("medium")
        );
    }

    #[test]
    fn test_only_greedy_and_systematic_are_deterministic() {
        let defaults = SamplingDefaults::default();
        let deterministic: Vec<StrategyKind> = StrategyKind::ALL
            .into_iter()
            .filter(|kind| !kind.default_request(&defaults).is_random())
            .collect();
        assert_eq!(deterministic, vec![StrategyKind::Greedy, StrategyKind::Systematic]);
    }
}
