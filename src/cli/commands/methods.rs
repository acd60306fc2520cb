//! `methods` command: list the available sampling methods.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use crate::cli::display::{list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::{SamplingDefaults, SamplingRequest, StrategyKind};

#[derive(Debug, Serialize)]
pub struct MethodOutput {
    pub id: &'static str,
    pub name: &'static str,
    pub parameters: &'static str,
    pub defaults: SamplingRequest,
}

#[derive(Debug, Serialize)]
pub struct MethodListOutput {
    pub methods: Vec<MethodOutput>,
}

impl MethodListOutput {
    pub fn new(defaults: &SamplingDefaults) -> Self {
        Self {
            methods: StrategyKind::ALL
                .into_iter()
                .map(|kind| MethodOutput {
                    id: kind.id(),
                    name: kind.display_name(),
                    parameters: kind.parameters(),
                    defaults: kind.default_request(defaults),
                })
                .collect(),
        }
    }
}

/// Human summary of the parameter values in a request.
pub fn describe_defaults(request: &SamplingRequest) -> String {
    match request {
        SamplingRequest::Greedy | SamplingRequest::Beam | SamplingRequest::SimpleRandom => {
            "-".to_string()
        }
        SamplingRequest::TopK { k } => format!("k={k}"),
        SamplingRequest::TopP { p } => format!("p={p}"),
        SamplingRequest::Systematic { n } | SamplingRequest::BestOfN { n } => format!("n={n}"),
        SamplingRequest::Stratified { per_category, .. } => {
            format!("per-category={per_category}")
        }
        SamplingRequest::Temperature { level } => format!("level={level}"),
        SamplingRequest::Cluster {
            num_clusters,
            num_words,
        } => format!("clusters={num_clusters} words={num_words}"),
    }
}

impl CommandOutput for MethodListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "method", "parameters", "defaults"]);
        for method in &self.methods {
            table.add_row(vec![
                Cell::new(method.id),
                Cell::new(method.name),
                Cell::new(method.parameters),
                Cell::new(describe_defaults(&method.defaults)),
            ]);
        }
        render_list("method", &table, self.methods.len())
    }
}

pub fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    output(&MethodListOutput::new(&ctx.config.sampling), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_method() {
        let out = MethodListOutput::new(&SamplingDefaults::default());
        assert_eq!(out.methods.len(), 12);
        let human = console::strip_ansi_codes(&out.to_human()).to_string();
        assert!(human.contains("best-of-n"));
        assert!(human.contains("High Temperature Sampling"));
        assert!(human.contains("clusters=2 words=3"));
    }

    #[test]
    fn test_describe_defaults() {
        assert_eq!(describe_defaults(&SamplingRequest::TopP { p: 0.9 }), "p=0.9");
        assert_eq!(describe_defaults(&SamplingRequest::Beam), "-");
    }
}
