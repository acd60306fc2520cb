//! `sample` command: run one method once.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::ParamArgs;
use crate::cli::display::result_style;
use crate::cli::output::{output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::{Sample, SamplingRequest, StrategyKind};
use crate::services::Sampler;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Sampling method (see `methods`)
    pub method: StrategyKind,

    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Debug, Serialize)]
pub struct SampleOutput {
    pub method: &'static str,
    pub request: SamplingRequest,
    pub result: Sample,
    pub text: String,
    #[serde(skip)]
    pub prompt: String,
}

impl SampleOutput {
    pub fn new(prompt: &str, request: SamplingRequest, result: Sample) -> Self {
        Self {
            method: request.kind().id(),
            text: result.to_string(),
            request,
            result,
            prompt: prompt.to_string(),
        }
    }
}

impl CommandOutput for SampleOutput {
    fn to_human(&self) -> String {
        let emphasized = format!("**{}**", self.text);
        format!(
            "{} {}",
            self.prompt,
            result_style(&emphasized, self.result.is_sentinel())
        )
    }
}

pub fn execute(args: SampleArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let request = args
        .params
        .to_request(args.method, &ctx.config.sampling)?;
    let mut sampler = Sampler::with_seed(ctx.vocabulary.clone(), ctx.config.seed);

    let result = sampler
        .run(&request)
        .with_context(|| format!("{} failed", args.method))?;

    output(&SampleOutput::new(&ctx.config.prompt, request, result), json_mode);
    Ok(())
}
