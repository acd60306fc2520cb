//! `simulate` command: run one method many times and tally the results.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use super::ParamArgs;
use crate::cli::display::{list_table, numeric_cell, render_list, share_bar};
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::simulation_progress;
use crate::cli::AppContext;
use crate::domain::models::{SamplingRequest, StrategyKind};
use crate::services::{Sampler, Tally};

const BAR_WIDTH: usize = 30;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Sampling method (see `methods`)
    pub method: StrategyKind,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of runs
    #[arg(short, long, default_value_t = 1000)]
    pub runs: usize,
}

#[derive(Debug, Serialize)]
pub struct SimulateOutput {
    pub method: &'static str,
    pub request: SamplingRequest,
    #[serde(flatten)]
    pub tally: Tally,
}

impl CommandOutput for SimulateOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["result", "count", "share", ""]);
        for row in &self.tally.rows {
            table.add_row(vec![
                comfy_table::Cell::new(&row.result),
                numeric_cell(row.count),
                numeric_cell(format!("{:.1}%", row.share * 100.0)),
                comfy_table::Cell::new(share_bar(row.share, BAR_WIDTH)),
            ]);
        }
        format!(
            "{} x {}\n{}",
            self.request.kind(),
            self.tally.runs,
            render_list("distinct result", &table, self.tally.rows.len())
        )
    }
}

pub fn execute(args: SimulateArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    if args.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let request = args
        .params
        .to_request(args.method, &ctx.config.sampling)?;
    let mut sampler = Sampler::with_seed(ctx.vocabulary.clone(), ctx.config.seed);

    let pb = simulation_progress(args.runs as u64, json_mode);
    let tally = sampler
        .simulate(&request, args.runs, || pb.inc(1))
        .with_context(|| format!("{} failed", args.method))?;
    pb.finish_and_clear();

    output(
        &SimulateOutput {
            method: request.kind().id(),
            request,
            tally,
        },
        json_mode,
    );
    Ok(())
}
