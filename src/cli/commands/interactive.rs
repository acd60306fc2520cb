//! `interactive` command: a menu-driven picker.
//!
//! The picker reads from any [`BufRead`] and writes to any [`Write`], so the
//! terminal session and tests drive the same code.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::Result;
use console::{style, Term};
use tracing::debug;

use super::sample::SampleOutput;
use crate::cli::display::{label, section_header};
use crate::cli::output::CommandOutput;
use crate::cli::AppContext;
use crate::domain::models::{SamplingRequest, StrategyKind};
use crate::services::Sampler;

/// Upper bound offered for k when picking top-k interactively.
const MAX_K: usize = 5;
/// Lower bound offered for p when picking top-p interactively.
const MIN_P: f64 = 0.1;
/// Upper bound offered for n when picking best-of-n interactively.
const MAX_BEST_OF_N: usize = 10;

pub struct Picker<'a, I, O> {
    ctx: &'a AppContext,
    sampler: Sampler,
    input: I,
    output: O,
}

impl<'a, I: BufRead, O: Write> Picker<'a, I, O> {
    pub fn new(ctx: &'a AppContext, input: I, output: O) -> Self {
        Self {
            ctx,
            sampler: Sampler::with_seed(ctx.vocabulary.clone(), ctx.config.seed),
            input,
            output,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", style("Token Sampling Simulator").bold())?;
        writeln!(self.output, "Explore different token sampling techniques.")?;

        loop {
            writeln!(self.output, "\n{} ...", self.ctx.config.prompt)?;
            self.print_menu()?;

            let Some(kind) = self.choose_method()? else {
                break;
            };
            let Some(request) = self.ask_parameters(kind)? else {
                break;
            };
            debug!(?request, "interactive request");

            match self.sampler.run(&request) {
                Ok(sample) => {
                    let out = SampleOutput::new(&self.ctx.config.prompt, request, sample);
                    writeln!(self.output, "{}", out.to_human())?;
                }
                Err(err) => writeln!(self.output, "{} {err}", style("!").red().bold())?,
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "{}", section_header("Sampling methods"))?;
        for (i, kind) in StrategyKind::ALL.iter().enumerate() {
            writeln!(
                self.output,
                "  {:>2}. {:<28} {}",
                i + 1,
                kind.display_name(),
                style(kind.id()).dim()
            )?;
        }
        Ok(())
    }

    /// Read one line after printing `prompt`. `None` means quit or end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", label(prompt))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    fn choose_method(&mut self) -> Result<Option<StrategyKind>> {
        loop {
            let Some(answer) = self.read_line("Choose a sampling method (number or id, q to quit)")?
            else {
                return Ok(None);
            };

            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| StrategyKind::ALL.get(i).copied())
                .or_else(|| answer.parse::<StrategyKind>().ok());

            match picked {
                Some(kind) => return Ok(Some(kind)),
                None => writeln!(self.output, "Unknown method: '{answer}'")?,
            }
        }
    }

    fn ask_parameters(&mut self, kind: StrategyKind) -> Result<Option<SamplingRequest>> {
        let defaults = self.ctx.config.sampling.clone();
        let lexicon_size = self.ctx.vocabulary.lexicon.len();
        let category_count = self.ctx.vocabulary.clusters.categories().len();

        let request = match kind.default_request(&defaults) {
            SamplingRequest::TopK { k } => {
                let Some(k) = self.ask_number("Select k value", 1..=MAX_K, k)? else {
                    return Ok(None);
                };
                SamplingRequest::TopK { k }
            }
            SamplingRequest::TopP { p } => {
                let Some(p) = self.ask_number("Select p value", MIN_P..=1.0, p)? else {
                    return Ok(None);
                };
                SamplingRequest::TopP { p }
            }
            SamplingRequest::Systematic { n } => {
                let Some(n) = self.ask_number("Select position", 1..=lexicon_size, n)? else {
                    return Ok(None);
                };
                SamplingRequest::Systematic { n }
            }
            SamplingRequest::BestOfN { n } => {
                let Some(n) = self.ask_number("Select n value", 1..=MAX_BEST_OF_N, n)? else {
                    return Ok(None);
                };
                SamplingRequest::BestOfN { n }
            }
            SamplingRequest::Stratified { per_category, .. } => {
                let Some(categories) = self.ask_categories()? else {
                    return Ok(None);
                };
                SamplingRequest::Stratified {
                    categories,
                    per_category,
                }
            }
            SamplingRequest::Cluster {
                num_clusters,
                num_words,
            } => {
                let Some(num_clusters) =
                    self.ask_number("Number of clusters", 1..=category_count.max(1), num_clusters)?
                else {
                    return Ok(None);
                };
                let Some(num_words) =
                    self.ask_number("Number of words", 1..=lexicon_size, num_words)?
                else {
                    return Ok(None);
                };
                SamplingRequest::Cluster {
                    num_clusters,
                    num_words,
                }
            }
            other => other,
        };
        Ok(Some(request))
    }

    /// Ask for a number in `range`. Empty input takes `default`, clamped to
    /// `range`.
    fn ask_number<T>(
        &mut self,
        prompt: &str,
        range: RangeInclusive<T>,
        default: T,
    ) -> Result<Option<T>>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        let default = if default < *range.start() {
            *range.start()
        } else if default > *range.end() {
            *range.end()
        } else {
            default
        };
        let prompt = format!(
            "{prompt} [{}-{}, default {default}]",
            range.start(),
            range.end()
        );
        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse::<T>() {
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                _ => writeln!(
                    self.output,
                    "Enter a number between {} and {}",
                    range.start(),
                    range.end()
                )?,
            }
        }
    }

    /// Ask for categories as a comma-separated list of names or numbers.
    ///
    /// An empty answer selects no categories.
    fn ask_categories(&mut self) -> Result<Option<Vec<String>>> {
        let available: Vec<String> = self
            .ctx
            .vocabulary
            .clusters
            .categories()
            .into_iter()
            .map(ToString::to_string)
            .collect();

        for (i, category) in available.iter().enumerate() {
            writeln!(self.output, "  {:>2}. {category}", i + 1)?;
        }

        'prompt: loop {
            let Some(answer) = self.read_line("Choose categories (comma-separated)")? else {
                return Ok(None);
            };

            let mut chosen = Vec::new();
            for part in answer.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let by_number = part
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| i.checked_sub(1))
                    .and_then(|i| available.get(i));
                let by_name = available.iter().find(|c| c.eq_ignore_ascii_case(part));

                match by_number.or(by_name) {
                    Some(category) => chosen.push(category.clone()),
                    None => {
                        writeln!(self.output, "Unknown category: '{part}'")?;
                        continue 'prompt;
                    }
                }
            }
            return Ok(Some(chosen));
        }
    }
}

pub fn execute(ctx: &AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let mut picker = Picker::new(ctx, stdin.lock(), Term::stdout());
    picker.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Config;
    use std::io::Cursor;

    fn session(script: &str) -> String {
        session_with(
            Config {
                seed: Some(21),
                ..Default::default()
            },
            script,
        )
    }

    fn session_with(config: Config, script: &str) -> String {
        let ctx = AppContext::new(config).unwrap();
        let mut out = Vec::new();
        Picker::new(&ctx, Cursor::new(script.to_string()), &mut out)
            .run()
            .unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string()
    }

    #[test]
    fn test_greedy_by_number() {
        let transcript = session("1\nq\n");
        assert!(transcript.contains("The traveler decided to **explore**"));
        assert!(transcript.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_systematic_default_position() {
        let transcript = session("systematic\n\n");
        assert!(transcript.contains("The traveler decided to **the**"));
    }

    #[test]
    fn test_out_of_range_k_reprompts() {
        let transcript = session("top-k\n9\n1\n");
        assert!(transcript.contains("Enter a number between 1 and 5"));
        assert!(transcript.contains("**explore**"));
    }

    #[test]
    fn test_stratified_without_categories() {
        let transcript = session("stratified\n\n");
        assert!(transcript.contains("**No valid selection**"));
    }

    #[test]
    fn test_stratified_unknown_category_reprompts() {
        let transcript = session("stratified\nCooking\n2\n");
        assert!(transcript.contains("Unknown category: 'Cooking'"));
        let relaxing = ["**rest**", "**quiet**", "**inn**"];
        assert!(relaxing.iter().any(|word| transcript.contains(word)));
    }

    #[test]
    fn test_configured_default_is_clamped_to_range() {
        let mut config = Config {
            seed: Some(21),
            ..Default::default()
        };
        config.sampling.best_of_n = 20;
        config.sampling.top_k = 9;

        let transcript = session_with(config, "best-of-n\n\ntop-k\n\n");
        assert!(transcript.contains("[1-10, default 10]"));
        assert!(transcript.contains("[1-5, default 5]"));
        assert!(!transcript.contains("default 20"));
    }

    #[test]
    fn test_unknown_method_reprompts() {
        let transcript = session("nucleus\n13\n");
        assert!(transcript.contains("Unknown method: 'nucleus'"));
        assert!(transcript.contains("Unknown method: '13'"));
    }
}
