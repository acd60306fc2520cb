//! `vocab` command: show the lexicon and its categories.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use crate::cli::display::{list_table, numeric_cell, render_list, section_header};
use crate::cli::output::{output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::Vocabulary;

#[derive(Debug, Serialize)]
pub struct VocabEntryOutput {
    pub token: String,
    pub weight: f64,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOutput {
    pub name: String,
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct VocabOutput {
    pub entries: Vec<VocabEntryOutput>,
    pub categories: Vec<CategoryOutput>,
    pub total_weight: f64,
}

impl From<&Vocabulary> for VocabOutput {
    fn from(vocabulary: &Vocabulary) -> Self {
        let entries = vocabulary
            .lexicon
            .entries()
            .iter()
            .map(|entry| VocabEntryOutput {
                token: entry.token.clone(),
                weight: entry.weight,
                category: vocabulary
                    .clusters
                    .category_of(&entry.token)
                    .map(ToString::to_string),
            })
            .collect();
        let categories = vocabulary
            .clusters
            .categories()
            .into_iter()
            .map(|name| CategoryOutput {
                name: name.to_string(),
                tokens: vocabulary
                    .clusters
                    .tokens_in(name)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect();
        Self {
            entries,
            categories,
            total_weight: vocabulary.lexicon.total_weight(),
        }
    }
}

impl CommandOutput for VocabOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["token", "weight", "category"]);
        for entry in &self.entries {
            table.add_row(vec![
                Cell::new(&entry.token),
                numeric_cell(format!("{:.2}", entry.weight)),
                Cell::new(entry.category.as_deref().unwrap_or("-")),
            ]);
        }

        let mut lines = vec![render_list("token", &table, self.entries.len())];
        lines.push(format!("Total weight: {:.2}", self.total_weight));
        lines.push(section_header("Categories"));
        for category in &self.categories {
            lines.push(format!("  {}: {}", category.name, category.tokens.join(", ")));
        }
        lines.join("\n")
    }
}

pub fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    output(&VocabOutput::from(&ctx.vocabulary), json_mode);
    Ok(())
}
