//! Negotiation document generation.
//!
//! Flow: build prompt → one model call (no retry) → section check →
//!       template fallback on any failure.
//!
//! The returned document always carries every entry of `REQUIRED_SECTIONS`.

use tracing::{info, warn};

use crate::format::usd;
use crate::generation::prompts::{CONTENT_MAX_TOKENS, CONTENT_PROMPT_TEMPLATE};
use crate::generation::template::render_fallback_document;
use crate::llm_client::CompletionProvider;
use crate::models::pack::{MarketData, PackInputs};

/// Headings every negotiation document must contain, on either path.
pub const REQUIRED_SECTIONS: [&str; 6] = [
    "# Salary Negotiation Package",
    "## Market Analysis",
    "## Negotiation Script",
    "### Salary Request",
    "## Fallback Responses",
    "## Follow-up Email Template",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Model,
    Template,
}

#[derive(Debug, Clone)]
pub struct NegotiationDocument {
    pub markdown: String,
    pub source: ContentSource,
}

/// Produces the negotiation document for a pack. Never fails.
pub async fn generate_negotiation_content(
    llm: &dyn CompletionProvider,
    inputs: &PackInputs,
    market: &MarketData,
) -> NegotiationDocument {
    let prompt = build_content_prompt(inputs, market);

    match llm.complete(&prompt, CONTENT_MAX_TOKENS).await {
        Ok(markdown) => {
            let missing = missing_sections(&markdown);
            if missing.is_empty() {
                info!(
                    "Generated negotiation content for '{}' ({} chars)",
                    inputs.job_title,
                    markdown.len()
                );
                return NegotiationDocument {
                    markdown,
                    source: ContentSource::Model,
                };
            }
            warn!("Model document missing sections {missing:?}; using template");
        }
        Err(e) => {
            warn!("Negotiation content generation unavailable, using template: {e}");
        }
    }

    NegotiationDocument {
        markdown: render_fallback_document(inputs, market),
        source: ContentSource::Template,
    }
}

fn missing_sections(markdown: &str) -> Vec<&'static str> {
    REQUIRED_SECTIONS
        .iter()
        .copied()
        .filter(|section| !markdown.contains(section))
        .collect()
}

/// Fills the prompt template with every pack fact.
fn build_content_prompt(inputs: &PackInputs, market: &MarketData) -> String {
    let target = inputs
        .target_salary
        .map(usd)
        .unwrap_or_else(|| "Not specified".to_string());

    let achievements = inputs
        .achievements
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {a}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    CONTENT_PROMPT_TEMPLATE
        .replace("{raise_gap}", &usd(inputs.raise_gap(market)))
        .replace("{current_salary}", &usd(inputs.current_salary))
        .replace("{target_salary}", &target)
        .replace("{market_average}", &usd(market.average))
        .replace("{market_p25}", &usd(market.p25))
        .replace("{market_p75}", &usd(market.p75))
        .replace("{job_title}", &inputs.job_title)
        .replace("{location}", &inputs.city_or_remote)
        .replace("{achievements}", &achievements)
}
