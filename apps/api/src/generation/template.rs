//! Deterministic negotiation document used whenever the model is unavailable.
//!
//! Same section structure as the model prompt, filled with arithmetic on the
//! pack inputs only.

use crate::format::usd;
use crate::models::pack::{MarketData, PackInputs};

/// What to ask for: the target salary if given, otherwise the raise gap capped at p75.
pub fn requested_salary(inputs: &PackInputs, market: &MarketData) -> i64 {
    inputs.target_salary.unwrap_or_else(|| {
        market
            .p75
            .min(inputs.current_salary + inputs.raise_gap(market))
    })
}

/// Midpoint between the ask and the current salary, offered after a low counter.
pub fn counter_midpoint(requested: i64, current: i64) -> i64 {
    ((requested + current) as f64 / 2.0).round() as i64
}

pub fn render_fallback_document(inputs: &PackInputs, market: &MarketData) -> String {
    let title = &inputs.job_title;
    let location = &inputs.city_or_remote;
    let current = usd(inputs.current_salary);
    let average = usd(market.average);
    let p25 = usd(market.p25);
    let p75 = usd(market.p75);
    let raise_gap = usd(inputs.raise_gap(market));
    let requested_amount = requested_salary(inputs, market);
    let requested = usd(requested_amount);
    let midpoint = usd(counter_midpoint(requested_amount, inputs.current_salary));
    let achievements = inputs
        .achievements
        .iter()
        .map(|a| format!("- {a}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"# Salary Negotiation Package

## Market Analysis
- Current salary: {current}
- Market average: {average}
- Market range: {p25} - {p75}
- Raise gap: {raise_gap}

## Negotiation Script

### Opening Statement
I've really enjoyed contributing to the team as a {title} and wanted to discuss my compensation based on my recent achievements and current market conditions. I'd like to explore adjusting my salary to better reflect my contributions and market value.

### Value Proposition
Over the past year, I've delivered significant value through several key achievements:

{achievements}

Based on my research, the market rate for {title} positions in {location} ranges from {p25} to {p75}, with an average of {average}.

### Salary Request
Given my contributions and the current market rate, I'd like to request a salary adjustment to {requested}. This would align my compensation with market standards while reflecting the value I bring to the team.

## Fallback Responses

### If they say "budget constraints"
I understand budget considerations are important. Would it be possible to discuss a timeline for when this adjustment might be feasible? In the meantime, I'd be open to exploring other forms of compensation like additional equity, professional development budget, or expanded responsibilities.

### If they say "need to think about it"
I appreciate you taking the time to consider this. Would it be helpful if I provided additional documentation of my achievements or market research? I'm happy to follow up in a week to continue our discussion.

### If they counter with lower amount
I appreciate the counteroffer. While I understand there may be constraints, the market data I've shared shows that {requested} is within the standard range for my role and experience. Could we explore meeting somewhere in the middle, perhaps at {midpoint}?

## Follow-up Email Template

Subject: Following up on our salary discussion

Hi [Manager's Name],

Thank you for taking the time to discuss my compensation yesterday. I wanted to follow up on our conversation about adjusting my salary to reflect my contributions and current market conditions.

As we discussed, my achievements over the past year have significantly contributed to our team's success. The market research indicates that {title} roles in {location} typically range from {p25} to {p75}.

I'm excited to continue growing with the team and would appreciate the opportunity to discuss this further. Please let me know if you need any additional information to move forward with this request.

Best regards,
[Your Name]"#
    )
}
