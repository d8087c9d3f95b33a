// All LLM prompt constants for the negotiation document.

/// Output budget for a full negotiation document.
pub const CONTENT_MAX_TOKENS: u32 = 2000;

/// Negotiation package prompt.
/// Replace: {raise_gap}, {current_salary}, {target_salary}, {market_average},
///          {market_p25}, {market_p75}, {job_title}, {location}, {achievements}
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"You are a salary negotiation expert. Generate a comprehensive negotiation package in markdown format.

Calculate:
- raise_gap = {raise_gap} (max(0, market_average - current_salary))

Structure your response as markdown with these sections, using these EXACT headings:

# Salary Negotiation Package

## Market Analysis
- Current salary: {current_salary}
- Market average: {market_average}
- Market range: {market_p25} - {market_p75}
- Raise gap: {raise_gap}

## Negotiation Script

### Opening Statement
(2-3 sentences introducing the conversation)

### Value Proposition
(Present achievements and market data)

### Salary Request
(Specific ask based on market data)

## Fallback Responses

### If they say "budget constraints"
(Alternative response)

### If they say "need to think about it"
(Follow-up approach)

### If they counter with lower amount
(Negotiation strategy)

## Follow-up Email Template

Draft a professional 120-word email to send after the meeting.

Make it personalized for a {job_title} in {location}.

Job Details:
- Job Title: {job_title}
- Location: {location}
- Current Salary: {current_salary}
- Target Salary: {target_salary}
- Market Average: {market_average}
- Market Range: {market_p25} - {market_p75}

Key Achievements:
{achievements}

Generate a comprehensive, personalized salary negotiation package in markdown format."#;
