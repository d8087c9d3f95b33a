use crate::format::usd;
use crate::models::pack::Pack;
use crate::models::session::{ChatMessage, ChatRole};

/// A dialogue turn is a short reply.
pub const DIALOGUE_MAX_TOKENS: u32 = 200;

/// Manager role-play prompt.
/// Replace: {job_title}, {location}, {current_salary}, {target_salary},
///          {market_average}, {achievements}, {history}, {message}
pub const MANAGER_PROMPT_TEMPLATE: &str = r#"You are a supportive but realistic manager having a salary negotiation conversation with an employee.

Employee Details:
- Job Title: {job_title}
- Location: {location}
- Current Salary: {current_salary}
- Target Salary: {target_salary}
- Market Average: {market_average}
- Key Achievements: {achievements}

Conversation so far:
{history}

Employee: {message}

As the manager, respond in a way that:
1. Acknowledges their points professionally
2. Asks thoughtful follow-up questions
3. Shows you're considering their request seriously
4. Maintains a collaborative tone
5. Occasionally raises realistic concerns or asks for clarification
6. Keeps responses concise (2-3 sentences max)

Manager:"#;

/// Renders prior turns as alternating `Employee:` / `Manager:` lines.
pub fn render_history(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let speaker = match m.role {
                ChatRole::User => "Employee",
                ChatRole::Assistant => "Manager",
            };
            format!("{speaker}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_manager_prompt(pack: &Pack, history: &[ChatMessage], message: &str) -> String {
    let target = pack
        .target_salary
        .map(usd)
        .unwrap_or_else(|| "N/A".to_string());
    let achievements = if pack.achievements.is_empty() {
        "None provided".to_string()
    } else {
        pack.achievements.join(", ")
    };

    MANAGER_PROMPT_TEMPLATE
        .replace("{job_title}", &pack.job_title)
        .replace("{location}", &pack.city_or_remote)
        .replace("{current_salary}", &usd(pack.current_salary))
        .replace("{target_salary}", &target)
        .replace("{market_average}", &usd(pack.market_data.average))
        .replace("{achievements}", &achievements)
        .replace("{history}", &render_history(history))
        .replace("{message}", message)
}
