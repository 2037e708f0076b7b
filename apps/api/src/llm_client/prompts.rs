// Cross-cutting prompt fragments shared by every generation stage.
// Stage-specific instructions live in generation/prompts.rs.

/// Separates the system instruction from the request in the single prompt sent to the model.
pub const PROMPT_SEPARATOR: &str = "\n\n---\n\nUser Request:\n";

/// Appended to every system instruction so the client can parse the reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT include explanations or apologies.";

/// Joins a system instruction and a user message into one backend prompt.
pub fn compose_prompt(system: &str, user_message: &str) -> String {
    format!("{system}\n\n{JSON_ONLY_INSTRUCTION}{PROMPT_SEPARATOR}{user_message}")
}
