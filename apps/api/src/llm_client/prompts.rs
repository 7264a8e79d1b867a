// Shared prompt fragments. Feature prompts live in a prompts.rs next to their
// feature module and compose these.

/// Instruction appended to every system prompt that expects a JSON document back.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
