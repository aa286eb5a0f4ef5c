// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Substitutes `{name}` in `template` with `value` in a single pass.
///
/// Text inserted from `value` is never re-scanned, so a CV that happens to
/// contain `{cv_text}` cannot expand itself.
pub fn fill_placeholder(template: &str, name: &str, value: &str) -> String {
    fill_placeholders(template, &[(name, value)])
}

/// Substitutes several `{name}` placeholders in one left-to-right scan of
/// `template`. Substituted values are copied verbatim and never re-scanned.
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let placeholders: Vec<(String, &str)> = values
        .iter()
        .map(|(name, value)| (format!("{{{name}}}"), *value))
        .collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        // Earliest placeholder in what is left of the template.
        let next = placeholders
            .iter()
            .filter_map(|(p, v)| rest.find(p.as_str()).map(|at| (at, p.len(), *v)))
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
