pub mod templates;

/// Values substituted into `{{NAME}}` placeholders of a prompt template.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables<'a> {
    pub prompt: &'a str,
    pub step_kind: &'a str,
    pub code: &'a str,
}

/// Replace `{{PROMPT}}`, `{{STEP_KIND}}` and `{{CODE}}` in `template`.
/// Substituted values are not scanned again for placeholders.
pub fn interpolate(template: &str, vars: &PromptVariables<'_>) -> String {
    let mut result = String::with_capacity(template.len() + vars.prompt.len() + vars.code.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let value = match &after[..end] {
                "PROMPT" => vars.prompt,
                "STEP_KIND" => vars.step_kind,
                "CODE" => vars.code,
                _ => return None,
            };
            Some((value, end))
        });
        match value {
            Some((value, end)) => {
                result.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                result.push_str("{{");
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
