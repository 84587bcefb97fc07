// Shared prompt fragments and the template filler used by every prompt builder.
// Each flow that calls the model defines its own prompts.rs alongside it.

/// Instruction appended to every prompt that expects a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
- Return only a single valid JSON object.
- Do not include any text or markdown outside of the JSON.
- Do not wrap the JSON in code fences.";

/// Instruction for documents that do not follow a standard layout.
pub const INFER_SECTIONS_INSTRUCTION: &str = "\
- If the resume has no clear section headings, infer experience and projects from context.";

/// Replaces each `{key}` placeholder in `template` with its value in a single pass.
///
/// Substituted text is never rescanned, so a value that itself contains a
/// placeholder (e.g. a resume mentioning `{job_description}`) is embedded verbatim.
/// Unknown `{...}` sequences, such as literal JSON braces, are copied unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open + 1..];
        let matched = values.iter().find(|(key, _)| {
            candidate
                .strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &candidate[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let out = fill_template("Hello {name}, meet {other}.", &[("name", "Ada"), ("other", "Bob")]);
        assert_eq!(out, "Hello Ada, meet Bob.");
    }

    #[test]
    fn test_fill_template_keeps_json_braces() {
        let out = fill_template(r#"{"mcqs": [{x}]}"#, &[("x", "1")]);
        assert_eq!(out, r#"{"mcqs": [1]}"#);
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template("A={a} B={b}", &[("a", "{b}"), ("b", "two")]);
        assert_eq!(out, "A={b} B=two");
    }

    #[test]
    fn test_fill_template_handles_trailing_brace() {
        assert_eq!(fill_template("open {", &[("a", "1")]), "open {");
    }
}
