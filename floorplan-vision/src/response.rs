use anyhow::anyhow;

/// Pull the first JSON object out of a model reply.
///
/// Handles replies wrapped in a markdown code block (with or without a
/// language tag, at the start or after some prose) and replies that chat
/// before or after the object itself.
pub fn extract_json_from_response(content: &str) -> anyhow::Result<String> {
    let unfenced = strip_code_fence(content.trim());
    let object = first_json_object(unfenced)
        .ok_or_else(|| anyhow!("No JSON object found in model response"))?;
    Ok(object.to_string())
}

/// Body of the first ``` block, or the input unchanged when there is none
fn strip_code_fence(content: &str) -> &str {
    let Some(open) = content.find("```") else {
        return content;
    };
    let after_open = &content[open + 3..];
    // Skip the language tag on the opening line ("```json")
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open,
    };
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// First balanced `{ ... }` span that parses as a JSON object.
///
/// Prose such as "I found {3} rooms" produces balanced spans that are not
/// JSON; those are skipped. When no span parses, the first balanced one is
/// returned so the caller reports the parse error against it.
fn first_json_object(content: &str) -> Option<&str> {
    let mut first_balanced = None;

    for (start, _) in content.match_indices('{') {
        let Some(span) = balanced_span(&content[start..]) else {
            continue;
        };
        if serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(span).is_ok() {
            return Some(span);
        }
        first_balanced.get_or_insert(span);
    }

    first_balanced
}

/// Balanced span starting at the leading `{`, skipping braces inside string literals
fn balanced_span(content: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[..offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
