//! Extraction of the first JSON array embedded in free-form text.
//!
//! Models asked for "strictly JSON" still wrap the payload in prose or code
//! fences often enough that slicing it out is worth doing properly: the scan
//! is bracket-balanced and string-aware, so nested arrays inside the payload
//! and stray brackets in surrounding commentary cannot truncate the slice.

/// Return the first balanced `[...]` region of `text`, or `None` when no
/// complete array is present.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strip surrounding whitespace and Markdown code fences before scanning.
/// Convenience wrapper used by the synthesis pipeline.
pub fn extract_fenced_json_array(text: &str) -> Option<&str> {
    extract_json_array(text.trim().trim_matches('`').trim())
}
