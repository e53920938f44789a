//! Input normalization and validation helpers

/// Title-case a string: the first letter of every alphabetic run is
/// upper-cased and the remaining letters lower-cased.
/// `"green gram(moong)"` becomes `"Green Gram(Moong)"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Normalize a commodity or district name for price table lookups
pub fn normalize_lookup_key(input: &str) -> String {
    title_case(input.trim())
}

/// Whether a free-text crop status describes a healthy crop.
///
/// Any status containing "healthy" (case-insensitive) counts, including
/// "unhealthy"; callers send the dropdown values `healthy`, `diseased` or
/// `moderate`.
pub fn is_healthy_status(status: &str) -> bool {
    status.to_lowercase().contains("healthy")
}
