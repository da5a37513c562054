//! Symptom key canonicalization

/// Canonicalize free text into a symptom key.
///
/// Trims, lowercases, turns whitespace and hyphens into underscores, collapses
/// underscore runs and strips leading/trailing underscores:
///
/// ```
/// use medi_symptoms::normalize;
/// assert_eq!(normalize("  Skin Rash "), "skin_rash");
/// assert_eq!(normalize("nodal--skin__eruptions"), "nodal_skin_eruptions");
/// ```
pub fn normalize(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !key.is_empty() && !key.ends_with('_') {
                key.push('_');
            }
        } else {
            key.extend(ch.to_lowercase());
        }
    }
    if key.ends_with('_') {
        key.pop();
    }
    key
}

/// Render a symptom key for people: `"skin_rash"` becomes `"Skin Rash"`.
///
/// A letter is uppercased when it follows a non-letter (or starts the string)
/// and lowercased otherwise.
pub fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_is_letter = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}
