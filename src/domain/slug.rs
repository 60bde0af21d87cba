use deunicode::deunicode;

/// Derives the canonical URL slug for a display name.
///
/// The name is transliterated to ASCII first (`Äpfel` reads as `Apfel`).
/// ASCII letters and digits are kept and lower-cased, `&` becomes `and`,
/// whitespace, `-` and `_` separate words, and everything else is dropped.
/// The result is empty when nothing survives.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        let word = if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase().to_string()
        } else if c == '&' {
            pending_dash = true;
            "and".to_string()
        } else {
            if c.is_whitespace() || c == '-' || c == '_' {
                pending_dash = true;
            }
            continue;
        };

        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&word);
        // `&` always stands alone as a word
        pending_dash = c == '&';
    }

    slug
}
