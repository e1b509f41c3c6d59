use unicode_normalization::UnicodeNormalization;

pub fn is_reading_location(url: &str, marker: &str) -> bool {
    !marker.is_empty() && url.contains(marker)
}

/// Name sent with lookups so the server can keep per-title context.
///
/// Takes everything before `marker` (the whole title when it is absent).
pub fn context_name(title: &str, marker: &str) -> String {
    let name = if marker.is_empty() {
        title
    } else {
        title.split(marker).next().unwrap_or(title)
    };

    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    // Full-width digits and half-width kana in titles
    name.nfkc()
        .collect::<String>()
        .replace(['\n', '\r'], "")
        .trim()
        .to_string()
}
