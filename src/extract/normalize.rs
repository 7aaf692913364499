//! Normalization of values read from catalog pages

use crate::records::NOT_AVAILABLE;

/// Normalizes a SKU or part number for comparison
///
/// # Normalization Rules
///
/// 1. Drop every character that is not an ASCII letter or digit
/// 2. Convert to upper case
/// 3. Remove leading zeros from every run of digits
///
/// Punctuation is removed before zeros are trimmed, so where a separator sits
/// never changes the result.
///
/// # Examples
///
/// ```
/// use sku_sweep::extract::normalize_sku;
///
/// assert_eq!(normalize_sku("abc-007"), "ABC7");
/// assert_eq!(normalize_sku("P-0123"), normalize_sku("P0123"));
/// assert_eq!(normalize_sku("10-020"), "10020");
/// ```
pub fn normalize_sku(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    // Inside a digit run that already has a non-zero digit
    let mut significant = false;

    for c in raw.chars().filter(|c| c.is_ascii_alphanumeric()) {
        if c.is_ascii_digit() {
            if c == '0' && !significant {
                continue;
            }
            significant = true;
        } else {
            significant = false;
        }
        normalized.push(c.to_ascii_uppercase());
    }

    normalized
}

/// Returns true if two SKUs are equal after normalization
pub fn skus_match(displayed: &str, requested: &str) -> bool {
    normalize_sku(displayed) == normalize_sku(requested)
}

/// Strips the currency symbol and thousands separators from a price
///
/// An empty result becomes `"na"`.
pub fn clean_price(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Splits a `label: value` line at its first colon
///
/// Returns the lower-cased trimmed label and the value with surrounding
/// whitespace and trailing periods removed.
pub fn parse_label_value(line: &str) -> Option<(String, String)> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    let value = value.trim().trim_end_matches('.').trim_end().to_string();
    Some((label, value))
}

/// Extracts the part number from a label such as `Part Number: 123-ABC`
///
/// The part number is whatever follows the last colon.
pub fn part_number_from_label(text: &str) -> String {
    text.rsplit(':').next().unwrap_or("").trim().to_string()
}
