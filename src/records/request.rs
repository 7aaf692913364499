//! Input request parsing
//!
//! One request is one tab-separated input line with a fixed field order.

use crate::InputError;

/// Number of tab-separated fields on every input line
pub const REQUEST_FIELD_COUNT: usize = 16;

/// One product lookup request, parsed from a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Resume key, unique per batch
    pub strike_id: String,
    pub sku: String,
    pub model: String,
    pub title: String,
    pub product_url: String,
    pub image_url: String,
    pub upc: String,
    pub brand: String,
    pub mpn: String,
    pub category: String,
    pub asin: String,
    /// Our own listed price, echoed as "My Price" in the output
    pub price: String,
    pub shipping: String,
    pub weight: String,
    pub dimension: String,
    pub lip: String,

    /// The input line exactly as read, without its line terminator
    pub raw: String,
}

impl Request {
    /// Parses a single input line
    ///
    /// Only the line terminator is stripped; every other character, including
    /// empty trailing fields, counts toward the field total.
    ///
    /// # Arguments
    ///
    /// * `line` - The raw input line
    /// * `line_number` - 1-based line number, used in the error message
    pub fn parse(line: &str, line_number: usize) -> Result<Self, InputError> {
        let raw = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = raw.split('\t').collect();

        if fields.len() != REQUEST_FIELD_COUNT {
            return Err(InputError::Malformed {
                line_number,
                expected: REQUEST_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let field = |i: usize| fields[i].to_string();

        Ok(Self {
            strike_id: field(0).trim().to_string(),
            sku: field(1),
            model: field(2),
            title: field(3),
            product_url: field(4),
            image_url: field(5),
            upc: field(6),
            brand: field(7),
            mpn: field(8),
            category: field(9),
            asin: field(10),
            price: field(11),
            shipping: field(12),
            weight: field(13),
            dimension: field(14),
            lip: field(15),
            raw: raw.to_string(),
        })
    }
}

/// Parses a whole input text into requests, skipping blank lines
///
/// Fails on the first malformed line; order is preserved because it is the
/// resume scan order.
pub fn parse_requests(text: &str) -> Result<Vec<Request>, InputError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Request::parse(line, index + 1))
        .collect()
}
