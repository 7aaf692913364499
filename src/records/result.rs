//! Output records and their tab-separated row layout

use crate::records::Request;
use std::fmt;

/// Placeholder for a field that could not be extracted
pub const NOT_AVAILABLE: &str = "na";

/// Fixed leading columns of every output row
pub const FIXED_COLUMNS: [&str; 9] = [
    "Strike ID", "SKU", "Brand", "MPN", "Model", "UPC", "Asin", "My Price", "Status",
];

/// Outcome of a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStatus {
    /// At least one matching product with a price was found
    Found,
    /// No matching product carried a usable price
    NotFound,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "FOUND",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price, condition and availability of one accepted catalog product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub price: String,
    pub condition: String,
    pub availability: String,
}

impl Default for PriceQuote {
    fn default() -> Self {
        Self {
            price: NOT_AVAILABLE.to_string(),
            condition: NOT_AVAILABLE.to_string(),
            availability: NOT_AVAILABLE.to_string(),
        }
    }
}

impl PriceQuote {
    /// A quote is only reported when its price could be read
    pub fn has_price(&self) -> bool {
        self.price != NOT_AVAILABLE
    }
}

/// One output row: the request's identity columns plus zero or more quotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub strike_id: String,
    pub sku: String,
    pub brand: String,
    pub mpn: String,
    pub model: String,
    pub upc: String,
    pub asin: String,
    pub my_price: String,
    pub status: LookupStatus,
    pub quotes: Vec<PriceQuote>,
}

impl ResultRecord {
    /// Builds the record for a request from its accepted quotes
    ///
    /// An empty quote list yields `NOT_FOUND`.
    pub fn from_quotes(request: &Request, quotes: Vec<PriceQuote>) -> Self {
        let status = if quotes.is_empty() {
            LookupStatus::NotFound
        } else {
            LookupStatus::Found
        };

        Self {
            strike_id: request.strike_id.clone(),
            sku: request.sku.clone(),
            brand: request.brand.clone(),
            mpn: request.mpn.clone(),
            model: request.model.clone(),
            upc: request.upc.clone(),
            asin: request.asin.clone(),
            my_price: request.price.clone(),
            status,
            quotes,
        }
    }

    /// Serializes the record as one tab-separated row (no line terminator)
    ///
    /// Rows are ragged: only the quotes actually present are written, capped
    /// at `max_quotes` so the row never outgrows the header.
    pub fn to_row(&self, max_quotes: usize) -> String {
        let mut columns: Vec<&str> = vec![
            self.strike_id.as_str(),
            self.sku.as_str(),
            self.brand.as_str(),
            self.mpn.as_str(),
            self.model.as_str(),
            self.upc.as_str(),
            self.asin.as_str(),
            self.my_price.as_str(),
            self.status.as_str(),
        ];

        for quote in self.quotes.iter().take(max_quotes) {
            columns.push(quote.price.as_str());
            columns.push(quote.condition.as_str());
            columns.push(quote.availability.as_str());
        }

        columns.join("\t")
    }
}

/// Builds the output header row for `max_quotes` quote triples
pub fn header_row(max_quotes: usize) -> String {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for i in 1..=max_quotes {
        columns.push(format!("Price {}", i));
        columns.push(format!("Condition {}", i));
        columns.push(format!("Availability {}", i));
    }
    columns.join("\t")
}
