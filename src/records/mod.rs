//! Record types flowing through a sweep
//!
//! - `Request`: one parsed input line
//! - `PriceQuote`: one accepted catalog product
//! - `ResultRecord`: one output row

mod request;
mod result;

pub use request::{parse_requests, Request, REQUEST_FIELD_COUNT};
pub use result::{
    header_row, LookupStatus, PriceQuote, ResultRecord, FIXED_COLUMNS, NOT_AVAILABLE,
};
