//! Product page inspection
//!
//! Visits one candidate page, decides whether it is the requested product and
//! reads its price, condition and availability.

use crate::client::{ClientResult, Element, PageClient};
use crate::extract::layout::{
    DetailLayout, PART_NUMBER_LABEL, PART_NUMBER_MARKER, PRICE,
};
use crate::extract::normalize::{clean_price, parse_label_value, part_number_from_label, skus_match};
use crate::records::{PriceQuote, NOT_AVAILABLE};
use std::time::Duration;

/// What a visited candidate page turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Same product, with a readable price
    Accepted(PriceQuote),
    /// A different product; carries the part number shown on the page
    Mismatch { displayed: String },
    /// Same product, but no price could be read
    NoPrice,
}

/// Visits `url` and compares its part number with `requested_sku`
///
/// A timeout while waiting for the part number is logged and the page is
/// inspected as it is.
pub async fn inspect_candidate(
    client: &mut dyn PageClient,
    url: &str,
    requested_sku: &str,
    timeout: Duration,
) -> ClientResult<CandidateOutcome> {
    tracing::info!("Calling product url - {}", url);
    client.navigate(url).await?;

    if !client.wait_for(PART_NUMBER_LABEL, timeout).await? {
        tracing::warn!("Timed out waiting for product details at {}", url);
    }

    let displayed = displayed_part_number(&client.find_all(PART_NUMBER_LABEL)?);
    if !skus_match(&displayed, requested_sku) {
        tracing::info!(
            "Part number mismatch [expected={}, found={}]",
            requested_sku,
            displayed
        );
        return Ok(CandidateOutcome::Mismatch { displayed });
    }

    let price = client
        .find_all(PRICE)?
        .first()
        .map(|element| clean_price(element.text()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let (condition, availability) = read_details(&*client)?;

    let quote = PriceQuote {
        price,
        condition,
        availability,
    };
    tracing::info!(
        "Product details [price={}, condition={}, availability={}]",
        quote.price,
        quote.condition,
        quote.availability
    );

    if quote.has_price() {
        Ok(CandidateOutcome::Accepted(quote))
    } else {
        Ok(CandidateOutcome::NoPrice)
    }
}

/// Part number from the first label span that mentions it, or empty
fn displayed_part_number(labels: &[Element]) -> String {
    labels
        .iter()
        .find(|label| label.text().to_lowercase().contains(PART_NUMBER_MARKER))
        .map(|label| part_number_from_label(label.text()))
        .unwrap_or_default()
}

/// Reads condition and availability from the detail block
///
/// Uses the first detail layout that has any element. Missing values are `na`.
fn read_details(client: &dyn PageClient) -> ClientResult<(String, String)> {
    let mut condition: Option<String> = None;
    let mut availability: Option<String> = None;

    for layout in DetailLayout::ALL {
        let elements = client.find_all(layout.selector())?;
        if elements.is_empty() {
            continue;
        }

        'scan: for element in &elements {
            for line in element.text().lines() {
                if let Some((label, value)) = parse_label_value(line) {
                    match label.as_str() {
                        "condition" if condition.is_none() => condition = Some(value),
                        "availability" if availability.is_none() => availability = Some(value),
                        _ => {}
                    }
                }
                if condition.is_some() && availability.is_some() {
                    break 'scan;
                }
            }
        }
        break;
    }

    let or_na = |value: Option<String>| {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    Ok((or_na(condition), or_na(availability)))
}
