//! Known page layouts of the storefront
//!
//! Search results come in two structures and product details in two more.
//! Each layout is a variant carrying its own selectors; supporting a new
//! structure means adding a variant here.

use crate::client::{ClientResult, PageClient};

/// Container rendered around every search result list
pub const RESULTS_CONTAINER: &str = "section.section-content.bg.padding-y";

/// Document title of the storefront's "no such search" page
pub const NOT_FOUND_TITLE: &str = "not found";

/// Spans carrying labels such as `Part Number: ...`
pub const PART_NUMBER_LABEL: &str = "span.skumodel";

/// Label text that identifies the part number span
pub const PART_NUMBER_MARKER: &str = "part number";

/// Main price display on a product page
pub const PRICE: &str = "span.pricebig.protected";

/// Structure of a search result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLayout {
    /// Grid of `article.card.card-product` tiles
    CardGrid,
    /// List of `div.productbox` rows
    ProductBox,
}

impl SearchLayout {
    /// Detection order
    pub const ALL: [SearchLayout; 2] = [Self::CardGrid, Self::ProductBox];

    /// Element whose presence inside the results container identifies the layout
    pub fn marker(&self) -> &'static str {
        match self {
            Self::CardGrid => "article.card.card-product",
            Self::ProductBox => "div.productbox",
        }
    }

    /// One element per search result, each wrapping the product link
    pub fn result_item(&self) -> &'static str {
        match self {
            Self::CardGrid => "div.card-body div.img-wrap",
            Self::ProductBox => "div.productbox div.imgBox",
        }
    }

    /// Page-wide selector for the result items of this layout
    pub fn item_selector(&self) -> String {
        format!("{} {}", RESULTS_CONTAINER, self.result_item())
    }

    /// Detects the layout of the current page
    ///
    /// Only the first results container is checked. Returns `None` when there
    /// is no container or none of the known markers is present.
    pub fn detect(client: &dyn PageClient) -> ClientResult<Option<Self>> {
        let containers = client.find_all(RESULTS_CONTAINER)?;
        let container = match containers.first() {
            Some(c) => c,
            None => return Ok(None),
        };

        for layout in Self::ALL {
            if container.find_first(layout.marker())?.is_some() {
                return Ok(Some(layout));
            }
        }

        Ok(None)
    }
}

/// Structure of the detail block on a product page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLayout {
    /// `label: value` lines in list items
    ListItems,
    /// `label: value` lines in paragraphs
    Paragraphs,
}

impl DetailLayout {
    /// Preference order; the first layout with any element wins
    pub const ALL: [DetailLayout; 2] = [Self::ListItems, Self::Paragraphs];

    pub fn selector(&self) -> &'static str {
        match self {
            Self::ListItems => "div.card-body.detail_overviewd > li",
            Self::Paragraphs => "div.card-body.detail_overviewd > p",
        }
    }
}
