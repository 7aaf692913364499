//! Static DOM queries over scraper
//!
//! Matched elements are copied out into owned `Element` snapshots so that no
//! parsed document is held across an await point.

use crate::client::{ClientError, ClientResult};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

/// Elements whose boundaries start a new line of rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Owned snapshot of a matched element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    attributes: HashMap<String, String>,
    inner_html: String,
}

impl Element {
    fn from_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            name: value.name().to_string(),
            text: rendered_text(element),
            attributes: value
                .attrs()
                .map(|(name, v)| (name.to_string(), v.to_string()))
                .collect(),
            inner_html: element.inner_html(),
        }
    }

    /// Tag name, lower-case
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visible text, one line per block element, whitespace collapsed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of attribute `name`, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns descendants matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> ClientResult<Vec<Element>> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.inner_html);
        Ok(fragment.select(&selector).map(Element::from_ref).collect())
    }

    /// Returns the first descendant matching `selector`
    pub fn find_first(&self, selector: &str) -> ClientResult<Option<Element>> {
        Ok(self.find_all(selector)?.into_iter().next())
    }
}

/// Selects every element matching `selector` in a full HTML document
pub fn select_elements(html: &str, selector: &str) -> ClientResult<Vec<Element>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).map(Element::from_ref).collect())
}

fn parse_selector(selector: &str) -> ClientResult<Selector> {
    Selector::parse(selector).map_err(|_| ClientError::InvalidSelector(selector.to_string()))
}

/// Renders an element's text the way a browser lays it out in lines
fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if name == "script" || name == "style" {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    let block = BLOCK_ELEMENTS.contains(&name);
                    if block {
                        out.push('\n');
                    }
                    collect_text(child_ref, out);
                    if block {
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}
