//! Net salary lookup backed by a tax calculator web page.
//!
//! The page is requested with the gross amount substituted into a URL
//! template. The net salary is printed as the text of a single element with a
//! known `id`, e.g. `<span id="net_pay">* 1.581 €</span>`; only the digits of
//! that text are kept.

use std::str::FromStr;

use reqwest::blocking::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use super::NetSalaryLookup;
use crate::config::LookupConfig;
use crate::error::{EngineError, EngineResult};

const AMOUNT_PLACEHOLDER: &str = "{amount}";

/// Looks up net salaries by scraping a tax calculator page.
///
/// The calculator only accepts whole currency units, so the gross amount is
/// truncated before it is placed in the URL.
///
/// Holds a blocking HTTP client: build and drop it outside of an async
/// runtime, and call it from blocking threads.
#[derive(Debug, Clone)]
pub struct ScrapedNetSalary {
    client: Client,
    url_template: String,
    element_id: String,
}

impl ScrapedNetSalary {
    /// Creates a lookup for the given URL template and element id.
    ///
    /// Fails with `InvalidInput` if the template has no `{amount}` placeholder
    /// or the element id is empty.
    pub fn new(
        url_template: impl Into<String>,
        element_id: impl Into<String>,
    ) -> EngineResult<Self> {
        let url_template = url_template.into();
        let element_id = element_id.into();

        if !url_template.contains(AMOUNT_PLACEHOLDER) {
            return Err(EngineError::invalid_input(
                "url_template",
                format!("must contain the {} placeholder", AMOUNT_PLACEHOLDER),
            ));
        }
        if element_id.trim().is_empty() {
            return Err(EngineError::invalid_input("element_id", "must not be empty"));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| EngineError::invalid_input("http_client", e.to_string()))?;

        Ok(Self {
            client,
            url_template,
            element_id,
        })
    }

    /// Creates a lookup from the lookup section of the configuration.
    pub fn from_config(config: &LookupConfig) -> EngineResult<Self> {
        Self::new(config.url_template.clone(), config.element_id.clone())
    }

    /// Returns the URL queried for a gross monthly amount.
    pub fn url_for(&self, gross_monthly: Decimal) -> EngineResult<String> {
        let amount = gross_monthly
            .trunc()
            .to_i64()
            .ok_or_else(|| EngineError::LookupFailed {
                gross: gross_monthly,
                message: "gross amount does not fit a whole currency amount".to_string(),
            })?;

        Ok(self
            .url_template
            .replace(AMOUNT_PLACEHOLDER, &amount.to_string()))
    }

    fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client.get(url).send()?.error_for_status()?.text()
    }
}

impl NetSalaryLookup for ScrapedNetSalary {
    fn net_salary(&self, gross_monthly: Decimal) -> EngineResult<Decimal> {
        let url = self.url_for(gross_monthly)?;
        let failed = |message: String| EngineError::LookupFailed {
            gross: gross_monthly,
            message,
        };

        debug!(url = %url, "Requesting net salary");
        let html = self.fetch(&url).map_err(|e| {
            warn!(url = %url, error = %e, "Net salary request failed");
            failed(e.to_string())
        })?;

        let text = extract_element_text(&html, &self.element_id)
            .ok_or_else(|| failed(format!("element '{}' not found in page", self.element_id)))?;

        parse_amount(&text).ok_or_else(|| failed(format!("no amount in '{}'", text)))
    }
}

/// Returns the text directly inside the element whose `id` is `element_id`.
///
/// The attribute match is case-insensitive and accepts single or double
/// quotes. Only the first text node is returned, trimmed.
///
/// ```
/// use share_sacrifice::lookup::extract_element_text;
///
/// let html = r#"<div><span class="big" id="net_pay"> * 1.581 € </span></div>"#;
/// assert_eq!(extract_element_text(html, "net_pay").as_deref(), Some("* 1.581 €"));
/// ```
pub fn extract_element_text(html: &str, element_id: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let id = element_id.to_ascii_lowercase();

    let attr_start = [format!("id=\"{}\"", id), format!("id='{}'", id)]
        .iter()
        .filter_map(|needle| {
            lower.match_indices(needle.as_str()).map(|(i, _)| i).find(|&i| {
                i > 0 && lower.as_bytes()[i - 1].is_ascii_whitespace()
            })
        })
        .min()?;

    let content_start = attr_start + html[attr_start..].find('>')? + 1;
    let content_end = html[content_start..]
        .find('<')
        .map_or(html.len(), |i| content_start + i);

    Some(html[content_start..content_end].trim().to_string())
}

/// Reads an amount made of all ASCII digits in `text`.
///
/// HTML entities are skipped so `&#8364;` does not contribute digits. Any
/// other characters, including thousands separators, are dropped. Returns
/// `None` when there are no digits.
///
/// ```
/// use share_sacrifice::lookup::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("* 1.581 &#8364;"), Some(Decimal::from(1581)));
/// assert_eq!(parse_amount("n/a"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let mut digits = String::new();
    let mut in_entity = false;

    for c in text.chars() {
        match c {
            '&' => in_entity = true,
            ';' if in_entity => in_entity = false,
            c if c.is_ascii_digit() && !in_entity => digits.push(c),
            c if in_entity && !(c.is_ascii_alphanumeric() || c == '#') => in_entity = false,
            _ => {}
        }
    }

    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(&digits).ok()
}
