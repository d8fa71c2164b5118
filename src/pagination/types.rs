//! Pagination types and traits
//!
//! Defines the continuation token, the pagination metadata carried by a page
//! envelope, the rules for pulling the next token out of that metadata, and
//! the traits a list operation implements to be driven by a [`Pager`].
//!
//! [`Pager`]: super::Pager

use crate::error::Result;
use crate::http::DetailedResponse;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Base used to resolve relative `href` values before reading their query
pub const DUMMY_BASE_URL: &str = "https://fakehost.com";

// ============================================================================
// Continuation Token
// ============================================================================

/// Server-issued value that advances iteration to the next page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContinuationToken {
    /// No further pages
    #[default]
    Absent,
    /// A scalar offset, cursor or start value
    Offset(String),
    /// A structured offset object
    Structured(JsonObject),
}

impl ContinuationToken {
    /// Interpret a raw JSON value found in a page envelope.
    ///
    /// Null, empty strings, `false` and `0` carry no continuation.
    pub fn from_json(value: Option<&JsonValue>) -> Self {
        match value {
            None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => Self::Absent,
            Some(JsonValue::String(s)) => Self::from_param(Some(s.clone())),
            Some(JsonValue::Number(n)) if n.as_f64() == Some(0.0) => Self::Absent,
            Some(JsonValue::Number(n)) => Self::Offset(n.to_string()),
            Some(JsonValue::Bool(true)) => Self::Offset("true".to_string()),
            Some(JsonValue::Object(map)) => Self::Structured(map.clone()),
            Some(array @ JsonValue::Array(_)) => Self::Offset(array.to_string()),
        }
    }

    /// Interpret a value read from a URL query string
    pub fn from_param(value: Option<String>) -> Self {
        match value {
            Some(s) if !s.is_empty() => Self::Offset(s),
            _ => Self::Absent,
        }
    }

    /// Whether a further page exists
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Value to place in the continuation field of the next request
    pub fn as_param(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Offset(s) => Some(s.clone()),
            Self::Structured(map) => Some(JsonValue::Object(map.clone()).to_string()),
        }
    }
}

// ============================================================================
// Page Metadata
// ============================================================================

/// The `next` object of a page envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextLink {
    /// URL of the next page, with the continuation in its query string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Direct continuation value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<JsonValue>,
}

/// Pagination metadata of a page envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Nested `next` object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextLink>,
    /// Top-level next page URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
}

impl PageLinks {
    /// Links pointing at `next.href`
    pub fn with_href(href: impl Into<String>) -> Self {
        Self {
            next: Some(NextLink {
                href: Some(href.into()),
                offset: None,
            }),
            next_url: None,
        }
    }

    /// Links carrying a direct `next.offset`
    pub fn with_offset(offset: impl Into<JsonValue>) -> Self {
        Self {
            next: Some(NextLink {
                href: None,
                offset: Some(offset.into()),
            }),
            next_url: None,
        }
    }

    /// Links pointing at a top-level `next_url`
    pub fn with_next_url(url: impl Into<String>) -> Self {
        Self {
            next: None,
            next_url: Some(url.into()),
        }
    }
}

// ============================================================================
// Token Rule
// ============================================================================

/// Where a list operation's envelope carries its continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// `next.offset`, used verbatim
    NextOffset,
    /// Query parameter `param` of `next.href`
    NextHref {
        /// Query parameter name
        param: &'static str,
    },
    /// Query parameter `param` of the top-level `next_url`
    NextUrl {
        /// Query parameter name
        param: &'static str,
    },
}

impl TokenRule {
    /// Pull the next continuation token out of a page's links
    pub fn extract(&self, links: &PageLinks) -> Result<ContinuationToken> {
        match self {
            TokenRule::NextOffset => Ok(ContinuationToken::from_json(
                links.next.as_ref().and_then(|n| n.offset.as_ref()),
            )),
            TokenRule::NextHref { param } => {
                let href = links.next.as_ref().and_then(|n| n.href.as_deref());
                token_from_url(href, param)
            }
            TokenRule::NextUrl { param } => token_from_url(links.next_url.as_deref(), param),
        }
    }
}

fn token_from_url(url: Option<&str>, param: &str) -> Result<ContinuationToken> {
    match url {
        Some(url) => Ok(ContinuationToken::from_param(get_query_param(url, param)?)),
        None => Ok(ContinuationToken::Absent),
    }
}

/// Read the first value of query parameter `name` from a possibly relative URL
pub fn get_query_param(url: &str, name: &str) -> Result<Option<String>> {
    if url.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(DUMMY_BASE_URL)?.join(url)?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned()))
}

// ============================================================================
// Traits
// ============================================================================

/// Request parameters of a paginated list operation
pub trait PageParams: Clone + Send + Sync {
    /// Name of the field carrying the continuation
    const CONTINUATION_FIELD: &'static str;

    /// Current continuation value, if set
    fn continuation(&self) -> Option<&str>;

    /// Set the continuation for the next request
    fn set_continuation(&mut self, token: String);
}

/// Response body of one page of a list operation
pub trait PageEnvelope: Send {
    /// Element type of the page's item array
    type Item: Send;

    /// Pagination metadata
    fn links(&self) -> &PageLinks;

    /// Consume the page, yielding its items
    fn into_items(self) -> Vec<Self::Item>;
}

/// A list operation bound to a service client
#[async_trait]
pub trait ListOperation: Send + Sync {
    /// Request parameters
    type Params: PageParams;

    /// Page envelope
    type Page: PageEnvelope;

    /// Operation name, used in logs
    const OPERATION_ID: &'static str;

    /// Where the envelope carries the continuation
    const TOKEN_RULE: TokenRule;

    /// Fetch one page
    async fn fetch_page(&self, params: &Self::Params) -> Result<DetailedResponse<Self::Page>>;
}

/// Item type yielded by a list operation
pub type PageItem<Op> = <<Op as ListOperation>::Page as PageEnvelope>::Item;
