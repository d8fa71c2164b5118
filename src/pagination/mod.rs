//! Pagination module
//!
//! Supports: direct `next.offset`, query parameters embedded in `next.href`,
//! and query parameters embedded in a top-level `next_url`.
//!
//! # Overview
//!
//! A list operation returns one page at a time. Each page envelope carries
//! its items plus, optionally, a continuation token pointing at the next
//! page. A [`Pager`] wraps the operation and a fixed set of parameters and
//! follows those tokens until the server stops handing them out.
//!
//! Service clients describe their list operations through three small
//! traits: [`PageParams`] (where the continuation goes in the request),
//! [`PageEnvelope`] (where the items and links are in the response), and
//! [`ListOperation`] (how to fetch one page and which [`TokenRule`] applies).

mod pager;
mod types;

pub use pager::Pager;
pub use types::{
    get_query_param, ContinuationToken, ListOperation, NextLink, PageEnvelope, PageItem,
    PageLinks, PageParams, TokenRule, DUMMY_BASE_URL,
};
