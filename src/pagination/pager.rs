//! Generic pager
//!
//! A [`Pager`] drives one [`ListOperation`] across all of its pages,
//! following the continuation tokens the server hands back.

use super::types::{ContinuationToken, ListOperation, PageEnvelope, PageItem, PageParams};
use crate::error::{Error, Result};
use futures::stream::{self, Stream, TryStreamExt};
use tracing::debug;

/// Forward-only iterator over the pages of a list operation
pub struct Pager<Op: ListOperation> {
    operation: Op,
    params: Op::Params,
    has_next: bool,
    next_token: ContinuationToken,
    pages_fetched: usize,
}

impl<Op: ListOperation> Pager<Op> {
    /// Create a pager over `operation` starting from `params`.
    ///
    /// Fails if `params` already carries a continuation value.
    pub fn new(operation: Op, params: Op::Params) -> Result<Self> {
        if params.continuation().is_some() {
            return Err(Error::ContinuationPreset {
                field: <Op::Params as PageParams>::CONTINUATION_FIELD.to_string(),
            });
        }

        Ok(Self {
            operation,
            params,
            has_next: true,
            next_token: ContinuationToken::Absent,
            pages_fetched: 0,
        })
    }

    /// Whether another page may exist
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Parameters used for the most recent request
    pub fn params(&self) -> &Op::Params {
        &self.params
    }

    /// The bound operation
    pub fn operation(&self) -> &Op {
        &self.operation
    }

    /// Fetch the next page of items.
    ///
    /// Errors from the operation are returned unchanged and leave the pager
    /// as it was, so the call can be repeated.
    ///
    /// ```no_run
    /// # use platform_services::services::user_management::{ListUsersParams, UserManagementV1};
    /// # tokio_test::block_on(async {
    /// let service = UserManagementV1::new_from_env()?;
    /// let mut pager = service.list_users_pager(ListUsersParams::new("my-account"))?;
    /// while pager.has_next() {
    ///     for user in pager.get_next().await? {
    ///         println!("{:?}", user.user_id);
    ///     }
    /// }
    /// # platform_services::Result::<()>::Ok(()) });
    /// ```
    pub async fn get_next(&mut self) -> Result<Vec<PageItem<Op>>> {
        if !self.has_next {
            return Err(Error::PagerExhausted);
        }

        let mut params = self.params.clone();
        if let Some(token) = self.next_token.as_param() {
            params.set_continuation(token);
        }

        let response = self.operation.fetch_page(&params).await?;
        let page = response.result;
        let next_token = Op::TOKEN_RULE.extract(page.links())?;
        let items = page.into_items();

        self.pages_fetched += 1;
        debug!(
            operation = Op::OPERATION_ID,
            page = self.pages_fetched,
            items = items.len(),
            "Fetched page"
        );

        self.has_next = next_token.is_present();
        self.next_token = next_token;
        self.params = params;

        if !self.has_next {
            debug!(
                operation = Op::OPERATION_ID,
                pages = self.pages_fetched,
                "No more pages"
            );
        }

        Ok(items)
    }

    /// Fetch every remaining page and concatenate the items.
    ///
    /// On error nothing is returned, even if earlier pages succeeded.
    pub async fn get_all(&mut self) -> Result<Vec<PageItem<Op>>> {
        let mut results = Vec::new();
        while self.has_next {
            let mut items = self.get_next().await?;
            results.append(&mut items);
        }
        Ok(results)
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after the last page, or after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<PageItem<Op>>>> {
        stream::unfold(Some(self), |state| async move {
            let Some(mut pager) = state else {
                return None;
            };
            if !pager.has_next() {
                return None;
            }
            match pager.get_next().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Turn the pager into a stream of individual items
    pub fn into_items(self) -> impl Stream<Item = Result<PageItem<Op>>> {
        self.into_stream()
            .map_ok(|items| stream::iter(items.into_iter().map(Ok::<_, Error>)))
            .try_flatten()
    }
}

impl<Op: ListOperation> std::fmt::Debug for Pager<Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("operation", &Op::OPERATION_ID)
            .field("has_next", &self.has_next)
            .field("next_token", &self.next_token)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
