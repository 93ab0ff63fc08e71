//! Fetch Orders Use Case
//!
//! Resolves store UUIDs and pulls paginated order pages, fanning out
//! concurrently across stores. Per-store failures never abort siblings.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use crate::application::ports::CentralApiPort;
use crate::domain::{BearerToken, OrderRecord, ServerToken, StoreId, StoreUuid, TimeWindow};

/// Use case for retrieving orders from the delivery platform.
pub struct FetchOrdersUseCase<P>
where
    P: CentralApiPort,
{
    api: Arc<P>,
}

impl<P> FetchOrdersUseCase<P>
where
    P: CentralApiPort,
{
    /// Create a new FetchOrdersUseCase.
    pub fn new(api: Arc<P>) -> Self {
        Self { api }
    }

    /// Resolve every store identifier to its platform UUID, concurrently.
    ///
    /// Partial success is the norm: stores that fail to resolve are logged
    /// and excluded from the returned mapping.
    pub async fn resolve_store_uuids(
        &self,
        bearer: &BearerToken,
        store_ids: &[StoreId],
    ) -> HashMap<StoreId, StoreUuid> {
        let lookups = store_ids.iter().map(|store_id| async move {
            (store_id, self.api.store_uuid(bearer, store_id).await)
        });

        let mut resolved = HashMap::new();
        for (store_id, result) in join_all(lookups).await {
            match result {
                Ok(uuid) => {
                    resolved.insert(store_id.clone(), uuid);
                }
                Err(e) => {
                    tracing::error!(store_id = %store_id, error = %e, "Store UUID resolution failed");
                }
            }
        }
        resolved
    }

    /// Fetch all order pages for a single store.
    ///
    /// Follows the continuation token until the API returns a page with an
    /// empty `data` array or no token. A page whose entries were all dropped
    /// as malformed still advances pagination when a token is present.
    /// Orders created on the current UTC date are dropped:
    /// the upstream API surfaces in-flight orders for today regardless of
    /// the requested window. On a page error the accumulated orders are
    /// returned as-is (fails closed, no retry).
    pub async fn fetch_store_orders(
        &self,
        token: &ServerToken,
        store_id: &StoreId,
        store_uuid: &StoreUuid,
        window: &TimeWindow,
    ) -> Vec<OrderRecord> {
        let today = Utc::now().date_naive();
        let mut accumulated = Vec::new();
        let mut page_token: Option<String> = None;

        tracing::info!(
            store_id = %store_id,
            start = %window.start,
            end = %window.end,
            "Fetching order pages"
        );

        loop {
            let page = match self
                .api
                .orders_page(token, store_uuid, window, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        store_id = %store_id,
                        error = %e,
                        "Order page fetch failed, keeping orders accumulated so far"
                    );
                    break;
                }
            };

            if page.raw_count == 0 {
                break;
            }

            for order in page.orders {
                match order.created_date_utc() {
                    Some(date) if date == today => {
                        tracing::debug!(order_id = %order.id, "Skipping in-flight order created today");
                    }
                    Some(_) => accumulated.push(order),
                    None => {
                        tracing::warn!(
                            order_id = %order.id,
                            created_time = %order.created_time,
                            "Unparseable created_time, keeping order"
                        );
                        accumulated.push(order);
                    }
                }
            }

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        tracing::info!(
            store_id = %store_id,
            count = accumulated.len(),
            "Finished fetching orders for store"
        );
        accumulated
    }

    /// Fetch orders for every resolved store concurrently and concatenate.
    ///
    /// All fetches run to completion; a slow or failing store never cancels
    /// its siblings. The combined collection is unordered across stores.
    pub async fn fetch_all(
        &self,
        token: &ServerToken,
        store_uuids: &HashMap<StoreId, StoreUuid>,
        window: &TimeWindow,
    ) -> Vec<OrderRecord> {
        let fetches = store_uuids
            .iter()
            .map(|(store_id, uuid)| self.fetch_store_orders(token, store_id, uuid, window));

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
