//! In-memory checkout storage.

use moka::future::Cache;
use moka::ops::compute::Op;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::flow::{Checkout, CheckoutError};

/// Open checkouts keyed by id
#[derive(Clone)]
pub struct CheckoutStore {
    checkouts: Cache<Uuid, Arc<Checkout>>,
}

impl CheckoutStore {
    /// Abandoned checkouts drop out `idle` after their last update.
    pub fn new(max_checkouts: u64, idle: Duration) -> Self {
        Self {
            checkouts: Cache::builder()
                .max_capacity(max_checkouts)
                .time_to_idle(idle)
                .build(),
        }
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Checkout>> {
        self.checkouts.get(id).await
    }

    /// Fetch a checkout only if `owner` started it.
    pub async fn get_owned(&self, id: &Uuid, owner: &Uuid) -> Option<Arc<Checkout>> {
        self.get(id).await.filter(|c| c.owner == *owner)
    }

    /// Insert or replace.
    pub async fn save(&self, checkout: Checkout) -> Arc<Checkout> {
        let checkout = Arc::new(checkout);
        self.checkouts.insert(checkout.id, checkout.clone()).await;
        checkout
    }

    /// Apply a step to `owner`'s checkout under the entry lock.
    ///
    /// Concurrent updates of one checkout run one after the other, so each
    /// sees the step the previous one left behind. Returns `None` when the
    /// checkout is missing or not owned by `owner`; a failed step leaves the
    /// stored checkout untouched.
    pub async fn update<F>(
        &self,
        id: Uuid,
        owner: &Uuid,
        apply: F,
    ) -> Option<Result<Arc<Checkout>, CheckoutError>>
    where
        F: FnOnce(&mut Checkout) -> Result<(), CheckoutError> + Send,
    {
        let mut outcome = None;
        self.checkouts
            .entry(id)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) if entry.value().owner == *owner => {
                        let mut checkout = Checkout::clone(entry.value());
                        match apply(&mut checkout) {
                            Ok(()) => {
                                let checkout = Arc::new(checkout);
                                outcome = Some(Ok(checkout.clone()));
                                Op::Put(checkout)
                            }
                            Err(e) => {
                                outcome = Some(Err(e));
                                Op::Nop
                            }
                        }
                    }
                    _ => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;
        outcome
    }

    pub fn entry_count(&self) -> u64 {
        self.checkouts.entry_count()
    }
}
