//! Recursive, budget-aware crawl scheduler
//!
//! This module handles:
//! - The global worker ceiling, enforced with a semaphore
//! - Fanning one crawl unit out into concurrent child units
//! - Waiting for every child before a unit reaches `Done`
//!
//! Each child unit holds one permit from admission until it is done, including
//! the time it spends waiting on its own children. The seed unit runs on the
//! caller's task and is not charged against the ceiling.

use crate::crawler::extract::{fetch_and_extract, CrawlContext, CrawlUnit};
use crate::state::UnitState;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use url::Url;

/// Global ceiling on concurrently live child crawl units
#[derive(Debug, Clone)]
pub struct WorkerBudget {
    ceiling: usize,
    permits: Arc<Semaphore>,
}

/// A reserved worker slot; released when dropped
#[derive(Debug)]
pub struct WorkerSlot {
    _permit: OwnedSemaphorePermit,
}

impl WorkerBudget {
    pub fn new(ceiling: usize) -> Self {
        let ceiling = ceiling.min(Semaphore::MAX_PERMITS);
        Self {
            ceiling,
            permits: Arc::new(Semaphore::new(ceiling)),
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Slots that could be handed out right now
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Child units currently holding a slot
    pub fn active(&self) -> usize {
        self.ceiling - self.available()
    }

    /// Reserves up to `wanted` slots without waiting
    ///
    /// Each reservation is a single atomic acquire, so two concurrent fan-outs
    /// can never hand out more slots than the ceiling allows.
    pub fn admit(&self, wanted: usize) -> Vec<WorkerSlot> {
        let mut slots = Vec::with_capacity(wanted.min(self.ceiling));
        while slots.len() < wanted {
            match Arc::clone(&self.permits).try_acquire_owned() {
                Ok(permit) => slots.push(WorkerSlot { _permit: permit }),
                Err(_) => break,
            }
        }
        slots
    }
}

/// Turns "visit this URL" into a tree of concurrent crawl units
#[derive(Clone)]
pub struct Scheduler {
    ctx: Arc<CrawlContext>,
    budget: WorkerBudget,
}

impl Scheduler {
    pub fn new(ctx: Arc<CrawlContext>, workers: usize) -> Self {
        Self {
            ctx,
            budget: WorkerBudget::new(workers),
        }
    }

    pub fn budget(&self) -> &WorkerBudget {
        &self.budget
    }

    /// Visits the seed URL and returns once the whole unit tree is done
    pub async fn run(&self, seed: Url) {
        self.clone().visit(seed, None).await;
    }

    /// Runs one crawl unit to completion
    ///
    /// Boxed because the future recursively contains child visits.
    fn visit(self, url: Url, slot: Option<WorkerSlot>) -> BoxFuture<'static, ()> {
        async move {
            let mut unit = CrawlUnit::new(url);
            tracing::debug!("Visiting {}", unit.url());

            let new_links = fetch_and_extract(&self.ctx, &mut unit).await;
            if !unit.state().is_terminal() {
                unit.advance(UnitState::Expanding);
                self.expand(unit.url(), new_links).await;
                unit.advance(UnitState::Done);
            }

            drop(slot);
        }
        .boxed()
    }

    /// Admits as many child units as the budget allows and waits for them
    ///
    /// Links beyond the available budget stay in the visited set but are
    /// never fetched.
    async fn expand(&self, parent: &Url, links: Vec<Url>) {
        if links.is_empty() {
            return;
        }

        let slots = self.budget.admit(links.len());
        let starved = links.len() - slots.len();
        if starved > 0 {
            self.ctx.stats.record_starved(starved);
            tracing::debug!(
                "{}: budget exhausted, {} of {} new links will not be fetched",
                parent,
                starved,
                links.len()
            );
        }

        if slots.is_empty() {
            return;
        }

        let mut children = JoinSet::new();
        for (link, slot) in links.into_iter().zip(slots) {
            children.spawn(self.clone().visit(link, Some(slot)));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Crawl unit under {} failed: {}", parent, e);
            }
        }
    }
}
