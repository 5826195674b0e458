//! Shared fixtures for integration tests.

#![allow(dead_code)]

use catalog_view::store::ItemFetcher;
use catalog_view::{CatalogError, Item, Result};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Fetcher that replays a queue of outcomes, one per call, each after its own delay.
///
/// Calls beyond the end of the script fail immediately.
#[derive(Default)]
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<(Duration, std::result::Result<Vec<Item>, String>)>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, delay_ms: u64, items: Vec<Item>) -> Self {
        self.push(delay_ms, Ok(items))
    }

    pub fn then_err(self, delay_ms: u64) -> Self {
        self.push(delay_ms, Err("scripted failure".to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, delay_ms: u64, outcome: std::result::Result<Vec<Item>, String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(delay_ms), outcome));
        self
    }
}

impl ItemFetcher for ScriptedFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Item>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();

        async move {
            let Some((delay, outcome)) = next else {
                return Err(CatalogError::Fetch("script exhausted".to_string()));
            };
            tokio::time::sleep(delay).await;
            outcome.map_err(CatalogError::Fetch)
        }
        .boxed()
    }
}

/// Fetcher whose future never resolves.
pub struct NeverFetcher;

impl ItemFetcher for NeverFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Item>>> {
        futures_util::future::pending().boxed()
    }
}

pub fn blade() -> Item {
    Item::new(1, "Blade", "Precision blade for detailed cuts.", 19.99, "Accessories")
}

pub fn catalog_items() -> Vec<Item> {
    vec![
        Item::new(1, "Machine Tool", "Smart cutting machine for DIY crafts.", 399.99, "Machines"),
        Item::new(2, "Machine Tool Pro", "Advanced cutting machine for precision projects.", 429.99, "Machines"),
        Item::new(3, "EasyPress 2", "Heat press for custom vinyl projects.", 189.99, "Heat Press"),
        Item::new(4, "Premium Vinyl Roll", "Durable vinyl for long-lasting designs.", 12.99, "Materials"),
        Item::new(5, "Fine-Point Blade", "Precision blade for detailed cuts.", 19.99, "Accessories"),
    ]
}

pub fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}
