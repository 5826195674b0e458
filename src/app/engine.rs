//! Reactive driver for the derived view.
//!
//! [`DerivedView`] owns a background task that listens to four watch channels
//! (items plus the three UI parameters), feeds every arrival into a
//! [`CombineLatest`] and publishes each recomputed sequence on an output watch
//! channel. Any number of [`ViewStream`] subscribers read that output; they all
//! see the same values.
//!
//! ```text
//! items ──┐
//! search ─┼─► CombineLatest ─► derive_view ─► output ─► ViewStream (×N)
//! category┤
//! sort ───┘
//! ```
//!
//! The task never polls and never writes back to the store. It exits once every
//! input channel has closed, or when the `DerivedView` is dropped.

use super::combinator::CombineLatest;
use super::params::{CategoryFilter, SortKey};
use crate::domain::Item;
use crate::store::Snapshot;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One published derived sequence.
pub type ViewSnapshot = Arc<Vec<Item>>;

type Output = Arc<watch::Sender<Option<ViewSnapshot>>>;

/// The four input channels of the derived view.
#[derive(Debug, Clone)]
pub struct ViewInputs {
    pub items: watch::Receiver<Snapshot>,
    pub search: watch::Receiver<String>,
    pub category: watch::Receiver<CategoryFilter>,
    pub sort: watch::Receiver<SortKey>,
}

/// Handle to the running derived-view task.
#[derive(Debug)]
pub struct DerivedView {
    output: Output,
    task: JoinHandle<()>,
}

impl DerivedView {
    /// Spawns the derived-view task.
    ///
    /// Watch receivers always hold a current value, so the first sequence is
    /// published as soon as the task first runs.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(inputs: ViewInputs) -> Self {
        let output: Output = Arc::new(watch::Sender::new(None));
        let task = tokio::spawn(run(inputs, Arc::clone(&output)));
        Self { output, task }
    }

    /// Subscribes to the derived sequence.
    #[must_use]
    pub fn subscribe(&self) -> ViewStream {
        ViewStream {
            rx: self.output.subscribe(),
        }
    }

    /// Most recently published sequence, `None` before the first recomputation.
    #[must_use]
    pub fn current(&self) -> Option<ViewSnapshot> {
        self.output.borrow().clone()
    }
}

impl Drop for DerivedView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Subscription to the derived sequence.
///
/// Exposes `current()` for synchronous reads and `next()` / `wait_for()` for
/// reactive consumers. A slow subscriber skips straight to the newest sequence.
#[derive(Debug, Clone)]
pub struct ViewStream {
    rx: watch::Receiver<Option<ViewSnapshot>>,
}

impl ViewStream {
    /// The latest published sequence, if any.
    #[must_use]
    pub fn current(&self) -> Option<ViewSnapshot> {
        self.rx.borrow().clone()
    }

    /// Waits for the next recomputation this subscriber has not seen yet.
    ///
    /// Returns `None` once the derived view has shut down.
    pub async fn next(&mut self) -> Option<ViewSnapshot> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Waits until the current (or a future) sequence satisfies `predicate`.
    ///
    /// Returns `None` if the derived view shuts down first.
    pub async fn wait_for(&mut self, mut predicate: impl FnMut(&[Item]) -> bool) -> Option<ViewSnapshot> {
        let value = self
            .rx
            .wait_for(|view| view.as_ref().is_some_and(|items| predicate(items)))
            .await
            .ok()?;
        (*value).clone()
    }
}

fn publish(output: &Output, view: Option<Vec<Item>>) {
    if let Some(view) = view {
        output.send_replace(Some(Arc::new(view)));
    }
}

async fn run(mut inputs: ViewInputs, output: Output) {
    let mut latest = CombineLatest::new();

    latest.push_items(inputs.items.borrow_and_update().clone());
    latest.push_search(inputs.search.borrow_and_update().clone());
    latest.push_category(inputs.category.borrow_and_update().clone());
    publish(&output, latest.push_sort(*inputs.sort.borrow_and_update()));

    let (mut items_open, mut search_open, mut category_open, mut sort_open) = (true, true, true, true);

    loop {
        let view = tokio::select! {
            changed = inputs.items.changed(), if items_open => match changed {
                Ok(()) => {
                    let items = inputs.items.borrow_and_update().clone();
                    latest.push_items(items)
                }
                Err(_) => {
                    items_open = false;
                    None
                }
            },
            changed = inputs.search.changed(), if search_open => match changed {
                Ok(()) => {
                    let search = inputs.search.borrow_and_update().clone();
                    latest.push_search(search)
                }
                Err(_) => {
                    search_open = false;
                    None
                }
            },
            changed = inputs.category.changed(), if category_open => match changed {
                Ok(()) => {
                    let category = inputs.category.borrow_and_update().clone();
                    latest.push_category(category)
                }
                Err(_) => {
                    category_open = false;
                    None
                }
            },
            changed = inputs.sort.changed(), if sort_open => match changed {
                Ok(()) => {
                    let sort = *inputs.sort.borrow_and_update();
                    latest.push_sort(sort)
                }
                Err(_) => {
                    sort_open = false;
                    None
                }
            },
            else => break,
        };

        publish(&output, view);
    }

    tracing::debug!("derived view inputs closed");
}
