mod support;

use catalog_view::app::{derive_view, ViewParams};
use catalog_view::store::{FixedFetcher, ItemStore, LoadPolicy, LOAD_FAILED_MESSAGE};
use catalog_view::Item;
use std::sync::Arc;
use std::time::Duration;
use support::{blade, catalog_items, ids, NeverFetcher, ScriptedFetcher};

fn store_with(fetcher: ScriptedFetcher, policy: LoadPolicy) -> (ItemStore, Arc<ScriptedFetcher>) {
    let fetcher = Arc::new(fetcher);
    (ItemStore::new(fetcher.clone(), policy), fetcher)
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn successful_load_replaces_collection_then_clears_loading() {
    let (store, fetcher) = store_with(ScriptedFetcher::new().then_ok(600, catalog_items()), LoadPolicy::default());
    assert!(store.snapshot().is_empty());

    let handle = store.load();

    let state = store.state();
    assert!(state.loading, "loading is set before load() returns");
    assert_eq!(state.error, None);
    assert!(*store.loading().borrow());

    handle.await.unwrap();

    let state = store.state();
    assert!(!state.loading);
    assert_eq!(ids(&state.items), vec![1, 2, 3, 4, 5]);
    assert!(state.loaded_at.is_some());
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn loading_never_clears_with_stale_items() {
    let (store, _) = store_with(ScriptedFetcher::new().then_ok(600, catalog_items()), LoadPolicy::default());
    let mut loading = store.loading();

    let watcher = {
        let store = store.clone();
        let mut loading = store.loading();
        tokio::spawn(async move {
            while loading.changed().await.is_ok() {
                let flag = *loading.borrow_and_update();
                let state = store.state();
                if !flag {
                    assert_eq!(ids(&state.items), vec![1, 2, 3, 4, 5]);
                    assert!(!state.loading);
                    return;
                }
            }
        })
    };

    store.load();
    loading.wait_for(|flag| !*flag).await.unwrap();

    assert_eq!(ids(&store.items().borrow()), vec![1, 2, 3, 4, 5]);
    watcher.await.unwrap();
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_load_sets_error_and_keeps_previous_items() {
    let fetcher = Arc::new(ScriptedFetcher::new().then_err(600));
    let store = ItemStore::with_items(fetcher, LoadPolicy::default(), vec![blade()]);
    let before = store.snapshot();
    let mut loading = store.loading();
    let mut error = store.error();

    let handle = store.load();
    assert!(*loading.borrow_and_update());

    handle.await.unwrap();

    assert!(loading.has_changed().unwrap());
    assert!(!*loading.borrow_and_update());
    assert_eq!(error.borrow_and_update().as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(Arc::ptr_eq(&store.snapshot(), &before), "collection is untouched");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn new_load_clears_previous_error_immediately() {
    let (store, _) = store_with(
        ScriptedFetcher::new().then_err(600).then_err(600).then_ok(600, catalog_items()),
        LoadPolicy::default(),
    );

    store.load().await.unwrap();
    assert_eq!(store.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));

    let second = store.load();
    assert_eq!(store.state().error, None, "cleared before the retry resolves");
    assert_eq!(*store.error().borrow(), None);
    second.await.unwrap();
    assert_eq!(store.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));

    let third = store.load();
    assert_eq!(store.state().error, None);
    third.await.unwrap();

    let state = store.state();
    assert_eq!(state.error, None);
    assert!(!state.loading);
    assert_eq!(state.items.len(), 5);
}

#[tokio::test(flavor = "current_thread")]
async fn deactivate_is_idempotent() {
    let store = ItemStore::with_items(Arc::new(ScriptedFetcher::new()), LoadPolicy::default(), catalog_items());

    assert!(store.deactivate(3));
    let once = store.snapshot();

    assert!(!store.deactivate(3));
    let twice = store.snapshot();

    assert_eq!(once, twice);
    assert!(!twice.iter().find(|item| item.id == 3).unwrap().is_active);
    assert_eq!(twice.iter().filter(|item| item.is_active).count(), 4);
}

#[tokio::test(flavor = "current_thread")]
async fn deactivating_unknown_id_changes_nothing() {
    let store = ItemStore::with_items(Arc::new(ScriptedFetcher::new()), LoadPolicy::default(), catalog_items());
    let before = store.snapshot();
    let items = store.items();

    assert!(!store.deactivate(42));

    assert!(Arc::ptr_eq(&store.snapshot(), &before));
    assert!(!items.has_changed().unwrap(), "no notification for a no-op");
}

#[tokio::test(flavor = "current_thread")]
async fn deactivation_leaves_held_snapshots_valid() {
    let store = ItemStore::with_items(Arc::new(ScriptedFetcher::new()), LoadPolicy::default(), catalog_items());
    let held = store.snapshot();
    let mut items = store.items();

    store.deactivate(1);

    assert!(held.iter().all(|item| item.is_active));
    assert!(items.has_changed().unwrap());
    let after = items.borrow_and_update().clone();
    assert!(!after[0].is_active);
    assert_eq!(after[0].title, held[0].title);
    assert_eq!(after[1..], held[1..]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn overlapping_loads_last_resolution_wins() {
    let first = vec![blade()];
    let second = catalog_items();
    let (store, _) = store_with(
        ScriptedFetcher::new().then_ok(900, first.clone()).then_ok(100, second),
        LoadPolicy::LastWriteWins,
    );

    let slow = store.load();
    let fast = store.load();

    fast.await.unwrap();
    let state = store.state();
    assert_eq!(state.items.len(), 5);
    assert!(!state.loading, "first resolution clears loading while the slow fetch is still in flight");

    slow.await.unwrap();
    assert_eq!(*store.snapshot(), first, "the slow, older request overwrote the newer result");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn latest_request_policy_discards_superseded_results() {
    let (store, _) = store_with(
        ScriptedFetcher::new().then_ok(900, vec![blade()]).then_ok(100, catalog_items()),
        LoadPolicy::LatestRequestWins,
    );

    let slow = store.load();
    let fast = store.load();

    fast.await.unwrap();
    slow.await.unwrap();

    let state = store.state();
    assert_eq!(ids(&state.items), vec![1, 2, 3, 4, 5]);
    assert!(!state.loading);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn latest_request_policy_keeps_loading_until_latest_resolves() {
    let (store, _) = store_with(
        ScriptedFetcher::new().then_err(100).then_ok(900, catalog_items()),
        LoadPolicy::LatestRequestWins,
    );

    let stale = store.load();
    let latest = store.load();

    stale.await.unwrap();
    let state = store.state();
    assert!(state.loading);
    assert_eq!(state.error, None, "the stale failure is not surfaced");
    assert!(state.items.is_empty());

    latest.await.unwrap();
    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.items.len(), 5);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn unresolved_fetch_leaves_loading_set() {
    let store = ItemStore::new(Arc::new(NeverFetcher), LoadPolicy::default());

    let handle = store.load();
    tokio::time::sleep(Duration::from_secs(3600)).await;

    assert!(store.state().loading);
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn fetched_collection_with_repeated_id_is_rejected() {
    let duplicated = vec![blade(), Item::new(1, "Blade copy", "Spare blade.", 9.99, "Accessories")];
    let fetcher = Arc::new(FixedFetcher::succeeding(duplicated, Duration::from_millis(600)));
    let store = ItemStore::with_items(fetcher, LoadPolicy::default(), catalog_items());
    let before = store.snapshot();

    store.load().await.unwrap();

    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(Arc::ptr_eq(&state.items, &before), "collection is untouched");
    assert_eq!(state.loaded_at, None);
}

#[tokio::test(flavor = "current_thread")]
async fn deactivate_covers_every_item_sharing_the_id() {
    let items = vec![
        blade(),
        Item::new(1, "Blade copy", "Spare blade.", 9.99, "Accessories"),
        Item::new(2, "Vinyl", "Durable vinyl.", 5.00, "Materials"),
    ];
    let store = ItemStore::with_items(Arc::new(ScriptedFetcher::new()), LoadPolicy::default(), items);

    assert!(store.deactivate(1));
    assert!(!store.deactivate(1));

    let snapshot = store.snapshot();
    assert!(snapshot.iter().filter(|item| item.id == 1).all(|item| !item.is_active));

    let view = derive_view(&snapshot, &ViewParams::default());
    assert_eq!(ids(&view), vec![2]);
}
