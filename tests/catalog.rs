mod support;

use catalog_view::app::{derive_view, handle_event, Catalog, Event, SortKey, ViewParams};
use catalog_view::store::{sample_catalog, FixedFetcher, ItemStore, LoadPolicy, LOAD_FAILED_MESSAGE};
use catalog_view::ui::StatusBanner;
use catalog_view::{initialize_with_fetcher, Config, Item};
use std::sync::Arc;
use std::time::Duration;
use support::{catalog_items, ids, ScriptedFetcher};

fn loaded_catalog(params: ViewParams) -> Catalog {
    let store = ItemStore::with_items(Arc::new(ScriptedFetcher::new()), LoadPolicy::default(), catalog_items());
    Catalog::new(store, params)
}

#[tokio::test(flavor = "current_thread")]
async fn first_output_reflects_all_current_inputs() {
    let catalog = loaded_catalog(ViewParams::from_inputs("", "all", "price-asc"));
    let mut view = catalog.view();

    let first = view.next().await.unwrap();
    assert_eq!(ids(&first), vec![4, 5, 3, 1, 2]);
}

#[tokio::test(flavor = "current_thread")]
async fn search_category_and_sort_compose() {
    let catalog = loaded_catalog(ViewParams::default());
    let mut view = catalog.view();
    view.wait_for(|items| items.len() == 5).await.unwrap();

    assert!(catalog.set_search("machine"));
    let searched = view.next().await.unwrap();
    assert_eq!(ids(&searched), vec![1, 2]);

    assert!(catalog.set_sort("price-desc"));
    let sorted = view.next().await.unwrap();
    assert_eq!(ids(&sorted), vec![2, 1]);

    assert!(catalog.set_category("Heat Press"));
    let filtered = view.next().await.unwrap();
    assert!(filtered.is_empty());

    assert!(catalog.set_search(""));
    let press = view.next().await.unwrap();
    assert_eq!(ids(&press), vec![3]);
}

#[tokio::test(flavor = "current_thread")]
async fn deactivated_item_is_excluded_under_every_parameter_combination() {
    let catalog = loaded_catalog(ViewParams::default());
    let mut view = catalog.view();
    view.wait_for(|items| items.len() == 5).await.unwrap();

    assert!(catalog.deactivate(5));
    let after = view.next().await.unwrap();
    assert_eq!(ids(&after), vec![3, 1, 2, 4]);

    let probes: [(&str, &str, &str); 4] = [
        ("blade", "all", "title-asc"),
        ("", "Accessories", "price-desc"),
        ("FINE", "Accessories", "unsorted"),
        ("", "all", "price-asc"),
    ];

    for (search, category, sort) in probes {
        catalog.set_search(search);
        catalog.set_category(category);
        catalog.set_sort(sort);

        let params = catalog.params();
        let expected = derive_view(&catalog.store().snapshot(), &params);
        assert!(expected.iter().all(|item| item.id != 5), "{params:?}");

        let published = view.wait_for(|items| items == expected.as_slice()).await.unwrap();
        assert!(published.iter().all(|item| item.id != 5), "{params:?}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_sort_key_passes_items_through_in_store_order() {
    let catalog = loaded_catalog(ViewParams::default());
    let mut view = catalog.view();
    view.wait_for(|items| ids(items) == vec![3, 5, 1, 2, 4]).await.unwrap();

    assert!(catalog.set_sort("newest-first"));
    assert_eq!(catalog.params().sort, SortKey::Unsorted);

    let unsorted = view.next().await.unwrap();
    assert_eq!(ids(&unsorted), vec![1, 2, 3, 4, 5]);
}

#[tokio::test(flavor = "current_thread")]
async fn subscribers_observe_identical_sequences() {
    let catalog = loaded_catalog(ViewParams::default());
    let mut first = catalog.view();
    let mut second = catalog.view();

    catalog.set_sort_key(SortKey::PriceDesc);

    let a = first.wait_for(|items| ids(items) == vec![2, 1, 3, 5, 4]).await.unwrap();
    let b = second.wait_for(|items| ids(items) == vec![2, 1, 3, 5, 4]).await.unwrap();
    assert!(Arc::ptr_eq(&a, &b), "one recomputation shared by every subscriber");

    let late = catalog.view();
    assert_eq!(late.current(), Some(a));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn repeating_a_value_is_not_a_change() {
    let catalog = loaded_catalog(ViewParams::default());
    let mut view = catalog.view();
    view.wait_for(|items| items.len() == 5).await.unwrap();

    assert!(!catalog.set_search(""));
    assert!(!catalog.set_category("all"));
    assert!(!catalog.set_sort("title-asc"));
    assert!(!catalog.deactivate(99));

    let quiet = tokio::time::timeout(Duration::from_secs(5), view.next()).await;
    assert!(quiet.is_err(), "no recomputation for unchanged inputs");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn load_through_initialize_populates_the_view() {
    let config = Config {
        sort: "price-asc".to_string(),
        ..Config::default()
    };
    let fetcher = FixedFetcher::succeeding(sample_catalog().unwrap(), config.fetch_delay());
    let catalog = initialize_with_fetcher(&config, Arc::new(fetcher));
    let mut view = catalog.view();

    let empty = view.next().await.unwrap();
    assert!(empty.is_empty());
    let vm = catalog.compute_viewmodel(&empty);
    assert_eq!(vm.empty_state.unwrap().message, "No products loaded");

    let handle = catalog.load();
    assert_eq!(catalog.compute_viewmodel(&empty).status, Some(StatusBanner::Loading));

    let loaded = view.wait_for(|items| !items.is_empty()).await.unwrap();
    assert_eq!(ids(&loaded), vec![4, 5, 3, 1, 2]);
    handle.await.unwrap();

    let vm = catalog.compute_viewmodel(&loaded);
    assert_eq!(vm.header.title, " Products (5) ");
    assert_eq!(vm.rows[0].price, "$12.99");
    assert!(vm.status.is_none());
    assert!(vm.header.subtitle.is_some());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_load_surfaces_error_banner() {
    let fetcher = FixedFetcher::failing("Mock API error", Duration::from_millis(600));
    let catalog = initialize_with_fetcher(&Config::default(), Arc::new(fetcher));
    let mut error = catalog.error();

    catalog.load().await.unwrap();

    assert!(error.has_changed().unwrap());
    assert_eq!(error.borrow_and_update().as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(!*catalog.loading().borrow());

    let vm = catalog.compute_viewmodel(&[]);
    assert_eq!(vm.status, Some(StatusBanner::Error(LOAD_FAILED_MESSAGE.to_string())));
}

#[tokio::test(flavor = "current_thread")]
async fn categories_follow_active_items() {
    let catalog = loaded_catalog(ViewParams::default());

    assert_eq!(
        catalog.categories(),
        vec!["all", "Machines", "Heat Press", "Materials", "Accessories"]
    );

    catalog.deactivate(5);
    assert_eq!(catalog.categories(), vec!["all", "Machines", "Heat Press", "Materials"]);

    catalog.deactivate(1);
    assert_eq!(catalog.categories(), vec!["all", "Machines", "Heat Press", "Materials"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn events_drive_the_catalog() {
    let items: Vec<Item> = catalog_items();
    let fetcher = ScriptedFetcher::new().then_ok(600, items);
    let catalog = initialize_with_fetcher(&Config::default(), Arc::new(fetcher));
    let mut view = catalog.view();

    assert!(handle_event(&catalog, &Event::Load));
    view.wait_for(|items| items.len() == 5).await.unwrap();

    assert!(handle_event(&catalog, &Event::SetCategory("Machines".to_string())));
    assert!(handle_event(&catalog, &Event::Deactivate(2)));
    assert!(!handle_event(&catalog, &Event::Deactivate(2)));
    assert!(!handle_event(&catalog, &Event::SetCategory("Machines".to_string())));

    let machines = view.wait_for(|items| ids(items) == vec![1]).await.unwrap();
    assert_eq!(machines[0].title, "Machine Tool");
}
