//! Integration tests for sharing a sealed configuration across threads.

use std::sync::Arc;
use std::thread;

use fieldmap_fields::FieldConfiguration;

use crate::common::TestHarness;

#[test]
fn test_concurrent_resolution_is_deterministic() {
    let config = Arc::new(FieldConfiguration::standard());
    let harness = Arc::new(TestHarness::new());
    let expected = harness.resolve(&config, "/sites/news/article.xml");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = Arc::clone(&config);
            let harness = Arc::clone(&harness);
            thread::spawn(move || {
                (0..25)
                    .map(|_| harness.resolve(&config, "/sites/news/article.xml"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for doc in handle.join().unwrap() {
            assert_eq!(doc, expected);
        }
    }
}

#[test]
fn test_configuration_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FieldConfiguration>();
}
