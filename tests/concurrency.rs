//! Concurrent first-time resolution.

use std::sync::{Arc, Barrier};

use module_host::config::Environment;
use module_host::ModuleHost;

mod common;

use common::TestGraph;

#[test]
fn test_overlapping_roots_construct_each_module_once() {
    let graph = TestGraph::new();
    let edges: &[(&str, &[&str])] = &[
        ("identity", &["persistence"]),
        ("subscriptions", &["identity", "payments"]),
        ("payments", &["persistence"]),
        ("storage", &["persistence"]),
        ("persistence", &[]),
    ];
    let host = ModuleHost::new(graph.catalog(edges), Environment::default());
    let root_sets: [&[&str]; 4] = [
        &["subscriptions"],
        &["identity", "storage"],
        &["payments"],
        &["storage", "subscriptions"],
    ];

    let threads = 16;
    let barrier = Barrier::new(threads);
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let host = &host;
                let barrier = &barrier;
                let roots = root_sets[i % root_sets.len()];
                scope.spawn(move || {
                    barrier.wait();
                    host.resolve(roots).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (key, _) in edges {
        assert_eq!(graph.constructed.count(key), 1, "{key} constructed more than once");
    }

    // Every caller saw the registry's instance.
    for resolved in &results {
        for module in resolved {
            let cached = host.registry().instance(module.key.as_str()).unwrap();
            assert!(Arc::ptr_eq(&module.instance, &cached));
        }
    }
}
