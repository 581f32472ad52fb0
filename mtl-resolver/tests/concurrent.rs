//! Concurrent query tests for the resolver

use std::collections::HashSet;
use std::sync::Arc;

use mtl_core::chain;
use mtl_resolver::{Resolver, ResolverConfig};
use mtl_types::{Digest, HashAlgorithm};

fn shared_resolver() -> Arc<Resolver> {
    let mut config = ResolverConfig::default();
    config.epoch.path = None;
    Arc::new(Resolver::from_config(&config).unwrap())
}

#[test]
fn test_concurrent_queries_same_set() {
    let resolver = shared_resolver();
    let queries = 32;

    let handles: Vec<_> = (0..queries)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || resolver.query("A", 0).expect("query failed"))
        })
        .collect();

    let reports: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("query thread panicked"))
        .collect();

    // Same contents every time: exactly one query saw the zero prior root
    let root = reports[0].root;
    let first = chain(HashAlgorithm::Sha256, &root, &Digest::ZERO);
    let rest = chain(HashAlgorithm::Sha256, &root, &root);

    let firsts = reports.iter().filter(|r| r.signature == first).count();
    let others = reports.iter().filter(|r| r.signature == rest).count();
    assert_eq!(firsts, 1);
    assert_eq!(others, queries - 1);
}

#[test]
fn test_concurrent_queries_distinct_sets() {
    let resolver = shared_resolver();

    let handles: Vec<_> = ["A", "AAAA", "TXT"]
        .into_iter()
        .flat_map(|rtype| (0..5).map(move |_| rtype))
        .map(|rtype| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || resolver.query(rtype, 0).expect("query failed"))
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let report = handle.join().expect("query thread panicked");
        ids.insert(report.record_set.clone());
    }
    assert_eq!(ids.len(), 3);

    for rtype in ["A", "AAAA", "TXT"] {
        let root = resolver.tree(rtype).unwrap().root().unwrap();
        assert_eq!(resolver.prior_root(rtype).unwrap(), root);
    }
}
