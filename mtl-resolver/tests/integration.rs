//! End-to-end query tests for the resolver

use std::sync::Arc;

use mtl_core::{chain, verify_inclusion, verify_signature, MemoryEpochState};
use mtl_resolver::{Resolver, ResolverConfig, ZoneStore};
use mtl_types::{hash_pair, leaf_hash, Digest, HashAlgorithm};

fn memory_config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.epoch.path = None;
    config
}

fn resolver_with(store: ZoneStore, epochs: &Arc<MemoryEpochState>) -> Resolver {
    Resolver::new(Box::new(store), Box::new(Arc::clone(epochs)))
}

#[test]
fn test_root_matches_manual_construction() {
    let resolver = Resolver::from_config(&memory_config()).unwrap();
    let report = resolver.query("AAAA", 0).unwrap();

    let l0 = leaf_hash(b"aiori.in. 3600 IN AAAA 2001:db8::1");
    let l1 = leaf_hash(b"aiori.in. 3600 IN AAAA 2001:db8::2");
    let l2 = leaf_hash(b"aiori.in. 3600 IN AAAA 2001:db8::3");

    assert_eq!(report.root, hash_pair(&hash_pair(&l0, &l1), &l2));
    assert_eq!(report.proof.siblings, vec![Some(l1), Some(l2)]);
}

#[test]
fn test_chaining_across_epochs() {
    let epochs = Arc::new(MemoryEpochState::new());
    let config = memory_config();

    let store = ZoneStore::from_config(&config).unwrap();
    let resolver = resolver_with(store.clone(), &epochs);

    // Epoch 1: never seen, chained against zero
    let first = resolver.query("A", 0).unwrap();
    let r1 = first.root;
    assert_eq!(*first.signature.digest(), hash_pair(&r1, &Digest::ZERO));

    // Epoch 2: same contents chain to themselves
    let second = resolver.query("A", 0).unwrap();
    assert_eq!(second.root, r1);
    assert_eq!(*second.signature.digest(), hash_pair(&r1, &r1));

    // Epoch 3: one record changed
    let mut changed = store;
    changed
        .insert(
            "A",
            [
                "aiori.in. 3600 IN A 192.0.2.1",
                "aiori.in. 3600 IN A 192.0.2.2",
                "aiori.in. 3600 IN A 192.0.2.3",
                "aiori.in. 3600 IN A 192.0.2.4",
                "aiori.in. 3600 IN A 192.0.2.6",
            ],
        )
        .unwrap();
    let resolver = resolver_with(changed, &epochs);

    let third = resolver.query("A", 4).unwrap();
    let r2 = third.root;
    assert_ne!(r2, r1);
    assert_eq!(*third.signature.digest(), hash_pair(&r2, &r1));
    assert_eq!(resolver.prior_root("A").unwrap(), r2);
    assert!(verify_signature(HashAlgorithm::Sha256, &r2, &r1, &third.signature).is_ok());
}

#[test]
fn test_every_leaf_of_every_set_verifies() {
    let resolver = Resolver::from_config(&memory_config()).unwrap();

    for rtype in ["A", "AAAA", "TXT"] {
        let tree = resolver.tree(rtype).unwrap();
        let root = tree.root().unwrap();

        for i in 0..tree.leaf_count() {
            let report = resolver.query(rtype, i).unwrap();
            assert_eq!(report.root, root);
            assert!(verify_inclusion(report.records[i].as_bytes(), &report.proof, &root).is_ok());
        }
    }
}

#[test]
fn test_sled_epochs_persist_between_resolvers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = ResolverConfig::default();
    config.epoch.path = Some(temp_dir.path().join("epochs"));

    let r1 = {
        let resolver = Resolver::from_config(&config).unwrap();
        resolver.query("TXT", 0).unwrap().root
    };

    let resolver = Resolver::from_config(&config).unwrap();
    let report = resolver.query("TXT", 1).unwrap();
    assert_eq!(report.signature, chain(HashAlgorithm::Sha256, &r1, &r1));

    let roots = resolver.latest_roots().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].0.to_string(), "aiori.in./TXT");
    assert_eq!(roots[0].1, r1);
}

#[test]
fn test_report_serializes_to_json() {
    let resolver = Resolver::from_config(&memory_config()).unwrap();
    let report = resolver.query("TXT", 2).unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["record_set"], "aiori.in./TXT");
    assert_eq!(value["algorithm"], "sha256");
    assert_eq!(value["root"], report.root.to_hex());
    assert_eq!(value["signature"], report.signature.to_hex());
    assert_eq!(value["proof"]["leaf_index"], 2);
    assert!(value["proof"]["siblings"][0].is_null());
}
