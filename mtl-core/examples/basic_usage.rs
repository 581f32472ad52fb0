//! Basic usage example for MTL record-set signatures
//!
//! This example demonstrates:
//! - Building a Merkle tree over a record set
//! - Chaining roots across epochs
//! - Generating and verifying inclusion proofs
//!
//! Run with: cargo run -p mtl-core --example basic_usage

use mtl_core::{observe, verify_inclusion, EpochState, MemoryEpochState, MerkleTree};
use mtl_types::{HashAlgorithm, RecordSetId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("MTL Record Set Example");
    println!("======================\n");

    let id = RecordSetId::new("aiori.in.", "AAAA")?;
    let mut records = vec![
        "aiori.in. 3600 IN AAAA 2001:db8::1",
        "aiori.in. 3600 IN AAAA 2001:db8::2",
        "aiori.in. 3600 IN AAAA 2001:db8::3",
    ];
    let epochs = MemoryEpochState::new();

    for epoch in 1..=3 {
        if epoch == 3 {
            records.push("aiori.in. 3600 IN AAAA 2001:db8::4");
        }

        let tree = MerkleTree::from_records(HashAlgorithm::Sha256, &records);
        let root = tree.root()?;
        let prior = epochs.prior_root(&id)?;
        let signature = observe(&epochs, HashAlgorithm::Sha256, &id, root)?;

        println!("Epoch {} ({} records):", epoch, records.len());
        println!("  Root:       {}", root);
        println!("  Prior root: {}", prior);
        println!("  Signature:  {}", signature);

        for (i, record) in records.iter().enumerate() {
            let proof = tree.prove(i)?;
            verify_inclusion(record.as_bytes(), &proof, &root)?;
            println!(
                "  ✓ leaf {} verified ({} levels, {} carried)",
                i,
                proof.depth(),
                proof.carried_levels()
            );
        }
        println!();
    }

    println!("✓ Example completed successfully!");

    Ok(())
}
