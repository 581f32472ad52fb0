//! Text rendering of digests, root hints and query reports

use std::fmt::Write as _;

use mtl_types::Digest;

use crate::query::QueryReport;

/// Resource-record hint publishing a root:
/// `<name> <ttl> IN TXT "mtlroot=<hex>"`
pub fn txt_hint(name: &str, ttl: u32, root: &Digest) -> String {
    format!("{} {} IN TXT \"mtlroot={}\"", name, ttl, root.to_hex())
}

/// One line per proof level, `(none)` where the node was carried
pub fn proof_lines(siblings: &[Option<Digest>]) -> Vec<String> {
    siblings
        .iter()
        .enumerate()
        .map(|(level, sibling)| match sibling {
            Some(hash) => format!("Level {} sibling hash: {}", level, hash),
            None => format!("Level {} sibling hash: (none)", level),
        })
        .collect()
}

/// Human-readable report of one query
pub fn render_report(report: &QueryReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "--- RRset ({}) ---", report.record_set.rtype());
    for record in &report.records {
        let _ = writeln!(out, "{}", record);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "MTL Signature: {}", report.signature);
    let _ = writeln!(out, "Merkle Root Hint (TXT): {}", report.txt_hint);

    let _ = writeln!(out);
    let leaf = report
        .records
        .get(report.proof.leaf_index as usize)
        .map(String::as_str)
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "Merkle Proof for leaf {} ({}):",
        report.proof.leaf_index, leaf
    );
    for line in proof_lines(&report.proof.siblings) {
        let _ = writeln!(out, "{}", line);
    }

    out
}
