// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fs, path::Path};

use serde_json::Value;

/// File names in `dir`, sorted, as one comma-separated line.
#[allow(dead_code)]
pub fn listing(dir: &Path) -> String {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.join(", ")
}

#[allow(dead_code)]
pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read descriptor");
    serde_json::from_str(&text).expect("descriptor is valid JSON")
}

/// The (target, guide) pair of a descriptor, checking the fixed parts on the way.
#[allow(dead_code)]
pub fn rna_pair(doc: &Value) -> (String, String) {
    let seqs = doc["sequences"].as_array().expect("sequences array");
    assert_eq!(seqs.len(), 3);
    assert_eq!(seqs[0]["protein"]["id"], serde_json::json!(["A"]));
    assert_eq!(seqs[1]["rna"]["id"], serde_json::json!(["B"]));
    assert_eq!(seqs[2]["rna"]["id"], serde_json::json!(["C"]));
    assert_eq!(doc["modelSeeds"], serde_json::json!([1]));
    assert_eq!(doc["dialect"], "alphafold3");
    assert_eq!(doc["version"], 1);
    (
        seqs[1]["rna"]["sequence"].as_str().expect("target").to_string(),
        seqs[2]["rna"]["sequence"].as_str().expect("guide").to_string(),
    )
}
