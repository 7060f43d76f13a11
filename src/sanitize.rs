// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::sync::OnceLock;

use regex::Regex;

fn forbidden_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static pattern"))
}

/// Makes a free-form guide identifier usable as a file name: each of `<>:"/\|?*` becomes an
/// underscore, then leading and trailing dots and spaces are dropped. May return "".
pub fn sanitize_id(raw: &str) -> String {
    forbidden_chars()
        .replace_all(raw, "_")
        .trim_matches(|c: char| c == '.' || c == ' ')
        .to_string()
}

/// The name a row's output file goes by: its sanitized identifier, or `sequence_<n>` if that
/// came out empty (`n` is the 1-based row number).
pub fn job_name(raw: &str, row_number: usize) -> String {
    let name = sanitize_id(raw);
    if name.is_empty() {
        format!("sequence_{}", row_number)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORBIDDEN: &str = "<>:\"/\\|?*";

    #[test]
    fn test_sanitize_replaces_forbidden() {
        assert_eq!(sanitize_id("g:1"), "g_1");
        assert_eq!(sanitize_id("chr1|+|1234"), "chr1_+_1234");
        assert_eq!(sanitize_id(r#"a<b>c"d/e\f?g*h"#), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_sanitize_trims_dots_and_spaces() {
        assert_eq!(sanitize_id("  .guide 7. "), "guide 7");
        assert_eq!(sanitize_id("..."), "");
        assert_eq!(sanitize_id(""), "");
    }

    #[test]
    fn test_sanitize_keeps_inner_dots() {
        assert_eq!(sanitize_id("CD.fasta.12"), "CD.fasta.12");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["g:1", " .x|y. ", "...", "plain", ". :a: .", "*?*"] {
            let once = sanitize_id(raw);
            assert_eq!(sanitize_id(&once), once, "not idempotent on {:?}", raw);
        }
    }

    #[test]
    fn test_sanitized_has_no_forbidden_chars() {
        for raw in [" <a>:b\"c/d\\e|f?g*h. ", "..//..", "? ?"] {
            let s = sanitize_id(raw);
            assert!(!s.chars().any(|c| FORBIDDEN.contains(c)), "{:?}", s);
            assert!(!s.starts_with(['.', ' ']) && !s.ends_with(['.', ' ']), "{:?}", s);
        }
    }

    #[test]
    fn test_job_name_fallback() {
        assert_eq!(job_name("g:1", 1), "g_1");
        assert_eq!(job_name("", 2), "sequence_2");
        assert_eq!(job_name(" . ", 17), "sequence_17");
    }
}
