use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Translation completeness checks.
///
/// 1. Every non-fallback locale provides at least the keys of the fallback
///    (en-US) `pitchcraft-ui.ftl`.
/// 2. Every `t!("...")` literal under `src/` exists in the fallback.
///
/// The FTL parser is deliberately simple: comment, blank, attribute and
/// continuation lines are skipped, and `key =` lines define messages.
const EN_US: &str = include_str!("../i18n/en-US/pitchcraft-ui.ftl");
const ZH_CN: &str = include_str!("../i18n/zh-CN/pitchcraft-ui.ftl");

#[test]
fn fluent_domain_matches_locale_files() {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = fs::read_to_string(manifest.join("i18n.toml")).expect("read i18n.toml");
    let domain = config
        .lines()
        .filter_map(|line| line.trim().strip_prefix("domain"))
        .filter_map(|rest| rest.trim().strip_prefix('='))
        .map(|value| value.trim().trim_matches('"').to_string())
        .next()
        .expect("i18n.toml sets a fluent domain");

    for locale in ["en-US", "zh-CN"] {
        let file = manifest.join("i18n").join(locale).join(format!("{domain}.ftl"));
        assert!(file.is_file(), "missing {}", file.display());
    }
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback_keys = extract_keys(EN_US);
    assert!(
        !fallback_keys.is_empty(),
        "Fallback (en-US) contains no keys."
    );
    assert_no_dup_keys(EN_US, "en-US");

    let locales: &[(&str, &str)] = &[
        ("zh-CN", ZH_CN),
        // Add new locales here.
    ];

    let mut failures = Vec::new();

    for (locale, src) in locales {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<&String> = fallback_keys.iter().filter(|k| !keys.contains(*k)).collect();

        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().cloned().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
            failures.join("\n\n")
        );
    }
}

#[test]
fn every_referenced_key_exists_in_fallback() {
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let fallback_keys = extract_keys(EN_US);

    let mut missing: Vec<String> = extract_keys_from_source(&src_root)
        .into_iter()
        .filter(|k| !fallback_keys.contains(k))
        .collect();
    missing.sort();

    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in fallback ({}):\n{}",
        missing.len(),
        missing.join("\n")
    );
}

/// Extract message keys from a Fluent file (simple heuristic).
fn extract_keys(src: &str) -> HashSet<String> {
    let mut keys = HashSet::new();

    for line in src.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') || line.starts_with('-') {
            continue;
        }
        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            if is_key(key) {
                keys.insert(key.to_string());
            }
        }
    }

    keys
}

fn is_key(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
}

/// All `t!("literal"` occurrences in `.rs` files below `root`.
fn extract_keys_from_source(root: &Path) -> HashSet<String> {
    let mut found = HashSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for (idx, _) in content.match_indices("t!(\"") {
            let rest = &content[idx + 4..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if is_key(key) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

/// Assert no duplicate key definitions in a single FTL file.
fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('.') {
            continue;
        }
        if let Some(eq_pos) = trimmed.find('=') {
            let key = trimmed[..eq_pos].trim();
            if is_key(key) && !seen.insert(key.to_string()) {
                dups.insert(format!("{key}  (line: \"{line}\")"));
            }
        }
    }

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}
