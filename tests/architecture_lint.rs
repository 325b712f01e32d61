//! Architecture enforcement tests.
//!
//! Layering rules that keep the crate testable without a real repository:
//!
//! 1. **git2 isolation** - only `src/git/` talks to libgit2
//! 2. **anyhow isolation** - library layers return typed errors
//! 3. **Trait seam** - the Doctor and the aggregator see `&dyn Repository`
//! 4. **No panics** - non-test code does not unwrap

use std::fs;
use std::path::{Path, PathBuf};

/// All `.rs` files under `dir`, recursively.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read source directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// The part of a file before its `#[cfg(test)]` module.
fn non_test_source(path: &Path) -> String {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    match content.find("#[cfg(test)]") {
        Some(idx) => content[..idx].to_string(),
        None => content,
    }
}

fn assert_no_violations(violations: Vec<String>) {
    assert!(
        violations.is_empty(),
        "Architecture violations found:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn git2_only_in_git_module() {
    let git_dir = Path::new("src/git");
    let violations: Vec<String> = rust_files(Path::new("src"))
        .into_iter()
        .filter(|path| !path.starts_with(git_dir))
        .filter(|path| non_test_source(path).contains("git2::"))
        .map(|path| format!("{}: uses git2 outside src/git", path.display()))
        .collect();

    assert_no_violations(violations);
}

#[test]
fn anyhow_only_at_the_edge() {
    let allowed = [Path::new("src/cli"), Path::new("src/main.rs")];
    let violations: Vec<String> = rust_files(Path::new("src"))
        .into_iter()
        .filter(|path| !allowed.iter().any(|a| path.starts_with(a)))
        .filter(|path| non_test_source(path).contains("anyhow"))
        .map(|path| format!("{}: library layers must return typed errors", path.display()))
        .collect();

    assert_no_violations(violations);
}

#[test]
fn doctor_and_check_depend_on_the_trait() {
    let mut violations = Vec::new();
    for file in ["src/doctor/mod.rs", "src/engine/check.rs"] {
        let source = non_test_source(Path::new(file));
        if !source.contains("dyn Repository") {
            violations.push(format!("{}: must accept a dyn Repository", file));
        }
    }
    let doctor = non_test_source(Path::new("src/doctor/mod.rs"));
    if doctor.contains("Git::open") || doctor.contains("use crate::git::Git") {
        violations.push("src/doctor/mod.rs: must not open repositories itself".to_string());
    }

    assert_no_violations(violations);
}

#[test]
fn no_unwrap_outside_tests() {
    let violations: Vec<String> = rust_files(Path::new("src"))
        .into_iter()
        .filter(|path| {
            let source = non_test_source(path);
            // Doc examples are compiled as tests.
            let code: String = source
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .collect::<Vec<_>>()
                .join("\n");
            code.contains(".unwrap()") || code.contains(".expect(")
        })
        .map(|path| format!("{}: unwrap/expect in non-test code", path.display()))
        .collect();

    assert_no_violations(violations);
}
