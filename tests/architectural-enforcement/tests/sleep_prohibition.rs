//! Integration Test: Sleep Prohibition
//!
//! The coordination core is event-driven: busy counts and pending answers
//! move through watch and oneshot channels, never through polling. A sleep
//! in production code means somebody is waiting by guessing instead of
//! waiting on an event.
//!
//! **Policy**: Production code in `core/src` MUST NOT call sleep methods.
//! **Exceptions**: Test code (the `#[cfg(test)]` module at the end of a file)

use std::fs;
use std::path::{Path, PathBuf};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_core_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        eprintln!("\nWait on a channel instead:");
        eprintln!("  - BusyFlag::wait_idle() to wait for work to finish");
        eprintln!("  - InteractionBroker::subscribe() to wait for slot changes");
        eprintln!("  - A PendingAnswer to wait for the user's decision");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all sleep() calls in production code
fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();
    check_directory(&workspace_root().join("core/src"), &mut violations);
    violations
}

/// Resolve the workspace root from this package's manifest directory
///
/// This package lives at `<root>/tests/architectural-enforcement`, so the
/// root is always two levels up regardless of where cargo was invoked.
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn check_directory(dir: &Path, violations: &mut Vec<String>) {
    assert!(
        dir.exists(),
        "expected source directory {} to exist",
        dir.display()
    );

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            check_file(entry.path(), violations);
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (line_number, line) in sleep_violations_in(&content) {
        violations.push(format!("{}:{} - {}", path.display(), line_number, line));
    }
}

/// Sleep calls in the production region of one file's source text
///
/// Source files in this workspace keep their test module last, so everything
/// after the `#[cfg(test)]` attribute is test code.
fn sleep_violations_in(content: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim() == "#[cfg(test)]" {
            break;
        }

        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);

        if code_part.contains("::sleep(") || code_part.contains(".sleep(") {
            violations.push((idx + 1, line.trim().to_string()));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_flags_bare_sleep() {
        // This test verifies that the detector itself works
        let source = "async fn refresh() {\n    tokio::time::sleep(delay).await;\n}\n";

        let violations = sleep_violations_in(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, 2);
    }

    #[test]
    fn test_detector_ignores_trailing_test_module() {
        let source = "fn run() {}\n\n#[cfg(test)]\nmod tests {\n    fn slow() { std::thread::sleep(d); }\n}\n";

        assert!(
            sleep_violations_in(source).is_empty(),
            "Should ignore sleeps after the test-module boundary"
        );
    }

    #[test]
    fn test_detector_ignores_comments() {
        let source = "fn run() {\n    // never call thread::sleep() here\n    work();\n}\n";

        assert!(
            sleep_violations_in(source).is_empty(),
            "Should ignore sleeps mentioned in comments"
        );
    }
}
