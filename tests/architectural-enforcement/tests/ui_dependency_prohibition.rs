//! Integration Test: UI Dependency Prohibition
//!
//! The coordination core exists so view models never touch a rendering
//! technology. The crate documentation promises zero UI-framework
//! dependencies; this test keeps that promise enforced rather than
//! aspirational.
//!
//! **Policy**: `colloquy-core` MUST NOT depend on or import a UI framework.
//! **Scope**: The core manifest and every source file under `core/src`

use std::fs;
use std::path::{Path, PathBuf};

/// Crates that would tie the core to one rendering technology
const FORBIDDEN_UI_CRATES: &[&str] = &[
    "ratatui", "crossterm", "cursive", "egui", "eframe", "iced", "druid", "gtk", "gtk4", "slint",
    "tauri", "yew", "dioxus", "leptos", "winit",
];

/// Test that the core manifest declares no UI-framework dependency
#[test]
fn test_core_manifest_declares_no_ui_dependencies() {
    let manifest_path = workspace_root().join("core/Cargo.toml");
    let manifest = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(error) => panic!("could not read {}: {error}", manifest_path.display()),
    };

    let violations = manifest_violations_in(&manifest);

    if !violations.is_empty() {
        eprintln!(
            "\n❌ UI-framework dependencies found in {}!",
            manifest_path.display()
        );

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        panic!(
            "\nFound {} UI dependency declaration(s) in the core manifest.\nThe core stays headless; rendering belongs in a surface crate.",
            violations.len()
        );
    }
}

/// Test that core source files import no UI framework
#[test]
fn test_core_sources_import_no_ui_framework() {
    let src = workspace_root().join("core/src");
    assert!(
        src.exists(),
        "expected source directory {} to exist",
        src.display()
    );

    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(&src)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            let content = match fs::read_to_string(entry.path()) {
                Ok(c) => c,
                Err(_) => continue,
            };

            for (line_number, line) in import_violations_in(&content) {
                violations.push(format!(
                    "{}:{} - {}",
                    entry.path().display(),
                    line_number,
                    line
                ));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ UI-framework imports found in core sources!");

        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }

        panic!(
            "\nFound {} UI import(s) in core sources.\nThe core stays headless; rendering belongs in a surface crate.",
            violations.len()
        );
    }
}

/// Resolve the workspace root from this package's manifest directory
///
/// This package lives at `<root>/tests/architectural-enforcement`, so the
/// root is always two levels up regardless of where cargo was invoked.
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Dependency lines in manifest text that name a forbidden UI crate
fn manifest_violations_in(manifest: &str) -> Vec<String> {
    let mut violations = Vec::new();

    for (idx, line) in manifest.lines().enumerate() {
        // Skip TOML comments
        let code_part = line.split('#').next().unwrap_or(line).trim();

        for crate_name in FORBIDDEN_UI_CRATES {
            let declares_crate = code_part.starts_with(&format!("{crate_name} "))
                || code_part.starts_with(&format!("{crate_name}="))
                || code_part.starts_with(&format!("{crate_name}."));

            if declares_crate {
                violations.push(format!("line {}: {}", idx + 1, line.trim()));
                break;
            }
        }
    }

    violations
}

/// Imports in source text that reach into a forbidden UI crate
///
/// Doc comments are stripped, so prose like the crate-level "zero UI
/// dependencies" note does not trip the detector.
fn import_violations_in(content: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let code_part = line.split("//").next().unwrap_or(line);

        for crate_name in FORBIDDEN_UI_CRATES {
            let uses_crate = code_part.contains(&format!("use {crate_name}::"))
                || code_part.contains(&format!("use {crate_name};"))
                || code_part.contains(&format!("{crate_name}::"));

            if uses_crate {
                violations.push((idx + 1, line.trim().to_string()));
                break;
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_detector_flags_declaration() {
        // This test verifies that the detector itself works
        let manifest = "[dependencies]\nratatui = \"0.29\"\ntokio = \"1\"\n";

        let violations = manifest_violations_in(manifest);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("line 2"));
    }

    #[test]
    fn test_manifest_detector_flags_table_form() {
        let manifest = "[dependencies]\negui = { version = \"0.31\", default-features = false }\n";

        assert_eq!(manifest_violations_in(manifest).len(), 1);
    }

    #[test]
    fn test_manifest_detector_ignores_comments() {
        let manifest = "[dependencies]\n# ratatui = \"0.29\"\ntokio = \"1\"\n";

        assert!(
            manifest_violations_in(manifest).is_empty(),
            "Should ignore commented-out declarations"
        );
    }

    #[test]
    fn test_import_detector_flags_use() {
        let source = "use crossterm::event::KeyCode;\n";

        let violations = import_violations_in(source);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_import_detector_flags_qualified_path() {
        let source = "fn draw(frame: &mut ratatui::Frame<'_>) {}\n";

        assert_eq!(import_violations_in(source).len(), 1);
    }

    #[test]
    fn test_import_detector_ignores_doc_prose() {
        let source = "//! This crate has zero dependencies on ratatui or crossterm.\n";

        assert!(
            import_violations_in(source).is_empty(),
            "Should ignore crate names mentioned in doc comments"
        );
    }
}
