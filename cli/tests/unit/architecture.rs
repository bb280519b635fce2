//! Structural tests for architectural boundary enforcement.
//!
//! These scan source files to keep the layers apart: the domain stays pure,
//! the application talks to the outside only through its ports, and the
//! infrastructure never reaches up into presentation code.

use std::path::{Path, PathBuf};

fn src_dir(layer: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer)
}

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and report whether a line sits inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-comment production lines of a file, with their line numbers.
fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let mut tracker = CfgTestTracker::new();
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !tracker.process_line(line))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(|(i, line)| (i + 1, line.to_string()))
        .collect()
}

/// Every production line under `layer` containing one of `needles`.
fn violations(layer: &str, needles: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    for file in collect_rs_files(&src_dir(layer)) {
        for (number, line) in production_lines(&file) {
            if needles.iter().any(|needle| line.contains(needle)) {
                found.push(format!("{}:{number}: {}", file.display(), line.trim()));
            }
        }
    }
    found
}

#[test]
fn layers_exist() {
    for layer in ["domain", "application", "infra", "commands", "output"] {
        assert!(
            !collect_rs_files(&src_dir(layer)).is_empty(),
            "no sources under src/{layer}"
        );
    }
}

#[test]
fn domain_has_no_outward_imports() {
    let found = violations(
        "domain",
        &[
            "crate::application",
            "crate::infra",
            "crate::commands",
            "crate::output",
            "tokio",
            "std::fs",
            "std::process",
            "std::net",
        ],
    );
    assert!(found.is_empty(), "domain reaches outward:\n{}", found.join("\n"));
}

#[test]
fn domain_is_synchronous() {
    let found = violations("domain", &["async fn", ".await"]);
    assert!(found.is_empty(), "async code in domain:\n{}", found.join("\n"));
}

#[test]
fn application_uses_ports_only() {
    let found = violations(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "std::fs"],
    );
    assert!(
        found.is_empty(),
        "application bypasses its ports:\n{}",
        found.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let found = violations("infra", &["crate::commands", "crate::output"]);
    assert!(
        found.is_empty(),
        "infra imports presentation code:\n{}",
        found.join("\n")
    );
}

#[test]
fn library_layers_do_not_print() {
    let mut found = Vec::new();
    for layer in ["domain", "application", "infra"] {
        found.extend(violations(layer, &["println!", "eprintln!", "print!("]));
    }
    assert!(
        found.is_empty(),
        "use tracing instead of printing:\n{}",
        found.join("\n")
    );
}

#[test]
fn secrets_are_not_logged() {
    let found = violations(
        "application",
        &[
            "private_key =",
            "password =",
            "database_password",
            "litellm_token =",
        ],
    )
    .into_iter()
    .filter(|line| line.contains("tracing::"))
    .collect::<Vec<_>>();
    assert!(found.is_empty(), "secret in a log line:\n{}", found.join("\n"));
}
