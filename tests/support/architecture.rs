use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A source line that broke an architecture rule.
pub struct Hit {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Debug for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text.trim())
    }
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn display_path(path: &Path) -> String {
    let root = crate_root();
    path.strip_prefix(&root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Every `.rs` file under `relative_dir`, sorted.
pub fn rust_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut pending = vec![crate_root().join(relative_dir)];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
        for entry in entries {
            let path = entry
                .unwrap_or_else(|e| panic!("failed to read entry in {}: {e}", dir.display()))
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

fn scan(files: Vec<PathBuf>, mut is_hit: impl FnMut(&str) -> bool) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, text) in content.lines().enumerate() {
            if is_hit(text) {
                hits.push(Hit {
                    file: display_path(&file),
                    line: idx + 1,
                    text: text.to_string(),
                });
            }
        }
    }
    hits
}

/// Lines under `relative_dir` containing any of `patterns`.
pub fn find_lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(rust_files(relative_dir), |text| {
        patterns.iter().any(|pattern| text.contains(pattern))
    })
}

/// Lines in `mod.rs` files that are neither module declarations, cfg
/// attributes nor comments.
pub fn find_non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    let mod_files = rust_files(relative_dir)
        .into_iter()
        .filter(|file| file.file_name().is_some_and(|name| name == "mod.rs"))
        .collect();

    scan(mod_files, |text| {
        let text = text.trim();
        !(text.is_empty()
            || text.starts_with("//")
            || text.starts_with("mod ")
            || text.starts_with("pub mod ")
            || text.starts_with("#[cfg"))
    })
}

pub fn path_exists(relative_path: &str) -> bool {
    crate_root().join(relative_path).exists()
}

pub fn read_relative(relative_path: &str) -> String {
    fs::read_to_string(crate_root().join(relative_path))
        .unwrap_or_else(|e| panic!("failed to read {relative_path}: {e}"))
}
