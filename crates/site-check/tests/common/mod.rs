//! Site fixtures written to temporary directories

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Simple Web App</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <button id="increment">Click me!</button>
    <span id="count">0</span>
    <script src="script.js"></script>
</body>
</html>
"#;

pub const STYLES_CSS: &str = r#"body {
    font-family: sans-serif;
}

button {
    padding: 0.5rem 1rem;
}
"#;

pub const SCRIPT_JS: &str = r#"document.addEventListener('DOMContentLoaded', function () {
    const button = document.getElementById('increment');
});
"#;

/// A directory holding a site that passes every built-in rule
pub fn complete_site() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(dir.path(), "index.html", INDEX_HTML);
    write(dir.path(), "styles.css", STYLES_CSS);
    write(dir.path(), "script.js", SCRIPT_JS);
    dir
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture file");
}

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
