//! Temporary asset directories for exercising on-disk asset loading.

use std::path::Path;

use tempfile::TempDir;

pub const TEST_INDEX_HTML: &str = "<!DOCTYPE html><html><body><div id=\"map\"></div></body></html>";
pub const TEST_SCRIPT_JS: &str = "function showLayer() {}\n";
pub const TEST_STYLE_CSS: &str = "#map { width: 100%; }\n";

/// Create a directory holding index.html, script.js and style.css.
///
/// The directory is deleted when the returned guard is dropped.
pub fn temp_assets_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_asset(dir.path(), "index.html", TEST_INDEX_HTML);
    write_asset(dir.path(), "script.js", TEST_SCRIPT_JS);
    write_asset(dir.path(), "style.css", TEST_STYLE_CSS);
    dir
}

fn write_asset(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write asset");
}
