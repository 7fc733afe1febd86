//! Shared page fixture for counter tests

use counter_core::dom::Document;
use std::fs;
use std::path::PathBuf;

/// Path to the static site shipped with the web app
pub fn site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../apps/counter-web/www")
}

/// The counter page as served, loaded from the shipped `index.html`
pub fn site_fixture() -> Document {
    let markup = fs::read_to_string(site_dir().join("index.html")).unwrap();
    Document::from_html(&markup).unwrap()
}
