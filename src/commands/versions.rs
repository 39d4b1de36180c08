use std::path::Path;

use anyhow::Result;
use respak_patcher::scan_library;

pub fn versions(library: &Path, json: bool) -> Result<()> {
    let versions = scan_library(library)?;
    if json {
        println!(
            "{}",
            serde_json::json!({
                "webengine": versions.webengine,
                "chromium": versions.chromium,
            })
        );
    } else {
        println!(
            "QtWebEngine {} (Chromium {})",
            versions.webengine, versions.chromium
        );
    }
    Ok(())
}
