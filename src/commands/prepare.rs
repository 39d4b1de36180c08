use anyhow::Result;
use respak_patcher::{scan_library, PatchOutcome, WorkareaManager};

use crate::commands::common::{Config, AFFECTED_VERSIONS};

pub fn prepare() -> Result<()> {
    let config = Config::load()?;

    let quirk_needed = match config.disable_extension {
        Some(forced) => forced,
        None => match config.library().and_then(|library| Ok(scan_library(&library)?)) {
            Ok(versions) => {
                println!(
                    "🔎 QtWebEngine {} (Chromium {})",
                    versions.webengine, versions.chromium
                );
                AFFECTED_VERSIONS.contains(&versions.webengine.as_str())
            }
            Err(err) => {
                println!("⚠️ Could not determine the engine version: {err:#}");
                false
            }
        },
    };

    let manager = WorkareaManager::new(config.scratch_dir()?, config.candidate_resource_dirs());
    match manager.apply(quirk_needed) {
        PatchOutcome::Applied(path) => {
            println!("✅ Patched resources ready");
            println!("QTWEBENGINE_RESOURCES_PATH={}", path.display());
        }
        PatchOutcome::Skipped(reason) => println!("⏭️ Not patched: {reason}"),
    }
    Ok(())
}
