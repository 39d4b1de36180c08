use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use respak_patcher::patch_pak_file;

pub fn patch(pak: &Path) -> Result<()> {
    println!("🔄 Patching \"{}\"", pak.display());
    let start = Instant::now();
    patch_pak_file(pak)?;
    let duration = start.elapsed();
    println!(
        "✅ Patched successfully in {}ms!",
        duration.as_micros() as f64 / 1000.0
    );
    Ok(())
}
