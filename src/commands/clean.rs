use std::fs;

use anyhow::Result;

use crate::commands::common::Config;

pub fn clean() -> Result<()> {
    let scratch_dir = Config::load()?.scratch_dir()?;
    if scratch_dir.exists() {
        fs::remove_dir_all(&scratch_dir)?;
        println!("🧹 Removed {}", scratch_dir.display());
    } else {
        println!("Nothing to clean");
    }
    Ok(())
}
