//! The `sikho level` command.

use std::path::PathBuf;

use anyhow::Result;

use sikho_core::Xp;

pub fn execute(current_xp: Xp, add: Xp, data_dir: PathBuf) -> Result<()> {
    let catalog = super::load_catalog(&data_dir)?;
    let gain = catalog.gain_xp(current_xp, add);

    println!("XP: {current_xp} + {add} = {}", gain.new_xp);
    println!("Level: {}", gain.level);

    Ok(())
}
