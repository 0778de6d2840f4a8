//! Init command implementation

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use habit_idle::config::Config;

/// Write a default config file and create the data directory
pub fn init_command(config_path: Option<&Path>, data_dir: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path.map_or_else(Config::global_config_path, Path::to_path_buf);

    let config = if path.exists() && !force {
        println!("Config already exists: {}", path.display());
        println!("Use --force to overwrite with defaults.");
        Config::from_file(&path)?
    } else {
        let mut config = Config::default();
        if let Some(dir) = data_dir {
            config.storage.data_dir = Some(dir.to_path_buf());
        }
        config.save_to_file(&path)?;
        info!("Wrote config to {}", path.display());
        println!("Created {}", path.display());
        config
    };

    let data_dir = data_dir.map_or_else(|| config.data_dir(), Path::to_path_buf);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    println!("Data directory: {}", data_dir.display());

    Ok(())
}
