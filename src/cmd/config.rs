use std::path::Path;

use noteport::{util, Config, Result};

pub fn run(config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit.map(Path::to_path_buf).or_else(Config::default_path);

    match path {
        Some(p) => println!("config: {}", util::display_path(&p)),
        None => println!("config: (no config directory)"),
    }
    match config.fixed_dir() {
        Some(dir) => println!("export_dir: {}", dir),
        None => println!("export_dir: (unset, --dest is used)"),
    }

    Ok(())
}
