use crate::surface::Surface;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_SUBDIR: &str = "exports";

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(stem: &str) -> String {
    format!("inkboard_{}.png", stem)
}

pub fn exe_relative_export_dir_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

/// Where exported snapshots land: an `inkboard` folder inside the user's
/// picture directory, or a folder next to the executable when the platform
/// has no picture directory.
pub fn export_dir() -> Result<PathBuf> {
    if let Some(pictures) = dirs_next::picture_dir() {
        return Ok(pictures.join("inkboard"));
    }
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    exe_relative_export_dir_from_path(&exe_path)
}

pub fn surface_to_image(surface: &Surface) -> Result<image::RgbaImage> {
    if surface.width() == 0 || surface.height() == 0 {
        anyhow::bail!("surface has no pixels to export");
    }
    image::RgbaImage::from_raw(surface.width(), surface.height(), surface.pixels().to_vec())
        .ok_or_else(|| anyhow!("surface buffer does not match its dimensions"))
}

pub fn write_png(surface: &Surface, path: &Path) -> Result<()> {
    let img = surface_to_image(surface)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create export folder {}", parent.display()))?;
    }
    img.save(path)
        .with_context(|| format!("write png {}", path.display()))?;
    Ok(())
}

/// Saves the current surface under a timestamped name and returns the path.
pub fn export_snapshot(surface: &Surface) -> Result<PathBuf> {
    let dir = export_dir()?;
    let path = dir.join(build_filename(&timestamped_stem(Local::now())));
    write_png(surface, &path)?;
    Ok(path)
}
