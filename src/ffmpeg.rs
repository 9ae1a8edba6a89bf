use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};

/// Extensions of the audio containers the downloader produces which require
/// transcoding.
const TRANSCODE_EXTS: &[&str] = &["webma", "mp4a"];

/// Extension of the target format.
pub const TARGET_EXT: &str = "mp3";

/// Test if the given path is an audio container which requires transcoding.
pub fn requires_transcode(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    TRANSCODE_EXTS.iter().any(|t| ext.eq_ignore_ascii_case(t))
}

/// Transcode `source` into an mp3 at `target` at the highest variable
/// bitrate quality.
///
/// Any existing file at `target` is overwritten. A partial output is removed
/// if the encoder fails.
pub fn transcode(ffmpeg: &Path, source: &Path, target: &Path) -> Result<()> {
    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(source)
        .args(["-q:a", "0", "-map", "a", "-loglevel", "error", "-y"])
        .arg(target)
        .output()
        .with_context(|| format!("running {}", ffmpeg.display()))?;

    if !output.status.success() {
        _ = fs::remove_file(target);

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        if stderr.is_empty() {
            return Err(anyhow!("{} ({})", ffmpeg.display(), output.status));
        }

        return Err(anyhow!("{} ({}): {stderr}", ffmpeg.display(), output.status));
    }

    Ok(())
}
