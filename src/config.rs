use std::path::PathBuf;

/// Default directory where the downloader stores its media files.
pub const DEFAULT_INPUT_DIR: &str = "/data/data/com.futo.platformplayer/files/downloads";
/// Default directory where renamed files are written.
pub const DEFAULT_OUTPUT_DIR: &str = "/sdcard/Music/grayjay";
/// Default path to the playlist file maintained by the downloader.
pub const DEFAULT_PLAYLIST_JSON: &str = "/sdcard/Music/grayjay/playlist.json";
/// Default encoder executable, resolved through `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for downloaded media files.
    pub input_dir: PathBuf,
    /// Directory where renamed files are written.
    pub output_dir: PathBuf,
    /// Path to the playlist JSON file.
    pub json_path: PathBuf,
    /// Whether matched files are converted to mp3.
    pub convert: bool,
    /// The encoder executable to invoke.
    pub ffmpeg: PathBuf,
}
