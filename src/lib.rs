//! A tool to convert and organize playlist downloads.
//!
//! Playvert reads the playlist file maintained by the Grayjay downloader,
//! matches each track in it against the files in the download directory,
//! converts them to mp3 with ffmpeg, and places them in a music directory
//! under readable names.
//!
//! <br>
//!
//! ## Usage
//!
//! Process the default playlist with the default directories:
//!
//! ```text
//! playvert
//! ```
//!
//! Organize an already converted collection without transcoding:
//!
//! ```text
//! playvert -c false -i downloads -o music -j playlist.json
//! ```

pub mod cli;
pub mod config;
pub mod downloads;
pub mod ffmpeg;
pub mod out;
pub mod playlist;
pub mod rename;
