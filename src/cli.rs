use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use parking_lot::Mutex;
use rayon::prelude::*;
use termcolor::{ColorChoice, StandardStream};

use crate::config::{self, Config};
use crate::downloads::Downloads;
use crate::ffmpeg;
use crate::out::{Out, blank, info, warning};
use crate::playlist::Playlist;
use crate::rename;

#[derive(Args)]
pub struct Playvert {
    /// Directory to search for downloaded media files.
    #[arg(short, long, value_name = "dir")]
    input: Option<PathBuf>,
    /// Directory where renamed files are placed.
    #[arg(short, long, value_name = "dir")]
    output: Option<PathBuf>,
    /// Path to the playlist file to process.
    #[arg(short, long, value_name = "path")]
    json: Option<PathBuf>,
    /// Whether matched files are converted to mp3.
    #[arg(short, long, value_name = "bool", default_value_t = true, action = ArgAction::Set)]
    convert: bool,
    /// The ffmpeg executable to convert with.
    #[arg(long, value_name = "path")]
    ffmpeg: Option<PathBuf>,
}

impl Playvert {
    /// The effective configuration for this invocation.
    pub fn config(&self) -> Config {
        Config {
            input_dir: self
                .input
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_INPUT_DIR)),
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT_DIR)),
            json_path: self
                .json
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PLAYLIST_JSON)),
            convert: self.convert,
            ffmpeg: self
                .ffmpeg
                .clone()
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_FFMPEG)),
        }
    }
}

/// Totals of a processing run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of tracks placed in the output directory.
    pub processed: usize,
    /// Number of processed tracks which were transcoded.
    pub converted: usize,
    /// Number of processed tracks which were copied as-is.
    pub copied: usize,
    /// Number of tracks skipped over missing data or a missing file.
    pub skipped: usize,
    /// Number of tracks for which processing failed.
    pub failed: usize,
}

/// Entry point of the application.
pub fn entry(opts: &Playvert) -> Result<()> {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let mut stdout = StandardStream::stdout(choice);
    let mut o = Out::new(&mut stdout);

    let config = opts.config();
    run(&config, &mut o)?;
    Ok(())
}

/// Process the playlist described by the given configuration.
pub fn run(config: &Config, o: &mut Out<'_>) -> Result<Summary> {
    let playlist = Playlist::load(&config.json_path)?;

    for issue in &playlist.issues {
        warning!(o, "skipping {issue}");
    }

    let downloads = Downloads::scan(&config.input_dir)?;

    info!(
        o,
        "{} tracks in {}",
        playlist.tracks.len(),
        config.json_path.display()
    );

    info!(
        o,
        "{} files in {}",
        downloads.len(),
        config.input_dir.display()
    );

    let mut jobs = Vec::new();
    let mut unmatched = 0;

    for track in &playlist.tracks {
        let Some(download) = downloads.find(&track.id) else {
            warning!(o, "no file matching '{}' ({})", track.title, track.id);
            unmatched += 1;
            continue;
        };

        let transcode = config.convert && ffmpeg::requires_transcode(&download.path);

        let ext = if transcode {
            Some(ffmpeg::TARGET_EXT)
        } else {
            download.path.extension().and_then(|ext| ext.to_str())
        };

        let file_name = rename::file_name(track, ext);
        let target = config.output_dir.join(&file_name);

        jobs.push(Job {
            source: &download.path,
            file_name,
            target,
            transcode,
        });
    }

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let total = jobs.len();
    let done = AtomicUsize::new(0);
    let out = Mutex::new(o);

    let actions = jobs
        .par_iter()
        .map(|job| -> Result<Action> {
            let action = job.perform(config);
            let n = done.fetch_add(1, Ordering::SeqCst) + 1;

            let mut o = out.lock();

            match action {
                Ok(action) => {
                    info!(o, "[{n}/{total}] {}", job.file_name);
                    Ok(action)
                }
                Err(error) => {
                    warning!(o, "[{n}/{total}] failed {}", job.file_name);

                    let mut o = o.indent(1);

                    for cause in error.chain() {
                        for line in cause.to_string().lines() {
                            blank!(o, "{line}");
                        }
                    }

                    Ok(Action::Failed)
                }
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let o = out.into_inner();

    let mut summary = Summary {
        skipped: unmatched + playlist.issues.len(),
        ..Summary::default()
    };

    for action in actions {
        match action {
            Action::Converted => {
                summary.processed += 1;
                summary.converted += 1;
            }
            Action::Copied => {
                summary.processed += 1;
                summary.copied += 1;
            }
            Action::Failed => {
                summary.failed += 1;
            }
        }
    }

    info!(
        o,
        "done: {} processed ({} converted, {} copied), {} skipped, {} failed",
        summary.processed,
        summary.converted,
        summary.copied,
        summary.skipped,
        summary.failed
    );

    Ok(summary)
}

/// A single file to place in the output directory.
struct Job<'a> {
    source: &'a Path,
    file_name: String,
    target: PathBuf,
    transcode: bool,
}

impl Job<'_> {
    fn perform(&self, config: &Config) -> Result<Action> {
        if self.transcode {
            ffmpeg::transcode(&config.ffmpeg, self.source, &self.target)
                .with_context(|| format!("converting {}", self.source.display()))?;

            Ok(Action::Converted)
        } else {
            fs::copy(self.source, &self.target)
                .with_context(|| format!("copying {}", self.source.display()))?;

            Ok(Action::Copied)
        }
    }
}

enum Action {
    Converted,
    Copied,
    Failed,
}
