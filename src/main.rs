//! A tool to convert and organize playlist downloads.
//!
//! See [`playvert`] documentation for more information.
//!
//! [`playvert`]: https://crates.io/crates/playvert

use anyhow::Result;
use clap::Parser;

const VERSION: &str = match option_env!("MEDIAVERT_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// A tool to convert and organize playlist downloads.
#[derive(Parser)]
#[command(author, version, about, max_term_width = 80, version = VERSION)]
struct Opts {
    #[command(flatten)]
    inner: playvert::cli::Playvert,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    playvert::cli::entry(&opts.inner)
}
