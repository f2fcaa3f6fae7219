use std::path::PathBuf;

use clap::Parser;

/// Generate an interactive HTML transcript page from a timed-caption file.
#[derive(Clone, Debug, Parser)]
pub struct Cli {
    /// Path to the transcript file (WebVTT-style timed captions)
    pub transcript: PathBuf,
    /// Output HTML file path
    pub output: PathBuf,
    /// URL the page's video element should play from
    #[clap(long, default_value = "https://your-bucket.mp4")]
    pub video_url: String,
    /// Page title
    #[clap(long, default_value = "Video Transcript")]
    pub title: String,
}
