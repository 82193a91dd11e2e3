// codealong host: renders HTML/CSS/JS sources into sandboxed preview files
// and re-renders them as the sources change.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use codealong_app::args::Args;
use codealong_app::session::Session;
use codealong_app::settings;
use codealong_app::watch::{self, SourceFiles};
use codealong_core::Language;
use codealong_editor::SourceBuffer;
use codealong_preview::{FileTarget, TargetId};

/// Output targets are numbered after the built-in pane ids.
const FIRST_OUTPUT_ID: u64 = 100;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = settings::load_settings(args.settings.as_deref());
    let mut config = settings.session_config();
    if let Some(ms) = args.debounce_ms {
        config.preview_delay = Duration::from_millis(ms.max(1));
    }

    let sources = SourceFiles::new(
        [
            (Language::Html, args.html),
            (Language::Css, args.css),
            (Language::JavaScript, args.js),
        ]
        .into_iter()
        .filter_map(|(language, path)| path.map(|p| (language, p))),
    )?;
    if sources.is_empty() {
        log::warn!("No sources given; rendering the starter page");
    }

    let buffer = if sources.is_empty() {
        SourceBuffer::with_starter()
    } else {
        SourceBuffer::new()
    };
    let mut session = Session::with_sources(config, buffer);
    sources.load_all(&mut session).context("loading sources")?;

    for (i, path) in args.outputs.iter().enumerate() {
        let id = TargetId(FIRST_OUTPUT_ID + i as u64);
        log::info!("Writing preview to {}", path.display());
        session.attach_target(Box::new(FileTarget::new(id, path)));
    }

    session.trigger_manual_refresh();

    if args.once || sources.is_empty() {
        return Ok(());
    }
    watch::run(&mut session, &sources)
}
