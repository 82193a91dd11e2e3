// Source file watching for the host binary: file changes feed the session's
// preview debounce, and due render passes are driven from the same loop.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Context;
use codealong_core::Language;
use notify::{self, EventKind, Watcher};

use crate::session::Session;

/// Wait used when no render is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Source files bound to each editor tab. Paths are canonicalized so they
/// compare equal to the paths notify reports.
pub struct SourceFiles {
    paths: Vec<(Language, PathBuf)>,
}

impl SourceFiles {
    pub fn new(files: impl IntoIterator<Item = (Language, PathBuf)>) -> anyhow::Result<Self> {
        let mut paths = Vec::new();
        for (language, path) in files {
            let path = path
                .canonicalize()
                .with_context(|| format!("{} source {}", language.label(), path.display()))?;
            paths.push((language, path));
        }
        Ok(Self { paths })
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read every source into the session. Each read restarts the debounce.
    pub fn load_all(&self, session: &mut Session) -> anyhow::Result<()> {
        let now = Instant::now();
        for (language, path) in &self.paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            session.set_source_text(*language, text, now);
        }
        Ok(())
    }

    /// Languages whose source file is among `changed`.
    pub fn affected<'a>(&self, changed: impl IntoIterator<Item = &'a PathBuf>) -> Vec<Language> {
        let changed: HashSet<&PathBuf> = changed.into_iter().collect();
        let mut languages = Vec::new();
        for (language, path) in &self.paths {
            if changed.contains(path) && !languages.contains(language) {
                languages.push(*language);
            }
        }
        languages
    }

    /// Directories to watch. Editors often replace files on save, so the
    /// parent directory is watched rather than the file itself.
    fn watch_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for (_, path) in &self.paths {
            if let Some(parent) = path.parent() {
                if !dirs.contains(&parent) {
                    dirs.push(parent);
                }
            }
        }
        dirs
    }
}

/// Block until the watcher disconnects, rendering through the session's
/// debounce as sources change.
pub fn run(session: &mut Session, sources: &SourceFiles) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })
    .context("creating file watcher")?;

    for dir in sources.watch_dirs() {
        watcher
            .watch(dir, notify::RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", dir.display()))?;
        log::info!("Watching {}", dir.display());
    }

    loop {
        let wait = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        match rx.recv_timeout(wait) {
            Ok(Ok(event)) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    reload(session, sources, &event.paths);
                }
            }
            Ok(Err(e)) => log::warn!("File watcher error: {}", e),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                log::info!("File watcher closed");
                return Ok(());
            }
        }

        session.poll(Instant::now());
    }
}

fn reload(session: &mut Session, sources: &SourceFiles, changed: &[PathBuf]) {
    for language in sources.affected(changed) {
        let Some((_, path)) = sources.paths.iter().find(|(l, _)| *l == language) else {
            continue;
        };
        match std::fs::read_to_string(path) {
            Ok(text) => {
                if text != session.source(language) {
                    log::debug!("{} source changed", language.label());
                    session.set_source_text(language, text, Instant::now());
                }
            }
            // Mid-save; the following event carries the new file.
            Err(e) => log::debug!("Skipping {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affected_maps_paths_to_languages() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("index.html");
        let css = dir.path().join("style.css");
        std::fs::write(&html, "<p>hi</p>").unwrap();
        std::fs::write(&css, "p{}").unwrap();

        let sources =
            SourceFiles::new([(Language::Html, html.clone()), (Language::Css, css)]).unwrap();
        let changed = vec![html.canonicalize().unwrap(), dir.path().join("other.txt")];
        assert_eq!(sources.affected(&changed), vec![Language::Html]);
        assert_eq!(sources.watch_dirs().len(), 1);
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceFiles::new([(Language::JavaScript, dir.path().join("nope.js"))]);
        assert!(result.is_err());
    }

    #[test]
    fn load_all_fills_session_buffers() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("app.js");
        std::fs::write(&js, "console.log(1)").unwrap();

        let sources = SourceFiles::new([(Language::JavaScript, js)]).unwrap();
        let mut session = Session::default();
        sources.load_all(&mut session).unwrap();
        assert_eq!(session.source(Language::JavaScript), "console.log(1)");
    }

    #[test]
    fn reload_schedules_render_only_on_real_change() {
        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("style.css");
        std::fs::write(&css, "a{}").unwrap();
        let sources = SourceFiles::new([(Language::Css, css.clone())]).unwrap();
        let mut session = Session::default();
        sources.load_all(&mut session).unwrap();
        session.trigger_manual_refresh();
        let canonical = css.canonicalize().unwrap();

        // Deadline from load_all is still pending; drain it.
        let later = Instant::now() + Duration::from_secs(5);
        session.poll(later);
        assert!(session.next_deadline().is_none());

        reload(&mut session, &sources, &[canonical.clone()]);
        assert!(session.next_deadline().is_none());

        std::fs::write(&css, "b{}").unwrap();
        reload(&mut session, &sources, &[canonical]);
        assert_eq!(session.source(Language::Css), "b{}");
        assert!(session.next_deadline().is_some());
    }
}
