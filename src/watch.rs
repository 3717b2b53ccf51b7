//! File-system watcher and rebuild coordination.
//!
//! The coordinator owns the single process-wide rebuild lock. Change events
//! are handled in delivery order, one at a time: each acquires the lock,
//! triggers a full subtree rebuild of the affected folder, and releases the
//! lock whatever the outcome. A burst of events simply queues behind the
//! lock; redundant rebuilds are idempotent.
//!
//! notify reports concrete file and directory paths where the abstract
//! contract speaks of folder events, so every event path is mapped to its
//! parent directory (the watch root maps to itself). A parent rebuild
//! recurses through the whole subtree, so a created, removed or renamed
//! folder both refreshes its parent's listing and renders its own content
//! in the same pass.

use crate::config::SiteConfig;
use crate::error::{RenderError, chain};
use crate::log;
use crate::paths::PathMapper;
use crate::render::{DirectoryRenderer, copy_static_assets};
use crate::templates::TemplateEngine;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// How often the wait loop wakes to check the shutdown flag.
const SHUTDOWN_POLL_MS: u64 = 500;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// The directory a changed path affects: its parent, since any change to
/// an entry (a file edit, a folder appearing or disappearing) also changes
/// the parent folder's listing. Only the watch root maps to itself.
fn affected_directory(path: &Path, source_root: &Path) -> Option<PathBuf> {
    if path == source_root {
        return Some(path.to_path_buf());
    }
    path.parent().map(Path::to_path_buf)
}

/// Serializes all renders behind one mutual-exclusion lock and drives the
/// watch loop.
pub struct RebuildCoordinator<'a> {
    config: &'a SiteConfig,
    templates: &'a TemplateEngine,
    mapper: PathMapper,
    lock: Mutex<()>,
}

impl<'a> RebuildCoordinator<'a> {
    pub fn new(config: &'a SiteConfig, templates: &'a TemplateEngine) -> Self {
        Self {
            config,
            templates,
            mapper: PathMapper::new(&config.source_root, &config.output_root),
            lock: Mutex::new(()),
        }
    }

    /// Initial full-tree build, then block handling change events until
    /// interrupted. A failing render never stops the loop; the next change
    /// event retries implicitly.
    pub fn run(&self) -> Result<()> {
        let shutdown = Arc::new(AtomicBool::new(false));
        {
            let shutdown = Arc::clone(&shutdown);
            ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
                .context("failed to set Ctrl+C handler")?;
        }
        self.run_with_shutdown(&shutdown)
    }

    fn run_with_shutdown(&self, shutdown: &AtomicBool) -> Result<()> {
        // Watching starts before the startup render: changes made while it
        // runs queue in the channel instead of being missed. An interrupt
        // during the render takes effect once it completes.
        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(tx).context("failed to create file watcher")?;
        watcher
            .watch(&self.config.source_root, RecursiveMode::Recursive)
            .with_context(|| {
                format!("failed to watch {}", self.config.source_root.display())
            })?;
        log!("watch"; "watching {}", self.config.source_root.display());

        // Shared assets are copied once; folder wipes leave them alone.
        if let Err(err) = copy_static_assets(&self.config.static_dir, &self.config.output_root) {
            log!("error"; "static assets: {}", chain(&err));
        }
        log!("watch"; "initial full build");
        self.rebuild(self.mapper.source_root());

        while !shutdown.load(Ordering::SeqCst) {
            match rx.recv_timeout(Duration::from_millis(SHUTDOWN_POLL_MS)) {
                Ok(Ok(event)) if is_relevant(&event) => self.handle_event(&event),
                Ok(Ok(_)) => {}
                Ok(Err(err)) => log!("watch"; "watch error: {err}"),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        // Any in-flight render already finished: rebuilds run on this
        // thread, so reaching this point means the lock is free.
        log!("watch"; "shutting down");
        Ok(())
    }

    /// Map an event to the affected directories and rebuild each.
    fn handle_event(&self, event: &Event) {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            let Some(dir) = affected_directory(path, self.mapper.source_root()) else {
                continue;
            };
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        for dir in dirs {
            if self.mapper.relative(&dir).is_err() {
                log!("error"; "{}", RenderError::Path(dir));
                continue;
            }
            self.rebuild(&dir);
        }
    }

    /// Rebuild one subtree under the rebuild lock, logging the outcome.
    /// Render failures are reported, never propagated: the watch loop must
    /// keep running.
    pub fn rebuild(&self, dir: &Path) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let rel = dir
            .strip_prefix(self.mapper.source_root())
            .unwrap_or(dir)
            .display();
        log!("watch"; "rebuilding /{rel}");

        let renderer = DirectoryRenderer::new(&self.mapper, self.templates);
        match renderer.render(dir) {
            Ok(stats) if stats.failures > 0 => {
                log!("watch"; "rebuilt {} pages, {} failed", stats.pages, stats.failures);
            }
            Ok(stats) => log!("watch"; "rebuilt {} pages", stats.pages),
            Err(err) => log!("error"; "rebuild of /{rel} failed: {}", chain(&err)),
        }
    }
}
