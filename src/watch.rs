//! File system watcher for live rebuilds during `serve`.
//!
//! Watches the local data file locations, the assets directory and the
//! config file. Any relevant change rebuilds the whole site; a config change
//! first swaps in the reloaded config.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  config → reload_config│  │
//! │                                  │  data/assets/config    │  │
//! │                                  │        → build_site    │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    log,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Classification
// =============================================================================

/// What a changed path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Config,
    Data,
    Asset,
    Unknown,
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Local files the loader may read, one per candidate. Empty for remote bases.
fn data_files(config: &SiteConfig) -> Vec<PathBuf> {
    if config.data.is_remote() {
        return Vec::new();
    }
    let base = config.get_root().join(&config.data.base);
    config
        .data
        .candidates
        .iter()
        .map(|candidate| base.join(candidate))
        .collect()
}

fn categorize_path(path: &Path, config: &SiteConfig) -> ChangeKind {
    // Rebuild output must not trigger another rebuild
    if path.starts_with(&config.build.output) {
        return ChangeKind::Unknown;
    }
    if path == config.config_path {
        return ChangeKind::Config;
    }
    if data_files(config).iter().any(|file| same_file(file, path)) {
        return ChangeKind::Data;
    }
    if path.starts_with(&config.build.assets) {
        return ChangeKind::Asset;
    }
    ChangeKind::Unknown
}

/// Compare paths that may differ only by `..` segments or symlinks.
fn same_file(a: &Path, b: &Path) -> bool {
    a == b
        || matches!(
            (a.canonicalize(), b.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}

/// Format absolute path as relative to root, with trailing slash for directories.
fn format_rel(path: &Path, root: &Path, is_dir: bool) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let suffix = if is_dir { "/" } else { "" };
    format!("{}{}", rel.display(), suffix)
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild with the current config. Returns true on success (for cooldown).
fn try_rebuild(reason: &str) -> bool {
    log!("watch"; "{reason}");
    match build_site(&cfg()) {
        Ok(_) => true,
        Err(e) => {
            log!("watch"; "build failed");
            log!("watch"; "{e:#}");
            false
        }
    }
}

fn handle_changes(paths: &[PathBuf]) -> bool {
    let config = cfg();
    let root = config.get_root();

    let mut config_changed = false;
    let mut triggers = Vec::new();
    for path in paths {
        match categorize_path(path, &config) {
            ChangeKind::Config => config_changed = true,
            ChangeKind::Data | ChangeKind::Asset => triggers.push(format_rel(path, root, false)),
            ChangeKind::Unknown => {}
        }
    }

    if config_changed {
        match reload_config() {
            Ok(true) => return try_rebuild("config changed, rebuilding..."),
            Ok(false) => {}
            Err(e) => {
                log!("watch"; "config reload failed, keeping previous: {e:#}");
                return false;
            }
        }
    }

    if triggers.is_empty() {
        return false;
    }
    try_rebuild(&format!("{} changed, rebuilding...", triggers.join(", ")))
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to register with the watcher: data file directories, assets, config.
fn watch_targets(config: &SiteConfig) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets: Vec<(PathBuf, RecursiveMode)> = Vec::new();

    for file in data_files(config) {
        if let Some(dir) = file.parent()
            && dir.is_dir()
            && !targets.iter().any(|(p, _)| same_file(p, dir))
        {
            targets.push((dir.to_path_buf(), RecursiveMode::NonRecursive));
        }
    }
    if config.build.assets.is_dir() {
        targets.push((config.build.assets.clone(), RecursiveMode::Recursive));
    }
    if config.config_path.is_file() {
        targets.push((config.config_path.clone(), RecursiveMode::NonRecursive));
    }

    targets
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();

    for (path, mode) in watch_targets(config) {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
        watched.push(format_rel(&path, root, path.is_dir()));
    }

    if watched.is_empty() {
        log!("watch"; "nothing to watch");
    } else {
        log!("watch"; "{}", watched.join(", "));
    }
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Irrelevant events, timeout without pending changes
            _ => {}
        }
    }

    Ok(())
}
