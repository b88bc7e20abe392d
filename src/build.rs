//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()   ──► clean / create the output directory
//!     │
//!     ├── resolve_data()     ──► candidates via file or HTTP source,
//!     │                          embedded default on failure
//!     │
//!     ├── rayon::join
//!     │     ├── render_pages()  ──► one HTML file per PageKind
//!     │     └── copy_assets()   ──► assets/ mirrored into the output
//!     │
//!     └── write_data()       ──► <output>/data/data.json
//! ```

use crate::{
    config::SiteConfig,
    data::{DEFAULT_SITE_DATA, SiteData, Source, load_site_data},
    dom::html::document_to_html,
    log,
    page::{PageKind, render_page},
    utils::minify::minify_html,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Where the resolved content is published, relative to the output directory.
///
/// Pages never read it. A deployed site can be passed back as `--data-base`
/// because this is also the first default candidate.
const DATA_OUTPUT: &str = "data/data.json";

/// Build the entire site.
///
/// Returns the site data the pages were rendered from.
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<SiteData> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let data = resolve_data(config)?;

    log!("build"; "rendering {} pages...", PageKind::ALL.len());
    let (pages_result, assets_result) =
        rayon::join(|| render_pages(&data, config), || copy_assets(config));
    pages_result?;
    let copied = assets_result?;
    if copied > 0 {
        log!("build"; "copied {} assets", copied);
    }

    write_data(output, &data)?;

    log!("build"; "done");
    Ok(data)
}

/// Create the output directory, removing existing content first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Resolve site data on a current-thread runtime.
///
/// Never fails on content problems: an unusable `[data].base` or candidates
/// that all fail fall back to the embedded default.
fn resolve_data(config: &SiteConfig) -> Result<SiteData> {
    let source = match Source::from_base(&config.data.base, config.get_root()) {
        Ok(source) => source,
        Err(e) => {
            log!("data"; "{e}, using embedded defaults");
            return Ok(DEFAULT_SITE_DATA.clone());
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    Ok(runtime.block_on(load_site_data(&source, config.data.candidates.as_slice())))
}

fn render_pages(data: &SiteData, config: &SiteConfig) -> Result<()> {
    PageKind::ALL.par_iter().try_for_each(|&kind| {
        let doc = render_page(kind, data, config);
        let html = document_to_html(&doc)
            .with_context(|| format!("Failed to serialize {}", kind.output_path()))?;
        let html = minify_html(&html, config);

        let path = config.build.output.join(kind.output_path());
        write_file(&path, &html)
    })
}

/// Mirror the assets directory into the output. Returns the number of files.
fn copy_assets(config: &SiteConfig) -> Result<usize> {
    let assets = &config.build.assets;
    if !assets.is_dir() {
        return Ok(0);
    }

    let target = config
        .build
        .output
        .join(assets.file_name().unwrap_or(OsStr::new("assets")));

    let files: Vec<PathBuf> = WalkDir::new(assets)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.par_iter().try_for_each(|path| {
        let rel = path.strip_prefix(assets)?;
        let dest = target.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)
            .with_context(|| format!("Failed to copy {}", path.display()))?;
        Ok::<_, anyhow::Error>(())
    })?;

    Ok(files.len())
}

/// Publish the resolved content next to the pages.
fn write_data(output: &Path, data: &SiteData) -> Result<()> {
    let content = serde_json::to_vec_pretty(data)?;
    write_file(&output.join(DATA_OUTPUT), &content)
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
