//! Static site generation: copy assets, render every Markdown page into
//! the HTML template, write the result under the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{Config, Markers};

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to convert {path}: {source}")]
    Markdown {
        path: PathBuf,
        #[source]
        source: crate::Error,
    },
}

pub type Result<T> = std::result::Result<T, SiteError>;

/// What a site build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub files_copied: usize,
    pub pages_generated: usize,
}

/// Clear the output directory, copy static assets into it and generate
/// one page per Markdown file.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
    let template = read(&config.template)?;
    let files_copied = copy_static(&config.static_dir, &config.output_dir)?;
    let pages_generated = generate_pages(
        &config.content_dir,
        &template,
        &config.output_dir,
        &config.markers,
        &config.base_path,
    )?;

    tracing::info!(
        files_copied,
        pages_generated,
        output = %config.output_dir.display(),
        "site built"
    );
    Ok(BuildSummary {
        files_copied,
        pages_generated,
    })
}

/// Replace `dst` with a recursive copy of `src`. Returns the number of files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize> {
    if dst.exists() {
        fs::remove_dir_all(dst).map_err(io_error("failed to clear", dst))?;
    }
    fs::create_dir_all(dst).map_err(io_error("failed to create", dst))?;

    if !src.is_dir() {
        tracing::warn!(path = %src.display(), "static directory missing, nothing copied");
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        let target = dst.join(relative(entry.path(), src));
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error("failed to create", &target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_error("failed to copy", entry.path()))?;
            tracing::debug!(from = %entry.path().display(), to = %target.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

/// Substitute title and content into `template`, then point root-relative
/// links at `base_path`.
pub fn render_page(
    template: &str,
    markers: &Markers,
    title: &str,
    content: &str,
    base_path: &str,
) -> String {
    let page = template
        .replace(&markers.title, title)
        .replace(&markers.content, content);
    if base_path == "/" {
        return page;
    }
    page.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

/// Render a single Markdown file into `dest`.
pub fn generate_page(
    markdown_path: &Path,
    template: &str,
    dest: &Path,
    markers: &Markers,
    base_path: &str,
) -> Result<()> {
    let markdown = read(markdown_path)?;
    let convert = |result: crate::Result<String>| {
        result.map_err(|source| SiteError::Markdown {
            path: markdown_path.to_path_buf(),
            source,
        })
    };
    let title = convert(crate::extract_title(&markdown))?;
    let content = convert(crate::convert_markdown_to_html(&markdown))?;
    let page = render_page(template, markers, &title, &content, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error("failed to create", parent))?;
    }
    fs::write(dest, page).map_err(io_error("failed to write", dest))?;
    tracing::debug!(from = %markdown_path.display(), to = %dest.display(), title = %title, "generated page");
    Ok(())
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir`. Returns the number of pages written.
pub fn generate_pages(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    markers: &Markers,
    base_path: &str,
) -> Result<usize> {
    let mut generated = 0;
    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: content_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let dest = dest_dir.join(relative(path, content_dir)).with_extension("html");
        generate_page(path, template, &dest, markers, base_path)?;
        generated += 1;
    }
    Ok(generated)
}

fn relative<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(io_error("failed to read", path))
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SiteError {
    let path = path.to_path_buf();
    move |source| SiteError::Io {
        action,
        path,
        source,
    }
}
