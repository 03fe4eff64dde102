//! Page generation and output directory management.
//!
//! Everything here is file plumbing around [`crate::markdown_to_html`] and
//! [`crate::extract_title`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{extract_title, markdown_to_html};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";
const PAGE_FILE: &str = "index.html";

/// What a full site build produced.
#[derive(Debug, Default)]
pub struct SiteReport {
    pub assets_copied: usize,
    pub pages: Vec<PathBuf>,
}

/// Copy static assets, then render every page under the content directory.
pub fn build_site(config: &Config) -> Result<SiteReport> {
    let assets_copied = copy_static(&config.static_dir, &config.output_dir)?;
    let pages = generate_pages_recursive(
        &config.content_dir,
        &config.template,
        &config.output_dir,
        &config.base_path,
    )?;
    Ok(SiteReport {
        assets_copied,
        pages,
    })
}

/// Fill the title and content placeholders and point root-relative links at
/// `base_path`.
pub fn apply_template(template: &str, title: &str, content: &str, base_path: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
        .replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

/// Render one markdown file into `dest_dir/index.html`, creating `dest_dir`
/// if needed. Returns the written path.
pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest_dir: &Path,
    base_path: &str,
) -> Result<PathBuf> {
    let template = read(template_path)?;
    write_page(from, &template, dest_dir, base_path)
}

/// Mirror `content_dir` into `output_dir`, one `index.html` per markdown file.
///
/// `dir/index.md` becomes `dir/index.html`; any other `dir/name.md` becomes
/// `dir/name/index.html`. Other files are ignored.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    output_dir: &Path,
    base_path: &str,
) -> Result<Vec<PathBuf>> {
    let template = read(template_path)?;
    let mut pages = Vec::new();
    visit_content(content_dir, &template, output_dir, base_path, &mut pages)?;
    Ok(pages)
}

fn visit_content(
    dir: &Path,
    template: &str,
    dest: &Path,
    base_path: &str,
    pages: &mut Vec<PathBuf>,
) -> Result<()> {
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            let Some(name) = path.file_name() else { continue };
            visit_content(&path, template, &dest.join(name), base_path, pages)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let page_dir = match path.file_stem() {
                Some(stem) if stem != "index" => dest.join(stem),
                _ => dest.to_path_buf(),
            };
            pages.push(write_page(&path, template, &page_dir, base_path)?);
        }
    }
    Ok(())
}

fn write_page(from: &Path, template: &str, dest_dir: &Path, base_path: &str) -> Result<PathBuf> {
    log::info!("Generating page from {} to {}", from.display(), dest_dir.display());

    let markdown = read(from)?;
    let content = markdown_to_html(&markdown)?;
    let title = extract_title(&markdown)?;
    let html = apply_template(template, &title, &content, base_path);

    fs::create_dir_all(dest_dir).map_err(|e| Error::io(dest_dir, e))?;
    let output = dest_dir.join(PAGE_FILE);
    fs::write(&output, html).map_err(|e| Error::io(&output, e))?;
    Ok(output)
}

/// Clear `output_dir` and copy everything from `static_dir` into it.
///
/// Both directories are created if missing. Returns the number of files
/// copied.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<usize> {
    fs::create_dir_all(static_dir).map_err(|e| Error::io(static_dir, e))?;
    if output_dir.exists() {
        fs::remove_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    copy_dir(static_dir, output_dir)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    for path in sorted_entries(src)? {
        let Some(name) = path.file_name() else { continue };
        let target = dest.join(name);
        if path.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
            copied += copy_dir(&path, &target)?;
        } else {
            log::debug!("copying {} to {}", path.display(), target.display());
            fs::copy(&path, &target).map_err(|e| Error::io(&path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| Error::io(dir, e)))
        .collect::<Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
