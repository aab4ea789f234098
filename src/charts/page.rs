//! HTML report page with one container per chart.

use super::ChartKind;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_FILE: &str = "index.html";

const PAGE_TITLE: &str = "Social Media Likes";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to render report page: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    charts: Vec<ChartSection<'a>>,
}

#[derive(Serialize)]
struct ChartSection<'a> {
    id: &'a str,
    title: &'a str,
    /// Inlined unescaped; empty when the chart was not rendered.
    svg: &'a str,
}

/// Build the page. Charts missing from `charts` leave their container empty.
pub fn build_index(charts: &[(ChartKind, String)]) -> Result<String, PageError> {
    let sections = ChartKind::ALL
        .iter()
        .map(|kind| ChartSection {
            id: kind.name(),
            title: kind.title(),
            svg: charts
                .iter()
                .find(|(k, _)| k == kind)
                .map(|(_, svg)| svg.as_str())
                .unwrap_or_default(),
        })
        .collect();
    let data = PageData {
        title: PAGE_TITLE,
        charts: sections,
    };

    let template = include_str!("template.html.handlebars");
    let html = handlebars::Handlebars::new().render_template(template, &data)?;
    Ok(html)
}

/// Write `index.html` into `out_dir`.
pub fn write_index(out_dir: &Path, charts: &[(ChartKind, String)]) -> Result<PathBuf, PageError> {
    let path = out_dir.join(INDEX_FILE);
    let html = build_index(charts)?;
    std::fs::write(&path, html).map_err(|source| PageError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_follow_fixed_order() {
        let charts = vec![
            (ChartKind::Lineplot, "<svg>line</svg>".to_string()),
            (ChartKind::Boxplot, "<svg>box</svg>".to_string()),
        ];
        let html = build_index(&charts).unwrap();

        let boxplot = html.find("<div id=\"boxplot\"><svg>box</svg></div>").unwrap();
        let barplot = html.find("<div id=\"barplot\"></div>").unwrap();
        let lineplot = html.find("<div id=\"lineplot\"><svg>line</svg></div>").unwrap();
        assert!(boxplot < barplot && barplot < lineplot);
    }

    #[test]
    fn svg_is_inlined_unescaped() {
        let charts = vec![(
            ChartKind::Barplot,
            "<svg><text>A & B</text></svg>".to_string(),
        )];
        let html = build_index(&charts).unwrap();

        assert!(html.contains("<svg><text>A & B</text></svg>"));
        assert!(!html.contains("&lt;svg"));
        assert!(html.contains("<h2>Average Likes by Platform and Post Type</h2>"));
    }

    #[test]
    fn writes_index_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_index(dir.path(), &[]).unwrap();

        assert_eq!(path, dir.path().join("index.html"));
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Social Media Likes</title>"));
        assert_eq!(html.matches("<div id=").count(), 3);
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let result = write_index(Path::new("/nonexistent/out"), &[]);
        assert!(matches!(result, Err(PageError::Io { .. })));
    }
}
