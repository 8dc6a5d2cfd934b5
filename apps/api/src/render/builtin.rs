//! Builtin renderer: HTML is flattened to text with `html2text`, then laid out
//! line by line on A4 pages in Helvetica with `printpdf`.
//!
//! No CSS, no images. Good enough for a printable résumé without any external
//! renderer installed.

use async_trait::async_trait;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::render::{PdfRenderer, RenderError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 5.0;
/// Wrap width handed to html2text; fits the text column at 10pt Helvetica.
const WRAP_COLUMNS: usize = 90;

#[derive(Debug, Clone)]
pub struct BuiltinRenderer {
    pub title: String,
}

impl Default for BuiltinRenderer {
    fn default() -> Self {
        Self {
            title: "CV".to_string(),
        }
    }
}

#[async_trait]
impl PdfRenderer for BuiltinRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let html = html.to_string();
        let title = self.title.clone();
        // printpdf documents are !Send and layout is CPU-bound.
        tokio::task::spawn_blocking(move || render_blocking(&title, &html)).await?
    }
}

fn render_blocking(title: &str, html: &str) -> Result<Vec<u8>, RenderError> {
    let text = html2text::from_read(html.as_bytes(), WRAP_COLUMNS)
        .map_err(|e| RenderError::Html(e.to_string()))?;
    let pages = paginate(&text, lines_per_page());

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let canvas = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            let y = PAGE_HEIGHT_MM - MARGIN_MM - (row as f32 + 1.0) * LINE_HEIGHT_MM;
            canvas.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM).floor() as usize
}

/// Splits text into pages of at most `per_page` lines. Always yields at least one page.
fn paginate(text: &str, per_page: usize) -> Vec<Vec<String>> {
    let lines: Vec<String> = text.lines().map(printable).collect();
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page.max(1)).map(<[String]>::to_vec).collect()
}

/// Builtin PDF fonts only cover Latin-1; everything else becomes `?`.
fn printable(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            '─' | '━' | '—' | '–' => '-',
            '│' | '┃' => '|',
            '•' => '*',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PDF_MAGIC;

    #[tokio::test]
    async fn test_render_produces_pdf() {
        let html = "<html><body><h1>Jean Dupont</h1><p>Développeur Frontend</p>\
                    <ul><li>React</li><li>TypeScript</li></ul></body></html>";
        let bytes = BuiltinRenderer::default().render(html).await.unwrap();
        assert!(bytes.starts_with(PDF_MAGIC));
        assert!(bytes.len() > 200);
    }

    #[tokio::test]
    async fn test_render_accepts_fragment_and_empty_body() {
        let renderer = BuiltinRenderer::default();
        assert!(renderer.render("just text").await.unwrap().starts_with(PDF_MAGIC));
        assert!(renderer.render("<div></div>").await.unwrap().starts_with(PDF_MAGIC));
    }

    #[tokio::test]
    async fn test_long_document_renders() {
        let html: String = (0..500).map(|i| format!("<p>Ligne {i}</p>")).collect();
        let bytes = BuiltinRenderer::default().render(&html).await.unwrap();
        assert!(bytes.starts_with(PDF_MAGIC));
    }

    #[test]
    fn test_paginate_splits_and_never_returns_zero_pages() {
        assert_eq!(paginate("", 10), vec![Vec::<String>::new()]);

        let text: String = (0..25).map(|i| format!("line {i}\n")).collect();
        let pages = paginate(&text, 10);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[2].len(), 5);
        assert_eq!(pages[2][4], "line 24");
    }

    #[test]
    fn test_lines_per_page_fits_a4() {
        assert_eq!(lines_per_page(), 51);
    }

    #[test]
    fn test_printable_keeps_latin1_and_maps_the_rest() {
        assert_eq!(printable("Développeur\tReact"), "Développeur React");
        assert_eq!(printable("• item — note"), "* item - note");
        assert_eq!(printable("日本"), "??");
    }
}
