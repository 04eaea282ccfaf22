//! PDF rendering.
//!
//! Blocks map one to one onto `genpdf` elements. Line breaking, page
//! overflow and text encoding are left to `genpdf`. Rendered bytes can be
//! read back with [`page_count`].

use std::fs;
use std::path::Path;

use genpdf::elements::{Break, BulletPoint, LinearLayout, PageBreak, Paragraph};
use genpdf::{Element as _, SimplePageDecorator};
use tracing::{debug, info};

use crate::block::{Block, Document};
use crate::error::DocError;
use crate::font::FontSource;
use crate::style::{PageGeometry, Style, Stylesheet};

/// Bullet glyph prefixed to [`Block::Bullet`] text.
pub const BULLET: &str = "\u{2022}";

/// Turns a [`Document`] into bytes.
pub trait Renderer {
    /// Renders the whole document.
    fn render(&self, document: &Document) -> Result<Vec<u8>, DocError>;
}

/// Renders documents as PDF through `genpdf`, embedding the given font family.
#[derive(Clone, Debug)]
pub struct PdfRenderer {
    fonts: FontSource,
    stylesheet: Stylesheet,
    geometry: PageGeometry,
}

impl PdfRenderer {
    /// Creates a renderer with the default stylesheet on US letter pages.
    #[must_use]
    pub fn new(fonts: FontSource) -> Self {
        Self {
            fonts,
            stylesheet: Stylesheet::default(),
            geometry: PageGeometry::letter(),
        }
    }

    /// Overrides the stylesheet.
    #[must_use]
    pub const fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Overrides the page geometry.
    #[must_use]
    pub const fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    fn paragraph(text: &str, style: &Style) -> Paragraph {
        Paragraph::new(text).aligned(style.align.into())
    }

    fn push(&self, pdf: &mut genpdf::Document, block: &Block) {
        let body = &self.stylesheet.body;
        match block {
            Block::Title(text) => {
                let style = &self.stylesheet.title;
                pdf.push(
                    Self::paragraph(text, style)
                        .styled(style.text_style())
                        .padded(style.padding()),
                );
            }
            Block::Heading(text) => {
                let style = &self.stylesheet.heading;
                pdf.push(
                    Self::paragraph(text, style)
                        .styled(style.text_style())
                        .padded(style.padding()),
                );
            }
            Block::Body(text) => pdf.push(
                Self::paragraph(text, body)
                    .styled(body.text_style())
                    .padded(body.padding()),
            ),
            Block::Lines(lines) => {
                let mut layout = LinearLayout::vertical();
                for line in lines {
                    layout.push(Self::paragraph(line, body));
                }
                pdf.push(layout.styled(body.text_style()).padded(body.padding()));
            }
            Block::Bullet(text) => pdf.push(
                BulletPoint::new(Self::paragraph(text, body))
                    .with_bullet(BULLET)
                    .styled(body.text_style())
                    .padded(body.padding()),
            ),
            // Break heights are counted in body lines.
            Block::Spacer(points) => pdf.push(Break::new(f64::from(*points / body.leading))),
            Block::PageBreak => pdf.push(PageBreak::new()),
        }
    }

    fn build(&self, document: &Document) -> Result<genpdf::Document, DocError> {
        let body = &self.stylesheet.body;
        let mut pdf = genpdf::Document::new(self.fonts.load()?);
        pdf.set_title(document.title.as_str());
        pdf.set_paper_size(self.geometry.size());
        pdf.set_font_size(body.font_size);
        pdf.set_line_spacing(body.line_spacing());

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(self.geometry.margins());
        pdf.set_page_decorator(decorator);

        for block in &document.blocks {
            self.push(&mut pdf, block);
        }
        Ok(pdf)
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, DocError> {
        debug!(
            title = %document.title,
            blocks = document.blocks.len(),
            family = self.fonts.family(),
            "Rendering PDF"
        );
        let mut bytes = Vec::new();
        self.build(document)?.render(&mut bytes)?;
        Ok(bytes)
    }
}

/// Number of pages in a rendered PDF.
pub fn page_count(pdf: &[u8]) -> Result<usize, DocError> {
    Ok(lopdf::Document::load_mem(pdf)?.get_pages().len())
}

/// Renders `document` and writes it to `path`, creating parent directories.
///
/// Returns the number of bytes written.
pub fn write_document<R: Renderer + ?Sized>(
    renderer: &R,
    document: &Document,
    path: &Path,
) -> Result<u64, DocError> {
    let bytes = renderer.render(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;

    let size = bytes.len() as u64;
    info!(path = %path.display(), bytes = size, "Wrote document");
    Ok(size)
}
