//! PDF receipts via printpdf

use crate::config::AssetPaths;
use crate::error::{ReceiptError, ReceiptResult};
use crate::receipt::layout::MM_PER_PT;
use crate::receipt::{layout_page, FontStyle, PageGeometry, ReceiptDocument, TextMeasure};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use tracing::debug;

use super::DocumentWriter;

/// DPI the logo is embedded at before scaling to its placement width
const LOGO_DPI: f32 = 300.0;

/// Horizontal advance metrics of one TrueType font
#[derive(Debug, Clone)]
pub struct FontMetrics {
    data: Vec<u8>,
    units_per_em: f32,
}

impl FontMetrics {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, String> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| e.to_string())?;
        let units_per_em = f32::from(face.units_per_em());
        Ok(Self { data, units_per_em })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Width of `text` at `font_size` points, in millimetres
    pub fn width_mm(&self, text: &str, font_size: f32) -> f32 {
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return 0.0;
        };
        let units: f32 = text
            .chars()
            .filter_map(|ch| face.glyph_index(ch))
            .filter_map(|glyph| face.glyph_hor_advance(glyph))
            .map(f32::from)
            .sum();
        units / self.units_per_em * font_size * MM_PER_PT
    }
}

struct FontPair<'a> {
    regular: &'a FontMetrics,
    bold: &'a FontMetrics,
}

impl TextMeasure for FontPair<'_> {
    fn text_width(&self, text: &str, font_size: f32, style: FontStyle) -> f32 {
        match style {
            FontStyle::Regular => self.regular.width_mm(text, font_size),
            FontStyle::Bold => self.bold.width_mm(text, font_size),
        }
    }
}

/// Single-page A4 PDF per receipt with the logo letterhead
pub struct PdfWriter {
    regular: FontMetrics,
    bold: FontMetrics,
    logo: DynamicImage,
    geometry: PageGeometry,
}

impl PdfWriter {
    /// Load fonts and logo once; any missing file is an `AssetMissing` error
    pub fn from_assets(assets: &AssetPaths) -> ReceiptResult<Self> {
        let regular = load_font(&assets.font_regular)?;
        let bold = load_font(&assets.font_bold)?;
        let logo = image_crate::open(&assets.logo).map_err(|e| {
            ReceiptError::AssetMissing(format!("logo '{}': {}", assets.logo.display(), e))
        })?;
        debug!(logo = %assets.logo.display(), "PDF assets loaded");

        Ok(Self {
            regular,
            bold,
            logo,
            geometry: PageGeometry::default(),
        })
    }

    fn draw_logo(&self, layer: PdfLayerReference) {
        let g = &self.geometry;
        let (px_width, px_height) = self.logo.dimensions();
        if px_width == 0 {
            return;
        }
        let natural_width = px_width as f32 / LOGO_DPI * 25.4;
        let scale = g.logo.width / natural_width;
        let height = g.logo.width * px_height as f32 / px_width as f32;

        Image::from_dynamic_image(&self.logo).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(g.logo.x)),
                translate_y: Some(Mm(g.height - g.logo.y - height)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(LOGO_DPI),
                ..Default::default()
            },
        );
    }
}

impl DocumentWriter for PdfWriter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn write(&self, document: &ReceiptDocument) -> ReceiptResult<Vec<u8>> {
        let g = &self.geometry;
        let (doc, page, layer) = PdfDocument::new(
            format!("Receipt {}", document.house),
            Mm(g.width),
            Mm(g.height),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let font = add_font(&doc, &self.regular)?;
        let font_bold = add_font(&doc, &self.bold)?;

        self.draw_logo(layer.clone());

        let measure = FontPair {
            regular: &self.regular,
            bold: &self.bold,
        };
        for block in layout_page(document, g, &measure).blocks {
            let font = match block.style {
                FontStyle::Regular => &font,
                FontStyle::Bold => &font_bold,
            };
            layer.use_text(
                block.text,
                block.font_size,
                Mm(block.x),
                Mm(g.height - block.y),
                font,
            );
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| ReceiptError::Io(std::io::Error::other(e.to_string())))?;
        writer.into_inner().map_err(|e| ReceiptError::Io(e.into_error()))
    }
}

fn load_font(path: &Path) -> ReceiptResult<FontMetrics> {
    let data = fs::read(path)
        .map_err(|e| ReceiptError::AssetMissing(format!("font '{}': {}", path.display(), e)))?;
    FontMetrics::from_bytes(data)
        .map_err(|e| ReceiptError::AssetMissing(format!("font '{}': {}", path.display(), e)))
}

fn add_font(
    doc: &printpdf::PdfDocumentReference,
    metrics: &FontMetrics,
) -> ReceiptResult<IndirectFontRef> {
    doc.add_external_font(Cursor::new(metrics.bytes()))
        .map_err(|e| ReceiptError::AssetMissing(format!("font could not be embedded: {}", e)))
}
