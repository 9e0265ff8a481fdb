//! PDF backend for [`DocumentLayout`], built on lopdf drawing primitives.
//!
//! A4 portrait, Helvetica, WinAnsi encoding (covers the French accented
//! characters the documents use). The whole document is assembled in
//! memory and only returned on success — a failure produces no bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::layout::{Block, DocumentLayout, Table, Tone};
use super::DocumentFile;
use crate::core::AtelierError;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const USABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const BODY_SIZE: f32 = 9.0;
const LEADING: f32 = 12.0;

/// Brand color used for headings (dark blue).
const BRAND: (f32, f32, f32) = (0.16, 0.29, 0.49);
const GREEN: (f32, f32, f32) = (0.09, 0.64, 0.29);
const RED: (f32, f32, f32) = (0.86, 0.15, 0.15);
const GRAY: (f32, f32, f32) = (0.39, 0.39, 0.39);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Render a layout to PDF bytes.
pub fn render(layout: &DocumentLayout) -> Result<DocumentFile, AtelierError> {
    let mut writer = PdfWriter::new();
    for block in &layout.blocks {
        writer.draw_block(block);
    }
    let bytes = writer.finish()?;
    Ok(DocumentFile {
        filename: layout.filename.clone(),
        bytes,
    })
}

/// Font keys registered in the page resources.
#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    fn key(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }
}

struct PdfWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Y position of the next baseline, from the page bottom.
    y: f32,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN - 10.0,
        }
    }

    /// Start a new page if fewer than `needed` points remain.
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            let ops = std::mem::take(&mut self.current);
            self.pages.push(ops);
            self.y = PAGE_HEIGHT - MARGIN - 10.0;
        }
    }

    fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: (f32, f32, f32), s: &str) {
        self.current
            .push(Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]));
        self.current.push(Operation::new("BT", vec![]));
        self.current
            .push(Operation::new("Tf", vec![font.key().into(), size.into()]));
        self.current
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.current
            .push(Operation::new("Tj", vec![Object::string_literal(win_ansi(s))]));
        self.current.push(Operation::new("ET", vec![]));
    }

    /// Thin horizontal rule.
    fn rule(&mut self, x: f32, y: f32, width: f32, color: (f32, f32, f32)) {
        self.current
            .push(Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]));
        self.current.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), 0.7f32.into()],
        ));
        self.current.push(Operation::new("f", vec![]));
    }

    fn line(&mut self, font: Font, size: f32, color: (f32, f32, f32), s: &str) {
        self.ensure_room(LEADING);
        self.text(MARGIN, self.y, font, size, color, s);
        self.y -= LEADING;
    }

    fn gap(&mut self, points: f32) {
        self.y -= points;
    }

    fn draw_block(&mut self, block: &Block) {
        match block {
            Block::Header {
                business,
                business_lines,
                title,
                meta_lines,
            } => self.draw_header(business, business_lines, title, meta_lines),
            Block::Banner { text, tone } => {
                let color = match tone {
                    Tone::Positive => GREEN,
                    Tone::Negative => RED,
                    Tone::Neutral => BLACK,
                };
                self.ensure_room(LEADING + 4.0);
                self.text(MARGIN, self.y, Font::Bold, 12.0, color, text);
                self.y -= LEADING + 4.0;
            }
            Block::Labelled { label, text } => {
                self.ensure_room(2.0 * LEADING);
                self.text(MARGIN, self.y, Font::Bold, 11.0, BLACK, label);
                self.y -= LEADING;
                self.text(MARGIN, self.y, Font::Regular, 10.0, BLACK, text);
                self.y -= LEADING + 4.0;
            }
            Block::Paragraph { title, lines } => {
                if let Some(title) = title {
                    self.line(Font::Bold, BODY_SIZE, GRAY, title);
                }
                for text in lines {
                    for part in text.split('\n') {
                        self.line(Font::Regular, BODY_SIZE, BLACK, part);
                    }
                }
                self.gap(6.0);
            }
            Block::Table(table) => self.draw_table(table),
            Block::TotalsBox(rows) => self.draw_totals(rows),
            Block::Footer(text) => {
                // Pinned near the bottom of the page.
                let width = text_width(text, 8.0);
                let x = (PAGE_WIDTH - width) / 2.0;
                self.text(x.max(MARGIN), MARGIN - 10.0, Font::Italic, 8.0, GRAY, text);
            }
        }
    }

    fn draw_header(
        &mut self,
        business: &str,
        business_lines: &[String],
        title: &str,
        meta_lines: &[String],
    ) {
        let top = self.y;
        self.text(MARGIN, top, Font::Bold, 20.0, BRAND, business);
        let mut left_y = top - 16.0;
        for text in business_lines {
            self.text(MARGIN, left_y, Font::Regular, BODY_SIZE, GRAY, text);
            left_y -= LEADING;
        }

        let right_x = PAGE_WIDTH / 2.0 + 50.0;
        self.text(right_x, top, Font::Bold, 14.0, BLACK, title);
        let mut right_y = top - 14.0;
        for text in meta_lines {
            self.text(right_x, right_y, Font::Regular, BODY_SIZE, BLACK, text);
            right_y -= LEADING;
        }

        self.y = left_y.min(right_y) - 8.0;
        self.rule(MARGIN, self.y + 4.0, USABLE_WIDTH, BRAND);
        self.y -= 8.0;
    }

    fn draw_table(&mut self, table: &Table) {
        let cols = table.columns.len().max(1);
        let col_width = USABLE_WIDTH / cols as f32;

        if let Some(title) = &table.title {
            self.line(Font::Bold, 10.0, BRAND, title);
        }

        // Header row
        self.ensure_room(2.0 * LEADING);
        for (i, name) in table.columns.iter().enumerate() {
            self.text(
                MARGIN + i as f32 * col_width,
                self.y,
                Font::Bold,
                BODY_SIZE,
                BRAND,
                name,
            );
        }
        self.y -= 4.0;
        self.rule(MARGIN, self.y, USABLE_WIDTH, BRAND);
        self.y -= LEADING - 2.0;

        for row in &table.rows {
            let height = row
                .iter()
                .map(|cell| cell.split('\n').count())
                .max()
                .unwrap_or(1) as f32
                * LEADING;
            self.ensure_room(height + 2.0);
            let row_top = self.y;
            for (i, cell) in row.iter().enumerate() {
                let mut cell_y = row_top;
                for part in cell.split('\n') {
                    self.text(
                        MARGIN + i as f32 * col_width,
                        cell_y,
                        Font::Regular,
                        BODY_SIZE,
                        BLACK,
                        part,
                    );
                    cell_y -= LEADING;
                }
            }
            self.y = row_top - height;
        }

        if let Some((label, value)) = &table.footer {
            self.ensure_room(LEADING + 4.0);
            self.rule(MARGIN, self.y + LEADING - 4.0, USABLE_WIDTH, GRAY);
            let value_x = MARGIN + (cols as f32 - 1.0) * col_width;
            let label_x = (value_x - text_width(label, BODY_SIZE)).max(MARGIN);
            self.text(label_x, self.y, Font::Bold, BODY_SIZE, BLACK, label);
            self.text(value_x, self.y, Font::Bold, BODY_SIZE, BRAND, value);
            self.y -= LEADING;
        }
        self.gap(8.0);
    }

    fn draw_totals(&mut self, rows: &[(String, String)]) {
        let value_x = PAGE_WIDTH - MARGIN - 80.0;
        for (label, value) in rows {
            self.ensure_room(LEADING);
            let label_x = (value_x - 10.0 - text_width(label, 10.0)).max(MARGIN);
            self.text(label_x, self.y, Font::Bold, 10.0, BLACK, label);
            self.text(value_x, self.y, Font::Regular, 10.0, BLACK, value);
            self.y -= LEADING;
        }
        self.gap(6.0);
    }

    fn finish(mut self) -> Result<Vec<u8>, AtelierError> {
        let ops = std::mem::take(&mut self.current);
        self.pages.push(ops);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_regular = doc.add_object(font_dict("Helvetica"));
        let font_bold = doc.add_object(font_dict("Helvetica-Bold"));
        let font_italic = doc.add_object(font_dict("Helvetica-Oblique"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => Object::Reference(font_regular),
                "F2" => Object::Reference(font_bold),
                "F3" => Object::Reference(font_italic),
            },
        });

        let mut kids = Vec::new();
        for operations in self.pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| AtelierError::Render(format!("encodage du contenu: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "Contents" => Object::Reference(content_id),
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| AtelierError::Render(format!("écriture du PDF: {e}")))?;
        Ok(bytes)
    }
}

fn font_dict(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode to WinAnsi (latin-1 superset); characters outside it become '?'.
fn win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF { code as u8 } else { b'?' }
        })
        .collect()
}

/// Rough width estimate for right-alignment (Helvetica average glyph
/// width ~0.5 em).
fn text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * 0.5
}
