//! PDF rendering for the guide.
//!
//! Letter pages, builtin Helvetica: an 18pt title, the five profile fields as
//! a summary block, then the guide text split on blank-line boundaries into
//! paragraphs and bullet lists. The whole document is drained into a byte
//! buffer before returning.

use std::io::BufWriter;
use std::sync::LazyLock;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use regex::Regex;

use crate::error::RenderError;
use crate::intake::{Profile, ProfileField};

/// Blank-line boundary: an empty line may still carry spaces or tabs.
static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// One body block after splitting on blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// Lines rendered with a bullet glyph, leading `-`/`*` markers stripped.
    Bullets(Vec<String>),
    /// Plain paragraph lines.
    Paragraph(Vec<String>),
    /// Blank block: advances vertical space without emitting content.
    Spacer,
}

/// Split guide text on blank-line boundaries.
///
/// A block whose first non-space character is `-` or `*` becomes a bullet
/// list; any other non-empty block is a paragraph; empty blocks are spacers.
fn split_blocks(text: &str) -> Vec<Block> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    BLANK_LINE_RE
        .split(&text)
        .map(|raw| {
            let block = raw.trim();
            if block.is_empty() {
                return Block::Spacer;
            }
            let lines: Vec<&str> = block.lines().map(str::trim).collect();
            if block.starts_with('-') || block.starts_with('*') {
                Block::Bullets(
                    lines
                        .iter()
                        .map(|line| {
                            line.trim_start_matches(['-', '*'])
                                .trim_start()
                                .to_string()
                        })
                        .collect(),
                )
            } else {
                Block::Paragraph(lines.iter().map(|l| l.to_string()).collect())
            }
        })
        .collect()
}

/// Render the guide as a paginated PDF and return the full byte buffer.
pub fn render(title: &str, body: &str, profile: &Profile) -> Result<Vec<u8>, RenderError> {
    // Letter page, 1in margins, 11pt body leading. Untyped float literals so
    // the values adopt whatever width `Mm` wraps.
    let page_w = 215.9;
    let page_h = 279.4;
    let margin = 25.4;
    let line_step = 5.6;

    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(page_w), Mm(page_h), "Layer 1");
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(title, 18.0, Mm(margin), Mm(page_h - margin), &bold);

    // Profile summary block.
    let mut y = page_h - 38.1;
    for field in ProfileField::ORDER {
        layer.use_text(
            format!("{}: {}", field.label(), profile.get(field)),
            11.0,
            Mm(margin),
            Mm(y),
            &regular,
        );
        y -= line_step;
    }
    y -= 7.6;

    // Body blocks.
    for block in split_blocks(body) {
        let lines: Vec<String> = match block {
            Block::Spacer => {
                y -= line_step;
                continue;
            }
            Block::Bullets(lines) => lines.into_iter().map(|l| format!("\u{2022} {l}")).collect(),
            Block::Paragraph(lines) => lines,
        };
        for line in lines {
            if y < margin {
                let (page, page_layer) = doc.add_page(Mm(page_w), Mm(page_h), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = page_h - margin;
            }
            layer.use_text(line, 11.0, Mm(margin), Mm(y), &regular);
            y -= line_step;
        }
        y -= line_step;
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Buffer(e.to_string()))
}
