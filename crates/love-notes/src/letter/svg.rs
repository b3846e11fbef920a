use std::fmt::Write as _;

use async_trait::async_trait;

use super::export::{ExportError, ImageFormat, LetterRenderer, RenderedImage};
use super::LetterView;

const PADDING: u32 = 48;
const LINE_HEIGHT: u32 = 28;
const GLYPH_WIDTH: u32 = 10;
const BACKGROUND: &str = "#fff5f7";
const BORDER: &str = "#e75480";
const INK: &str = "#4a2c36";

/// Built-in renderer drawing the letter card as SVG.
///
/// `width` is in logical pixels; the document is emitted at `width * scale`
/// with a logical `viewBox`, so it stays sharp when rasterized downstream.
#[derive(Debug, Clone)]
pub struct SvgLetterRenderer {
    width: u32,
    scale: u32,
}

impl Default for SvgLetterRenderer {
    fn default() -> Self {
        Self {
            width: 600,
            scale: 2,
        }
    }
}

impl SvgLetterRenderer {
    pub fn new(width: u32, scale: u32) -> Self {
        Self {
            width: width.max(PADDING * 2 + GLYPH_WIDTH * 8),
            scale: scale.max(1),
        }
    }

    fn columns(&self) -> usize {
        ((self.width - PADDING * 2) / GLYPH_WIDTH) as usize
    }

    pub fn document(&self, view: &LetterView) -> String {
        let columns = self.columns();
        let body_lines: Vec<String> = view
            .body
            .split('\n')
            .flat_map(|line| wrap_line(line, columns))
            .collect();

        // date, gap, greeting, gap, body, gap, closing, signature
        let line_count = body_lines.len() as u32 + 7;
        let height = PADDING * 2 + line_count * LINE_HEIGHT;

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width * self.scale,
            height * self.scale,
            self.width,
            height
        )
        .expect("write svg root");
        writeln!(
            svg,
            r#"<rect x="4" y="4" width="{}" height="{}" rx="16" fill="{BACKGROUND}" stroke="{BORDER}" stroke-width="4"/>"#,
            self.width - 8,
            height - 8
        )
        .expect("write card background");
        writeln!(svg, r#"<text x="16" y="40" font-size="24">❤️</text>"#).expect("write top heart");
        writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="24" text-anchor="end">❤️</text>"#,
            self.width - 16,
            height - 16
        )
        .expect("write bottom heart");
        writeln!(
            svg,
            r#"<g font-family="Georgia, serif" font-size="18" fill="{INK}">"#
        )
        .expect("write text group");

        let mut y = PADDING + LINE_HEIGHT;
        writeln!(
            svg,
            r#"<text x="{}" y="{y}" text-anchor="end" font-style="italic">{}</text>"#,
            self.width - PADDING,
            escape_xml(&view.date)
        )
        .expect("write date line");
        y += LINE_HEIGHT * 2;
        writeln!(
            svg,
            r#"<text x="{PADDING}" y="{y}" font-weight="bold">{}</text>"#,
            escape_xml(&view.recipient_line)
        )
        .expect("write greeting");
        y += LINE_HEIGHT;
        for line in &body_lines {
            y += LINE_HEIGHT;
            writeln!(
                svg,
                r#"<text x="{PADDING}" y="{y}" xml:space="preserve">{}</text>"#,
                escape_xml(line)
            )
            .expect("write body line");
        }
        y += LINE_HEIGHT * 2;
        writeln!(
            svg,
            r#"<text x="{}" y="{y}" text-anchor="end">{}</text>"#,
            self.width - PADDING,
            escape_xml(view.closing)
        )
        .expect("write closing");
        y += LINE_HEIGHT;
        writeln!(
            svg,
            r#"<text x="{}" y="{y}" text-anchor="end" font-size="22">{}</text>"#,
            self.width - PADDING,
            escape_xml(&view.signature)
        )
        .expect("write signature");
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

#[async_trait]
impl LetterRenderer for SvgLetterRenderer {
    fn format(&self) -> ImageFormat {
        ImageFormat::Svg
    }

    async fn render(&self, view: &LetterView) -> Result<RenderedImage, ExportError> {
        Ok(RenderedImage {
            format: ImageFormat::Svg,
            bytes: self.document(view).into_bytes(),
        })
    }
}

/// Greedy word wrap on char counts. Words longer than a line are split.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > columns {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(columns);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > columns && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    lines.push(current);
    lines
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
