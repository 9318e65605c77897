//! PDF assembly with `pdf-writer`
//!
//! Builds an A4 document from classified policy text: a cover page, a
//! weather summary section, the policy recommendations, and a footer on
//! every page. Text uses the built-in Helvetica fonts with WinAnsi
//! encoding; characters outside the encoding render as `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::ReportContext;
use crate::layout::{PolicyLine, classify_policy_text, wrap};

// A4 geometry in PostScript points, 2 cm margins
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 56.7;
const FOOTER_BASELINE: f32 = 28.35;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

const TITLE_SIZE: f32 = 20.0;
const SUBTLE_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 8.0;

const SUBTLE_LEADING: f32 = 12.0;
const BODY_LEADING: f32 = 16.0;
const HEADING_LEADING: f32 = 18.0;
const TITLE_LEADING: f32 = 26.0;

// Character budgets for an estimated average glyph width of size/2
const BODY_CHARS_PER_LINE: usize = 88;
const BULLET_CHARS_PER_LINE: usize = 84;
const BULLET_INDENT: f32 = 15.0;
const BULLET_TEXT_GAP: f32 = 12.0;

const TITLE_COLOR: Rgb = Rgb(0.18, 0.49, 0.2);
const HEADING_COLOR: Rgb = Rgb(0.11, 0.37, 0.13);
const GREY: Rgb = Rgb(0.5, 0.5, 0.5);
const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

const FOOTER_TEXT: &str = "AI Climate Policy Maker \u{2014} Generated Report";

#[derive(Clone, Copy)]
struct Rgb(f32, f32, f32);

/// Builds page content streams, breaking to a fresh page when the
/// cursor reaches the bottom margin
struct PageComposer {
    pages: Vec<Vec<u8>>,
    content: Content,
    y: f32,
}

impl PageComposer {
    fn new() -> Self {
        let mut composer = Self {
            pages: Vec::new(),
            content: Content::new(),
            y: PAGE_HEIGHT - MARGIN,
        };
        composer.draw_footer();
        composer
    }

    fn break_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        self.pages.push(content.finish());
        self.y = PAGE_HEIGHT - MARGIN;
        self.draw_footer();
    }

    /// Break to a new page unless `needed` points still fit above the
    /// bottom margin
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.break_page();
        }
    }

    fn advance(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn draw_text(&mut self, x: f32, font: Name<'static>, size: f32, color: Rgb, text: &str) {
        self.content.set_fill_rgb(color.0, color.1, color.2);
        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.next_line(x, self.y);
        self.content.show(Str(&win_ansi(text)));
        self.content.end_text();
    }

    /// One line of text at `x`, consuming `leading` points of height
    fn line(&mut self, x: f32, font: Name<'static>, size: f32, leading: f32, color: Rgb, text: &str) {
        self.ensure_room(leading);
        self.advance(size);
        self.draw_text(x, font, size, color, text);
        self.advance(leading - size);
    }

    fn line_centered(&mut self, font: Name<'static>, size: f32, leading: f32, color: Rgb, text: &str) {
        self.ensure_room(leading);
        self.advance(size);
        self.draw_text(centered_x(text, size), font, size, color, text);
        self.advance(leading - size);
    }

    fn draw_footer(&mut self) {
        let saved_y = self.y;
        self.y = FOOTER_BASELINE;
        self.draw_text(
            centered_x(FOOTER_TEXT, FOOTER_SIZE),
            REGULAR,
            FOOTER_SIZE,
            GREY,
            FOOTER_TEXT,
        );
        self.y = saved_y;
    }

    fn cover(&mut self, context: &ReportContext) {
        self.advance(85.0); // 3 cm drop before the title
        self.line_centered(BOLD, TITLE_SIZE, TITLE_LEADING, TITLE_COLOR, "Climate Policy Report");
        self.advance(20.0);
        self.line_centered(
            REGULAR,
            SUBTLE_SIZE,
            SUBTLE_LEADING,
            GREY,
            &format!("City: {}", context.city),
        );
        self.advance(10.0);
        let stamp = context.generated_at.format("%Y-%m-%d %H:%M");
        self.line_centered(
            REGULAR,
            SUBTLE_SIZE,
            SUBTLE_LEADING,
            GREY,
            &format!("Generated on {stamp}"),
        );
        self.break_page();
    }

    fn heading(&mut self, text: &str) {
        self.line(MARGIN, BOLD, HEADING_SIZE, HEADING_LEADING, HEADING_COLOR, text);
        self.advance(8.0);
    }

    fn paragraph(&mut self, text: &str) {
        for piece in wrap(text, BODY_CHARS_PER_LINE) {
            self.line(MARGIN, REGULAR, BODY_SIZE, BODY_LEADING, BLACK, &piece);
        }
    }

    fn bullet(&mut self, text: &str) {
        for (index, piece) in wrap(text, BULLET_CHARS_PER_LINE).iter().enumerate() {
            self.ensure_room(BODY_LEADING);
            self.advance(BODY_SIZE);
            if index == 0 {
                self.draw_text(MARGIN + BULLET_INDENT, REGULAR, BODY_SIZE, BLACK, "\u{2022}");
            }
            self.draw_text(
                MARGIN + BULLET_INDENT + BULLET_TEXT_GAP,
                REGULAR,
                BODY_SIZE,
                BLACK,
                piece,
            );
            self.advance(BODY_LEADING - BODY_SIZE);
        }
    }

    fn finish(mut self) -> Vec<Vec<u8>> {
        let content = std::mem::replace(&mut self.content, Content::new());
        self.pages.push(content.finish());
        self.pages
    }
}

fn compose_pages(context: &ReportContext) -> Vec<Vec<u8>> {
    let mut composer = PageComposer::new();
    composer.cover(context);

    composer.heading("Weather Summary");
    if context.summary_lines.is_empty() {
        composer.paragraph("No forecast available.");
    } else {
        for line in &context.summary_lines {
            composer.paragraph(line);
        }
    }
    composer.advance(28.35); // 1 cm before the next section

    composer.heading("Policy Recommendations");
    for line in classify_policy_text(&context.policy_text) {
        match line {
            PolicyLine::Bullet(item) => composer.bullet(&item),
            PolicyLine::Paragraph(text) => {
                composer.paragraph(&text);
                composer.advance(5.7); // 0.2 cm between paragraphs
            },
        }
    }

    composer.finish()
}

/// Assemble the document: page tree, Helvetica fonts, one content
/// stream per composed page
pub(crate) fn render(context: &ReportContext) -> Vec<u8> {
    let pages = compose_pages(context);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_font_id = Ref::new(3);
    let bold_font_id = Ref::new(4);

    let mut next_id = 5;
    let page_refs: Vec<(Ref, Ref)> = pages
        .iter()
        .map(|_| {
            let ids = (Ref::new(next_id), Ref::new(next_id + 1));
            next_id += 2;
            ids
        })
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    pdf.pages(page_tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(i32::try_from(pages.len()).unwrap_or(i32::MAX));

    pdf.type1_font(regular_font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_font_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for ((page_id, content_id), content) in page_refs.iter().zip(&pages) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(*content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(REGULAR, regular_font_id);
            fonts.pair(BOLD, bold_font_id);
        }
        page.finish();
        pdf.stream(*content_id, content);
    }

    pdf.finish()
}

/// Horizontal position that roughly centers `text` at `size`
#[allow(clippy::cast_precision_loss)] // Line lengths stay tiny
fn centered_x(text: &str, size: f32) -> f32 {
    let estimated = text.chars().count() as f32 * size * 0.5;
    ((PAGE_WIDTH - estimated) / 2.0).max(MARGIN)
}

/// Encode text as WinAnsi bytes, substituting `?` outside the encoding
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

#[allow(clippy::cast_possible_truncation)] // Guarded by the range checks
fn win_ansi_byte(c: char) -> u8 {
    // The 0x80..=0x9F window holds cp1252 punctuation whose Unicode
    // codepoints sit outside the byte range
    match c {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        c if c.is_ascii() => c as u8,
        c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u8,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn context() -> ReportContext {
        ReportContext {
            city: "Lahore".to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 8, 25, 14, 30, 0).unwrap(),
            summary_lines: vec![
                "2025-08-25: Max 36.1, Min 27.8, Precip 0".to_string(),
                "2025-08-26: Max 35.4, Min 27.2, Precip 1.2".to_string(),
                "2025-08-27: Max 34.9, Min 26.9, Precip 4.5".to_string(),
            ],
            policy_text: "Overview of the situation.\n- Expand urban tree cover\n- Retrofit cooling centres\nClosing remarks.".to_string(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn page_count(bytes: &[u8]) -> usize {
        // One /Contents entry per page object
        bytes
            .windows(b"/Contents".len())
            .filter(|window| *window == b"/Contents")
            .count()
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render(&context());
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"Climate Policy Report"));
        assert!(contains(&bytes, b"City: Lahore"));
        assert!(contains(&bytes, b"Weather Summary"));
        assert!(contains(&bytes, b"Policy Recommendations"));
    }

    #[test]
    fn cover_page_is_separate_from_content() {
        let bytes = render(&context());
        assert!(page_count(&bytes) >= 2);
    }

    #[test]
    fn identical_inputs_render_identical_bytes() {
        assert_eq!(render(&context()), render(&context()));
    }

    #[test]
    fn timestamp_comes_from_the_caller() {
        let mut late = context();
        late.generated_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let bytes = render(&late);
        assert!(contains(&bytes, b"Generated on 2026-01-01 00:00"));
        assert_ne!(bytes, render(&context()));
    }

    #[test]
    fn empty_summary_renders_fallback_line() {
        let mut ctx = context();
        ctx.summary_lines.clear();
        assert!(contains(&render(&ctx), b"No forecast available."));
    }

    #[test]
    fn policy_lines_appear_in_the_document() {
        let bytes = render(&context());
        assert!(contains(&bytes, b"Expand urban tree cover"));
        assert!(contains(&bytes, b"Closing remarks."));
    }

    #[test]
    fn long_documents_paginate() {
        let mut ctx = context();
        ctx.policy_text = (0..200)
            .map(|i| format!("- Measure number {i} with enough text to occupy a line"))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = page_count(&render(&ctx));
        assert!(pages >= 4, "expected at least 4 pages, got {pages}");
    }

    #[test]
    fn win_ansi_substitutes_unencodable_chars() {
        assert_eq!(win_ansi("a"), vec![b'a']);
        assert_eq!(win_ansi("\u{2014}"), vec![0x97]);
        assert_eq!(win_ansi("\u{B0}"), vec![0xB0]);
        assert_eq!(win_ansi("\u{1F30D}"), vec![b'?']);
    }

    #[test]
    fn centered_x_never_crosses_the_margin() {
        let long = "x".repeat(400);
        assert!((centered_x(&long, BODY_SIZE) - MARGIN).abs() < f32::EPSILON);
    }
}
