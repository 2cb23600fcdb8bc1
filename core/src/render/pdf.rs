use crate::prelude::{ReportError, ReportResult};
use crate::render::config::PageSize;
use crate::render::layout::{Element, Page, TextAlign};
use crate::text::{FontMetrics, POINTS_PER_MM};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

const FONT_RESOURCE: Name<'static> = Name(b"F1");

const CATALOG_OBJECT: i32 = 1;
const PAGE_TREE_OBJECT: i32 = 2;
const FONT_OBJECT: i32 = 3;
const FIRST_PAGE_OBJECT: i32 = 4;

/// Serializes laid-out pages into a PDF byte stream.
///
/// Each page gets a page object and a content stream; all pages share one
/// Helvetica font resource in WinAnsi encoding.
pub fn encode(pages: &[Page], page_size: PageSize) -> ReportResult<Vec<u8>> {
    let page_count = i32::try_from(pages.len())
        .ok()
        .filter(|count| *count > 0 && *count < (i32::MAX - FIRST_PAGE_OBJECT) / 2)
        .ok_or_else(|| ReportError::Render(format!("cannot encode {} pages", pages.len())))?;

    let catalog_id = Ref::new(CATALOG_OBJECT);
    let page_tree_id = Ref::new(PAGE_TREE_OBJECT);
    let font_id = Ref::new(FONT_OBJECT);
    let page_ids: Vec<Ref> = (0..page_count)
        .map(|index| Ref::new(FIRST_PAGE_OBJECT + 2 * index))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_count);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let media_box = Rect::new(
        0.0,
        0.0,
        to_points(page_size.width),
        to_points(page_size.height),
    );

    for (page, page_id) in pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut page_writer = pdf.page(*page_id);
        page_writer.media_box(media_box);
        page_writer.parent(page_tree_id);
        page_writer.contents(content_id);
        page_writer.resources().fonts().pair(FONT_RESOURCE, font_id);
        page_writer.finish();

        let content = draw_page(page, page_size.height);
        pdf.stream(content_id, &content);
    }

    Ok(pdf.finish())
}

fn draw_page(page: &Page, page_height: f64) -> Vec<u8> {
    let mut content = Content::new();

    for element in &page.elements {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let (r, g, b) = fill.components();
                content.set_fill_rgb(r, g, b);
                content.rect(
                    to_points(*x),
                    to_points(page_height - y - height),
                    to_points(*width),
                    to_points(*height),
                );
                content.fill_nonzero();
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                let (r, g, b) = color.components();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(to_points(*width));
                content.move_to(to_points(*x1), to_points(page_height - y1));
                content.line_to(to_points(*x2), to_points(page_height - y2));
                content.stroke();
            }
            Element::Text { x, y, style, text } => {
                let left = match style.align {
                    TextAlign::Left => *x,
                    TextAlign::Center => x - FontMetrics::text_width_mm(text, style.size_pt) / 2.0,
                };
                let (r, g, b) = style.color.components();
                let encoded = win_ansi(text);
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(FONT_RESOURCE, style.size_pt as f32);
                content.next_line(to_points(left), to_points(page_height - y));
                content.show(Str(&encoded));
                content.end_text();
            }
        }
    }

    content.finish()
}

fn to_points(mm: f64) -> f32 {
    (mm * POINTS_PER_MM) as f32
}

/// Maps text onto single-byte WinAnsi codes; characters outside Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ 0x20..=0x7e => code as u8,
            code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}
