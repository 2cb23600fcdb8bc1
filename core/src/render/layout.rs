use crate::render::palette::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Font size, color, and alignment for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f64,
    pub color: Rgb,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn left(size_pt: f64, color: Rgb) -> Self {
        Self {
            size_pt,
            color,
            align: TextAlign::Left,
        }
    }

    pub const fn centered(size_pt: f64, color: Rgb) -> Self {
        Self {
            size_pt,
            color,
            align: TextAlign::Center,
        }
    }
}

/// A drawing primitive in page coordinates (millimetres, origin top-left).
/// Text `y` is the baseline; rectangle `y` is the top edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f64,
        y: f64,
        style: TextStyle,
        text: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}

/// Vertical write cursor over a growing list of pages.
pub struct PageCursor {
    pages: Vec<Page>,
    y: f64,
    top: f64,
}

impl PageCursor {
    pub fn new(top: f64) -> Self {
        Self {
            pages: vec![Page::default()],
            y: top,
            top,
        }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Starts a new page when the cursor has moved past `threshold`.
    pub fn break_if_past(&mut self, threshold: f64) -> bool {
        if self.y > threshold {
            self.pages.push(Page::default());
            self.y = self.top;
            true
        } else {
            false
        }
    }

    /// Text with its baseline `dy` below the cursor.
    pub fn text(&mut self, x: f64, dy: f64, style: TextStyle, text: impl Into<String>) {
        let y = self.y + dy;
        self.place_text(x, y, style, text);
    }

    /// Text at an absolute position on the current page.
    pub fn place_text(&mut self, x: f64, y: f64, style: TextStyle, text: impl Into<String>) {
        self.push(Element::Text {
            x,
            y,
            style,
            text: text.into(),
        });
    }

    /// Filled rectangle whose top edge sits `dy` below the cursor.
    pub fn rect(&mut self, x: f64, dy: f64, width: f64, height: f64, fill: Rgb) {
        let y = self.y + dy;
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    /// Horizontal rule at the cursor.
    pub fn rule(&mut self, x1: f64, x2: f64, width: f64, color: Rgb) {
        let y = self.y;
        self.push(Element::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            width,
            color,
        });
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::BODY;

    #[test]
    fn cursor_breaks_only_past_threshold() {
        let mut cursor = PageCursor::new(20.0);
        cursor.advance(230.0);
        assert!(!cursor.break_if_past(250.0));
        cursor.advance(1.0);
        assert!(cursor.break_if_past(250.0));
        assert_eq!(cursor.y(), 20.0);
        assert_eq!(cursor.page_index(), 1);
    }

    #[test]
    fn elements_land_on_current_page() {
        let mut cursor = PageCursor::new(20.0);
        cursor.text(20.0, 0.0, TextStyle::left(10.0, BODY), "first");
        cursor.advance(300.0);
        cursor.break_if_past(250.0);
        cursor.rect(20.0, -2.0, 80.0, 4.0, BODY);

        let pages = cursor.finish();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains_text("first"));
        assert_eq!(
            pages[1].elements[0],
            Element::Rect {
                x: 20.0,
                y: 18.0,
                width: 80.0,
                height: 4.0,
                fill: BODY
            }
        );
    }
}
