use crate::text::metrics::FontMetrics;

/// Greedy word wrapper measuring with Helvetica advance widths.
///
/// Words are never split. A word wider than the line gets a line of its own.
pub struct TextWrapper {
    max_width_mm: f64,
    size_pt: f64,
}

impl TextWrapper {
    pub fn new(max_width_mm: f64, size_pt: f64) -> Self {
        Self {
            max_width_mm,
            size_pt,
        }
    }

    /// Splits `text` into lines no wider than the configured width.
    /// Explicit newlines start a new line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let space = FontMetrics::text_width_mm(" ", self.size_pt);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0;

            for word in paragraph.split_whitespace() {
                let word_width = FontMetrics::text_width_mm(word, self.size_pt);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                } else if current_width + space + word_width <= self.max_width_mm {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space + word_width;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_width;
                }
            }

            lines.push(current);
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        let wrapper = TextWrapper::new(170.0, 10.0);
        assert_eq!(wrapper.wrap("likely a real photograph"), vec!["likely a real photograph"]);
    }

    #[test]
    fn wrapping_never_breaks_words() {
        let text = "pixel consistency noise patterns edge detection color distribution";
        let wrapper = TextWrapper::new(30.0, 10.0);
        let lines = wrapper.wrap(text);
        assert!(lines.len() > 1);

        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
        for line in &lines {
            for word in line.split(' ') {
                assert!(text.split(' ').any(|w| w == word));
            }
        }
    }

    #[test]
    fn lines_fit_unless_single_word_is_too_wide() {
        let wrapper = TextWrapper::new(20.0, 10.0);
        let lines = wrapper.wrap("a Supercalifragilisticexpialidocious b");
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
        assert!(FontMetrics::text_width_mm(&lines[0], 10.0) <= 20.0);
    }

    #[test]
    fn newline_forces_break() {
        let wrapper = TextWrapper::new(170.0, 10.0);
        assert_eq!(wrapper.wrap("first\nsecond").len(), 2);
    }
}
