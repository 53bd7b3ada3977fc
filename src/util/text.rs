use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut a string to at most `max_cells` terminal cells, ending in `…` when
/// anything was dropped. Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// A single-line text buffer with a grapheme-aware cursor (byte offset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// A field holding `text` with the cursor at the end
    pub fn with_text(text: &str) -> Self {
        TextField {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cells between the start of the text and the cursor
    pub fn cursor_col(&self) -> usize {
        display_width(&self.text[..self.cursor])
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the grapheme before the cursor
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(start) => {
                self.text.replace_range(start..self.cursor, "");
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme under the cursor
    pub fn delete(&mut self) -> bool {
        match self.next_boundary() {
            Some(end) => {
                self.text.replace_range(self.cursor..end, "");
                true
            }
            None => false,
        }
    }

    /// Delete from the start of the line to the cursor (Ctrl-U)
    pub fn delete_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if let Some(p) = self.prev_boundary() {
            self.cursor = p;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(n) = self.next_boundary() {
            self.cursor = n;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 20), "hello world");
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn truncate_wide_chars() {
        // Each CJK character is two cells
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本\u{2026}");
    }

    #[test]
    fn edit_ascii() {
        let mut f = TextField::default();
        for c in "helo".chars() {
            f.insert_char(c);
        }
        f.move_left();
        f.insert_char('l');
        assert_eq!(f.text(), "hello");
        assert_eq!(f.cursor(), 4);
        f.move_end();
        assert!(f.backspace());
        assert_eq!(f.text(), "hell");
        f.move_home();
        assert!(!f.backspace());
        assert!(f.delete());
        assert_eq!(f.text(), "ell");
    }

    #[test]
    fn edit_respects_graphemes() {
        let mut f = TextField::with_text("cafe\u{301}!");
        f.move_left();
        f.move_left();
        // Cursor sits before the combined "é", not inside it
        assert_eq!(&f.text()[f.cursor()..], "e\u{301}!");
        assert!(f.delete());
        assert_eq!(f.text(), "caf!");
    }

    #[test]
    fn cursor_col_counts_cells() {
        let f = TextField::with_text("日本");
        assert_eq!(f.cursor_col(), 4);
    }

    #[test]
    fn delete_to_start() {
        let mut f = TextField::with_text("abc def");
        f.move_left();
        f.move_left();
        f.delete_to_start();
        assert_eq!(f.text(), "ef");
        assert_eq!(f.cursor(), 0);
    }
}
