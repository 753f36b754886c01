use ropey::Rope;

/// Caret position expressed as a zero-based line and a column in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    pub line: usize,
    pub col: usize,
}

impl Caret {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed text of the editable region.
///
/// The caret is a char index into the rope, so every edit is a single rope
/// operation and the buffer never holds a half-applied change.
pub struct RegionBuffer {
    rope: Rope,
    caret: usize,
    /// Column to return to when moving vertically across shorter lines.
    goal_col: Option<usize>,
}

impl RegionBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            caret: 0,
            goal_col: None,
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line ending.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn caret(&self) -> Caret {
        let line = self.rope.char_to_line(self.caret);
        let col = self.caret - self.rope.line_to_char(line);
        Caret { line, col }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.caret, ch);
        self.caret += 1;
        self.goal_col = None;
    }

    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.rope.insert(self.caret, text);
        self.caret += text.chars().count();
        self.goal_col = None;
    }

    /// Append at the very end of the buffer in one rope insert, leaving the
    /// caret where it was.
    pub fn append(&mut self, text: &str) {
        let end = self.rope.len_chars();
        self.rope.insert(end, text);
    }

    /// Backspace. Returns `true` if something was removed.
    pub fn delete_back(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        // Treat CRLF as one break.
        let start = if self.caret >= 2
            && self.rope.char(self.caret - 1) == '\n'
            && self.rope.char(self.caret - 2) == '\r'
        {
            self.caret - 2
        } else {
            self.caret - 1
        };
        self.rope.remove(start..self.caret);
        self.caret = start;
        self.goal_col = None;
        true
    }

    /// Delete. Returns `true` if something was removed.
    pub fn delete_forward(&mut self) -> bool {
        let len = self.rope.len_chars();
        if self.caret >= len {
            return false;
        }
        let end = if self.rope.char(self.caret) == '\r'
            && self.caret + 1 < len
            && self.rope.char(self.caret + 1) == '\n'
        {
            self.caret + 2
        } else {
            self.caret + 1
        };
        self.rope.remove(self.caret..end);
        self.goal_col = None;
        true
    }

    pub fn move_caret(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                let caret = self.caret();
                if caret.col > 0 {
                    self.caret -= 1;
                } else if caret.line > 0 {
                    self.caret = self.line_end_char(caret.line - 1);
                }
                self.goal_col = None;
            }
            Direction::Right => {
                let caret = self.caret();
                if self.caret < self.line_end_char(caret.line) {
                    self.caret += 1;
                } else if caret.line + 1 < self.line_count() {
                    self.caret = self.rope.line_to_char(caret.line + 1);
                }
                self.goal_col = None;
            }
            Direction::Up => {
                let caret = self.caret();
                if caret.line > 0 {
                    self.move_vertically(caret, caret.line - 1);
                }
            }
            Direction::Down => {
                let caret = self.caret();
                if caret.line + 1 < self.line_count() {
                    self.move_vertically(caret, caret.line + 1);
                }
            }
        }
    }

    pub fn move_line_start(&mut self) {
        let line = self.caret().line;
        self.caret = self.rope.line_to_char(line);
        self.goal_col = None;
    }

    pub fn move_line_end(&mut self) {
        let line = self.caret().line;
        self.caret = self.line_end_char(line);
        self.goal_col = None;
    }

    fn move_vertically(&mut self, from: Caret, target_line: usize) {
        let goal = *self.goal_col.get_or_insert(from.col);
        let start = self.rope.line_to_char(target_line);
        let width = self.line_end_char(target_line) - start;
        self.caret = start + goal.min(width);
    }

    /// Char index just before the line ending of `line`.
    fn line_end_char(&self, line: usize) -> usize {
        let start = self.rope.line_to_char(line);
        let chars = self.line(line).map_or(0, |text| text.chars().count());
        start + chars
    }
}

impl std::fmt::Debug for RegionBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionBuffer")
            .field("chars", &self.rope.len_chars())
            .field("caret", &self.caret())
            .finish_non_exhaustive()
    }
}
