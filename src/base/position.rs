/// Position tracking for tokens and declarations
///
/// Stores source locations exactly as the C++ front-end reports them, so
/// diagnostics can point back at the original header.
/// An extent representing a range in source code (1-indexed, like the front-end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (1-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Extent {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an extent from line/column coordinates
    pub fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// An extent covering a single line, handy for tokens.
    pub fn on_line(line: u32, start_col: u32, end_col: u32) -> Self {
        Self::from_coords(line, start_col, line, end_col)
    }

    /// Check if a position falls within this extent
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}
