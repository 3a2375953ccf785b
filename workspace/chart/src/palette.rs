use std::fmt;

/// A CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Series colors, handed out by position in the metric list.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Color for the series at `index`; wraps around when there are more
    /// series than colors.
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color("currentColor");
        }
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color("#FCCA74"),
                Color("#CBAACB"),
                Color("#EC8995"),
                Color("#FFD1BA"),
                Color("#A03D5D"),
                Color("#B4E1D7"),
            ],
        }
    }
}
