//! Document blocks.

/// Points per inch.
pub const INCH: f32 = 72.0;

/// One unit of document content.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Centered document title.
    Title(String),
    /// Section heading.
    Heading(String),
    /// Wrapped body paragraph.
    Body(String),
    /// Body-styled lines, each starting on a new line.
    Lines(Vec<String>),
    /// Body paragraph prefixed with a bullet glyph.
    Bullet(String),
    /// Vertical gap in points.
    Spacer(f32),
    /// Forces the following block onto a new page.
    PageBreak,
}

impl Block {
    /// Creates a [`Block::Title`].
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(text.into())
    }

    /// Creates a [`Block::Heading`].
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(text.into())
    }

    /// Creates a [`Block::Body`].
    pub fn body(text: impl Into<String>) -> Self {
        Self::Body(text.into())
    }

    /// Creates a [`Block::Lines`].
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Creates a [`Block::Bullet`].
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::Bullet(text.into())
    }

    /// Creates a [`Block::Spacer`] of `inches`.
    #[must_use]
    pub fn spacer_inches(inches: f32) -> Self {
        Self::Spacer(inches * INCH)
    }
}

/// A titled, ordered sequence of blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Document title, written to the PDF metadata.
    pub title: String,
    /// Blocks in reading order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Appends a block.
    #[must_use]
    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends a block in place.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Headings in order.
    #[must_use]
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of explicit page breaks.
    #[must_use]
    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }
}
