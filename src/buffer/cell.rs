//! Cell: one terminal column of a rendered board.
//!
//! Flap symbols are single graphemes in character mode, so a cell stores its
//! grapheme inline. Graphemes longer than [`Cell::INLINE`] bytes are drawn as
//! the replacement character.
//!
//! ```text
//! ┌──────────────┬──────────┬───────┬───────────────────┬─────────┐
//! │  glyph       │ len      │ width │ style             │ flags   │
//! │  [u8; 8]     │ u8       │ u8    │ fg, bg, modifiers │ u8      │
//! └──────────────┴──────────┴───────┴───────────────────┴─────────┘
//! ```

use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::new(r, g, b)
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Flap face, a warm off-white.
    pub const FLAP: Self = Self::from_u32(0x00F2_E8CF);
    /// Tile housing.
    pub const HOUSING: Self = Self::from_u32(0x0022_2222);
    /// Hinge line.
    pub const HINGE: Self = Self::from_u32(0x0055_5555);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// ```
    /// use flapboard::Modifiers;
    /// let moving = Modifiers::DIM | Modifiers::UNDERLINE;
    /// assert!(moving.contains(Modifiers::DIM));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct CellFlags: u8 {
        /// Second column of a wide grapheme; not drawn itself.
        const WIDE_CONTINUATION = 0b0000_0001;
    }
}

/// Colors and modifiers applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::BLACK)
    }
}

impl Style {
    /// Create a style without modifiers.
    #[inline]
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Inline grapheme bytes (UTF-8).
    glyph: [u8; Cell::INLINE],
    /// Used length of `glyph`.
    len: u8,
    /// Display width in columns (0 for continuations).
    width: u8,
    /// Colors and modifiers.
    style: Style,
    /// Cell flags.
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Inline grapheme capacity in bytes.
    pub const INLINE: usize = 8;

    /// A space with the default style.
    pub const EMPTY: Self = Self {
        glyph: [b' ', 0, 0, 0, 0, 0, 0, 0],
        len: 1,
        width: 1,
        style: Style::new(Rgb::WHITE, Rgb::BLACK),
        flags: CellFlags::empty(),
    };

    /// Create a cell holding one grapheme.
    ///
    /// Empty graphemes and control characters render as a space;
    /// graphemes too long to store inline render as `U+FFFD`.
    pub fn new(grapheme: &str) -> Self {
        let grapheme = if grapheme.is_empty() || grapheme.chars().any(char::is_control) {
            " "
        } else if grapheme.len() > Self::INLINE {
            "\u{FFFD}"
        } else {
            grapheme
        };

        let mut glyph = [0; Self::INLINE];
        glyph[..grapheme.len()].copy_from_slice(grapheme.as_bytes());
        Self {
            glyph,
            len: u8::try_from(grapheme.len()).unwrap_or(0),
            width: u8::try_from(grapheme.width().clamp(1, 2)).unwrap_or(1),
            style: Style::default(),
            flags: CellFlags::empty(),
        }
    }

    /// The second column of a wide grapheme.
    #[inline]
    pub const fn wide_continuation(style: Style) -> Self {
        Self {
            glyph: [0; Self::INLINE],
            len: 0,
            width: 0,
            style,
            flags: CellFlags::WIDE_CONTINUATION,
        }
    }

    /// The grapheme held by the cell (empty for continuations).
    #[inline]
    pub fn symbol(&self) -> &str {
        std::str::from_utf8(&self.glyph[..usize::from(self.len)]).unwrap_or(" ")
    }

    /// Display width (0, 1 or 2).
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Colors and modifiers.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Whether this cell continues a wide grapheme.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Set the style (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("symbol", &self.symbol())
            .field("width", &self.width)
            .field("style", &self.style)
            .field("flags", &self.flags)
            .finish()
    }
}
