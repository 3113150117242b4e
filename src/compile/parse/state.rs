use crate::{
    compile::parse::token::{Path, Token},
    region::Region,
};

/// A section that has been opened but not closed yet.
#[derive(Debug)]
pub struct OpenSection {
    /// Literal key from the open tag, compared against the close tag.
    pub key: String,
    /// Path parsed from the key.
    pub path: Path,
    /// True for inverted sections.
    pub invert: bool,
    /// Tokens collected so far.
    pub body: Vec<Token>,
    /// Position in the source where the raw body begins.
    pub start: usize,
    /// Region of the open tag.
    pub region: Region,
}
