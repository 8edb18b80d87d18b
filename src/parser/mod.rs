pub mod blocks;
pub mod extract;
pub mod markup;
pub mod sections;

use crate::dom::{self, Node, ParseError};

/// Two-pass pipeline: bytes -> tree -> whatever `extract` pulls out of it.
pub fn parse_with<T>(bytes: &[u8], extract: impl FnOnce(&Node) -> T) -> Result<T, ParseError> {
    let root = dom::parse(bytes)?;
    Ok(extract(&root))
}
