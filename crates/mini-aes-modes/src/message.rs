//! Splitting hex messages into blocks and joining them back.

use mini_aes_core::{matrix_to_hex, parse_block, Block, Error, Field, Key, BLOCK_HEX_LEN};

/// Rejects text that does not divide into whole blocks or is shorter than `min_len`.
pub fn check_alignment(text: &str, min_len: usize) -> Result<(), Error> {
    let len = text.len();
    if len % BLOCK_HEX_LEN != 0 {
        return Err(Error::Misaligned { len });
    }
    if len < min_len {
        return Err(Error::TooShort { len, min: min_len });
    }
    Ok(())
}

/// Parses one block, attributing failures to `field`.
pub fn parse_field<T: AsRef<[u8]>>(text: T, field: Field) -> Result<Block, Error> {
    parse_block(text).map_err(|reason| Error::format(field, reason))
}

/// Parses the key text.
pub fn parse_key(text: &str) -> Result<Key, Error> {
    Key::from_hex(text).map_err(|reason| Error::format(Field::Key, reason))
}

/// Parses aligned text into blocks, numbering them from zero.
pub fn parse_blocks(text: &[u8]) -> Result<Vec<Block>, Error> {
    text.chunks(BLOCK_HEX_LEN)
        .enumerate()
        .map(|(index, chunk)| parse_field(chunk, Field::Block(index)))
        .collect()
}

/// Concatenates blocks as uppercase hex.
pub fn join_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(matrix_to_hex).collect()
}
