//! # 文本与 bit 序列互转模块
//!
//! 每个字节展开为 8 个 bit，高位在前；解码时按 8 个一组重新拼回字节。
//! 文本按 Latin-1 处理：每个字符的码位必须在 0..=255 之间。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};

/// 有序的 bit 序列，`true` 表示 1。
pub type Bitstream = Vec<bool>;

/// 将字节序列展开为 bit 序列 (高位在前)。
pub fn encode_bytes(bytes: &[u8]) -> Bitstream {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

/// 将文本展开为 bit 序列。
///
/// # Errors
///
/// 任一字符的码位大于 255 时返回 [`StegoError::UnsupportedCharacter`]，
/// 而不是截断高位。
pub fn encode_text(text: &str) -> Result<Bitstream> {
    Ok(encode_bytes(&latin1_bytes(text)?))
}

/// 将 bit 序列按 8 个一组还原为字节。
///
/// # Errors
///
/// 长度不是 8 的倍数时返回 [`StegoError::MalformedBitstream`]，不会丢弃末尾的残缺字节。
pub fn decode_bits(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % BITS_PER_BYTE != 0 {
        return Err(StegoError::MalformedBitstream { bits: bits.len() });
    }

    Ok(bits
        .chunks_exact(BITS_PER_BYTE)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect())
}

/// 将 bit 序列还原为文本，每个字节对应一个码位相同的字符。
pub fn decode_text(bits: &[bool]) -> Result<String> {
    Ok(latin1_string(&decode_bits(bits)?))
}

/// 文本转为单字节序列，码位超过 255 的字符视为错误。
pub fn latin1_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| StegoError::UnsupportedCharacter { ch, index })
        })
        .collect()
}

/// 单字节序列转为文本。
pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
