//! # 错误类型模块
//!
//! 定义隐写核心 (编解码、嵌入、提取以及图像载体) 可能返回的全部错误。
//! 命令处理层会在这些错误之上用 `anyhow` 附加面向用户的上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 使用 [`StegoError`] 的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 隐写操作的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 缺少载体图像或待隐藏的文本。
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    /// 负载加上长度头部超出了载体容量。此时载体不会被修改。
    #[error("Payload too large: {required} bits required, but only {available} bits are available")]
    PayloadTooLarge { required: usize, available: usize },

    /// 长度头部声明的负载超出了载体可容纳的范围。
    #[error(
        "Corrupt header: it claims {claimed} payload bits, but the image can hold at most {available}"
    )]
    CorruptHeader { claimed: u32, available: usize },

    /// 载体样本数不足以容纳 32 位长度头部。
    #[error("Carrier too small: {samples} samples cannot hold the 32-bit length header")]
    CarrierTooSmall { samples: usize },

    /// bit 数不是 8 的倍数，无法还原为完整字节。
    #[error("Malformed bitstream: {bits} bits is not a multiple of 8")]
    MalformedBitstream { bits: usize },

    /// 文本中含有码位大于 255 的字符，无法用单字节表示。
    #[error("Unsupported character {ch:?} at index {index}: code point exceeds 255")]
    UnsupportedCharacter { ch: char, index: usize },

    /// 通道数必须大于 0。
    #[error("Invalid channel count: {0}")]
    InvalidChannelCount(usize),

    /// 载体文件无法被解码为图像。
    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoadFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 输出格式是有损的或无法识别，有损压缩会破坏最低位数据。
    #[error("Refusing to write {}: only lossless formats (png, bmp, tiff, webp, qoi) preserve hidden data", .path.display())]
    LossyOutputFormat { path: PathBuf },

    /// 修改后的图像无法写出。
    #[error("Failed to save image {}: {source}", .path.display())]
    ImageSaveFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
