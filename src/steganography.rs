//! # LSB 隐写核心模块
//!
//! 写入格式：
//! * 样本 `[0, 32)` 的最低位依次存放负载 bit 数 (32 位无符号整数，高位在前)；
//! * 从样本 32 开始，每隔 `channels` 个样本写入一个负载 bit。
//!
//! 对 RGBA 图像而言，负载只落在每个像素的红色通道上，其它通道保持不变。
//! 嵌入和提取都是无状态的纯函数，所有检查都在第一次写入之前完成。

use crate::bits::{self, Bitstream};
use crate::constants::{HEADER_BITS, NO_HIDDEN_TEXT, RGBA_CHANNELS};
use crate::error::{Result, StegoError};
use log::debug;
use std::fmt;

/// 提取结果。长度头部为 0 时不是错误，而是 [`HiddenText::NotFound`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiddenText {
    Found(String),
    NotFound,
}

impl HiddenText {
    pub fn is_found(&self) -> bool {
        matches!(self, HiddenText::Found(_))
    }
}

impl fmt::Display for HiddenText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HiddenText::Found(text) => f.write_str(text),
            HiddenText::NotFound => f.write_str(NO_HIDDEN_TEXT),
        }
    }
}

/// 1 bit/样本 的最低位隐写方案，负载步长等于每像素的通道数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lsb {
    channels: usize,
}

impl Default for Lsb {
    fn default() -> Self {
        Self::rgba()
    }
}

impl Lsb {
    /// 按给定的每像素通道数创建。
    ///
    /// # Errors
    ///
    /// `channels` 为 0 时返回 [`StegoError::InvalidChannelCount`]。
    pub fn new(channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(StegoError::InvalidChannelCount(channels));
        }
        Ok(Self { channels })
    }

    /// RGBA 布局，负载写入红色通道。
    pub fn rgba() -> Self {
        Self {
            channels: RGBA_CHANNELS,
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 给定样本数的载体在长度头部之后还能容纳的负载 bit 数。
    ///
    /// 结果不会超过 `u32::MAX`，因为长度头部只有 32 位。
    pub fn capacity(&self, samples: usize) -> usize {
        (samples / self.channels)
            .saturating_sub(HEADER_BITS)
            .min(u32::MAX as usize)
    }

    /// 按步长计算的槽位数是否至少能容纳 32 位长度头部。
    /// 不足时嵌入和提取都直接失败，即使负载为空。
    pub fn holds_header(&self, samples: usize) -> bool {
        samples / self.channels >= HEADER_BITS
    }

    /// 将文本隐藏到样本缓冲区中。
    ///
    /// # Errors
    ///
    /// * 文本含有码位大于 255 的字符：[`StegoError::UnsupportedCharacter`]。
    /// * 负载超出容量：[`StegoError::PayloadTooLarge`]，此时 `pixels` 不会被修改。
    pub fn embed(&self, pixels: &mut [u8], payload: &str) -> Result<()> {
        let stream = bits::encode_text(payload)?;
        self.embed_bits(pixels, &stream)
    }

    /// 将任意字节隐藏到样本缓冲区中。
    pub fn embed_bytes(&self, pixels: &mut [u8], payload: &[u8]) -> Result<()> {
        self.embed_bits(pixels, &bits::encode_bytes(payload))
    }

    /// 写入长度头部和负载 bit。失败时不会有任何部分写入。
    pub fn embed_bits(&self, pixels: &mut [u8], stream: &[bool]) -> Result<()> {
        let available = self.capacity(pixels.len());
        let required = stream.len();

        if !self.holds_header(pixels.len()) || required > available {
            return Err(StegoError::PayloadTooLarge {
                required,
                available,
            });
        }

        let length = u32::try_from(required).map_err(|_| StegoError::PayloadTooLarge {
            required,
            available,
        })?;

        debug!(
            "embedding {} payload bits, stride {}, carrier utilisation: {:.4}%",
            required,
            self.channels,
            utilisation(required, available)
        );

        write_header(&mut pixels[..HEADER_BITS], length);

        pixels[HEADER_BITS..]
            .iter_mut()
            .step_by(self.channels)
            .zip(stream)
            .for_each(|(sample, &bit)| {
                *sample = (*sample & !1) | u8::from(bit);
            });

        Ok(())
    }

    /// 从样本缓冲区中提取文本。
    ///
    /// # Errors
    ///
    /// * 缓冲区短于长度头部：[`StegoError::CarrierTooSmall`]。
    /// * 头部声明的长度超出容量：[`StegoError::CorruptHeader`]。
    /// * 头部声明的长度不是 8 的倍数：[`StegoError::MalformedBitstream`]。
    pub fn extract(&self, pixels: &[u8]) -> Result<HiddenText> {
        let text = bits::decode_text(&self.extract_bits(pixels)?)?;
        if text.is_empty() {
            Ok(HiddenText::NotFound)
        } else {
            Ok(HiddenText::Found(text))
        }
    }

    /// 从样本缓冲区中提取原始字节。
    pub fn extract_bytes(&self, pixels: &[u8]) -> Result<Vec<u8>> {
        bits::decode_bits(&self.extract_bits(pixels)?)
    }

    /// 读取长度头部并收集对应数量的负载 bit。
    pub fn extract_bits(&self, pixels: &[u8]) -> Result<Bitstream> {
        let claimed = read_header(pixels)?;
        let available = self.capacity(pixels.len());

        debug!("decoded header: {} payload bits, {} available", claimed, available);

        if !self.holds_header(pixels.len()) || claimed as usize > available {
            return Err(StegoError::CorruptHeader { claimed, available });
        }

        Ok(pixels[HEADER_BITS..]
            .iter()
            .step_by(self.channels)
            .take(claimed as usize)
            .map(|&sample| sample & 1 == 1)
            .collect())
    }
}

/// 以 RGBA 步长隐藏文本，等同于 `Lsb::rgba().embed(..)`。
pub fn embed(pixels: &mut [u8], payload: &str) -> Result<()> {
    Lsb::rgba().embed(pixels, payload)
}

/// 以 RGBA 步长提取文本，等同于 `Lsb::rgba().extract(..)`。
pub fn extract(pixels: &[u8]) -> Result<HiddenText> {
    Lsb::rgba().extract(pixels)
}

/// 读取前 32 个样本最低位组成的长度头部。
///
/// # Errors
///
/// 样本数少于 32 时返回 [`StegoError::CarrierTooSmall`]。
pub fn read_header(pixels: &[u8]) -> Result<u32> {
    let header = pixels
        .get(..HEADER_BITS)
        .ok_or(StegoError::CarrierTooSmall {
            samples: pixels.len(),
        })?;

    Ok(header
        .iter()
        .fold(0u32, |acc, &sample| (acc << 1) | u32::from(sample & 1)))
}

fn write_header(header: &mut [u8], length: u32) {
    for (i, sample) in header.iter_mut().enumerate() {
        let bit = ((length >> (HEADER_BITS - 1 - i)) & 1) as u8;
        *sample = (*sample & !1) | bit;
    }
}

fn utilisation(required: usize, available: usize) -> f64 {
    if available == 0 {
        return 0.0;
    }
    (required as f64 / available as f64) * 100.0
}
