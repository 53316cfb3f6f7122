//! # lsb_veil 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：文本与 bit 序列的互转、
//! 带 32 位长度头部的逐样本最低位嵌入与提取，以及载体图像的读写。

// 声明库包含的所有模块。

pub mod bits;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::{Result, StegoError};
pub use steganography::{HiddenText, Lsb, embed, extract};
