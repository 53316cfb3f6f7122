//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bits::{latin1_bytes, latin1_string};
use crate::carrier::{Carrier, lossless_format};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{BITS_PER_BYTE, DOCTORED_PREFIX, NO_HIDDEN_TEXT, RECOVERED_PREFIX};
use crate::error::StegoError;
use crate::steganography::{HiddenText, Lsb};
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查隐写空间是否足够、写入长度头部和文本 bit，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 没有给出要隐藏的文本，或文本为空。
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 无法读取输入的图像或文本文件。
/// * 图像文件没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let payload = read_payload(&args)?;

    let dest = args
        .dest
        .unwrap_or_else(|| default_output_path(&args.image, DOCTORED_PREFIX, "png"));

    lossless_format(&dest)?;
    ensure_writable(&dest, args.force)?;

    let mut carrier = Carrier::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    Lsb::rgba()
        .embed_bytes(carrier.samples_mut(), &payload)
        .map_err(|err| match err {
            StegoError::PayloadTooLarge {
                required,
                available,
            } => anyhow::Error::new(err).context(format!(
                "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            )),
            other => anyhow::Error::new(other).context("Failed to hide the text in the image."),
        })?;

    carrier.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、读取长度头部并收集文本 bit，
/// 最后将恢复的文本写入目标文本文件或打印到标准输出。
/// 长度头部为 0 时只提示 "No hidden text found"，不写入任何文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 长度头部损坏 (超出图像容量或不是完整字节)。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<HiddenText> {
    let carrier = Carrier::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = Lsb::rgba()
        .extract_bytes(carrier.samples())
        .with_context(|| {
            format!(
                "Failed to recover hidden text from '{}'. \nThe image may not contain a hidden message or is corrupted.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    if text.is_empty() {
        println!("{}", NO_HIDDEN_TEXT.yellow().bold());
        return Ok(HiddenText::NotFound);
    }

    debug!("recovered {} bytes", text.len());

    if args.stdout {
        let hidden = HiddenText::Found(display_text(&text));
        println!("{}", hidden);
        return Ok(hidden);
    }

    let dest = args
        .text
        .unwrap_or_else(|| default_output_path(&args.image, RECOVERED_PREFIX, "txt"));

    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(HiddenText::Found(display_text(&text)))
}

/// 处理 'Capacity' 命令的执行逻辑，返回图像最多可隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<usize> {
    let carrier = Carrier::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let bits = Lsb::rgba().capacity(carrier.samples().len());
    let bytes = bits / BITS_PER_BYTE;

    println!(
        "{}x{} image can hide up to {} bytes ({} bits)",
        carrier.width(),
        carrier.height(),
        bytes.to_string().green().bold(),
        bits
    );

    Ok(bytes)
}

/// 文件内容按原始字节隐藏；命令行文本按 Latin-1 隐藏，保证与其它实现互通。
fn read_payload(args: &HideArgs) -> Result<Vec<u8>> {
    let payload = match (&args.text, &args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => latin1_bytes(message)
            .with_context(|| "The message can only contain characters with code points up to 255.")?,
        (None, None) => {
            return Err(StegoError::MissingInput("use --text or --message to give the text to hide").into());
        }
    };

    if payload.is_empty() {
        return Err(StegoError::MissingInput("the text to hide is empty").into());
    }

    Ok(payload)
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在输入文件同目录下生成 `<前缀><原文件名>.<扩展名>`。
pub fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    input.with_file_name(format!("{}{}.{}", prefix, stem, extension))
}

/// 优先按 UTF-8 解释恢复的字节，否则按 Latin-1 逐字节转换。
fn display_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => latin1_string(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/tmp/pics/cat.bmp"), DOCTORED_PREFIX, "png");
        assert_eq!(path, PathBuf::from("/tmp/pics/doctored_cat.png"));

        let path = default_output_path(Path::new("doctored_cat.png"), RECOVERED_PREFIX, "txt");
        assert_eq!(path, PathBuf::from("recovered_doctored_cat.txt"));
    }

    #[test]
    fn test_display_text_falls_back_to_latin1() {
        assert_eq!(display_text("隐写".as_bytes()), "隐写");
        assert_eq!(display_text(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }
}
