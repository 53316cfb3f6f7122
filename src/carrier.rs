//! # 载体图像模块
//!
//! 借助 `image` crate 将图像文件解码为 RGBA8 样本网格，并将修改后的网格以无损格式写回。

use crate::error::{Result, StegoError};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::path::Path;

/// 解码后的载体图像，样本按 R, G, B, A 顺序逐像素排列。
#[derive(Debug, Clone)]
pub struct Carrier {
    image: RgbaImage,
}

impl Carrier {
    /// 读取并解码图像文件，统一转换为 RGBA8。
    ///
    /// # Errors
    ///
    /// 文件无法读取或无法解码时返回 [`StegoError::ImageLoadFailure`]。
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| StegoError::ImageLoadFailure {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        debug!(
            "loaded carrier {}: {}x{}, {} samples",
            path.display(),
            image.width(),
            image.height(),
            image.as_raw().len()
        );

        Ok(Self { image })
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    /// 按目标路径的扩展名选择格式并写出图像。
    ///
    /// # Errors
    ///
    /// * 扩展名无法识别或对应有损格式：[`StegoError::LossyOutputFormat`]，此时不会写入任何文件。
    /// * 编码或写入失败：[`StegoError::ImageSaveFailure`]。
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = lossless_format(path)?;

        self.image
            .save_with_format(path, format)
            .map_err(|source| StegoError::ImageSaveFailure {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// 检查目标路径是否对应一种能保留最低位数据的无损格式。
pub fn lossless_format(path: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(
            format @ (ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
            | ImageFormat::Qoi),
        ) => Ok(format),
        _ => Err(StegoError::LossyOutputFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::PathBuf;

    #[test]
    fn test_lossless_format_accepts_png_and_bmp() {
        assert_eq!(
            lossless_format(&PathBuf::from("out.png")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            lossless_format(&PathBuf::from("out.BMP")).unwrap(),
            ImageFormat::Bmp
        );
    }

    #[test]
    fn test_lossless_format_rejects_jpeg_and_unknown() {
        assert!(matches!(
            lossless_format(&PathBuf::from("out.jpg")),
            Err(StegoError::LossyOutputFormat { .. })
        ));
        assert!(matches!(
            lossless_format(&PathBuf::from("out")),
            Err(StegoError::LossyOutputFormat { .. })
        ));
    }

    #[test]
    fn test_samples_are_rgba_ordered() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        image.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        let mut carrier = Carrier::from_rgba(image);

        assert_eq!(carrier.samples(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        carrier.samples_mut()[4] = 9;
        assert_eq!(carrier.samples()[4], 9);
        assert_eq!((carrier.width(), carrier.height()), (2, 1));
    }

    #[test]
    fn test_open_missing_file() {
        let result = Carrier::open(&PathBuf::from("definitely/not/here.png"));
        assert!(matches!(result, Err(StegoError::ImageLoadFailure { .. })));
    }
}
