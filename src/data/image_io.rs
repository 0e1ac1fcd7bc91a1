//! 图像文件读取
//!
//! 将硬盘上的图像解码为通道优先（`[C, H, W]`）的 [`ImageTensor`]，像素值保持 0-255 原值。

use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use ndarray::Array3;

use super::error::DataError;

/// 图像张量，形状为 `[C, H, W]`
pub type ImageTensor = Array3<f32>;

pub trait TraitForDynamicImage {
    fn get_channel_len(&self) -> usize;
    fn to_chw_tensor(&self) -> ImageTensor;
}

impl TraitForDynamicImage for DynamicImage {
    /// 转为 8 位后的通道数：灰度 1、灰度+透明 2、RGB 3、RGBA 4
    fn get_channel_len(&self) -> usize {
        let color = self.color();
        match (color.has_color(), color.has_alpha()) {
            (false, false) => 1,
            (false, true) => 2,
            (true, false) => 3,
            (true, true) => 4,
        }
    }

    fn to_chw_tensor(&self) -> ImageTensor {
        let channels = self.get_channel_len();
        let width = self.width() as usize;
        let height = self.height() as usize;

        // 16 位及浮点图像统一降为 8 位，通道布局不变
        let raw: Vec<u8> = match channels {
            1 => self.to_luma8().into_raw(),
            2 => self.to_luma_alpha8().into_raw(),
            3 => self.to_rgb8().into_raw(),
            _ => self.to_rgba8().into_raw(),
        };

        // raw 为 HWC 排布
        Array3::from_shape_fn((channels, height, width), |(c, y, x)| {
            raw[(y * width + x) * channels + c] as f32
        })
    }
}

/// 读取图像文件为 [`ImageTensor`]
///
/// 文件格式按内容探测，不依赖扩展名。
///
/// # 返回
/// - 成功返回 `[C, H, W]` 张量
/// - 文件不存在、无法读取或解码失败时返回 `DataError::SampleLoad`
pub fn read_image(path: impl AsRef<Path>) -> Result<ImageTensor, DataError> {
    let path = path.as_ref();
    log::trace!("读取图像 {path:?}");
    decode(path)
        .map(|image| image.to_chw_tensor())
        .map_err(|source| DataError::SampleLoad {
            path: path.to_path_buf(),
            source,
        })
}

fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.decode()
}
