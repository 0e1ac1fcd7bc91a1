mod dataloader;
mod dataset;

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage};

/// 在 dir 下写入一张纯色灰度 PNG
pub(super) fn write_gray_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let path = dir.join(name);
    GrayImage::from_pixel(width, height, Luma([value]))
        .save(&path)
        .expect("写入灰度图像失败");
    path
}

/// 在 dir 下写入一张纯色 RGB PNG
pub(super) fn write_rgb_png(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save(&path)
        .expect("写入 RGB 图像失败");
    path
}

/// 在 dir 下写入文本文件（索引文件等）
pub(super) fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("写入文本文件失败");
    path
}
