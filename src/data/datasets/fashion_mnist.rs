//! Fashion-MNIST 服饰图像数据集（本地 IDX 文件）
//!
//! 支持：
//! - IDX 二进制格式解析（支持 .gz 压缩）
//! - 与 MNIST 同格式，可直接读取 MNIST 文件
//! - 类别名称映射
//!
//! 文件需预先放在数据目录中，本模块不负责下载。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use ndarray::Array3;

use crate::data::dataset::Dataset;
use crate::data::error::DataError;
use crate::data::image_io::ImageTensor;

/// 图像文件 magic number
const IMAGES_MAGIC: u32 = 2051;
/// 标签文件 magic number
const LABELS_MAGIC: u32 = 2049;

/// 类别索引 → 名称
pub const FASHION_MNIST_CLASSES: [&str; 10] = [
    "T-Shirt",
    "Trouser",
    "Pullover",
    "Dress",
    "Coat",
    "Sandal",
    "Shirt",
    "Sneaker",
    "Bag",
    "Ankle Boot",
];

type ImageTransform = Box<dyn Fn(ImageTensor) -> ImageTensor + Send + Sync>;
type TargetTransform = Box<dyn Fn(u8) -> u8 + Send + Sync>;

/// Fashion-MNIST 数据集
///
/// 包含 60,000 个训练样本和 10,000 个测试样本。
/// 每个样本是 28x28 的灰度图像，标签为 0-9。
pub struct FashionMnistDataset {
    /// 像素数据，按样本依次排列，每个样本 rows*cols 字节
    pixels: Vec<u8>,
    /// 标签数据
    labels: Vec<u8>,
    rows: usize,
    cols: usize,
    transform: Option<ImageTransform>,
    target_transform: Option<TargetTransform>,
}

impl FashionMnistDataset {
    /// 完整加载 API
    ///
    /// # 参数
    /// - `root`: 数据目录，None 则使用默认 (~/.cache/custom_dataset/datasets/fashion_mnist)
    /// - `train`: true=训练集(60000), false=测试集(10000)
    ///
    /// # 返回
    /// 加载后的数据集；文件缺失时返回 `DataError::FileNotFound`
    pub fn load(root: Option<&Path>, train: bool) -> Result<Self, DataError> {
        let data_dir = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_data_dir().join("fashion_mnist"));

        let (images_file, labels_file) = if train {
            ("train-images-idx3-ubyte", "train-labels-idx1-ubyte")
        } else {
            ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte")
        };

        let images_path = locate_file(&data_dir, images_file)?;
        let labels_path = locate_file(&data_dir, labels_file)?;
        Self::from_files(&images_path, &labels_path)
    }

    /// 便捷 API：加载训练集（默认路径）
    pub fn train() -> Result<Self, DataError> {
        Self::load(None, true)
    }

    /// 便捷 API：加载测试集（默认路径）
    pub fn test() -> Result<Self, DataError> {
        Self::load(None, false)
    }

    /// 从指定的图像/标签 IDX 文件加载
    pub fn from_files(images_path: &Path, labels_path: &Path) -> Result<Self, DataError> {
        let (pixels, num_images, rows, cols) = parse_idx_images(images_path)?;
        let labels = parse_idx_labels(labels_path)?;

        if labels.len() != num_images {
            log::warn!(
                "{:?} 有 {} 张图像，而 {:?} 有 {} 个标签",
                images_path,
                num_images,
                labels_path,
                labels.len()
            );
            return Err(DataError::Format(format!(
                "图像数 {} 与标签数 {} 不一致",
                num_images,
                labels.len()
            )));
        }
        log::debug!("加载了 {num_images} 个 {rows}x{cols} 样本");

        Ok(Self {
            pixels,
            labels,
            rows,
            cols,
            transform: None,
            target_transform: None,
        })
    }

    /// 设置样本变换
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(ImageTensor) -> ImageTensor + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// 设置标签变换
    pub fn with_target_transform<F>(mut self, target_transform: F) -> Self
    where
        F: Fn(u8) -> u8 + Send + Sync + 'static,
    {
        self.target_transform = Some(Box::new(target_transform));
        self
    }

    /// 返回数据集中的样本数量
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// 数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 获取第 index 个样本
    ///
    /// # 返回
    /// (image, label) 元组
    /// - image: [1, rows, cols]，像素值 0-255（除非设置了变换）
    /// - label: 0-9
    pub fn get(&self, index: usize) -> Result<(ImageTensor, u8), DataError> {
        let len = self.len();
        if index >= len {
            return Err(DataError::IndexOutOfBounds { index, len });
        }

        let size = self.rows * self.cols;
        let start = index * size;
        let data: Vec<f32> = self.pixels[start..start + size]
            .iter()
            .map(|&p| p as f32)
            .collect();
        let image = Array3::from_shape_vec((1, self.rows, self.cols), data)
            .map_err(|e| DataError::Format(e.to_string()))?;

        let image = match &self.transform {
            Some(transform) => transform(image),
            None => image,
        };
        let label = match &self.target_transform {
            Some(target_transform) => target_transform(self.labels[index]),
            None => self.labels[index],
        };

        Ok((image, label))
    }

    /// 输入的形状（不含 batch 维度）
    pub fn input_shape(&self) -> Vec<usize> {
        vec![1, self.rows, self.cols]
    }

    /// 类别名称，label 非法时返回 `None`
    pub fn class_name(label: u8) -> Option<&'static str> {
        FASHION_MNIST_CLASSES.get(label as usize).copied()
    }
}

impl Dataset for FashionMnistDataset {
    type Sample = ImageTensor;
    type Label = u8;

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn get(&self, index: usize) -> Result<(ImageTensor, u8), DataError> {
        FashionMnistDataset::get(self, index)
    }
}

/// 获取默认数据目录
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("custom_dataset")
        .join("datasets")
}

/// 在数据目录中查找文件，优先解压后的版本，其次 .gz
fn locate_file(data_dir: &Path, base_name: &str) -> Result<PathBuf, DataError> {
    let uncompressed_path = data_dir.join(base_name);
    if uncompressed_path.exists() {
        return Ok(uncompressed_path);
    }

    let gz_path = data_dir.join(format!("{base_name}.gz"));
    if gz_path.exists() {
        return Ok(gz_path);
    }

    Err(DataError::FileNotFound(uncompressed_path))
}

/// 打开 IDX 文件，`.gz` 结尾时透明解压
fn open_idx(path: &Path) -> Result<Box<dyn Read>, DataError> {
    let file = File::open(path).map_err(|_| DataError::FileNotFound(path.to_path_buf()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

fn read_be_u32(reader: &mut dyn Read) -> Result<u32, DataError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| DataError::Format(format!("读取头部失败: {e}")))?;
    Ok(u32::from_be_bytes(buf))
}

/// 读取头部之后的数据区，长度不足时报错（头部声明的长度不可信，不预先分配）
fn read_body(reader: Box<dyn Read>, expected: usize, what: &str) -> Result<Vec<u8>, DataError> {
    let mut body = Vec::new();
    reader.take(expected as u64).read_to_end(&mut body)?;
    if body.len() != expected {
        return Err(DataError::Format(format!(
            "{what}数据不完整: 期望 {expected} 字节, 实际 {} 字节",
            body.len()
        )));
    }
    Ok(body)
}

/// 解析 IDX 图像文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000803 = 2051)
/// - [4-7] number of images
/// - [8-11] number of rows
/// - [12-15] number of columns
/// - [16+] pixel data (unsigned byte)
///
/// 返回 (像素, 图像数, 行数, 列数)
fn parse_idx_images(path: &Path) -> Result<(Vec<u8>, usize, usize, usize), DataError> {
    let mut reader = open_idx(path)?;

    let magic = read_be_u32(&mut reader)?;
    if magic != IMAGES_MAGIC {
        return Err(DataError::Format(format!(
            "无效的 magic number: {magic} (期望 {IMAGES_MAGIC})"
        )));
    }

    let num_images = read_be_u32(&mut reader)? as usize;
    let rows = read_be_u32(&mut reader)? as usize;
    let cols = read_be_u32(&mut reader)? as usize;

    let expected = num_images
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| DataError::Format(format!("头部尺寸溢出: {num_images}x{rows}x{cols}")))?;
    let pixels = read_body(reader, expected, "像素")?;

    Ok((pixels, num_images, rows, cols))
}

/// 解析 IDX 标签文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000801 = 2049)
/// - [4-7] number of labels
/// - [8+] label data (unsigned byte, 0-9)
fn parse_idx_labels(path: &Path) -> Result<Vec<u8>, DataError> {
    let mut reader = open_idx(path)?;

    let magic = read_be_u32(&mut reader)?;
    if magic != LABELS_MAGIC {
        return Err(DataError::Format(format!(
            "无效的 magic number: {magic} (期望 {LABELS_MAGIC})"
        )));
    }

    let num_labels = read_be_u32(&mut reader)? as usize;
    read_body(reader, num_labels, "标签")
}
