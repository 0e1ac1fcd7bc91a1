//! 数据加载模块
//!
//! 提供数据集加载、变换和批处理功能。
//!
//! # 主要组件
//!
//! - [`Dataset`]: 可按索引访问的带标签样本源（构造、`len`、`get`）
//! - [`CsvImageDataset`]: 图像目录 + 标签索引文件构成的自定义数据集
//! - [`FashionMnistDataset`]: Fashion-MNIST 服饰图像数据集（本地 IDX 文件）
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`transforms`]: 数据变换函数（归一化、one-hot 等）
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use custom_dataset::data::{CsvImageDataset, DataLoader, transforms::to_tensor};
//!
//! let dataset = CsvImageDataset::<i64>::builder("data/labels.csv", "data/img")
//!     .transform(to_tensor)
//!     .build()?;
//! let loader = DataLoader::new(dataset, 64).shuffle(true).seed(42);
//!
//! for batch in loader.iter() {
//!     for (image, label) in batch? {
//!         println!("{:?} -> {}", image.shape(), label);
//!     }
//! }
//! ```

mod csv_image;
mod dataloader;
mod dataset;
pub mod datasets;
pub mod error;
pub mod image_io;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use csv_image::{
    CsvImageDataset, CsvImageDatasetBuilder, IndexEntry, IndexOptions, LabelTransform,
    SampleTransform,
};
pub use dataloader::{Batch, DataLoader, DataLoaderIterator};
pub use dataset::{Dataset, MapDataset};
pub use datasets::{FASHION_MNIST_CLASSES, FashionMnistDataset, default_data_dir};
pub use error::DataError;
pub use image_io::{ImageTensor, read_image};
