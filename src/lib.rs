//! # Custom Dataset
//!
//! `custom_dataset`演示如何为训练流程准备数据：
//! 加载现成的图像分类数据集（Fashion-MNIST），按索引遍历样本与标签，
//! 以及定义自己的数据集——图像存放在目录中，标签记录在单独的索引文件里。
//!
//! 所有数据集都实现同一个 [`data::Dataset`] 约定（构造、`len`、`get`），
//! 下游的批量加载器只依赖这一约定。
//!

pub mod data;

pub use data::{CsvImageDataset, DataError, DataLoader, Dataset, FashionMnistDataset};
