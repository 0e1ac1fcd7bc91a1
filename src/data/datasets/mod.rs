//! 内置数据集
//!
//! 提供常用的预定义数据集：
//! - Fashion-MNIST：服饰图像分类（同时兼容 MNIST 文件）

mod fashion_mnist;

pub use fashion_mnist::{FASHION_MNIST_CLASSES, FashionMnistDataset, default_data_dir};
