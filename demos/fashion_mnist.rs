//! # Fashion-MNIST 遍历示例
//!
//! 展示如何像列表一样按索引访问数据集：
//! - 从本地 IDX 文件加载 Fashion-MNIST 训练集
//! - 随机抽取 3x3 个样本，打印类别名称与像素统计
//!
//! ## 运行
//! ```bash
//! cargo run --example fashion_mnist -- [数据目录]
//! ```
//!
//! ## 数据集
//! 需预先把 `train-images-idx3-ubyte(.gz)` 与 `train-labels-idx1-ubyte(.gz)`
//! 放在数据目录中，默认目录为 `~/.cache/custom_dataset/datasets/fashion_mnist/`

use std::path::PathBuf;

use custom_dataset::data::transforms::to_tensor;
use custom_dataset::{DataError, Dataset, FashionMnistDataset};

fn main() -> Result<(), DataError> {
    env_logger::init();
    println!("=== Fashion-MNIST 遍历示例 ===\n");

    let root = std::env::args().nth(1).map(PathBuf::from);
    let training_data = FashionMnistDataset::load(root.as_deref(), true)?.with_transform(to_tensor);
    println!("训练集: {} 样本，输入形状 {:?}\n", training_data.len(), training_data.input_shape());

    let (cols, rows) = (3, 3);
    let mut rng = rand::thread_rng();
    for row in 0..rows {
        let mut titles = Vec::with_capacity(cols);
        for _ in 0..cols {
            let Some(sample_idx) = training_data.random_index(&mut rng) else {
                println!("数据集为空");
                return Ok(());
            };
            let (image, label) = training_data.get(sample_idx)?;
            let name = FashionMnistDataset::class_name(label).unwrap_or("?");
            let mean = image.mean().unwrap_or(0.0);
            titles.push(format!("#{sample_idx:<5} {name:<10} (均值 {mean:.3})"));
        }
        println!("[{row}] {}", titles.join(" | "));
    }

    Ok(())
}
