//! # 自定义图像数据集示例
//!
//! 图像存放在目录中，标签记录在单独的 CSV 文件里（每行：文件名,标签）：
//! - 用 `CsvImageDataset` 读取索引，样本按需从硬盘加载
//! - 设置样本变换（像素归一化）与标签变换（one-hot）
//! - 交给 `DataLoader` 分批遍历
//!
//! ## 运行
//! ```bash
//! RUST_LOG=debug cargo run --example custom_image_dataset -- labels.csv img_dir [类别数]
//! ```

use custom_dataset::data::transforms::{one_hot, to_tensor};
use custom_dataset::{CsvImageDataset, DataError, DataLoader, Dataset};

fn main() -> Result<(), DataError> {
    env_logger::init();
    println!("=== 自定义图像数据集示例 ===\n");

    let mut args = std::env::args().skip(1);
    let (Some(annotations_file), Some(img_dir)) = (args.next(), args.next()) else {
        eprintln!("用法: custom_image_dataset <labels.csv> <img_dir> [类别数]");
        std::process::exit(2);
    };
    let num_classes: usize = args.next().and_then(|n| n.parse().ok()).unwrap_or(10);

    let dataset = CsvImageDataset::<usize>::builder(&annotations_file, &img_dir)
        .transform(to_tensor)
        .build()?
        .map(move |image, label| (image, one_hot(label, num_classes)));
    println!("样本数: {}", dataset.len());

    let loader = DataLoader::new(dataset, 4).shuffle(true);
    for (i, batch) in loader.iter().enumerate() {
        match batch {
            Ok(samples) => {
                for (image, label) in samples {
                    println!("  批次 {i}: 图像 {:?}，标签 {}", image.shape(), label);
                }
            }
            // 跳过损坏的批次，其余照常读取
            Err(e) => println!("  批次 {i} 读取失败: {e}"),
        }
    }

    Ok(())
}
