//! 端到端：图像目录 + 标签索引 → CsvImageDataset → DataLoader

use std::collections::HashMap;

use image::{GrayImage, Luma};
use tempfile::TempDir;

use custom_dataset::data::transforms::{one_hot, to_tensor};
use custom_dataset::{CsvImageDataset, DataError, DataLoader, Dataset};

/// 写入 n 张 4x4 灰度图，第 i 张像素值为 i*20，标签为 i % 3
fn prepare(n: usize) -> TempDir {
    let dir = TempDir::new().expect("创建临时目录失败");
    let img_dir = dir.path().join("img");
    std::fs::create_dir(&img_dir).unwrap();

    let mut csv = String::from("file,label\n");
    for i in 0..n {
        let name = format!("sample_{i}.png");
        GrayImage::from_pixel(4, 4, Luma([(i * 20) as u8]))
            .save(img_dir.join(&name))
            .unwrap();
        csv.push_str(&format!("{name},{}\n", i % 3));
    }
    std::fs::write(dir.path().join("labels.csv"), csv).unwrap();
    dir
}

#[test]
fn test_custom_dataset_through_loader() {
    let dir = prepare(7);
    let dataset = CsvImageDataset::<usize>::builder(dir.path().join("labels.csv"), dir.path().join("img"))
        .has_headers(true)
        .transform(to_tensor)
        .build()
        .expect("构造数据集失败")
        .map(|image, label| (image, one_hot(label, 3)));
    assert_eq!(dataset.len(), 7);

    let loader = DataLoader::new(dataset, 3).shuffle(true).seed(1);
    assert_eq!(loader.num_batches(), 3);

    let mut by_pixel = HashMap::new();
    for batch in loader.iter() {
        for (image, label) in batch.expect("批次读取失败") {
            assert_eq!(image.shape(), &[1, 4, 4]);
            let class = label.iter().position(|&v| v == 1.0).expect("one-hot 编码没有 1");
            let pixel = (image[[0, 0, 0]] * 255.0).round() as usize;
            by_pixel.insert(pixel / 20, class);
        }
    }

    // 每个样本恰好读取一次，且标签与图像对应
    assert_eq!(by_pixel.len(), 7);
    for (i, class) in by_pixel {
        assert_eq!(class, i % 3);
    }
}

#[test]
fn test_missing_sample_surfaces_through_loader() {
    let dir = prepare(2);
    std::fs::remove_file(dir.path().join("img").join("sample_1.png")).unwrap();

    let dataset = CsvImageDataset::<usize>::builder(dir.path().join("labels.csv"), dir.path().join("img"))
        .has_headers(true)
        .build()
        .expect("缺失图像不影响构造");

    let loader = DataLoader::new(dataset, 1);
    let results: Vec<_> = loader.iter().collect();
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(DataError::SampleLoad { .. })));
}
