//! Dataset 约定与 map 组合子的单元测试

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use super::{write_gray_png, write_text};
use crate::data::transforms::{one_hot, to_tensor};
use crate::data::{CsvImageDataset, DataError, Dataset};

fn three_class_dataset(dir: &TempDir) -> CsvImageDataset<usize> {
    write_gray_png(dir.path(), "a.png", 2, 2, 255);
    write_gray_png(dir.path(), "b.png", 2, 2, 0);
    let index = write_text(dir.path(), "labels.csv", "a.png,2\nb.png,0\nmissing.png,1\n");
    CsvImageDataset::new(index, dir.path()).expect("构造数据集失败")
}

#[test]
fn test_map_to_one_hot() {
    let dir = TempDir::new().unwrap();
    let dataset = three_class_dataset(&dir).map(|image, label| (to_tensor(image), one_hot(label, 3)));

    assert_eq!(dataset.len(), 3);
    let (image, label) = dataset.get(0).unwrap();
    assert_eq!(image[[0, 1, 1]], 1.0);
    assert_eq!(label.to_vec(), vec![0.0, 0.0, 1.0]);
    assert_eq!(dataset.inner().len(), 3);
}

#[test]
fn test_map_passes_errors_through() {
    let dir = TempDir::new().unwrap();
    let dataset = three_class_dataset(&dir).map(|_, label| ((), label));

    assert!(matches!(dataset.get(2), Err(DataError::SampleLoad { .. })));
    assert!(matches!(
        dataset.get(3),
        Err(DataError::IndexOutOfBounds { index: 3, len: 3 })
    ));
}

#[test]
fn test_random_index() {
    let dir = TempDir::new().unwrap();
    let dataset = three_class_dataset(&dir);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let index = dataset.random_index(&mut rng).expect("非空数据集应返回索引");
        assert!(index < dataset.len());
    }

    let empty_index = write_text(dir.path(), "empty.csv", "");
    let empty = CsvImageDataset::<usize>::new(empty_index, dir.path()).unwrap();
    assert!(Dataset::is_empty(&empty));
    assert_eq!(empty.random_index(&mut rng), None);
}
