//! DataLoader 单元测试

use std::collections::HashSet;

use crate::data::{DataError, DataLoader, Dataset};

/// 第 i 个样本为 (i * 10, i)，`broken` 中的索引读取失败
struct RangeDataset {
    len: usize,
    broken: Vec<usize>,
}

impl RangeDataset {
    fn new(len: usize) -> Self {
        Self {
            len,
            broken: Vec::new(),
        }
    }
}

impl Dataset for RangeDataset {
    type Sample = f32;
    type Label = usize;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Result<(f32, usize), DataError> {
        if index >= self.len {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        if self.broken.contains(&index) {
            return Err(DataError::Format(format!("样本 {index} 损坏")));
        }
        Ok((index as f32 * 10.0, index))
    }
}

#[test]
fn test_dataloader_basic() {
    let loader = DataLoader::new(RangeDataset::new(10), 3);
    assert_eq!(loader.num_batches(), 4); // 10 / 3 = 3.33, 向上取整 = 4
    assert_eq!(loader.len(), 10);
    assert!(!loader.is_empty());

    let batches: Vec<_> = loader.iter().map(|b| b.expect("批次读取失败")).collect();
    assert_eq!(batches.len(), 4);

    // 前 3 个批次大小为 3
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[1].len(), 3);
    assert_eq!(batches[2].len(), 3);
    // 最后一个批次大小为 1
    assert_eq!(batches[3].len(), 1);

    // 不打乱时按顺序读取
    assert_eq!(batches[1][0], (30.0, 3));
    assert_eq!(batches[3][0], (90.0, 9));
}

#[test]
fn test_dataloader_drop_last() {
    let loader = DataLoader::new(RangeDataset::new(10), 3).drop_last(true);
    assert_eq!(loader.num_batches(), 3); // 10 / 3 = 3

    let batches: Vec<_> = loader.iter().collect();
    assert_eq!(batches.len(), 3);
}

#[test]
fn test_dataloader_shuffle_with_seed() {
    // 使用相同种子，两次迭代应该产生相同的结果
    let loader1 = DataLoader::new(RangeDataset::new(10), 3).shuffle(true).seed(42);
    let loader2 = DataLoader::new(RangeDataset::new(10), 3).shuffle(true).seed(42);

    let batches1: Vec<_> = loader1.iter().map(Result::unwrap).collect();
    let batches2: Vec<_> = loader2.iter().map(Result::unwrap).collect();
    assert_eq!(batches1, batches2);
}

#[test]
fn test_dataloader_visits_every_index_once() {
    let loader = DataLoader::new(RangeDataset::new(17), 4).shuffle(true);

    let mut seen = HashSet::new();
    for batch in loader.iter() {
        for (_, label) in batch.unwrap() {
            assert!(seen.insert(label), "索引 {label} 被重复读取");
        }
    }
    assert_eq!(seen.len(), 17);
}

#[test]
fn test_dataloader_error_confined_to_batch() {
    let dataset = RangeDataset {
        len: 6,
        broken: vec![3],
    };
    let loader = DataLoader::new(dataset, 2);

    let results: Vec<_> = loader.iter().collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(DataError::Format(_))));
    assert!(results[2].is_ok());
}

#[test]
fn test_dataloader_empty_dataset() {
    let loader = DataLoader::new(RangeDataset::new(0), 4);
    assert!(loader.is_empty());
    assert_eq!(loader.num_batches(), 0);
    assert_eq!(loader.iter().count(), 0);
}

#[test]
#[should_panic(expected = "batch_size")]
fn test_dataloader_zero_batch_size() {
    let _ = DataLoader::new(RangeDataset::new(3), 0);
}
