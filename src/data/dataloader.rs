/*
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 只通过 Dataset::len / Dataset::get 访问数据集，支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 */

use rand::SeedableRng;
use rand::seq::SliceRandom;

use super::dataset::Dataset;
use super::error::DataError;

/// 一个批次：按顺序排列的 (sample, label)
pub type Batch<D> = Vec<(<D as Dataset>::Sample, <D as Dataset>::Label)>;

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// # 示例
/// ```ignore
/// let dataset = CsvImageDataset::<i64>::new("labels.csv", "img")?;
/// let loader = DataLoader::new(dataset, 32)
///     .shuffle(true)
///     .drop_last(true);
///
/// for batch in loader.iter() {
///     for (image, label) in batch? {
///         // ...
///     }
/// }
/// ```
pub struct DataLoader<D> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
}

impl<D: Dataset> DataLoader<D> {
    /// 创建新的 DataLoader
    ///
    /// # 参数
    /// - `dataset`: 数据集
    /// - `batch_size`: 批大小
    ///
    /// # Panics
    /// 如果 batch_size 为 0
    pub fn new(dataset: D, batch_size: usize) -> Self {
        assert!(batch_size > 0, "DataLoader: batch_size 必须大于 0");
        Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
        }
    }

    /// 设置是否打乱数据
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 获取批次数量
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// 获取数据集引用
    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// 创建迭代器
    ///
    /// 每次调用都会重新生成（并按需打乱）索引，相当于一个新的 epoch。
    pub fn iter(&self) -> DataLoaderIterator<'_, D> {
        let n = self.dataset.len();
        let mut indices: Vec<usize> = (0..n).collect();

        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

/// DataLoader 迭代器
pub struct DataLoaderIterator<'a, D> {
    loader: &'a DataLoader<D>,
    indices: Vec<usize>,
    current_batch: usize,
}

impl<D> DataLoaderIterator<'_, D> {
    /// 本 epoch 的样本访问顺序
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D: Dataset> Iterator for DataLoaderIterator<'_, D> {
    type Item = Result<Batch<D>, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;

        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);

        // 如果 drop_last 且批次不完整，则跳过
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }

        self.current_batch += 1;

        // 批次内第一个出错的样本决定该批次的结果，下一批次照常读取
        let batch = self.indices[start..end]
            .iter()
            .map(|&index| self.loader.dataset.get(index))
            .collect();
        Some(batch)
    }
}
