/*
 * @Description  : Dataset - 可按索引随机访问的带标签样本源
 *
 * 任何数据集只需实现三件事：构造、len、get。
 * 批量加载（DataLoader）与可视化等下游组件只依赖这一约定。
 */

use rand::Rng;

use super::error::DataError;

/// 带标签样本源的统一接口
///
/// `get` 只读取、不修改数据集，多个线程可同时调用。
pub trait Dataset {
    /// 样本类型（如图像张量）
    type Sample;
    /// 标签类型（如类别索引）
    type Label;

    /// 样本数量
    fn len(&self) -> usize;

    /// 检查数据集是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取第 index 个样本
    ///
    /// `index >= len()` 时返回 `DataError::IndexOutOfBounds`
    fn get(&self, index: usize) -> Result<(Self::Sample, Self::Label), DataError>;

    /// 均匀随机选取一个合法索引，数据集为空时返回 `None`
    fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize>
    where
        Self: Sized,
    {
        let len = self.len();
        (len > 0).then(|| rng.gen_range(0..len))
    }

    /// 对每个样本施加可改变类型的变换，例如把类别索引转为 one-hot
    ///
    /// # 示例
    /// ```ignore
    /// let dataset = CsvImageDataset::<usize>::new("labels.csv", "img")?
    ///     .map(|image, label| (to_tensor(image), one_hot(label, 10)));
    /// ```
    fn map<F, S, L>(self, f: F) -> MapDataset<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Sample, Self::Label) -> (S, L),
    {
        MapDataset { inner: self, f }
    }
}

/// [`Dataset::map`] 的返回类型
pub struct MapDataset<D, F> {
    inner: D,
    f: F,
}

impl<D, F> MapDataset<D, F> {
    /// 获取被包装的数据集
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D, F, S, L> Dataset for MapDataset<D, F>
where
    D: Dataset,
    F: Fn(D::Sample, D::Label) -> (S, L),
{
    type Sample = S;
    type Label = L;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Result<(S, L), DataError> {
        let (sample, label) = self.inner.get(index)?;
        Ok((self.f)(sample, label))
    }
}
