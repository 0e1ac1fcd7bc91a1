/*
 * @Description  : CsvImageDataset - 从标签索引文件 + 图像目录构建的自定义数据集
 *
 * 索引文件每行一个样本：第 0 列为相对于图像目录的文件名，第 1 列为标签。
 * 构造时一次性解析索引；图像在每次 get 时才从硬盘读取，不做缓存。
 */

use std::fmt;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::error::DataError;
use super::image_io::{ImageTensor, read_image};

/// 样本变换：作用于读取到的图像
pub type SampleTransform = Box<dyn Fn(ImageTensor) -> ImageTensor + Send + Sync>;

/// 标签变换：作用于原始标签
pub type LabelTransform<L> = Box<dyn Fn(L) -> L + Send + Sync>;

/// 索引文件中的一行
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexEntry<L> {
    /// 相对于图像目录的文件名
    pub file_name: String,
    /// 原始标签
    pub label: L,
}

/// 索引文件的解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// 首行是否为表头（表头不计入样本）
    pub has_headers: bool,
    /// 字段分隔符
    pub delimiter: u8,
    /// 是否允许各行字段数不一致（第 2 列之后的字段被忽略）
    pub flexible: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
            flexible: false,
        }
    }
}

/// CsvImageDataset - 图像与标签分开存放的数据集
///
/// # 示例
/// ```ignore
/// let dataset = CsvImageDataset::<i64>::builder("data/labels.csv", "data/img")
///     .transform(to_tensor)
///     .build()?;
///
/// let (image, label) = dataset.get(0)?;
/// println!("样本数: {}, 首个标签: {}", dataset.len(), label);
/// ```
pub struct CsvImageDataset<L = i64> {
    entries: Vec<IndexEntry<L>>,
    img_dir: PathBuf,
    transform: Option<SampleTransform>,
    target_transform: Option<LabelTransform<L>>,
}

impl<L: DeserializeOwned> CsvImageDataset<L> {
    /// 使用默认选项、不带变换地创建数据集
    ///
    /// # 参数
    /// - `annotations_file`: 索引文件路径
    /// - `img_dir`: 图像目录
    pub fn new(
        annotations_file: impl AsRef<Path>,
        img_dir: impl AsRef<Path>,
    ) -> Result<Self, DataError> {
        Self::builder(annotations_file, img_dir).build()
    }

    /// 创建构建器，可设置解析选项与变换
    pub fn builder(
        annotations_file: impl AsRef<Path>,
        img_dir: impl AsRef<Path>,
    ) -> CsvImageDatasetBuilder<L> {
        CsvImageDatasetBuilder {
            annotations_file: annotations_file.as_ref().to_path_buf(),
            img_dir: img_dir.as_ref().to_path_buf(),
            options: IndexOptions::default(),
            transform: None,
            target_transform: None,
        }
    }
}

impl<L> CsvImageDataset<L> {
    /// 样本数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 图像目录
    pub fn img_dir(&self) -> &Path {
        &self.img_dir
    }

    /// 全部索引条目
    pub fn entries(&self) -> &[IndexEntry<L>] {
        &self.entries
    }

    /// 第 index 个索引条目
    pub fn entry(&self, index: usize) -> Result<&IndexEntry<L>, DataError> {
        self.entries.get(index).ok_or(DataError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        })
    }

    /// 第 index 个样本的完整图像路径
    pub fn image_path(&self, index: usize) -> Result<PathBuf, DataError> {
        let entry = self.entry(index)?;
        Ok(self.img_dir.join(&entry.file_name))
    }
}

impl<L: Clone> CsvImageDataset<L> {
    /// 获取第 index 个样本
    ///
    /// # 返回
    /// (image, label) 元组，已按需施加变换
    /// - 越界返回 `DataError::IndexOutOfBounds`
    /// - 图像缺失或损坏返回 `DataError::SampleLoad`
    pub fn get(&self, index: usize) -> Result<(ImageTensor, L), DataError> {
        let entry = self.entry(index)?;
        let image = read_image(self.img_dir.join(&entry.file_name))?;

        let image = match &self.transform {
            Some(transform) => transform(image),
            None => image,
        };
        let label = match &self.target_transform {
            Some(target_transform) => target_transform(entry.label.clone()),
            None => entry.label.clone(),
        };

        Ok((image, label))
    }
}

impl<L: Clone> Dataset for CsvImageDataset<L> {
    type Sample = ImageTensor;
    type Label = L;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Result<(ImageTensor, L), DataError> {
        CsvImageDataset::get(self, index)
    }
}

impl<L> fmt::Debug for CsvImageDataset<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvImageDataset")
            .field("len", &self.entries.len())
            .field("img_dir", &self.img_dir)
            .field("transform", &self.transform.is_some())
            .field("target_transform", &self.target_transform.is_some())
            .finish()
    }
}

/// [`CsvImageDataset`] 的构建器
pub struct CsvImageDatasetBuilder<L> {
    annotations_file: PathBuf,
    img_dir: PathBuf,
    options: IndexOptions,
    transform: Option<SampleTransform>,
    target_transform: Option<LabelTransform<L>>,
}

impl<L: DeserializeOwned> CsvImageDatasetBuilder<L> {
    /// 整体设置解析选项
    pub fn options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// 设置首行是否为表头
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.options.has_headers = has_headers;
        self
    }

    /// 设置字段分隔符
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    /// 设置是否允许各行字段数不一致
    pub fn flexible(mut self, flexible: bool) -> Self {
        self.options.flexible = flexible;
        self
    }

    /// 设置样本变换
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(ImageTensor) -> ImageTensor + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// 设置标签变换
    pub fn target_transform<F>(mut self, target_transform: F) -> Self
    where
        F: Fn(L) -> L + Send + Sync + 'static,
    {
        self.target_transform = Some(Box::new(target_transform));
        self
    }

    /// 解析索引文件并创建数据集
    ///
    /// 只解析索引，不检查图像文件是否存在。
    pub fn build(self) -> Result<CsvImageDataset<L>, DataError> {
        let entries = parse_index(&self.annotations_file, &self.options)?;
        log::debug!(
            "从 {:?} 加载了 {} 条索引，图像目录 {:?}",
            self.annotations_file,
            entries.len(),
            self.img_dir
        );

        Ok(CsvImageDataset {
            entries,
            img_dir: self.img_dir,
            transform: self.transform,
            target_transform: self.target_transform,
        })
    }
}

/// 解析索引文件
fn parse_index<L: DeserializeOwned>(
    path: &Path,
    options: &IndexOptions,
) -> Result<Vec<IndexEntry<L>>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .flexible(options.flexible)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| DataError::index_load(path, format!("无法打开: {e}")))?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::index_load(path, e.to_string()))?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < 2 {
            return Err(DataError::index_load(
                path,
                format!("第 {line} 行: 需要至少 2 列（文件名, 标签），实际 {} 列", record.len()),
            ));
        }

        // 只取前两列，其余列（flexible 时）忽略
        let pair: StringRecord = record.iter().take(2).collect();
        let entry: IndexEntry<L> = pair
            .deserialize(None)
            .map_err(|e| DataError::index_load(path, format!("第 {line} 行: {e}")))?;

        if entry.file_name.is_empty() {
            return Err(DataError::index_load(path, format!("第 {line} 行: 文件名为空")));
        }
        entries.push(entry);
    }

    Ok(entries)
}
