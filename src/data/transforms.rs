//! 数据变换函数
//!
//! 提供常用的数据预处理操作，如归一化、one-hot 编码等。
//! 它们都可直接作为 `transform` / `target_transform` 传给数据集。

use ndarray::{Array1, Axis};

use super::image_io::ImageTensor;

/// 将 0-255 像素值归一化到 0-1
///
/// # 参数
/// - `image`: 输入图像，值范围 [0, 255]
///
/// # 返回
/// 归一化后的图像，值范围 [0, 1]，形状不变
pub fn to_tensor(image: ImageTensor) -> ImageTensor {
    image / 255.0
}

/// 按通道标准化：`(x - mean[c]) / std[c]`
///
/// # Panics
/// 如果 `mean`/`std` 的长度与图像通道数不一致
///
/// # 示例
/// ```ignore
/// let transform = compose(to_tensor, normalize(&[0.5], &[0.5]));
/// ```
pub fn normalize(
    mean: &[f32],
    std: &[f32],
) -> impl Fn(ImageTensor) -> ImageTensor + Send + Sync + use<> {
    assert_eq!(
        mean.len(),
        std.len(),
        "normalize: mean 和 std 的长度必须一致，得到 {} vs {}",
        mean.len(),
        std.len()
    );
    let mean = mean.to_vec();
    let std = std.to_vec();
    move |mut image: ImageTensor| {
        let channels = image.shape()[0];
        assert_eq!(
            channels,
            mean.len(),
            "normalize: 图像通道数 {} 与 mean/std 长度 {} 不一致",
            channels,
            mean.len()
        );
        for (c, mut plane) in image.axis_iter_mut(Axis(0)).enumerate() {
            let (m, s) = (mean[c], std[c]);
            plane.mapv_inplace(|x| (x - m) / s);
        }
        image
    }
}

/// 展平图像 `[C, H, W]` → `[C*H*W]`
pub fn flatten_image(image: &ImageTensor) -> Array1<f32> {
    image.iter().copied().collect()
}

/// 将类别索引转换为 one-hot 编码
///
/// # 参数
/// - `label`: 类别索引，值为 0..num_classes
/// - `num_classes`: 类别总数
///
/// # 返回
/// 形状为 [num_classes] 的向量；`label` 越界时全为 0
///
/// # 示例
/// ```ignore
/// let encoded = one_hot(2, 3);
/// // 结果: [0, 0, 1]
/// ```
pub fn one_hot(label: usize, num_classes: usize) -> Array1<f32> {
    let mut encoded = Array1::zeros(num_classes);
    if label < num_classes {
        encoded[label] = 1.0;
    }
    encoded
}

/// 组合两个变换：先 `first` 后 `second`
pub fn compose<T, U, V>(
    first: impl Fn(T) -> U + Send + Sync,
    second: impl Fn(U) -> V + Send + Sync,
) -> impl Fn(T) -> V + Send + Sync {
    move |x| second(first(x))
}
