/// 长度头部占用的样本数。
/// 长度以 32 位无符号整数 (高位在前) 写入前 32 个通道样本的最低位，每个样本 1 bit。
pub const HEADER_BITS: usize = 32;

/// 每个字节展开后的 bit 数。
pub const BITS_PER_BYTE: usize = 8;

/// RGBA 像素的通道数，也是负载写入时的默认步长。
/// 负载 bit 只写入每个像素偏移为 0 的样本 (红色通道)。
pub const RGBA_CHANNELS: usize = 4;

/// 图像中没有隐藏文本 (长度头部为 0) 时向用户展示的提示。
pub const NO_HIDDEN_TEXT: &str = "No hidden text found";

/// 未指定输出路径时，隐写结果图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
