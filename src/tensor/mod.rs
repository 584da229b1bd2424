//! Tensor, type and device descriptions consumed by problems.

mod data_type;
mod device;
#[allow(clippy::module_inception)]
mod tensor;

pub use data_type::{DataType, OperationType};
pub use device::{Device, DeviceProfile, MAX_DEVICES, REFERENCE_DEVICE};
pub use tensor::{Dimension, Tensor};
pub(crate) use tensor::INLINE_DIMS;
