//! Serde round trips of the descriptor building blocks.

use cubek_contraction::{
    DataType, Device, DeviceProfile, Dimension, Operation, OperationType, Tensor,
};
use pretty_assertions::assert_eq;

#[test]
fn test_tensor_json_round_trip() {
    let tensor = Tensor::new(
        DataType::ComplexHalf,
        [Dimension::new(1, 4), Dimension::new(16, 8)],
    );

    let json = serde_json::to_string(&tensor).unwrap();
    let decoded: Tensor = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, tensor);
}

#[test]
fn test_high_rank_tensor_json_round_trip() {
    // More dimensions than the inline capacity, so the list lives on the heap.
    let sizes: Vec<usize> = (1..=12).collect();
    let tensor = Tensor::packed(DataType::Double, &sizes);

    let json = serde_json::to_string(&tensor).unwrap();
    let decoded: Tensor = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.num_dims(), 12);
    assert_eq!(decoded, tensor);
}

#[test]
fn test_dimension_json_fields() {
    let json = serde_json::to_value(Dimension::new(4, 8)).unwrap();

    assert_eq!(json, serde_json::json!({ "stride": 4, "size": 8 }));
}

#[test]
fn test_device_profile_json_round_trip() {
    let profile = DeviceProfile::new([
        Device::new("Fiji", 64, 1050, 128),
        Device::reference(),
    ]);

    let json = serde_json::to_string(&profile).unwrap();
    let decoded: DeviceProfile = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, profile);
}

#[test]
fn test_operation_json_round_trip() {
    let operation = Operation::new(
        OperationType::Correlation,
        DataType::ComplexSingle,
        DataType::None,
        true,
    );

    let json = serde_json::to_string(&operation).unwrap();
    let decoded: Operation = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, operation);
}
