//! Validation tests against the public API.

use cubek_contraction::{
    DataType, Device, DeviceProfile, Operand, Operation, Problem, Tensor, ValidationConfig,
    ValidationError,
};
use pretty_assertions::assert_eq;

use crate::common::{contraction, gemm};

#[test]
fn test_zero_free_indices() {
    // Dot product: C is a scalar.
    let problem = contraction(DataType::Single, (&[], &[16], &[16]), &[0], &[0]);

    assert!(problem.indices_free().is_empty());
    assert_eq!(
        problem.validate(),
        Err(ValidationError::NumFreeIndicesInvalid { num_free: 0 })
    );
}

#[test]
fn test_zero_summation_indices() {
    // Outer product: nothing is contracted.
    let problem = contraction(DataType::Single, (&[4, 8], &[4], &[8]), &[0], &[1]);

    assert_eq!(
        problem.validate(),
        Err(ValidationError::NumSummationIndicesInvalid { num_summation: 0 })
    );
}

#[test]
fn test_four_free_indices() {
    // C[i,j,k,l] = Sum(m) A[i,m,k] * B[m,j,l]
    let problem = contraction(
        DataType::Single,
        (&[4, 8, 2, 6], &[4, 3, 2], &[3, 8, 6]),
        &[0, 4, 2],
        &[4, 1, 3],
    );

    assert_eq!(problem.indices_free(), &[0, 1, 2, 3]);
    assert_eq!(problem.indices_summation(), &[(1, 0)]);
    assert_eq!(problem.validate(), Ok(()));
    assert_eq!(problem.num_flops(), 2 * (4 * 8 * 2 * 6) * 3);
}

#[test]
fn test_zero_devices() {
    let base = gemm(DataType::Single, 4, 8, 3);
    let problem = Problem::new(
        base.tensor_c().clone(),
        base.tensor_a().clone(),
        base.tensor_b().clone(),
        base.index_assignments_a(),
        base.index_assignments_b(),
        *base.operation(),
        DeviceProfile::default(),
    )
    .unwrap();

    assert_eq!(
        problem.validate(),
        Err(ValidationError::DeviceProfileNumDevicesInvalid { num_devices: 0, max: 1 })
    );
    assert!(!problem.device_is_reference());
}

#[test]
fn test_validate_is_idempotent() {
    let valid = gemm(DataType::Double, 32, 16, 8);
    let invalid = contraction(DataType::Single, (&[4, 8], &[4], &[8]), &[0], &[1]);

    assert_eq!(valid.validate(), valid.validate());
    assert_eq!(invalid.validate(), invalid.validate());
    assert!(invalid.validate().is_err());
}

#[test]
fn test_rejected_problem_is_still_usable() {
    let problem = contraction(DataType::Single, (&[4, 8], &[3, 5], &[3, 8]), &[2, 0], &[2, 1]);

    let error = problem.validate().unwrap_err();
    assert_eq!(error.operand(), Some(Operand::A));
    assert_eq!(problem.to_string(), "C[i:4,j:8] = Sum(k:3) A[k,i] * B[k,j]");
    assert_eq!(problem.validate_with(&ValidationConfig::relaxed()), Ok(()));
}

#[test]
fn test_size_mismatch_reports_operand_b() {
    let problem = contraction(DataType::Single, (&[4, 8], &[3, 4], &[3, 7]), &[2, 0], &[2, 1]);

    assert_eq!(
        problem.validate(),
        Err(ValidationError::IndexAssignmentInvalid {
            operand: Operand::B,
            position: 1
        })
    );
}

#[test]
fn test_multi_device_config() {
    let base = gemm(DataType::Single, 4, 8, 3);
    let problem = Problem::new(
        base.tensor_c().clone(),
        base.tensor_a().clone(),
        base.tensor_b().clone(),
        base.index_assignments_a(),
        base.index_assignments_b(),
        Operation::gemm(DataType::Single),
        DeviceProfile::new([
            Device::new("Fiji", 64, 1050, 128),
            Device::new("Fiji", 64, 1050, 128),
        ]),
    )
    .unwrap();

    assert!(problem.validate().is_err());
    let config = ValidationConfig::new().with_max_devices(2);
    assert_eq!(problem.validate_with(&config), Ok(()));
}

#[test]
fn test_error_messages() {
    let error = ValidationError::IndexAssignmentDuplicate {
        operand: Operand::B,
        index: 3,
    };
    assert_eq!(error.to_string(), "duplicate index 3 assigned in operand B");

    let tensor = Tensor::packed(DataType::Single, &[4]);
    let error = Problem::new(
        tensor.clone(),
        tensor.clone(),
        tensor,
        &[1],
        &[0],
        Operation::gemm(DataType::Single),
        DeviceProfile::reference(),
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "summation index 1 is assigned to only one operand"
    );
}
