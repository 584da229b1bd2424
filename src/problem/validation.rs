//! Geometric consistency checks for constructed problems.

use super::config::ValidationConfig;
use super::problem::Problem;
use crate::error::{Operand, ValidationError, ValidationResult};
use crate::tensor::Tensor;

/// Validates a problem, reporting the first rule it breaks.
///
/// Checks, in order:
/// - Operands have the same number of dimensions
/// - Free indices split evenly between the operands
/// - Classified indices consume every operand and output dimension
/// - At least one index is summed over
/// - Assignments are in range and unique within each operand
/// - Matched dimensions agree in size (unless disabled)
/// - The device profile holds a supported number of devices
pub fn validate_problem(problem: &Problem, config: &ValidationConfig) -> ValidationResult<()> {
    let result = check_problem(problem, config);

    match &result {
        Ok(()) => tracing::debug!(problem = %problem, "problem validated"),
        Err(error) => tracing::debug!(problem = %problem, ?error, "problem rejected"),
    }

    result
}

fn check_problem(problem: &Problem, config: &ValidationConfig) -> ValidationResult<()> {
    validate_dimension_counts(problem)?;
    validate_index_counts(problem)?;
    validate_assignments(problem)?;
    if config.check_sizes {
        validate_sizes(problem)?;
    }
    validate_device_count(problem, config)?;
    Ok(())
}

/// Validates that both operands have the same rank.
fn validate_dimension_counts(problem: &Problem) -> ValidationResult<()> {
    let dims_a = problem.tensor_a().num_dims();
    let dims_b = problem.tensor_b().num_dims();
    if dims_a != dims_b {
        return Err(ValidationError::OperandNumDimensionsMismatch { dims_a, dims_b });
    }
    Ok(())
}

/// Validates the sizes of the classified index lists.
fn validate_index_counts(problem: &Problem) -> ValidationResult<()> {
    let num_free = problem.indices_free().len();
    let num_batch = problem.indices_batch().len();
    let num_summation = problem.indices_summation().len();

    // Each operand contributes half of the free indices (M and N for GEMM).
    if num_free % 2 != 0 || num_free < 2 {
        return Err(ValidationError::NumFreeIndicesInvalid { num_free });
    }

    let dims_a = problem.tensor_a().num_dims();
    let consumed = num_free / 2 + num_batch + num_summation;
    if consumed != dims_a {
        return Err(ValidationError::OperandNumIndicesMismatch {
            expected: dims_a,
            got: consumed,
        });
    }

    if num_free + num_batch != problem.tensor_c().num_dims() {
        return Err(ValidationError::NumFreeIndicesInvalid { num_free });
    }

    if num_summation < 1 {
        return Err(ValidationError::NumSummationIndicesInvalid { num_summation });
    }

    Ok(())
}

/// Validates that assignments are in range and contain no duplicates.
fn validate_assignments(problem: &Problem) -> ValidationResult<()> {
    let max_index = problem.indices_free().len()
        + problem.indices_batch().len()
        + problem.indices_summation().len()
        - 1;

    check_assignments(
        problem.index_assignments_a(),
        problem.index_assignments_b(),
        max_index,
    )
}

/// Walks both assignments in lockstep; operand ranks already match.
fn check_assignments(
    indices_a: &[usize],
    indices_b: &[usize],
    max_index: usize,
) -> ValidationResult<()> {
    for i in 0..indices_a.len() {
        if indices_a[i] > max_index {
            return Err(ValidationError::IndexAssignmentInvalid {
                operand: Operand::A,
                position: i,
            });
        }
        if indices_b[i] > max_index {
            return Err(ValidationError::IndexAssignmentInvalid {
                operand: Operand::B,
                position: i,
            });
        }
        for j in i + 1..indices_a.len() {
            if indices_a[i] == indices_a[j] {
                return Err(ValidationError::IndexAssignmentDuplicate {
                    operand: Operand::A,
                    index: indices_a[i],
                });
            }
            if indices_b[i] == indices_b[j] {
                return Err(ValidationError::IndexAssignmentDuplicate {
                    operand: Operand::B,
                    index: indices_b[i],
                });
            }
        }
    }

    Ok(())
}

/// Validates that every matched pair of dimensions has the same size.
fn validate_sizes(problem: &Problem) -> ValidationResult<()> {
    check_operand_sizes(
        Operand::A,
        problem.tensor_c(),
        (problem.tensor_a(), problem.index_assignments_a()),
        (problem.tensor_b(), problem.index_assignments_b()),
    )?;
    check_operand_sizes(
        Operand::B,
        problem.tensor_c(),
        (problem.tensor_b(), problem.index_assignments_b()),
        (problem.tensor_a(), problem.index_assignments_a()),
    )
}

/// Matches each dimension of `operand` against C, or against the other
/// operand for summation indices.
fn check_operand_sizes(
    operand: Operand,
    tensor_c: &Tensor,
    (tensor, indices): (&Tensor, &[usize]),
    (other_tensor, other_indices): (&Tensor, &[usize]),
) -> ValidationResult<()> {
    for (position, &index) in indices.iter().enumerate() {
        let size = tensor[position].size;

        let expected = if index < tensor_c.num_dims() {
            tensor_c[index].size
        } else {
            // Summation index, sized by the other operand.
            let other_position = other_indices
                .iter()
                .position(|&other| other == index)
                .ok_or(ValidationError::IndexUnassigned { index })?;
            other_tensor[other_position].size
        };

        if expected != size {
            return Err(ValidationError::IndexAssignmentInvalid { operand, position });
        }
    }
    Ok(())
}

/// Validates the number of devices in the profile.
fn validate_device_count(problem: &Problem, config: &ValidationConfig) -> ValidationResult<()> {
    let num_devices = problem.device_profile().num_devices();
    if num_devices < 1 || num_devices > config.max_devices {
        return Err(ValidationError::DeviceProfileNumDevicesInvalid {
            num_devices,
            max: config.max_devices,
        });
    }
    Ok(())
}
