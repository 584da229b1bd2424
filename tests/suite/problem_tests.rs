//! Problem construction, rendering and ordering tests.

use std::collections::BTreeMap;

use cubek_contraction::{
    DataType, Device, DeviceProfile, Dimension, Operation, OperationType, Problem, ProblemError,
    Tensor,
};
use hashbrown::HashSet;
use pretty_assertions::assert_eq;

use crate::common::{contraction, gemm};

#[test]
fn test_gemm_scenario() {
    let problem = gemm(DataType::Single, 4, 8, 3);

    assert_eq!(problem.indices_free(), &[0, 1]);
    assert!(problem.indices_batch().is_empty());
    assert_eq!(problem.indices_summation(), &[(0, 0)]);
    assert_eq!(problem.validate(), Ok(()));
    assert_eq!(problem.to_string(), "C[i:4,j:8] = Sum(k:3) A[k,i] * B[k,j]");
    assert_eq!(
        problem.num_flops(),
        DataType::Single.flops_per_madd() * 32 * 3
    );
}

#[test]
fn test_unassigned_output_index() {
    // Index 0 belongs to C but neither operand uses it.
    let result = Problem::new(
        Tensor::packed(DataType::Single, &[4, 8]),
        Tensor::packed(DataType::Single, &[3, 8]),
        Tensor::packed(DataType::Single, &[3, 8]),
        &[2, 1],
        &[2, 1],
        Operation::gemm(DataType::Single),
        DeviceProfile::reference(),
    );

    assert_eq!(result.unwrap_err(), ProblemError::IndexUnassigned { index: 0 });
}

#[test]
fn test_attention_scores() {
    // S[q,k,h] = Sum(d) Q[q,d,h] * K[k,d,h]
    let problem = contraction(
        DataType::Half,
        (&[128, 256, 8], &[128, 64, 8], &[256, 64, 8]),
        &[0, 3, 2],
        &[1, 3, 2],
    );

    assert_eq!(problem.indices_free(), &[0, 1]);
    assert_eq!(problem.indices_batch(), &[2]);
    assert_eq!(problem.indices_summation(), &[(1, 1)]);
    assert_eq!(problem.validate(), Ok(()));
    assert_eq!(
        problem.to_string(),
        "C[i:128,j:256,k:8] = Sum(l:64) A[i,l,k] * B[j,l,k]"
    );
    assert_eq!(problem.num_flops(), 2 * 128 * 256 * 8 * 64);
}

#[test]
fn test_num_flops_multiple_summations() {
    // C[i,j] = Sum(k,l) A[i,k,l] * B[l,k,j]
    let problem = contraction(
        DataType::ComplexSingle,
        (&[4, 6], &[4, 3, 5], &[5, 3, 6]),
        &[0, 2, 3],
        &[3, 2, 1],
    );

    assert_eq!(problem.validate(), Ok(()));
    assert_eq!(problem.num_flops(), 8 * 24 * 3 * 5);
    assert_eq!(problem.num_flops(), 8 * 24 * 3 * 5);
}

#[test]
fn test_identical_inputs_are_equal() {
    let first = gemm(DataType::Double, 16, 32, 8);
    let second = gemm(DataType::Double, 16, 32, 8);

    assert_eq!(first, second);
    assert_eq!(first.cmp(&second), std::cmp::Ordering::Equal);
    assert_eq!(first.to_string_xml(1), second.to_string_xml(1));

    let set: HashSet<Problem> = [first, second].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_strides_distinguish_problems() {
    let packed = gemm(DataType::Single, 4, 8, 3);
    let padded = Problem::new(
        Tensor::new(
            DataType::Single,
            [Dimension::new(1, 4), Dimension::new(16, 8)],
        ),
        packed.tensor_a().clone(),
        packed.tensor_b().clone(),
        packed.index_assignments_a(),
        packed.index_assignments_b(),
        *packed.operation(),
        packed.device_profile().clone(),
    )
    .unwrap();

    assert_ne!(packed, padded);
    assert!(packed < padded);
}

#[test]
fn test_lookup_table() {
    let mut table = BTreeMap::new();
    table.insert(gemm(DataType::Single, 64, 64, 64), "sgemm_64");
    table.insert(gemm(DataType::Double, 64, 64, 64), "dgemm_64");
    table.insert(gemm(DataType::Single, 128, 128, 64), "sgemm_128");

    assert_eq!(table.get(&gemm(DataType::Single, 64, 64, 64)), Some(&"sgemm_64"));
    assert_eq!(table.get(&gemm(DataType::Single, 64, 64, 32)), None);

    // Single sorts before double, so both single entries come first.
    let kernels: Vec<_> = table.values().copied().collect();
    assert_eq!(kernels[2], "dgemm_64");
}

#[test]
fn test_operation_metadata_is_part_of_key() {
    let base = gemm(DataType::Single, 4, 8, 3);
    let without_beta = Problem::new(
        base.tensor_c().clone(),
        base.tensor_a().clone(),
        base.tensor_b().clone(),
        base.index_assignments_a(),
        base.index_assignments_b(),
        Operation::new(
            OperationType::Contraction,
            DataType::Single,
            DataType::None,
            false,
        ),
        base.device_profile().clone(),
    )
    .unwrap();

    assert_ne!(base, without_beta);
    assert!(!without_beta.use_beta());
    assert_eq!(without_beta.beta_size(), 0);
}

#[test]
fn test_device_profile_is_part_of_key() {
    let base = gemm(DataType::Single, 4, 8, 3);
    let on_gpu = Problem::new(
        base.tensor_c().clone(),
        base.tensor_a().clone(),
        base.tensor_b().clone(),
        base.index_assignments_a(),
        base.index_assignments_b(),
        *base.operation(),
        DeviceProfile::new([Device::new("Fiji", 64, 1050, 128)]),
    )
    .unwrap();

    assert_ne!(base, on_gpu);
    assert!(base.device_is_reference());
    assert!(!on_gpu.device_is_reference());
}

#[test]
fn test_wide_index_names() {
    // 30 output dims push summation ids past the single-letter alphabet.
    let dims_c = 30;
    let sizes_c = vec![1usize; dims_c];
    let indices_a: Vec<usize> = (0..15).chain([dims_c]).collect();
    let indices_b: Vec<usize> = (15..30).chain([dims_c]).collect();
    let sizes_operand = vec![1usize; 16];

    let problem = contraction(
        DataType::Single,
        (&sizes_c, &sizes_operand, &sizes_operand),
        &indices_a,
        &indices_b,
    );

    assert_eq!(problem.validate(), Ok(()));
    let rendered = problem.to_string();
    assert!(rendered.contains("Sum(m1:1)"), "{rendered}");
    assert!(rendered.contains(",l1:1]"), "{rendered}");
}

#[test]
fn test_permuted_operand_is_a_distinct_problem() {
    // Same memory layout for A, listed with its dimensions swapped. Problems
    // are not canonicalized, so the two describe the same computation but
    // remain different keys.
    let base = gemm(DataType::Single, 4, 8, 3);
    let permuted = Problem::new(
        base.tensor_c().clone(),
        Tensor::new(
            DataType::Single,
            [Dimension::new(3, 4), Dimension::new(1, 3)],
        ),
        base.tensor_b().clone(),
        &[0, 2],
        base.index_assignments_b(),
        *base.operation(),
        base.device_profile().clone(),
    )
    .unwrap();

    assert_eq!(permuted.validate(), Ok(()));
    assert_eq!(permuted.indices_summation(), &[(1, 0)]);
    assert_eq!(permuted.num_flops(), base.num_flops());
    assert_eq!(permuted.to_string(), "C[i:4,j:8] = Sum(k:3) A[i,k] * B[k,j]");

    assert_ne!(permuted, base);
    assert_ne!(permuted.to_string_xml(0), base.to_string_xml(0));
}
