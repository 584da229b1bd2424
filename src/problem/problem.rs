//! The contraction problem descriptor.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::sync::atomic::{self, AtomicBool, AtomicU64};

use serde::{Deserialize, Serialize};

use super::classify::{IndexClassification, IndexList, SummationPair, classify_indices};
use super::config::ValidationConfig;
use super::validation::validate_problem;
use crate::error::{ProblemError, ProblemResult, ValidationResult};
use crate::tensor::{DataType, DeviceProfile, OperationType, REFERENCE_DEVICE, Tensor};

/// Operation metadata of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub operation_type: OperationType,
    /// Type of the alpha scalar, [`DataType::None`] when unused.
    pub alpha_type: DataType,
    /// Type of the beta scalar, [`DataType::None`] when unused.
    pub beta_type: DataType,
    /// Whether kernels must accept tensor offsets.
    pub use_offsets: bool,
}

impl Operation {
    pub fn new(
        operation_type: OperationType,
        alpha_type: DataType,
        beta_type: DataType,
        use_offsets: bool,
    ) -> Self {
        Self {
            operation_type,
            alpha_type,
            beta_type,
            use_offsets,
        }
    }

    /// `C = alpha * A * B + beta * C` with both scalars of `data_type`.
    pub fn gemm(data_type: DataType) -> Self {
        Self::new(OperationType::Contraction, data_type, data_type, false)
    }

    /// Enables or disables tensor offsets.
    pub fn with_offsets(mut self, enabled: bool) -> Self {
        self.use_offsets = enabled;
        self
    }
}

/// Write-once flop count, safe to fill from several threads.
///
/// The value is stored before the flag is published, so a reader that sees
/// the flag also sees the value. Concurrent first calls may both compute it.
#[derive(Debug, Default)]
struct FlopCount {
    value: AtomicU64,
    ready: AtomicBool,
}

impl FlopCount {
    fn get(&self) -> Option<u64> {
        self.ready
            .load(atomic::Ordering::Acquire)
            .then(|| self.value.load(atomic::Ordering::Relaxed))
    }

    fn get_or_init(&self, init: impl FnOnce() -> u64) -> u64 {
        if let Some(value) = self.get() {
            return value;
        }
        let value = init();
        self.value.store(value, atomic::Ordering::Relaxed);
        self.ready.store(true, atomic::Ordering::Release);
        value
    }
}

impl Clone for FlopCount {
    fn clone(&self) -> Self {
        let cloned = Self::default();
        if let Some(value) = self.get() {
            cloned.get_or_init(|| value);
        }
        cloned
    }
}

/// A tensor contraction `C = Sum A * B` with its indices classified.
///
/// Problems that describe the same computation compare equal, which makes
/// them usable as keys when looking up tuned kernels. Construction fails on
/// malformed assignments; geometric checks are left to [`Problem::validate`]
/// so callers can decide what to do with a rejected problem.
#[derive(Debug, Clone)]
pub struct Problem {
    tensor_c: Tensor,
    tensor_a: Tensor,
    tensor_b: Tensor,
    indices_a: IndexList,
    indices_b: IndexList,
    operation: Operation,
    device_profile: DeviceProfile,
    classification: IndexClassification,
    num_flops: FlopCount,
}

impl Problem {
    /// Creates a problem, classifying its indices.
    ///
    /// `indices_a[i]` is the global index of A's dimension `i`, and likewise
    /// for B. C's dimensions are global indices `0..dims(C)`.
    pub fn new(
        tensor_c: Tensor,
        tensor_a: Tensor,
        tensor_b: Tensor,
        indices_a: &[usize],
        indices_b: &[usize],
        operation: Operation,
        device_profile: DeviceProfile,
    ) -> ProblemResult<Self> {
        if indices_a.len() != tensor_a.num_dims() {
            return Err(ProblemError::not_supported(alloc::format!(
                "A has {} dims but {} index assignments",
                tensor_a.num_dims(),
                indices_a.len()
            )));
        }
        if indices_b.len() != tensor_b.num_dims() {
            return Err(ProblemError::not_supported(alloc::format!(
                "B has {} dims but {} index assignments",
                tensor_b.num_dims(),
                indices_b.len()
            )));
        }

        let classification = classify_indices(tensor_c.num_dims(), indices_a, indices_b)?;

        Ok(Self {
            tensor_c,
            tensor_a,
            tensor_b,
            indices_a: indices_a.iter().copied().collect(),
            indices_b: indices_b.iter().copied().collect(),
            operation,
            device_profile,
            classification,
            num_flops: FlopCount::default(),
        })
    }

    /// Decodes a problem from its structured text form.
    ///
    /// See [`Problem::to_string_xml`].
    #[cfg(feature = "std")]
    pub fn from_xml(input: &str) -> Result<Self, crate::error::DecodeError> {
        crate::xml::parse_problem(input)
    }

    /// Validates the problem with default settings.
    ///
    /// The problem is left untouched; calling this repeatedly gives the same
    /// answer.
    pub fn validate(&self) -> ValidationResult<()> {
        self.validate_with(&ValidationConfig::default())
    }

    /// Validates the problem with the given settings.
    pub fn validate_with(&self, config: &ValidationConfig) -> ValidationResult<()> {
        validate_problem(self, config)
    }

    /// Floating-point operations needed to compute the problem.
    ///
    /// `flops_per_madd(C) * elements(C) * product of summation sizes`.
    /// Computed on first use and cached.
    pub fn num_flops(&self) -> u64 {
        self.num_flops.get_or_init(|| {
            let num_dims_c = self.tensor_c.num_dims();
            let summed = self
                .indices_a
                .iter()
                .zip(self.tensor_a.dimensions())
                .filter(|&(&index, _)| index >= num_dims_c)
                .fold(1u64, |acc, (_, dim)| acc.saturating_mul(dim.size as u64));

            let flops = self
                .tensor_c
                .data_type()
                .flops_per_madd()
                .saturating_mul(self.tensor_c.num_elements())
                .saturating_mul(summed);

            tracing::trace!(flops, "computed problem flop count");
            flops
        })
    }

    #[inline]
    pub fn tensor_c(&self) -> &Tensor {
        &self.tensor_c
    }

    #[inline]
    pub fn tensor_a(&self) -> &Tensor {
        &self.tensor_a
    }

    #[inline]
    pub fn tensor_b(&self) -> &Tensor {
        &self.tensor_b
    }

    /// Global index of each dimension of A.
    #[inline]
    pub fn index_assignments_a(&self) -> &[usize] {
        &self.indices_a
    }

    /// Global index of each dimension of B.
    #[inline]
    pub fn index_assignments_b(&self) -> &[usize] {
        &self.indices_b
    }

    /// Indices in C and exactly one operand, ascending.
    #[inline]
    pub fn indices_free(&self) -> &[usize] {
        &self.classification.free
    }

    /// Indices in C and both operands, ascending.
    #[inline]
    pub fn indices_batch(&self) -> &[usize] {
        &self.classification.batch
    }

    /// Summed indices as (position in A, position in B), by ascending global id.
    #[inline]
    pub fn indices_summation(&self) -> &[SummationPair] {
        &self.classification.summation
    }

    #[inline]
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    #[inline]
    pub fn operation_type(&self) -> OperationType {
        self.operation.operation_type
    }

    #[inline]
    pub fn use_offsets(&self) -> bool {
        self.operation.use_offsets
    }

    #[inline]
    pub fn device_profile(&self) -> &DeviceProfile {
        &self.device_profile
    }

    pub fn data_type_c(&self) -> DataType {
        self.tensor_c.data_type()
    }

    pub fn data_type_a(&self) -> DataType {
        self.tensor_a.data_type()
    }

    pub fn data_type_b(&self) -> DataType {
        self.tensor_b.data_type()
    }

    pub fn data_type_alpha(&self) -> DataType {
        self.operation.alpha_type
    }

    pub fn data_type_beta(&self) -> DataType {
        self.operation.beta_type
    }

    pub fn use_alpha(&self) -> bool {
        self.operation.alpha_type != DataType::None
    }

    pub fn use_beta(&self) -> bool {
        self.operation.beta_type != DataType::None
    }

    /// Size of alpha in bytes.
    pub fn alpha_size(&self) -> usize {
        self.operation.alpha_type.size_in_bytes()
    }

    /// Size of beta in bytes.
    pub fn beta_size(&self) -> usize {
        self.operation.beta_type.size_in_bytes()
    }

    /// Whether the problem runs on the reference CPU implementation.
    pub fn device_is_reference(&self) -> bool {
        self.device_profile
            .devices()
            .first()
            .is_some_and(|device| device.name == REFERENCE_DEVICE)
    }

    /// Fields that identify the problem, in comparison order.
    #[allow(clippy::type_complexity)]
    fn key(
        &self,
    ) -> (
        &Tensor,
        &Tensor,
        &Tensor,
        OperationType,
        DataType,
        DataType,
        &[usize],
        &[usize],
        &[SummationPair],
        &[usize],
        &[usize],
        &DeviceProfile,
    ) {
        (
            &self.tensor_c,
            &self.tensor_a,
            &self.tensor_b,
            self.operation.operation_type,
            self.operation.alpha_type,
            self.operation.beta_type,
            self.indices_free(),
            self.indices_batch(),
            self.indices_summation(),
            self.index_assignments_a(),
            self.index_assignments_b(),
            &self.device_profile,
        )
    }
}

impl Ord for Problem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Problem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Problem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Problem {}

impl Hash for Problem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
