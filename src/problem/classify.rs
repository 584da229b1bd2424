//! Partitioning of global indices into batch, free and summation roles.
//!
//! Global index ids number C's dimensions first (`0..dims(C)`), followed by
//! the summation indices. Each operand dimension is assigned one id.

use smallvec::SmallVec;

use crate::error::{ProblemError, ProblemResult};
use crate::tensor::INLINE_DIMS;

/// Ordered list of global index ids.
pub type IndexList = SmallVec<[usize; INLINE_DIMS]>;

/// A summation index as (position in A, position in B).
pub type SummationPair = (usize, usize);

/// Ordered list of summation pairs.
pub type SummationList = SmallVec<[SummationPair; INLINE_DIMS]>;

/// Role of one global index id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
    /// In C, A and B.
    Batch,
    /// In C and exactly one operand.
    Free,
    /// In A and B but not C, at the given operand positions.
    Summation(SummationPair),
    /// Not used by any tensor.
    Unused,
}

/// Classified indices of a contraction, each list in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexClassification {
    pub free: IndexList,
    pub batch: IndexList,
    pub summation: SummationList,
}

/// Determines the role of global index `id`.
pub fn classify_index(
    id: usize,
    num_dims_c: usize,
    indices_a: &[usize],
    indices_b: &[usize],
) -> ProblemResult<IndexRole> {
    let in_c = id < num_dims_c;
    let pos_a = indices_a.iter().position(|&index| index == id);
    let pos_b = indices_b.iter().position(|&index| index == id);

    match (in_c, pos_a, pos_b) {
        (true, Some(_), Some(_)) => Ok(IndexRole::Batch),
        (true, Some(_), None) | (true, None, Some(_)) => Ok(IndexRole::Free),
        (true, None, None) => Err(ProblemError::IndexUnassigned { index: id }),
        (false, Some(a), Some(b)) => Ok(IndexRole::Summation((a, b))),
        (false, Some(_), None) | (false, None, Some(_)) => {
            Err(ProblemError::SummationIndexAssignmentsInvalid { index: id })
        }
        (false, None, None) => Ok(IndexRole::Unused),
    }
}

/// Classifies every id that could appear in the contraction.
///
/// Summation ids never precede `dims(C)` and A holds at most `dims(A)` of
/// them, so `0..dims(C) + dims(A)` is an upper bound; ids past the last one
/// in use classify as [`IndexRole::Unused`].
pub fn classify_indices(
    num_dims_c: usize,
    indices_a: &[usize],
    indices_b: &[usize],
) -> ProblemResult<IndexClassification> {
    let mut classification = IndexClassification::default();

    for id in 0..num_dims_c + indices_a.len() {
        match classify_index(id, num_dims_c, indices_a, indices_b)? {
            IndexRole::Batch => classification.batch.push(id),
            IndexRole::Free => classification.free.push(id),
            IndexRole::Summation(pair) => classification.summation.push(pair),
            IndexRole::Unused => {}
        }
    }

    tracing::debug!(
        num_free = classification.free.len(),
        num_batch = classification.batch.len(),
        num_summation = classification.summation.len(),
        "classified contraction indices"
    );

    Ok(classification)
}
