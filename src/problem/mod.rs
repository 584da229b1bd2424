//! Contraction problems: index classification, validation and rendering.
//!
//! A problem is written `C[i,j] = Sum(k) A[k,i] * B[k,j]`, where every
//! operand dimension is assigned a global index:
//! - Batch: in C, A and B
//! - Free: in C and exactly one operand
//! - Summation: in A and B, contracted away

mod classify;
mod config;
#[allow(clippy::module_inception)]
mod problem;
mod render;
pub mod validation;

pub use classify::{
    IndexClassification, IndexList, IndexRole, SummationList, SummationPair, classify_index,
    classify_indices,
};
pub use config::ValidationConfig;
pub use problem::{Operation, Problem};
pub use render::index_name;
pub use validation::validate_problem;
