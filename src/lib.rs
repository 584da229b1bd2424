//! # CubeK Contraction
//!
//! Describes GEMM / tensor contraction problems so they can be matched
//! against tuned kernels.
//!
//! ## Features
//!
//! - Classification of indices into batch, free and summation roles
//! - Geometric validation of index assignments
//! - Totally ordered problem descriptors usable as cache keys
//! - Stable structured text form, with a reader for round trips
//! - Flop counting and a monotonic timer for benchmarking
//!
//! ## Example
//!
//! ```
//! use cubek_contraction::{DataType, DeviceProfile, Operation, Problem, Tensor};
//!
//! // C[i,j] = Sum(k) A[k,i] * B[k,j]
//! let problem = Problem::new(
//!     Tensor::packed(DataType::Single, &[4, 8]),
//!     Tensor::packed(DataType::Single, &[3, 4]),
//!     Tensor::packed(DataType::Single, &[3, 8]),
//!     &[2, 0],
//!     &[2, 1],
//!     Operation::gemm(DataType::Single),
//!     DeviceProfile::reference(),
//! )?;
//!
//! problem.validate()?;
//! assert_eq!(problem.to_string(), "C[i:4,j:8] = Sum(k:3) A[k,i] * B[k,j]");
//! assert_eq!(problem.num_flops(), 2 * 32 * 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod problem;
pub mod tensor;
#[cfg(feature = "std")]
pub mod timer;
pub mod xml;

pub use error::{Operand, ProblemError, ValidationError};
#[cfg(feature = "std")]
pub use error::DecodeError;
pub use problem::{Operation, Problem, ValidationConfig};
pub use tensor::{DataType, Device, DeviceProfile, Dimension, OperationType, Tensor};
#[cfg(feature = "std")]
pub use timer::Timer;
