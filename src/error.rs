//! Error types for contraction problems.

use alloc::string::String;

/// Errors raised while constructing a [`Problem`](crate::Problem).
///
/// These indicate a logically malformed index assignment; retrying with the
/// same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ProblemError {
    /// Index belongs to the output but no operand is assigned to it.
    #[cfg_attr(feature = "std", error("output index {index} is not assigned to any operand"))]
    IndexUnassigned { index: usize },

    /// Summation index assigned to only one of the two operands.
    #[cfg_attr(feature = "std", error("summation index {index} is assigned to only one operand"))]
    SummationIndexAssignmentsInvalid { index: usize },

    /// Inputs the classifier cannot represent.
    #[cfg_attr(feature = "std", error("problem not supported: {message}"))]
    NotSupported { message: String },
}

impl ProblemError {
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported {
            message: message.into(),
        }
    }
}

/// Which operand a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    A,
    B,
}

impl core::fmt::Display for Operand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
        }
    }
}

/// Reasons a constructed problem is rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ValidationError {
    /// Operands have different dimension counts.
    #[cfg_attr(feature = "std", error("operand dimension mismatch: A has {dims_a} dims, B has {dims_b}"))]
    OperandNumDimensionsMismatch { dims_a: usize, dims_b: usize },

    /// Free indices must split evenly between the operands, at least one each.
    #[cfg_attr(feature = "std", error("invalid number of free indices: {num_free}"))]
    NumFreeIndicesInvalid { num_free: usize },

    /// Operand index budget is not fully consumed.
    #[cfg_attr(feature = "std", error("operand has {expected} dims, classified indices account for {got}"))]
    OperandNumIndicesMismatch { expected: usize, got: usize },

    /// A contraction needs at least one summation index.
    #[cfg_attr(feature = "std", error("invalid number of summation indices: {num_summation}"))]
    NumSummationIndicesInvalid { num_summation: usize },

    /// Assignment out of range, or sizes disagree with the matched dimension.
    #[cfg_attr(feature = "std", error("invalid index assignment for operand {operand} at position {position}"))]
    IndexAssignmentInvalid { operand: Operand, position: usize },

    /// The same global index is assigned twice within one operand.
    #[cfg_attr(feature = "std", error("duplicate index {index} assigned in operand {operand}"))]
    IndexAssignmentDuplicate { operand: Operand, index: usize },

    /// A summation index claimed by one operand is missing from the other.
    #[cfg_attr(feature = "std", error("index {index} is not assigned in the other operand"))]
    IndexUnassigned { index: usize },

    /// Device profile holds no devices or more than supported.
    #[cfg_attr(feature = "std", error("device profile has {num_devices} devices, supported range is 1..={max}"))]
    DeviceProfileNumDevicesInvalid { num_devices: usize, max: usize },
}

impl ValidationError {
    /// Operand the failure refers to, when it is operand specific.
    pub fn operand(&self) -> Option<Operand> {
        match self {
            Self::IndexAssignmentInvalid { operand, .. }
            | Self::IndexAssignmentDuplicate { operand, .. } => Some(*operand),
            _ => None,
        }
    }
}

/// Errors produced while decoding the structured text form of a problem.
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input is not well-formed.
    #[error("malformed document: {message}")]
    Malformed { message: String },

    /// A required element never appeared.
    #[error("missing element <{tag}>")]
    MissingElement { tag: &'static str },

    /// An element is missing a required attribute.
    #[error("element <{tag}> is missing attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    /// An attribute value could not be interpreted.
    #[error("element <{tag}> has invalid value '{value}' for attribute '{attribute}'")]
    InvalidValue {
        tag: String,
        attribute: String,
        value: String,
    },

    /// Declared list length disagrees with the enumerated entries.
    #[error("element <{tag}> declares {declared} entries but lists {actual}")]
    LengthMismatch {
        tag: String,
        declared: usize,
        actual: usize,
    },

    /// Recorded index counts disagree with the decoded assignments.
    #[error("attribute '{attribute}' records {recorded} but the assignments classify {actual}")]
    CountMismatch {
        attribute: &'static str,
        recorded: usize,
        actual: usize,
    },

    /// The decoded inputs do not form a problem.
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

#[cfg(feature = "std")]
impl DecodeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Result type for problem construction.
pub type ProblemResult<T> = core::result::Result<T, ProblemError>;

/// Result type for problem validation.
pub type ValidationResult<T> = core::result::Result<T, ValidationError>;
