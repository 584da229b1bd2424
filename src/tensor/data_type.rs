//! Element and operation type tags.

use core::fmt;
use core::mem::size_of;

use half::f16;
use serde::{Deserialize, Serialize};

/// Element type of a tensor or scalar.
///
/// Discriminants are the numeric tags written to the structured text form and
/// must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    Single = 0,
    Double = 1,
    ComplexSingle = 2,
    ComplexDouble = 3,
    ComplexConjugateSingle = 4,
    ComplexConjugateDouble = 5,
    Half = 6,
    ComplexHalf = 7,
    ComplexConjugateHalf = 8,
    /// Scalar is not used (alpha/beta only).
    None = 10,
}

impl DataType {
    /// Every tag, in numeric order.
    pub const ALL: [DataType; 10] = [
        DataType::Single,
        DataType::Double,
        DataType::ComplexSingle,
        DataType::ComplexDouble,
        DataType::ComplexConjugateSingle,
        DataType::ComplexConjugateDouble,
        DataType::Half,
        DataType::ComplexHalf,
        DataType::ComplexConjugateHalf,
        DataType::None,
    ];

    /// Numeric tag.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Looks up a type from its numeric tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.tag() == tag)
    }

    /// Size of one element in bytes, 0 for [`DataType::None`].
    pub fn size_in_bytes(self) -> usize {
        match self {
            DataType::Half => size_of::<f16>(),
            DataType::Single => size_of::<f32>(),
            DataType::Double => size_of::<f64>(),
            DataType::ComplexHalf | DataType::ComplexConjugateHalf => 2 * size_of::<f16>(),
            DataType::ComplexSingle | DataType::ComplexConjugateSingle => 2 * size_of::<f32>(),
            DataType::ComplexDouble | DataType::ComplexConjugateDouble => 2 * size_of::<f64>(),
            DataType::None => 0,
        }
    }

    /// Floating-point operations in one multiply-add.
    ///
    /// A complex multiply-add is 4 multiplies and 4 adds.
    pub fn flops_per_madd(self) -> u64 {
        match self {
            DataType::None => 0,
            ty if ty.is_real() => 2,
            _ => 8,
        }
    }

    #[inline]
    pub fn is_real(self) -> bool {
        matches!(self, DataType::Half | DataType::Single | DataType::Double)
    }

    #[inline]
    pub fn is_complex(self) -> bool {
        !self.is_real() && self != DataType::None
    }

    #[inline]
    pub fn is_conjugate(self) -> bool {
        matches!(
            self,
            DataType::ComplexConjugateHalf
                | DataType::ComplexConjugateSingle
                | DataType::ComplexConjugateDouble
        )
    }

    #[inline]
    pub fn is_double(self) -> bool {
        matches!(
            self,
            DataType::Double | DataType::ComplexDouble | DataType::ComplexConjugateDouble
        )
    }

    /// One-letter BLAS-style code.
    pub fn to_char(self) -> char {
        match self {
            DataType::Half => 'H',
            DataType::Single => 'S',
            DataType::Double => 'D',
            DataType::ComplexHalf => 'Q',
            DataType::ComplexSingle => 'C',
            DataType::ComplexDouble => 'Z',
            DataType::ComplexConjugateHalf => 'W',
            DataType::ComplexConjugateSingle => 'X',
            DataType::ComplexConjugateDouble => 'Y',
            DataType::None => '0',
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Kind of operation a problem describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum OperationType {
    #[default]
    Contraction = 0,
    Convolution = 1,
    Correlation = 2,
}

impl OperationType {
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(OperationType::Contraction),
            1 => Some(OperationType::Convolution),
            2 => Some(OperationType::Correlation),
            _ => None,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Contraction => write!(f, "CT"),
            OperationType::Convolution => write!(f, "CV"),
            OperationType::Correlation => write!(f, "CR"),
        }
    }
}
