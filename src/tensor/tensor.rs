//! Tensor descriptors.

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::ops::Index;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::data_type::DataType;
use crate::xml::{indent, push_attr};

/// Inline capacity for per-tensor lists; contractions rarely exceed this.
pub(crate) const INLINE_DIMS: usize = 8;

/// A single tensor dimension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Dimension {
    /// Distance in elements between consecutive entries along this dimension.
    pub stride: usize,
    /// Number of entries along this dimension.
    pub size: usize,
}

impl Dimension {
    pub fn new(stride: usize, size: usize) -> Self {
        Self { stride, size }
    }
}

/// Shape, strides and element type of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tensor {
    data_type: DataType,
    dimensions: SmallVec<[Dimension; INLINE_DIMS]>,
}

impl Tensor {
    pub fn new(data_type: DataType, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        Self {
            data_type,
            dimensions: dimensions.into_iter().collect(),
        }
    }

    /// Creates a densely packed tensor, first dimension fastest.
    ///
    /// Strides saturate at `usize::MAX`, like [`Tensor::num_elements`].
    pub fn packed(data_type: DataType, sizes: &[usize]) -> Self {
        let mut stride: usize = 1;
        let dimensions = sizes.iter().map(|&size| {
            let dim = Dimension::new(stride, size);
            stride = stride.saturating_mul(size);
            dim
        });
        Self::new(data_type, dimensions)
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[inline]
    pub fn num_dims(&self) -> usize {
        self.dimensions.len()
    }

    #[inline]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Returns the dimension at `position`, if any.
    #[inline]
    pub fn dim(&self, position: usize) -> Option<&Dimension> {
        self.dimensions.get(position)
    }

    /// Number of elements, 1 for a tensor without dimensions.
    pub fn num_elements(&self) -> u64 {
        self.dimensions
            .iter()
            .fold(1u64, |acc, dim| acc.saturating_mul(dim.size as u64))
    }

    /// Renders the tensor as a `<T{name} ... />` element.
    pub fn to_string_xml(&self, indent_level: usize, name: &str) -> String {
        let mut state = indent(indent_level);
        state.push_str("<T");
        state.push_str(name);
        push_attr(&mut state, "t", self.data_type.tag());
        push_attr(&mut state, "n", self.num_dims());
        for (i, dim) in self.dimensions.iter().enumerate() {
            push_attr(&mut state, &alloc::format!("st{i}"), dim.stride);
            push_attr(&mut state, &alloc::format!("sz{i}"), dim.size);
        }
        state.push_str(" />\n");
        state
    }
}

impl Index<usize> for Tensor {
    type Output = Dimension;

    fn index(&self, position: usize) -> &Dimension {
        &self.dimensions[position]
    }
}

impl Ord for Tensor {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.data_type, self.num_dims(), self.dimensions())
            .cmp(&(other.data_type, other.num_dims(), other.dimensions()))
    }
}

impl PartialOrd for Tensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.data_type)?;
        for (i, dim) in self.dimensions.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", dim.size)?;
        }
        write!(f, "]")
    }
}
