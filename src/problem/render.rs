//! Human-readable and structured text rendering of problems.

use alloc::string::String;
use core::fmt;

use super::problem::Problem;
use crate::xml::{indent, push_attr};

/// Letters used to name global indices, starting at `i` as in `C[i,j]`.
const INDEX_ALPHABET: &[u8; 26] = b"ijklmnopqrstuvwxyzabcdefgh";

/// Name of a global index: one letter for the first 26 ids, then the letter
/// followed by how many times the alphabet wrapped (`i1`, `j1`, ...).
pub fn index_name(id: usize) -> String {
    let letter = INDEX_ALPHABET[id % INDEX_ALPHABET.len()] as char;
    let wraps = id / INDEX_ALPHABET.len();
    if wraps == 0 {
        String::from(letter)
    } else {
        alloc::format!("{letter}{wraps}")
    }
}

impl fmt::Display for Problem {
    /// Renders `C[i:4,j:8] = Sum(k:3) A[k,i] * B[k,j]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C[")?;
        for (id, dim) in self.tensor_c().dimensions().iter().enumerate() {
            if id > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", index_name(id), dim.size)?;
        }

        write!(f, "] = Sum(")?;
        for (i, &(position_a, _)) in self.indices_summation().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            let id = self.index_assignments_a()[position_a];
            write!(f, "{}:{}", index_name(id), self.tensor_a()[position_a].size)?;
        }

        write!(f, ") A[")?;
        write_operand(f, self.index_assignments_a())?;
        write!(f, "] * B[")?;
        write_operand(f, self.index_assignments_b())?;
        write!(f, "]")
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, indices: &[usize]) -> fmt::Result {
    for (i, &id) in indices.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", index_name(id))?;
    }
    Ok(())
}

impl Problem {
    /// Renders the problem as a nested `<P>` element.
    ///
    /// The output is a kernel cache key: tag names, attribute names and
    /// layout must not change. Lists record their length in `n` before their
    /// entries.
    pub fn to_string_xml(&self, indent_level: usize) -> String {
        let mut state = indent(indent_level);
        state.push_str("<P>\n");
        state.push_str(&self.tensor_c().to_string_xml(indent_level + 1, "C"));
        state.push_str(&self.tensor_a().to_string_xml(indent_level + 1, "A"));
        state.push_str(&self.tensor_b().to_string_xml(indent_level + 1, "B"));
        state.push_str(&self.operation_xml(indent_level + 1));
        state.push_str(&self.device_profile().to_string_xml(indent_level + 1));
        state.push_str(&indent(indent_level));
        state.push_str("</P>\n");
        state
    }

    fn operation_xml(&self, indent_level: usize) -> String {
        let operation = self.operation();
        let mut state = indent(indent_level);
        state.push_str("<O");
        push_attr(&mut state, "t", operation.operation_type.tag());
        push_attr(&mut state, "a", operation.alpha_type.tag());
        push_attr(&mut state, "b", operation.beta_type.tag());
        push_attr(&mut state, "o", u8::from(operation.use_offsets));
        push_attr(&mut state, "nF", self.indices_free().len());
        push_attr(&mut state, "nB", self.indices_batch().len());
        push_attr(&mut state, "nS", self.indices_summation().len());
        state.push_str(" >\n");

        state.push_str(&assignments_xml(indent_level + 1, "IA", self.index_assignments_a()));
        state.push_str(&assignments_xml(indent_level + 1, "IB", self.index_assignments_b()));

        state.push_str(&indent(indent_level));
        state.push_str("</O>\n");
        state
    }
}

fn assignments_xml(indent_level: usize, tag: &str, indices: &[usize]) -> String {
    let mut state = indent(indent_level);
    state.push('<');
    state.push_str(tag);
    push_attr(&mut state, "n", indices.len());
    for (i, index) in indices.iter().enumerate() {
        push_attr(&mut state, &alloc::format!("i{i}"), index);
    }
    state.push_str(" />\n");
    state
}
