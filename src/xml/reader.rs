//! Decoding of the structured text form back into problems.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use hashbrown::HashMap;
use xml::reader::{EventReader, XmlEvent};

use crate::error::DecodeError;
use crate::problem::{Operation, Problem};
use crate::tensor::{DataType, Device, DeviceProfile, Dimension, OperationType, Tensor};

/// Attributes of one element, by name.
struct Element<'a> {
    tag: &'a str,
    attributes: HashMap<&'a str, &'a str>,
}

impl<'a> Element<'a> {
    fn value(&self, name: &str) -> Result<&'a str, DecodeError> {
        self.attributes
            .get(name)
            .copied()
            .ok_or_else(|| DecodeError::MissingAttribute {
                tag: self.tag.to_string(),
                attribute: name.to_string(),
            })
    }

    fn parse<T: FromStr>(&self, name: &str) -> Result<T, DecodeError> {
        let value = self.value(name)?;
        value.parse().map_err(|_| DecodeError::InvalidValue {
            tag: self.tag.to_string(),
            attribute: name.to_string(),
            value: value.to_string(),
        })
    }

    fn invalid(&self, name: &str) -> DecodeError {
        DecodeError::InvalidValue {
            tag: self.tag.to_string(),
            attribute: name.to_string(),
            value: self.attributes.get(name).copied().unwrap_or_default().to_string(),
        }
    }

    fn data_type(&self, name: &str) -> Result<DataType, DecodeError> {
        DataType::from_tag(self.parse(name)?).ok_or_else(|| self.invalid(name))
    }

    /// Reads the `n` attribute and checks it against the number of entries
    /// named `{prefix}{k}`.
    fn declared_len(&self, prefixes: &[&str]) -> Result<usize, DecodeError> {
        let declared: usize = self.parse("n")?;
        for prefix in prefixes {
            let actual = self
                .attributes
                .keys()
                .filter(|name| is_indexed(name, prefix))
                .count();
            if actual != declared {
                return Err(DecodeError::LengthMismatch {
                    tag: self.tag.to_string(),
                    declared,
                    actual,
                });
            }
        }
        Ok(declared)
    }
}

/// Whether `name` is `prefix` followed by a decimal position.
fn is_indexed(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Default)]
struct PartialProblem {
    tensor_c: Option<Tensor>,
    tensor_a: Option<Tensor>,
    tensor_b: Option<Tensor>,
    operation: Option<(Operation, [usize; 3])>,
    indices_a: Option<Vec<usize>>,
    indices_b: Option<Vec<usize>>,
    device_profile: Option<DeviceProfile>,
}

/// Decodes the output of [`Problem::to_string_xml`].
///
/// Whitespace and indentation are ignored. Every list must hold exactly the
/// number of entries its `n` attribute declares, and the recorded index
/// counts must match the classification of the decoded assignments.
pub fn parse_problem(input: &str) -> Result<Problem, DecodeError> {
    let mut partial = PartialProblem::default();
    let mut seen_problem = false;
    let mut open: Vec<String> = Vec::new();

    for event in EventReader::from_str(input) {
        let event = event.map_err(|error| DecodeError::malformed(error.to_string()))?;
        let (name, attributes) = match event {
            XmlEvent::StartElement {
                name, attributes, ..
            } => (name, attributes),
            XmlEvent::EndElement { .. } => {
                open.pop();
                continue;
            }
            _ => continue,
        };

        let element = Element {
            tag: name.local_name.as_str(),
            attributes: attributes
                .iter()
                .map(|attr| (attr.name.local_name.as_str(), attr.value.as_str()))
                .collect(),
        };
        check_parent(element.tag, open.last().map(String::as_str))?;

        match element.tag {
            "P" if seen_problem => {
                return Err(DecodeError::malformed("more than one <P> element"));
            }
            "P" => seen_problem = true,
            "TC" => set_once(&mut partial.tensor_c, "TC", read_tensor(&element)?)?,
            "TA" => set_once(&mut partial.tensor_a, "TA", read_tensor(&element)?)?,
            "TB" => set_once(&mut partial.tensor_b, "TB", read_tensor(&element)?)?,
            "O" => set_once(&mut partial.operation, "O", read_operation(&element)?)?,
            "IA" => set_once(&mut partial.indices_a, "IA", read_assignments(&element)?)?,
            "IB" => set_once(&mut partial.indices_b, "IB", read_assignments(&element)?)?,
            "DP" => set_once(
                &mut partial.device_profile,
                "DP",
                read_device_profile(&element)?,
            )?,
            other => {
                return Err(DecodeError::malformed(alloc::format!(
                    "unexpected element <{other}>"
                )));
            }
        }

        open.push(name.local_name.clone());
    }

    if !seen_problem {
        return Err(DecodeError::MissingElement { tag: "P" });
    }

    let tensor_c = partial.tensor_c.ok_or(DecodeError::MissingElement { tag: "TC" })?;
    let tensor_a = partial.tensor_a.ok_or(DecodeError::MissingElement { tag: "TA" })?;
    let tensor_b = partial.tensor_b.ok_or(DecodeError::MissingElement { tag: "TB" })?;
    let (operation, counts) = partial.operation.ok_or(DecodeError::MissingElement { tag: "O" })?;
    let indices_a = partial.indices_a.ok_or(DecodeError::MissingElement { tag: "IA" })?;
    let indices_b = partial.indices_b.ok_or(DecodeError::MissingElement { tag: "IB" })?;
    let device_profile = partial
        .device_profile
        .ok_or(DecodeError::MissingElement { tag: "DP" })?;

    let problem = Problem::new(
        tensor_c,
        tensor_a,
        tensor_b,
        &indices_a,
        &indices_b,
        operation,
        device_profile,
    )?;

    let classified = [
        ("nF", problem.indices_free().len()),
        ("nB", problem.indices_batch().len()),
        ("nS", problem.indices_summation().len()),
    ];
    for ((attribute, actual), recorded) in classified.into_iter().zip(counts) {
        if actual != recorded {
            return Err(DecodeError::CountMismatch {
                attribute,
                recorded,
                actual,
            });
        }
    }

    Ok(problem)
}

/// Checks that `tag` sits directly under the element the format nests it in.
fn check_parent(tag: &str, parent: Option<&str>) -> Result<(), DecodeError> {
    let expected = match tag {
        "P" => None,
        "TC" | "TA" | "TB" | "O" | "DP" => Some("P"),
        "IA" | "IB" => Some("O"),
        other => {
            return Err(DecodeError::malformed(alloc::format!(
                "unexpected element <{other}>"
            )));
        }
    };

    if parent != expected {
        return Err(DecodeError::malformed(alloc::format!(
            "<{tag}> found under {}, expected {}",
            describe_parent(parent),
            describe_parent(expected),
        )));
    }
    Ok(())
}

fn describe_parent(parent: Option<&str>) -> String {
    match parent {
        Some(tag) => alloc::format!("<{tag}>"),
        None => String::from("the document root"),
    }
}

fn set_once<T>(slot: &mut Option<T>, tag: &str, value: T) -> Result<(), DecodeError> {
    if slot.is_some() {
        return Err(DecodeError::malformed(alloc::format!(
            "more than one <{tag}> element"
        )));
    }
    *slot = Some(value);
    Ok(())
}

fn read_tensor(element: &Element<'_>) -> Result<Tensor, DecodeError> {
    let data_type = element.data_type("t")?;
    let num_dims = element.declared_len(&["st", "sz"])?;

    let dimensions = (0..num_dims)
        .map(|i| {
            Ok(Dimension::new(
                element.parse(&alloc::format!("st{i}"))?,
                element.parse(&alloc::format!("sz{i}"))?,
            ))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(Tensor::new(data_type, dimensions))
}

/// Reads the operation and its recorded free/batch/summation counts.
fn read_operation(element: &Element<'_>) -> Result<(Operation, [usize; 3]), DecodeError> {
    let operation_type =
        OperationType::from_tag(element.parse("t")?).ok_or_else(|| element.invalid("t"))?;
    let use_offsets = match element.value("o")? {
        "0" => false,
        "1" => true,
        _ => return Err(element.invalid("o")),
    };

    let operation = Operation::new(
        operation_type,
        element.data_type("a")?,
        element.data_type("b")?,
        use_offsets,
    );
    let counts = [
        element.parse("nF")?,
        element.parse("nB")?,
        element.parse("nS")?,
    ];

    Ok((operation, counts))
}

fn read_assignments(element: &Element<'_>) -> Result<Vec<usize>, DecodeError> {
    let len = element.declared_len(&["i"])?;
    (0..len)
        .map(|i| element.parse(&alloc::format!("i{i}")))
        .collect()
}

fn read_device_profile(element: &Element<'_>) -> Result<DeviceProfile, DecodeError> {
    let num_devices = element.declared_len(&["d", "CU", "MHz", "FPC"])?;

    let devices = (0..num_devices)
        .map(|i| {
            Ok(Device::new(
                String::from(element.value(&alloc::format!("d{i}"))?),
                element.parse(&alloc::format!("CU{i}"))?,
                element.parse(&alloc::format!("MHz{i}"))?,
                element.parse(&alloc::format!("FPC{i}"))?,
            ))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(DeviceProfile::new(devices))
}
