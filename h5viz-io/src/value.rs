//! Typed dataset values and their HDF5 encoding.

use std::fmt;
use std::str::FromStr;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Container, Dataset, Group};
use ndarray::{arr0, Array, ArrayD, ArrayView1, Dimension};

use crate::{Error, Result};

/// A leaf of a [`Tree`](crate::Tree): anything HDF5 stores natively.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValue {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    Bool(ArrayD<bool>),
    /// Scalar variable-length string.
    String(String),
    /// 1-D list of variable-length strings.
    Strings(Vec<String>),
}

impl DatasetValue {
    /// Dataset shape; scalar strings have shape `()`.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::U8(a) => a.shape().to_vec(),
            Self::U16(a) => a.shape().to_vec(),
            Self::U32(a) => a.shape().to_vec(),
            Self::U64(a) => a.shape().to_vec(),
            Self::I8(a) => a.shape().to_vec(),
            Self::I16(a) => a.shape().to_vec(),
            Self::I32(a) => a.shape().to_vec(),
            Self::I64(a) => a.shape().to_vec(),
            Self::F32(a) => a.shape().to_vec(),
            Self::F64(a) => a.shape().to_vec(),
            Self::Bool(a) => a.shape().to_vec(),
            Self::String(_) => Vec::new(),
            Self::Strings(list) => vec![list.len()],
        }
    }

    /// Element type name, as printed in tree listings.
    #[must_use]
    pub fn dtype(&self) -> &'static str {
        match self {
            Self::U8(_) => "uint8",
            Self::U16(_) => "uint16",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::I8(_) => "int8",
            Self::I16(_) => "int16",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::F32(_) => "float32",
            Self::F64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::String(_) | Self::Strings(_) => "str",
        }
    }

    /// Numeric contents widened to `f64`; `None` for strings.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_f64(&self) -> Option<ArrayD<f64>> {
        let array = match self {
            Self::U8(a) => a.mapv(f64::from),
            Self::U16(a) => a.mapv(f64::from),
            Self::U32(a) => a.mapv(f64::from),
            Self::U64(a) => a.mapv(|v| v as f64),
            Self::I8(a) => a.mapv(f64::from),
            Self::I16(a) => a.mapv(f64::from),
            Self::I32(a) => a.mapv(f64::from),
            Self::I64(a) => a.mapv(|v| v as f64),
            Self::F32(a) => a.mapv(f64::from),
            Self::F64(a) => a.clone(),
            Self::Bool(a) => a.mapv(|v| f64::from(u8::from(v))),
            Self::String(_) | Self::Strings(_) => return None,
        };
        Some(array)
    }

    /// Write this value as dataset `name` in `group`.
    ///
    /// # Errors
    /// Returns an error if HDF5 I/O fails.
    pub fn write(&self, group: &Group, name: &str) -> Result<Dataset> {
        let builder = group.new_dataset_builder();
        let dataset = match self {
            Self::U8(a) => builder.with_data(a.view()).create(name)?,
            Self::U16(a) => builder.with_data(a.view()).create(name)?,
            Self::U32(a) => builder.with_data(a.view()).create(name)?,
            Self::U64(a) => builder.with_data(a.view()).create(name)?,
            Self::I8(a) => builder.with_data(a.view()).create(name)?,
            Self::I16(a) => builder.with_data(a.view()).create(name)?,
            Self::I32(a) => builder.with_data(a.view()).create(name)?,
            Self::I64(a) => builder.with_data(a.view()).create(name)?,
            Self::F32(a) => builder.with_data(a.view()).create(name)?,
            Self::F64(a) => builder.with_data(a.view()).create(name)?,
            Self::Bool(a) => builder.with_data(a.view()).create(name)?,
            Self::String(s) => {
                let dataset = group.new_dataset::<VarLenUnicode>().create(name)?;
                dataset.write_scalar(&to_var_len_unicode(s)?)?;
                dataset
            }
            Self::Strings(list) => {
                let values = list
                    .iter()
                    .map(|s| to_var_len_unicode(s))
                    .collect::<Result<Vec<_>>>()?;
                builder
                    .with_data(ArrayView1::from(values.as_slice()))
                    .create(name)?
            }
        };
        Ok(dataset)
    }

    /// Read a dataset or attribute.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedType`] for element types without a
    /// `DatasetValue` counterpart, or an HDF5 error.
    pub fn read(container: &Container) -> Result<Self> {
        let descriptor = container.dtype()?.to_descriptor()?;
        let value = match descriptor {
            TypeDescriptor::Unsigned(IntSize::U1) => Self::U8(container.read_dyn()?),
            TypeDescriptor::Unsigned(IntSize::U2) => Self::U16(container.read_dyn()?),
            TypeDescriptor::Unsigned(IntSize::U4) => Self::U32(container.read_dyn()?),
            TypeDescriptor::Unsigned(IntSize::U8) => Self::U64(container.read_dyn()?),
            TypeDescriptor::Integer(IntSize::U1) => Self::I8(container.read_dyn()?),
            TypeDescriptor::Integer(IntSize::U2) => Self::I16(container.read_dyn()?),
            TypeDescriptor::Integer(IntSize::U4) => Self::I32(container.read_dyn()?),
            TypeDescriptor::Integer(IntSize::U8) => Self::I64(container.read_dyn()?),
            TypeDescriptor::Float(FloatSize::U4) => Self::F32(container.read_dyn()?),
            TypeDescriptor::Float(FloatSize::U8) => Self::F64(container.read_dyn()?),
            TypeDescriptor::Boolean => Self::Bool(container.read_dyn()?),
            TypeDescriptor::VarLenUnicode => {
                if container.is_scalar() {
                    Self::String(container.read_scalar::<VarLenUnicode>()?.to_string())
                } else {
                    Self::Strings(
                        container
                            .read_raw::<VarLenUnicode>()?
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                    )
                }
            }
            TypeDescriptor::VarLenAscii => {
                if container.is_scalar() {
                    Self::String(container.read_scalar::<VarLenAscii>()?.to_string())
                } else {
                    Self::Strings(
                        container
                            .read_raw::<VarLenAscii>()?
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                    )
                }
            }
            other => {
                return Err(Error::UnsupportedType {
                    path: container.name(),
                    ty: dtype_name(&other),
                })
            }
        };
        Ok(value)
    }
}

impl fmt::Display for DatasetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(a) => write!(f, "{a}"),
            Self::U16(a) => write!(f, "{a}"),
            Self::U32(a) => write!(f, "{a}"),
            Self::U64(a) => write!(f, "{a}"),
            Self::I8(a) => write!(f, "{a}"),
            Self::I16(a) => write!(f, "{a}"),
            Self::I32(a) => write!(f, "{a}"),
            Self::I64(a) => write!(f, "{a}"),
            Self::F32(a) => write!(f, "{a}"),
            Self::F64(a) => write!(f, "{a}"),
            Self::Bool(a) => write!(f, "{a}"),
            Self::String(s) => f.write_str(s),
            Self::Strings(list) => write!(f, "{list:?}"),
        }
    }
}

macro_rules! impl_from_numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<D: Dimension> From<Array<$ty, D>> for DatasetValue {
                fn from(array: Array<$ty, D>) -> Self {
                    Self::$variant(array.into_dyn())
                }
            }

            impl From<$ty> for DatasetValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(arr0(value).into_dyn())
                }
            }
        )*
    };
}

impl_from_numeric! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl From<String> for DatasetValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for DatasetValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<String>> for DatasetValue {
    fn from(value: Vec<String>) -> Self {
        Self::Strings(value)
    }
}

/// Printable element type of an HDF5 type descriptor.
#[must_use]
pub fn dtype_name(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Unsigned(size) => format!("uint{}", int_bits(*size)),
        TypeDescriptor::Integer(size) => format!("int{}", int_bits(*size)),
        TypeDescriptor::Float(FloatSize::U4) => "float32".to_string(),
        TypeDescriptor::Float(FloatSize::U8) => "float64".to_string(),
        TypeDescriptor::Boolean => "bool".to_string(),
        TypeDescriptor::VarLenUnicode | TypeDescriptor::VarLenAscii => "str".to_string(),
        TypeDescriptor::FixedAscii(len) | TypeDescriptor::FixedUnicode(len) => format!("|S{len}"),
        other => other.to_string(),
    }
}

fn int_bits(size: IntSize) -> u8 {
    match size {
        IntSize::U1 => 8,
        IntSize::U2 => 16,
        IntSize::U4 => 32,
        IntSize::U8 => 64,
    }
}

/// Format a shape like a tuple: `()`, `(3,)`, `(2, 4)`.
#[must_use]
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

fn to_var_len_unicode(value: &str) -> Result<VarLenUnicode> {
    VarLenUnicode::from_str(value)
        .map_err(|e| Error::InvalidFormat(format!("invalid utf-8 string: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdf5::types::FixedAscii;
    use ndarray::array;
    use tempfile::NamedTempFile;

    #[test]
    fn test_shape_and_dtype() {
        let v = DatasetValue::from(array![[1.0_f32, 2.0], [3.0, 4.0]]);
        assert_eq!(v.shape(), vec![2, 2]);
        assert_eq!(v.dtype(), "float32");
        let s = DatasetValue::from("hello");
        assert_eq!(s.shape(), Vec::<usize>::new());
        assert_eq!(s.dtype(), "str");
        let list = DatasetValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.shape(), vec![2]);
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[3]), "(3,)");
        assert_eq!(format_shape(&[2, 4, 5]), "(2, 4, 5)");
    }

    #[test]
    fn test_to_f64() {
        let v = DatasetValue::from(array![1_u16, 2, 3]);
        assert_eq!(v.to_f64().unwrap(), array![1.0, 2.0, 3.0].into_dyn());
        assert!(DatasetValue::from("x").to_f64().is_none());
        let b = DatasetValue::from(array![true, false]);
        assert_eq!(b.to_f64().unwrap(), array![1.0, 0.0].into_dyn());
    }

    #[test]
    fn test_display() {
        assert_eq!(DatasetValue::from(7_i32).to_string(), "7");
        assert_eq!(DatasetValue::from("unit").to_string(), "unit");
        assert_eq!(
            DatasetValue::from(vec!["a".to_string()]).to_string(),
            "[\"a\"]"
        );
    }

    #[test]
    fn test_hdf5_value_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let h5 = hdf5::File::create(file.path()).unwrap();
        let values = vec![
            ("u8", DatasetValue::from(array![[1_u8, 2], [3, 4]])),
            ("i64", DatasetValue::from(-5_i64)),
            ("f64", DatasetValue::from(array![0.5, 1.5, 2.5])),
            ("bool", DatasetValue::from(array![true, false, true])),
            ("str", DatasetValue::from("label")),
            (
                "strs",
                DatasetValue::from(vec!["x".to_string(), "yy".to_string()]),
            ),
        ];
        for (name, value) in &values {
            value.write(&h5, name).unwrap();
        }
        for (name, value) in &values {
            let dataset = h5.dataset(name).unwrap();
            assert_eq!(&DatasetValue::read(&dataset).unwrap(), value, "{name}");
        }
    }
    #[test]
    fn test_fixed_ascii_is_unsupported() {
        let file = NamedTempFile::new().unwrap();
        let h5 = hdf5::File::create(file.path()).unwrap();
        let code = FixedAscii::<8>::from_ascii("abc").unwrap();
        let dataset = h5.new_dataset::<FixedAscii<8>>().create("code").unwrap();
        dataset.write_scalar(&code).unwrap();

        match DatasetValue::read(&dataset).unwrap_err() {
            Error::UnsupportedType { path, ty } => {
                assert_eq!(path, "/code");
                assert_eq!(ty, "|S8");
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
