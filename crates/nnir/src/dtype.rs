use serde::{Deserialize, Serialize};

/// Enumerates scalar element types supported by the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Si8,
    Ui8,
    Si32,
    Ui32,
    Si64,
    F16,
    F32,
    F64,
}

impl DType {
    /// Returns `true` when the dtype is any signed or unsigned integer.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::Si8 | DType::Ui8 | DType::Si32 | DType::Ui32 | DType::Si64
        )
    }

    /// Returns `true` when the dtype is a floating-point representation.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }

    /// Returns the storage bit-width of the scalar.
    pub fn bitwidth(self) -> usize {
        match self {
            DType::Si8 | DType::Ui8 => 8,
            DType::F16 => 16,
            DType::Si32 | DType::Ui32 | DType::F32 => 32,
            DType::Si64 | DType::F64 => 64,
        }
    }

    /// Returns the size in bytes of one scalar.
    pub fn size_in_bytes(self) -> usize {
        self.bitwidth() / 8
    }
}
