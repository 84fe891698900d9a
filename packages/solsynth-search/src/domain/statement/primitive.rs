//! Leaf statements holding a literal value

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use solsynth_ir::TypeDescriptor;
use uuid::Uuid;

use super::StatementId;
use crate::domain::bounds::format_decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct BoolStatement {
    pub id: StatementId,
    pub value: bool,
}

impl BoolStatement {
    pub fn new(value: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
        }
    }
}

/// `intN` / `uintN` value
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerStatement {
    pub id: StatementId,
    pub signed: bool,
    pub bits: u16,
    pub value: BigInt,
}

impl IntegerStatement {
    pub fn new(signed: bool, bits: u16, value: BigInt) -> Self {
        Self {
            id: Uuid::new_v4(),
            signed,
            bits,
            value,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Int {
            signed: self.signed,
            bits: self.bits,
        }
    }
}

/// `fixedMxN` / `ufixedMxN` value kept as a scaled integer
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStatement {
    pub id: StatementId,
    pub signed: bool,
    pub bits: u16,
    pub decimals: u8,
    /// Value times `10^decimals`
    pub units: BigInt,
}

impl NumericStatement {
    pub fn new(signed: bool, bits: u16, decimals: u8, units: BigInt) -> Self {
        Self {
            id: Uuid::new_v4(),
            signed,
            bits,
            decimals,
            units,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Fixed {
            signed: self.signed,
            bits: self.bits,
            decimals: self.decimals,
        }
    }

    pub fn text(&self) -> String {
        format_decimal(&self.units, self.decimals)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringStatement {
    pub id: StatementId,
    pub value: String,
}

impl StringStatement {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.into(),
        }
    }
}

/// `bytesN` (`size` set) or dynamic `bytes`
#[derive(Debug, Clone, PartialEq)]
pub struct BytesStatement {
    pub id: StatementId,
    pub size: Option<u8>,
    pub value: Vec<u8>,
}

impl BytesStatement {
    pub fn new(size: Option<u8>, value: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            size,
            value,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        match self.size {
            Some(size) => TypeDescriptor::FixedBytes { size },
            None => TypeDescriptor::Bytes,
        }
    }

    pub fn hex(&self) -> String {
        let mut text = String::with_capacity(2 + self.value.len() * 2);
        text.push_str("0x");
        for byte in &self.value {
            text.push_str(&format!("{:02x}", byte));
        }
        text
    }
}

/// Where an address value comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressValue {
    /// `accounts[n]` of the runner
    Account(u32),
    /// Literal hex address
    Literal(String),
}

impl AddressValue {
    /// Account indices map to runner accounts; negative ones to the
    /// zero-padded literal of their magnitude
    pub fn from_index(index: i64) -> Self {
        if index >= 0 {
            AddressValue::Account(index as u32)
        } else {
            AddressValue::Literal(format!("0x{:0>40x}", index.unsigned_abs()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressStatement {
    pub id: StatementId,
    pub payable: bool,
    pub value: AddressValue,
}

impl AddressStatement {
    pub fn new(payable: bool, value: AddressValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            payable,
            value,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Address {
            payable: self.payable,
        }
    }
}
