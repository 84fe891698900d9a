//! Semantic types of parameters
//!
//! `type_string()` is the structural identity used for statement reuse and
//! crossover compatibility: two descriptors are interchangeable exactly when
//! their type strings match.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Bool,
    Address {
        payable: bool,
    },
    Int {
        signed: bool,
        bits: u16,
    },
    Fixed {
        signed: bool,
        bits: u16,
        decimals: u8,
    },
    /// `bytes1` .. `bytes32`
    FixedBytes {
        size: u8,
    },
    Bytes,
    String,
    Contract {
        name: String,
    },
    /// Structs, enums and user value types
    UserDefined {
        name: String,
    },
    Function,
    Mapping {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Array {
        base: Box<TypeDescriptor>,
        length: Option<usize>,
    },
}

impl TypeDescriptor {
    /// Parse an elementary type name (`uint`, `int8`, `bytes32`, `fixed128x18`, ...)
    pub fn elementary(name: &str, payable: bool) -> Option<Self> {
        match name {
            "bool" => return Some(TypeDescriptor::Bool),
            "address" => return Some(TypeDescriptor::Address { payable }),
            "string" => return Some(TypeDescriptor::String),
            "bytes" => return Some(TypeDescriptor::Bytes),
            "byte" => return Some(TypeDescriptor::FixedBytes { size: 1 }),
            "uint" => return Some(TypeDescriptor::Int { signed: false, bits: 256 }),
            "int" => return Some(TypeDescriptor::Int { signed: true, bits: 256 }),
            "fixed" => return Some(TypeDescriptor::Fixed { signed: true, bits: 128, decimals: 18 }),
            "ufixed" => return Some(TypeDescriptor::Fixed { signed: false, bits: 128, decimals: 18 }),
            _ => {}
        }

        if let Some(size) = name.strip_prefix("bytes") {
            let size: u8 = size.parse().ok()?;
            return (1..=32).contains(&size).then_some(TypeDescriptor::FixedBytes { size });
        }
        if let Some(rest) = name.strip_prefix("ufixed") {
            return Self::parse_fixed(rest, false);
        }
        if let Some(rest) = name.strip_prefix("fixed") {
            return Self::parse_fixed(rest, true);
        }
        if let Some(bits) = name.strip_prefix("uint") {
            return Self::parse_int(bits, false);
        }
        if let Some(bits) = name.strip_prefix("int") {
            return Self::parse_int(bits, true);
        }
        None
    }

    fn parse_int(bits: &str, signed: bool) -> Option<Self> {
        let bits: u16 = bits.parse().ok()?;
        valid_width(bits).then_some(TypeDescriptor::Int { signed, bits })
    }

    fn parse_fixed(rest: &str, signed: bool) -> Option<Self> {
        let (bits, decimals) = rest.split_once('x')?;
        let bits: u16 = bits.parse().ok()?;
        let decimals: u8 = decimals.parse().ok()?;
        (valid_width(bits) && decimals <= 80).then_some(TypeDescriptor::Fixed {
            signed,
            bits,
            decimals,
        })
    }

    /// Canonical Solidity spelling
    pub fn type_string(&self) -> String {
        match self {
            TypeDescriptor::Bool => "bool".to_string(),
            TypeDescriptor::Address { payable: false } => "address".to_string(),
            TypeDescriptor::Address { payable: true } => "address payable".to_string(),
            TypeDescriptor::Int { signed, bits } => {
                format!("{}int{}", if *signed { "" } else { "u" }, bits)
            }
            TypeDescriptor::Fixed {
                signed,
                bits,
                decimals,
            } => format!("{}fixed{}x{}", if *signed { "" } else { "u" }, bits, decimals),
            TypeDescriptor::FixedBytes { size } => format!("bytes{}", size),
            TypeDescriptor::Bytes => "bytes".to_string(),
            TypeDescriptor::String => "string".to_string(),
            TypeDescriptor::Contract { name } | TypeDescriptor::UserDefined { name } => name.clone(),
            TypeDescriptor::Function => "function".to_string(),
            TypeDescriptor::Mapping { key, value } => {
                format!("mapping({} => {})", key.type_string(), value.type_string())
            }
            TypeDescriptor::Array { base, length } => match length {
                Some(length) => format!("{}[{}]", base.type_string(), length),
                None => format!("{}[]", base.type_string()),
            },
        }
    }

    /// Category name used in "not supported" diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            TypeDescriptor::Bool => "bool",
            TypeDescriptor::Address { .. } => "address",
            TypeDescriptor::Int { .. } => "integer",
            TypeDescriptor::Fixed { .. } => "fixed-point",
            TypeDescriptor::FixedBytes { .. } => "fixed bytes",
            TypeDescriptor::Bytes => "bytes",
            TypeDescriptor::String => "string",
            TypeDescriptor::Contract { .. } => "contract reference",
            TypeDescriptor::UserDefined { .. } => "user-defined type",
            TypeDescriptor::Function => "function type",
            TypeDescriptor::Mapping { .. } => "mapping",
            TypeDescriptor::Array { .. } => "array",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Bool
                | TypeDescriptor::Address { .. }
                | TypeDescriptor::Int { .. }
                | TypeDescriptor::Fixed { .. }
                | TypeDescriptor::FixedBytes { .. }
                | TypeDescriptor::Bytes
                | TypeDescriptor::String
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_string())
    }
}

fn valid_width(bits: u16) -> bool {
    bits >= 8 && bits <= 256 && bits % 8 == 0
}
