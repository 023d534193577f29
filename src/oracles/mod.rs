// src/oracles/mod.rs

//! Oracle encodings.
//!
//! An oracle is a function `f: {0,1}^n -> {0,1}` realised reversibly on an
//! `(n+1)`-bit register as `|x, y> -> |x, y XOR f(x)>`. Input bits are
//! `0..n`; bit `n` is the output (ancilla) bit.
//!
//! | tag           | arity | f                 | gates                                  |
//! |---------------|-------|-------------------|----------------------------------------|
//! | `constant_0`  | n ≥ 1 | 0                 | (none)                                 |
//! | `constant_1`  | n ≥ 1 | 1                 | `Flip(n)`                              |
//! | `balanced_01` | 1     | f(0)=0, f(1)=1    | `ControlledFlip(0,1)`                  |
//! | `balanced_10` | 1     | f(0)=1, f(1)=0    | `Flip(1), ControlledFlip(0,1), Flip(1)`|
//! | `balanced`    | n ≥ 1 | x\[0\]            | `ControlledFlip(0,n)`                  |
//!
//! `balanced` is one fixed balanced function, the one that copies the first
//! input bit. It does not stand for the whole balanced family.

use crate::classification::Classification;
use crate::core::DeutschError;
use crate::operations::GateOp;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// The closed set of oracle variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OracleKind {
    /// f(x) = 0 for every x.
    Constant0,
    /// f(x) = 1 for every x.
    Constant1,
    /// Single-bit identity: f(0)=0, f(1)=1.
    Balanced01,
    /// Single-bit negation: f(0)=1, f(1)=0.
    Balanced10,
    /// f(x) = x\[0\], for any arity.
    Balanced,
}

/// Which arities a variant is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Any,
    SingleBit,
}

type Generator = fn(usize) -> Vec<GateOp>;

/// Lookup table: variant, tag, supported arity, gate generator.
/// Generators receive the arity `n` and address the output bit as `n`.
static ORACLE_TABLE: &[(OracleKind, &str, Arity, Generator)] = &[
    (OracleKind::Constant0, "constant_0", Arity::Any, constant_0),
    (OracleKind::Constant1, "constant_1", Arity::Any, constant_1),
    (OracleKind::Balanced01, "balanced_01", Arity::SingleBit, balanced_01),
    (OracleKind::Balanced10, "balanced_10", Arity::SingleBit, balanced_10),
    (OracleKind::Balanced, "balanced", Arity::Any, balanced_first_bit),
];

fn constant_0(_n: usize) -> Vec<GateOp> {
    Vec::new()
}

fn constant_1(n: usize) -> Vec<GateOp> {
    vec![GateOp::flip(n)]
}

fn balanced_01(n: usize) -> Vec<GateOp> {
    vec![GateOp::controlled_flip(0, n)]
}

fn balanced_10(n: usize) -> Vec<GateOp> {
    vec![GateOp::flip(n), GateOp::controlled_flip(0, n), GateOp::flip(n)]
}

fn balanced_first_bit(n: usize) -> Vec<GateOp> {
    vec![GateOp::controlled_flip(0, n)]
}

impl OracleKind {
    /// Every variant, in table order.
    pub const ALL: [OracleKind; 5] = [
        OracleKind::Constant0,
        OracleKind::Constant1,
        OracleKind::Balanced01,
        OracleKind::Balanced10,
        OracleKind::Balanced,
    ];

    /// The four single-bit variants of Deutsch's problem.
    pub const DEUTSCH: [OracleKind; 4] = [
        OracleKind::Constant0,
        OracleKind::Constant1,
        OracleKind::Balanced01,
        OracleKind::Balanced10,
    ];

    /// The variants defined for every arity.
    pub const DEUTSCH_JOZSA: [OracleKind; 3] =
        [OracleKind::Constant0, OracleKind::Constant1, OracleKind::Balanced];

    fn entry(&self) -> &'static (OracleKind, &'static str, Arity, Generator) {
        let index = match self {
            OracleKind::Constant0 => 0,
            OracleKind::Constant1 => 1,
            OracleKind::Balanced01 => 2,
            OracleKind::Balanced10 => 3,
            OracleKind::Balanced => 4,
        };
        &ORACLE_TABLE[index]
    }

    /// The string tag of this variant.
    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    /// Whether the variant is defined on `arity` input bits.
    pub fn supports_arity(&self, arity: usize) -> bool {
        match self.entry().2 {
            Arity::Any => arity >= 1,
            Arity::SingleBit => arity == 1,
        }
    }

    /// The classification a correct run must report for this oracle.
    pub fn expected(&self) -> Classification {
        match self {
            OracleKind::Constant0 | OracleKind::Constant1 => Classification::Constant,
            OracleKind::Balanced01 | OracleKind::Balanced10 | OracleKind::Balanced => {
                Classification::Balanced
            }
        }
    }
}

impl FromStr for OracleKind {
    type Err = DeutschError;

    /// Parses a bare tag. Unknown tags give `UnknownOracle`; use
    /// [`OracleSpec::parse`] to get `InvalidOracle` with the requested arity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ORACLE_TABLE
            .iter()
            .find(|(_, name, _, _)| *name == s)
            .map(|(kind, _, _, _)| *kind)
            .ok_or_else(|| DeutschError::UnknownOracle { name: s.to_string() })
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An oracle variant bound to a number of input bits. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OracleSpec {
    kind: OracleKind,
    arity: usize,
}

impl OracleSpec {
    /// Binds `kind` to `arity` input bits.
    ///
    /// # Errors
    /// `InvalidOracle` if the variant is not defined for `arity`
    /// (`balanced_01`/`balanced_10` beyond one bit, or arity 0).
    pub fn new(kind: OracleKind, arity: usize) -> Result<Self, DeutschError> {
        if !kind.supports_arity(arity) {
            return Err(DeutschError::InvalidOracle { name: kind.name().to_string(), arity });
        }
        Ok(Self { kind, arity })
    }

    /// Parses a tag and binds it to `arity`.
    pub fn parse(name: &str, arity: usize) -> Result<Self, DeutschError> {
        let kind = name.parse::<OracleKind>().map_err(|_| DeutschError::InvalidOracle {
            name: name.to_string(),
            arity,
        })?;
        Self::new(kind, arity)
    }

    /// Single-bit oracle for Deutsch's algorithm.
    pub fn deutsch(kind: OracleKind) -> Result<Self, DeutschError> {
        Self::new(kind, 1)
    }

    /// The variant.
    pub fn kind(&self) -> OracleKind {
        self.kind
    }

    /// Number of input bits `n`.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Index of the output (ancilla) bit, which is `n`.
    pub fn output_bit(&self) -> usize {
        self.arity
    }

    /// Register width `n + 1`.
    pub fn register_width(&self) -> usize {
        self.arity + 1
    }
}

impl fmt::Display for OracleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(n={})", self.kind, self.arity)
    }
}

/// Translates an oracle into its ordered reversible gate sequence.
///
/// Pure: the same spec always yields the same sequence.
pub fn encode(spec: &OracleSpec) -> Vec<GateOp> {
    let generator = spec.kind.entry().3;
    let gates = generator(spec.arity);
    debug!("encoded oracle {} into {} gate(s)", spec, gates.len());
    gates
}

/// Parses `name`, validates it against `arity` and encodes it.
///
/// # Errors
/// `InvalidOracle` for an unknown tag or an unsupported arity. No gates are
/// produced in that case.
pub fn encode_named(name: &str, arity: usize) -> Result<Vec<GateOp>, DeutschError> {
    let spec = OracleSpec::parse(name, arity)?;
    Ok(encode(&spec))
}
