//! Propositional literals.
//!
//! A literal is an atom name with a negation flag. Because negation is a
//! boolean rather than a textual prefix, a double negation cannot be built
//! and every `Literal` value is already in canonical form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The textual negation marker used by `Display` and `FromStr`.
pub const NEGATION_MARKER: char = '~';

/// An atomic proposition, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    /// The proposition name.
    pub atom: String,
    /// `true` if this literal is the negation of `atom`.
    pub negated: bool,
}

impl Literal {
    /// Creates a positive literal.
    pub fn pos(atom: impl Into<String>) -> Self {
        Self {
            atom: atom.into(),
            negated: false,
        }
    }

    /// Creates a negative literal.
    pub fn neg(atom: impl Into<String>) -> Self {
        Self {
            atom: atom.into(),
            negated: true,
        }
    }

    /// Returns the complementary literal.
    pub fn negate(&self) -> Self {
        Self {
            atom: self.atom.clone(),
            negated: !self.negated,
        }
    }

    /// Returns `true` if `other` is the negation of this literal.
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.atom == other.atom && self.negated != other.negated
    }

    /// Returns `true` if the literal is not negated.
    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    /// Checks that the atom name is well formed.
    pub fn validate(&self) -> Result<()> {
        validate_atom(&self.atom)
    }
}

/// Returns the complementary literal. `negate(&negate(l)) == l` for every `l`.
pub fn negate(literal: &Literal) -> Literal {
    literal.negate()
}

/// Checks that an atom name is non-empty, has no whitespace and does not carry
/// a negation marker of its own.
pub fn validate_atom(atom: &str) -> Result<()> {
    if atom.is_empty() {
        return Err(Error::InvalidLiteral("empty atom".to_string()));
    }
    if atom.starts_with(NEGATION_MARKER) {
        return Err(Error::InvalidLiteral(format!(
            "atom '{}' carries a negation marker",
            atom
        )));
    }
    if atom.chars().any(char::is_whitespace) {
        return Err(Error::InvalidLiteral(format!(
            "atom '{}' contains whitespace",
            atom
        )));
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NEGATION_MARKER, self.atom)
        } else {
            write!(f, "{}", self.atom)
        }
    }
}

impl FromStr for Literal {
    type Err = Error;

    /// Parses `A` or `~A`. Anything else, including `~~A`, is rejected.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let literal = match s.strip_prefix(NEGATION_MARKER) {
            Some(atom) => Literal::neg(atom),
            None => Literal::pos(s),
        };
        literal.validate()?;
        Ok(literal)
    }
}
