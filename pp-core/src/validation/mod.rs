mod constraint;
mod rules;
mod store;

use std::fmt;

pub use self::constraint::*;
pub use self::rules::*;
pub use self::store::{
    CONSTRAINTS,
    ConstraintStore,
    PrintFormat,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    pub constraint_id: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(constraint: &Constraint, message: &str) -> Violation {
        Violation { constraint_id: constraint.id, message: message.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]: {}", self.constraint_id, self.message)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn has(&self, constraint: &Constraint) -> bool {
        self.0.iter().any(|v| v.constraint_id == constraint.id)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "validation failed:")?;
        for v in &self.0 {
            writeln!(f, "  - {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// Rules push every violation they find instead of stopping at the first one, so that a user
// can fix a manifest in one pass
pub trait Validate {
    fn check(&self, out: &mut Vec<Violation>);

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut out = vec![];
        self.check(&mut out);
        if out.is_empty() { Ok(()) } else { Err(ValidationErrors(out)) }
    }
}

#[cfg(test)]
mod tests;
