//! Mutability lattice.
//!
//! Totally ordered, monotonically escalating: a function starts at
//! `Pure` and only ever moves up as the lowering pass observes side
//! effects (a global read, a global write, a selfdestruct, a proxy
//! creation). Final emission reads whichever value is highest: the
//! escalated level or the mutability the input declared.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize)]
pub enum Mutability {
    Pure = 0,
    View = 1,
    NonPayable = 2,
    Payable = 3,
}

impl Mutability {
    /// The `@<annotation>` emitted immediately above a function signature.
    pub fn annotation(self) -> &'static str {
        match self {
            Mutability::Pure => "@pure",
            Mutability::View => "@view",
            Mutability::NonPayable => "@nonpayable",
            Mutability::Payable => "@payable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_is_totally_ordered() {
        assert!(Mutability::Pure < Mutability::View);
        assert!(Mutability::View < Mutability::NonPayable);
        assert!(Mutability::NonPayable < Mutability::Payable);
    }

    #[test]
    fn annotations_render() {
        assert_eq!(Mutability::Pure.annotation(), "@pure");
        assert_eq!(Mutability::Payable.annotation(), "@payable");
    }
}
