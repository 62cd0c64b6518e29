//! Explored components.

use gprime_core::GaussianInteger;

/// A set of Gaussian primes connected by jumps, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Component {
    members: Vec<GaussianInteger>,
}

impl Component {
    pub(crate) fn from_members(members: Vec<GaussianInteger>) -> Self {
        Self { members }
    }

    /// Members in the order the flood reached them.
    pub fn members(&self) -> &[GaussianInteger] {
        &self.members
    }

    /// Number of members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// `true` for the empty component.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member of largest norm (ties broken by the [`GaussianInteger`]
    /// order).
    pub fn farthest(&self) -> Option<GaussianInteger> {
        self.members.iter().copied().max()
    }

    /// `true` when `g` belongs to the component.
    pub fn contains(&self, g: GaussianInteger) -> bool {
        self.members.contains(&g)
    }

    /// Members sorted by the [`GaussianInteger`] order.
    pub fn sorted(&self) -> Vec<GaussianInteger> {
        let mut out = self.members.clone();
        out.sort_unstable();
        out
    }
}
