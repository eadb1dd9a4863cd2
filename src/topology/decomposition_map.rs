//! Entity maps between two meshes (`cellMap` / `faceMap`).
//!
//! Indexed by the source entity, valued by the target entity or a negative
//! sentinel when there is no correspondence. Only `-1` is ever written, but
//! any negative value reads as unmapped; `0` is a valid target.

use crate::topology::addressing::{Label, UNMAPPED};

/// Source-entity → target-entity map with `-1` for "unmapped".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecompositionMap {
    entries: Vec<Label>,
}

impl DecompositionMap {
    pub fn new(entries: Vec<Label>) -> Self {
        Self { entries }
    }

    /// A map of `len` entries, all unmapped.
    pub fn unmapped(len: usize) -> Self {
        Self {
            entries: vec![UNMAPPED; len],
        }
    }

    /// `i -> i` for `0..len`.
    pub fn identity(len: usize) -> Self {
        Self {
            entries: (0..len as Label).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored value for `source`, sentinel included.
    #[inline]
    pub fn raw(&self, source: usize) -> Option<Label> {
        self.entries.get(source).copied()
    }

    /// Target of `source`, `None` when unmapped or out of range.
    #[inline]
    pub fn get(&self, source: usize) -> Option<usize> {
        match self.entries.get(source) {
            Some(&target) if target >= 0 => Some(target as usize),
            _ => None,
        }
    }

    /// `(source, target)` pairs for every mapped entry.
    pub fn mapped(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, t)| **t >= 0)
            .map(|(s, &t)| (s, t as usize))
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|t| **t >= 0).count()
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.entries
    }
}

impl From<Vec<Label>> for DecompositionMap {
    fn from(entries: Vec<Label>) -> Self {
        Self::new(entries)
    }
}

/// Face and cell maps of one (local subdomain, global subdomain) pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairMaps {
    pub face_map: DecompositionMap,
    pub cell_map: DecompositionMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_valid_target() {
        let map = DecompositionMap::new(vec![0, -1, 1, -5]);
        assert_eq!(map.get(0), Some(0));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(3), None);
        assert_eq!(map.get(4), None);
        assert_eq!(map.raw(3), Some(-5));
        assert_eq!(map.mapped().collect::<Vec<_>>(), vec![(0, 0), (2, 1)]);
        assert_eq!(map.mapped_count(), 2);
    }

    #[test]
    fn identity_and_unmapped() {
        assert_eq!(DecompositionMap::identity(3).as_slice(), &[0, 1, 2]);
        assert_eq!(DecompositionMap::unmapped(2).as_slice(), &[-1, -1]);
    }
}
