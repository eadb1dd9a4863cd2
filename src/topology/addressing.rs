//! Partition addressing and its inverse.
//!
//! A decomposition tool records, for every cell and face of a subdomain, the
//! index that entity had in the undecomposed mesh (its *original index*).
//! Face addressing is sign-encoded: a negative value means the face was
//! flipped relative to the original mesh, the magnitude is the index.
//!
//! [`ProcAddressing`] only ever holds non-negative original indices. Cell
//! lists are validated on construction, face lists go through
//! [`normalize_face_signs`].

use crate::mesh_error::MeshRemapError;

/// Signed integer as stored in addressing and map files.
pub type Label = i64;

/// Sentinel for "no correspondence".
pub const UNMAPPED: Label = -1;

/// Replace every value with its magnitude, in place.
///
/// Applied once to face addressing right after loading. Idempotent.
pub fn normalize_face_signs(addressing: &mut [Label]) {
    for value in addressing.iter_mut() {
        if *value < 0 {
            *value = value.saturating_abs();
        }
    }
}

/// Local-entity → original-index list for one subdomain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcAddressing {
    original: Vec<usize>,
}

impl ProcAddressing {
    /// Build cell addressing. Cell lists are never sign-encoded, so a
    /// negative entry is rejected.
    pub fn from_cells(raw: &[Label]) -> Result<Self, MeshRemapError> {
        let original = raw
            .iter()
            .enumerate()
            .map(|(entry, &value)| {
                usize::try_from(value)
                    .map_err(|_| MeshRemapError::InvalidAddressing { entry, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { original })
    }

    /// Build face addressing, stripping the flip sign.
    pub fn from_faces(mut raw: Vec<Label>) -> Self {
        normalize_face_signs(&mut raw);
        Self {
            original: raw.into_iter().map(|v| v as usize).collect(),
        }
    }

    /// Addressing from already non-negative indices.
    pub fn from_original(original: Vec<usize>) -> Self {
        Self { original }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Original index of local entity `local`.
    #[inline]
    pub fn get(&self, local: usize) -> Option<usize> {
        self.original.get(local).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.original
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.original.iter().copied()
    }

    /// See [`invert_addressing`].
    pub fn invert(&self) -> Result<InverseAddressing, MeshRemapError> {
        invert_addressing(self)
    }
}

/// Original-index → local-entity lookup table for one subdomain.
///
/// Dense over `0..bound`; slots no local entity claims hold [`UNMAPPED`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InverseAddressing {
    slots: Vec<Label>,
}

impl InverseAddressing {
    /// One past the largest original index the table can answer for.
    #[inline]
    pub fn bound(&self) -> usize {
        self.slots.len()
    }

    /// Local index carrying `original`, if any.
    #[inline]
    pub fn lookup(&self, original: usize) -> Option<usize> {
        match self.slots.get(original) {
            Some(&local) if local >= 0 => Some(local as usize),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.slots
    }
}

/// Invert a partition addressing array.
///
/// The result has `max + 1` slots with `inverse[addr[i]] == i`; every other
/// slot is [`UNMAPPED`]. An empty subdomain yields a single unset slot.
/// Duplicate original indices are not detected: the last entry wins.
///
/// Fails with [`MeshRemapError::InvalidAddressing`] naming the largest entry
/// when the table for it cannot be allocated.
pub fn invert_addressing(
    addressing: &ProcAddressing,
) -> Result<InverseAddressing, MeshRemapError> {
    let mut slots = Vec::new();
    match addressing.iter().enumerate().max_by_key(|&(_, original)| original) {
        None => slots.push(UNMAPPED),
        Some((entry, max)) => {
            let invalid = || MeshRemapError::InvalidAddressing {
                entry,
                value: Label::try_from(max).unwrap_or(Label::MAX),
            };
            let bound = max.checked_add(1).ok_or_else(invalid)?;
            slots.try_reserve_exact(bound).map_err(|_| invalid())?;
            slots.resize(bound, UNMAPPED);
        }
    }
    for (local, original) in addressing.iter().enumerate() {
        slots[original] = local as Label;
    }
    Ok(InverseAddressing { slots })
}
