//! Power-set enumeration of an ecosystem's consumers.
//!
//! [`enumerate`] walks an integer bitmask from `0` to `2^n - 1` in
//! ascending order. The subset for mask `m` contains the items whose index
//! bit is set in `m`, listed in their original order. Mask `0` (the empty
//! subset) always comes first and mask `2^n - 1` (every item) last. This is
//! the canonical order of every result list the solver produces.

use std::iter::FusedIterator;

/// Widest item list that can be enumerated with a `u64` mask.
pub const MAX_ITEMS: usize = 63;

/// Errors that can occur when starting an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumerateError {
    /// The item list is too long for the mask width.
    #[error("cannot enumerate subsets of {count} items (at most {MAX_ITEMS})")]
    TooManyItems {
        /// Number of items supplied.
        count: usize,
    },
}

/// Lazy iterator over all subsets of a slice, in mask order.
///
/// Cloning the iterator (or calling [`Subsets::restart`]) replays the same
/// sequence from its current or initial position.
#[derive(Debug, Clone)]
pub struct Subsets<'a, T> {
    items: &'a [T],
    next_mask: u64,
    end_mask: u64,
}

/// Start enumerating the `2^n` subsets of `items`.
///
/// # Errors
///
/// Returns [`EnumerateError::TooManyItems`] if `items` has more than
/// [`MAX_ITEMS`] entries.
pub fn enumerate<T>(items: &[T]) -> Result<Subsets<'_, T>, EnumerateError> {
    let too_many = || EnumerateError::TooManyItems { count: items.len() };
    if items.len() > MAX_ITEMS {
        return Err(too_many());
    }
    let width = u32::try_from(items.len()).map_err(|_overflow| too_many())?;
    let end_mask = 1_u64.checked_shl(width).ok_or_else(too_many)?;
    Ok(Subsets {
        items,
        next_mask: 0,
        end_mask,
    })
}

/// The members of `items` selected by `mask`, in original order.
pub fn subset_of<T>(items: &[T], mask: u64) -> Vec<&T> {
    items
        .iter()
        .enumerate()
        .filter(|&(index, _)| is_selected(mask, index))
        .map(|(_, item)| item)
        .collect()
}

fn is_selected(mask: u64, index: usize) -> bool {
    u32::try_from(index)
        .ok()
        .and_then(|shift| mask.checked_shr(shift))
        .is_some_and(|bits| bits & 1 == 1)
}

impl<T> Subsets<'_, T> {
    /// Total number of subsets in the full sequence (`2^n`).
    pub const fn total(&self) -> u64 {
        self.end_mask
    }

    /// Number of subsets not yet yielded.
    pub const fn remaining(&self) -> u64 {
        self.end_mask.saturating_sub(self.next_mask)
    }

    /// Rewind to mask `0`.
    pub const fn restart(&mut self) {
        self.next_mask = 0;
    }
}

impl<'a, T> Iterator for Subsets<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_mask >= self.end_mask {
            return None;
        }
        let mask = self.next_mask;
        self.next_mask = mask.saturating_add(1);
        Some(subset_of(self.items, mask))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        usize::try_from(self.remaining()).map_or((usize::MAX, None), |n| (n, Some(n)))
    }
}

impl<T> FusedIterator for Subsets<'_, T> {}
