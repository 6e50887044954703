//! Path utilities.
//!
//! A path is the list of child indices walked from the root. Paths are never
//! totally ordered against each other; the transform only cares where two
//! of them stop agreeing.

/// Root-relative child indices. The empty path addresses nothing.
pub type Path = Vec<usize>;

/// Returns the index at which `a` and `b` contend.
///
/// This is the first depth where the elements differ. When one path is a
/// prefix of the other (or they are equal) both operations touch the slot
/// named by the shorter path's last step, so that depth is returned
/// instead.
///
/// Both paths must be non-empty.
pub fn transformation_point(a: &[usize], b: &[usize]) -> usize {
    debug_assert!(!a.is_empty() && !b.is_empty(), "transformation point of an empty path");
    let shortest = a.len().min(b.len());
    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    if shared == shortest {
        shortest.saturating_sub(1)
    } else {
        shared
    }
}

/// Returns true when the two paths cannot interact at `tp`.
///
/// Either both reach more than one level past `tp` (distinct subtrees of a
/// common ancestor), or the shorter path sits strictly after the longer one
/// at `tp` and so cannot shift it.
pub fn effect_independent(a: &[usize], b: &[usize], tp: usize) -> bool {
    (a.len() > tp + 1 && b.len() > tp + 1)
        || (a[tp] > b[tp] && a.len() < b.len())
        || (a[tp] < b[tp] && a.len() > b.len())
}

/// Returns a copy of `path` with the element at `index` moved by `delta`.
///
/// Going below zero asserts in debug builds; release builds clamp to zero.
pub fn update(path: &[usize], index: usize, delta: isize) -> Path {
    let mut next = path.to_vec();
    debug_assert!(
        delta >= 0 || next[index] >= delta.unsigned_abs(),
        "path element {} would go negative",
        index
    );
    next[index] = next[index].saturating_add_signed(delta);
    next
}
