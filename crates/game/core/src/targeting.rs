//! Nearest-opponent search.

use crate::state::{Position, Unit};

/// Index of the candidate closest to `origin`, if any is strictly nearer
/// than `max_search_radius`.
///
/// The running minimum lives in a local and is seeded with the search radius.
/// Replacement uses `<`, so equidistant candidates resolve to the earlier index
/// and a candidate exactly on the radius is never picked.
pub fn find_closest(origin: Position, candidates: &[Unit], max_search_radius: f32) -> Option<usize> {
    find_closest_in(origin, candidates, max_search_radius)
}

/// [`find_closest`] over borrowed units (e.g. a filtered working pool).
pub fn find_closest_in<'a, I>(origin: Position, candidates: I, max_search_radius: f32) -> Option<usize>
where
    I: IntoIterator<Item = &'a Unit>,
{
    let mut best = None;
    let mut least = max_search_radius;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let distance = origin.distance(candidate.position);
        if distance < least {
            least = distance;
            best = Some(index);
        }
    }
    best
}
