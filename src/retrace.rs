//! Detection of orbits that fold back onto themselves.
//!
//! When the ball reaches a corner every axis reverses at once, so the next step
//! undoes the previous one and the rest of the period replays the route so far
//! in reverse. Over a full period such a path visits each point twice as often
//! as the route itself does.

/// True iff some point equals the point two steps later.
///
/// Must be given the whole period (closing point included), not a prefix:
/// a corner hit at the start only shows up again halfway through.
pub fn is_double<T: PartialEq>(path: &[T]) -> bool {
    path.windows(3).any(|w| w[0] == w[2])
}

/// Time indices at which the path reverses, the middle of each `p, q, p` window.
pub fn turning_times<T: PartialEq>(path: &[T]) -> Vec<usize> {
    path.windows(3)
        .enumerate()
        .filter(|(_, w)| w[0] == w[2])
        .map(|(i, _)| i + 1)
        .collect()
}
