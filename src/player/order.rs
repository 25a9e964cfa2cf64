//! Index arithmetic for moving through the playlist.

use rand::Rng;

/// Next index, wrapping to 0. With nothing current, starts at 0.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current.filter(|&i| i < len) {
        Some(i) => Some((i + 1) % len),
        None => Some(0),
    }
}

/// Previous index, wrapping to the last. With nothing current, starts at the last.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current.filter(|&i| i < len) {
        Some(i) => Some((i + len - 1) % len),
        None => Some(len - 1),
    }
}

/// Uniform pick over `[0, len)` excluding `current` when `len > 1`.
///
/// A single track is picked again; an empty playlist yields `None`.
pub fn shuffle_index<R: Rng + ?Sized>(
    rng: &mut R,
    current: Option<usize>,
    len: usize,
) -> Option<usize> {
    match (len, current.filter(|&i| i < len)) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, None) => Some(rng.random_range(0..len)),
        (_, Some(cur)) => {
            let pick = rng.random_range(0..len - 1);
            Some(if pick >= cur { pick + 1 } else { pick })
        }
    }
}
