use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform duration in `[min, max]` at millisecond resolution
pub fn delay_between(rng: &mut impl Rng, min: Duration, max: Duration) -> Duration {
    let (min, max) = normalize_bounds(min.as_millis() as u64, max.as_millis() as u64);
    Duration::from_millis(rng.gen_range(min..=max))
}

/// Two different elements, in the order they were drawn
pub fn pick_two_distinct<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Option<(&'a T, &'a T)> {
    if items.len() < 2 {
        return None;
    }
    let first = rng.gen_range(0..items.len());
    let mut second = rng.gen_range(0..items.len() - 1);
    if second >= first {
        second += 1;
    }
    Some((&items[first], &items[second]))
}

/// Between `min` and `max` distinct elements in random order
pub fn pick_some<T: Clone>(rng: &mut impl Rng, items: &[T], min: usize, max: usize) -> Vec<T> {
    let (min, max) = normalize_bounds(min, max);
    let count = rng.gen_range(min..=max).min(items.len());
    items.choose_multiple(rng, count).cloned().collect()
}

/// Uniform pick, or `fallback` for an empty slice
pub fn pick_or<'a>(rng: &mut impl Rng, items: &[&'a str], fallback: &'a str) -> &'a str {
    items.choose(rng).copied().unwrap_or(fallback)
}

fn normalize_bounds<T: PartialOrd>(min: T, max: T) -> (T, T) {
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}
