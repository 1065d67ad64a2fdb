use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Local, Utc};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns the current Unix time in milliseconds, bumped forward when needed
/// so that every call in this process yields a strictly larger value.
///
/// Records and image files are keyed by this value, so two writes landing in
/// the same millisecond must not collide.
pub fn unique_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Human-readable local time, e.g. `10/18/2026, 9:05:42 AM`.
pub fn local_timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let ids: Vec<i64> = (0..1000).map(|_| unique_millis()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ids_track_wall_clock() {
        let before = Utc::now().timestamp_millis();
        assert!(unique_millis() >= before);
    }
}
