// src/config.rs

use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use dotenvy::dotenv;

use crate::utils::geo::{Coordinate, Geofence};

/// How often the classroom QR token is replaced.
pub const QR_ROTATION_SECS: u64 = 45;

/// Default geofence anchor (campus coordinates) and radius.
pub const GEOFENCE_ANCHOR_LAT: f64 = 17.2986622;
pub const GEOFENCE_ANCHOR_LON: f64 = 78.5173568;
pub const GEOFENCE_RADIUS_M: f64 = 100.0;

/// Face captures arrive base64-encoded inside JSON, so bodies get large.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    /// Directory holding one JSON array file per resource.
    pub data_dir: PathBuf,
    /// Where attendance face captures are written and served from.
    pub uploads_dir: PathBuf,
    /// Static pages root.
    pub public_dir: PathBuf,
    pub qr_rotation: Duration,
    pub geofence: Geofence,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let anchor = Coordinate::new(
            try_load("GEOFENCE_LAT", GEOFENCE_ANCHOR_LAT),
            try_load("GEOFENCE_LON", GEOFENCE_ANCHOR_LON),
        )
        .unwrap_or_else(|| {
            tracing::warn!("Geofence anchor out of range, using campus default");
            Coordinate::campus()
        });

        Self {
            addr: try_load("EDUTRACK_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000))),
            data_dir: PathBuf::from(try_load("EDUTRACK_DATA_DIR", "data".to_string())),
            uploads_dir: PathBuf::from(try_load("EDUTRACK_UPLOADS_DIR", "uploads".to_string())),
            public_dir: PathBuf::from(try_load("EDUTRACK_PUBLIC_DIR", "public".to_string())),
            qr_rotation: Duration::from_secs(try_load("QR_ROTATION_SECS", QR_ROTATION_SECS).max(1)),
            geofence: Geofence::new(
                anchor,
                checked_radius(try_load("GEOFENCE_RADIUS_M", GEOFENCE_RADIUS_M)),
            ),
            body_limit: BODY_LIMIT_BYTES,
        }
    }
}

/// Reads `key` from the environment, falling back to `default` when the
/// variable is unset or does not parse.
fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value {raw:?}: {e}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

/// A radius must be finite and positive, otherwise every distance compares
/// false against it.
fn checked_radius(radius_m: f64) -> f64 {
    if radius_m.is_finite() && radius_m > 0.0 {
        radius_m
    } else {
        tracing::warn!("Invalid geofence radius {radius_m}, using default {GEOFENCE_RADIUS_M}");
        GEOFENCE_RADIUS_M
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_radius_is_kept() {
        assert_eq!(checked_radius(250.0), 250.0);
    }

    #[test]
    fn unusable_radius_falls_back_to_default() {
        for radius in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -5.0] {
            assert_eq!(checked_radius(radius), GEOFENCE_RADIUS_M);
        }
    }

    #[test]
    fn fallback_radius_still_rejects_far_points() {
        let geofence = Geofence::new(Coordinate::campus(), checked_radius(f64::NAN));
        let paris = Coordinate::new(48.8566, 2.3522).unwrap();
        assert!(!geofence.contains(paris));
    }
}
