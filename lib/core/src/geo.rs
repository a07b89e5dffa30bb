// Great-circle distance on a spherical Earth.
// Scalar and batch paths share one kernel so they agree bit for bit.

use crate::point::GeoPoint;

/// Mean Earth radius used by the haversine formula, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[inline(always)]
fn haversine_kernel(
    lat1_rad: f64,
    lon1_rad: f64,
    cos_lat1: f64,
    lat2_rad: f64,
    lon2_rad: f64,
    cos_lat2: f64,
) -> f64 {
    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;
    let a = (dlat / 2.0).sin().powi(2) + cos_lat1 * cos_lat2 * (dlon / 2.0).sin().powi(2);
    // Rounding can push sqrt(a) a hair past 1.0 for antipodal points
    2.0 * a.sqrt().min(1.0).asin() * EARTH_RADIUS_KM
}

/// Haversine distance between two points in kilometers
#[inline]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    haversine_kernel(
        lat1,
        a.lon().to_radians(),
        lat1.cos(),
        lat2,
        b.lon().to_radians(),
        lat2.cos(),
    )
}

/// Distances from `origin` to every target, in target order
pub fn haversine_batch(origin: &GeoPoint, targets: &[GeoPoint]) -> Vec<f64> {
    PointColumns::from_points(targets).distances_from(origin)
}

/// Structure-of-arrays view of a point set with the per-point
/// trigonometry precomputed.
///
/// Built once per candidate set and reused for every origin, which keeps
/// the per-origin cost at a single pass over flat arrays.
#[derive(Debug, Clone, Default)]
pub struct PointColumns {
    lat_rad: Vec<f64>,
    lon_rad: Vec<f64>,
    cos_lat: Vec<f64>,
}

impl PointColumns {
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let mut columns = Self {
            lat_rad: Vec::with_capacity(points.len()),
            lon_rad: Vec::with_capacity(points.len()),
            cos_lat: Vec::with_capacity(points.len()),
        };
        for p in points {
            let lat = p.lat().to_radians();
            columns.lat_rad.push(lat);
            columns.lon_rad.push(p.lon().to_radians());
            columns.cos_lat.push(lat.cos());
        }
        columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lat_rad.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lat_rad.is_empty()
    }

    /// Batch haversine from `origin` to every stored point
    pub fn distances_from(&self, origin: &GeoPoint) -> Vec<f64> {
        let lat1 = origin.lat().to_radians();
        let lon1 = origin.lon().to_radians();
        let cos_lat1 = lat1.cos();

        self.lat_rad
            .iter()
            .zip(&self.lon_rad)
            .zip(&self.cos_lat)
            .map(|((&lat2, &lon2), &cos_lat2)| {
                haversine_kernel(lat1, lon1, cos_lat1, lat2, lon2, cos_lat2)
            })
            .collect()
    }
}

/// Round half away from zero to `decimals` places
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
