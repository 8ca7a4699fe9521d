use crate::models::Location;
use std::f64::consts::PI;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[inline(always)]
fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Great-circle distance in kilometres (spherical law of cosines).
#[inline(always)]
pub fn calculate_distance(from: &Location, to: &Location) -> f64 {
    let lat1 = to_radians(from.latitude);
    let lon1 = to_radians(from.longitude);
    let lat2 = to_radians(to.latitude);
    let lon2 = to_radians(to.longitude);

    let val = (lat1.sin() * lat2.sin()) + (lat1.cos() * lat2.cos() * (lon1 - lon2).cos());

    val.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

pub fn distance_rows(locations: &[Location]) -> Vec<Vec<f64>> {
    locations
        .iter()
        .enumerate()
        .map(|(i, from)| {
            locations
                .iter()
                .enumerate()
                .map(|(j, to)| if i == j { 0.0 } else { calculate_distance(from, to) })
                .collect()
        })
        .collect()
}
