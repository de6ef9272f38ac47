use voxnav_core::Pos;

/// Horizontal octile distance: straight steps plus `√2` per diagonal step.
#[inline]
pub fn octile(dx: i32, dz: i32) -> f64 {
    let (dx, dz) = (dx.abs() as f64, dz.abs() as f64);
    (dz - dx).abs() + dx.min(dz) * std::f64::consts::SQRT_2
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}
