use sheetnest::util::FPA;

/// Rotation angles in degrees: `0, step, 2·step, ...`, all strictly smaller than 360.
pub fn rotation_angles(step: f64) -> Vec<f64> {
    assert!(step > 0.0, "rotation step must be positive");
    (0..)
        .map(|k| k as f64 * step)
        .take_while(|angle| FPA(*angle) < FPA(360.0))
        .collect()
}
