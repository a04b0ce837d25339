//! Diverging cool-warm colour map for values on [-1, 1].

use image::Rgba;

const COOL: [f32; 3] = [59.0, 76.0, 192.0];
const NEUTRAL: [f32; 3] = [221.0, 221.0, 221.0];
const WARM: [f32; 3] = [180.0, 4.0, 38.0];

/// Colour for `value`: blue at -1, grey at 0, red at +1.
///
/// Values outside [-1, 1] are clamped; NaN maps to the neutral grey.
pub fn coolwarm(value: f64) -> Rgba<u8> {
    if value.is_nan() {
        return rgba(NEUTRAL);
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    if v < 0.0 {
        rgba(lerp(NEUTRAL, COOL, -v))
    } else {
        rgba(lerp(NEUTRAL, WARM, v))
    }
}

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn rgba(c: [f32; 3]) -> Rgba<u8> {
    Rgba([
        c[0].round() as u8,
        c[1].round() as u8,
        c[2].round() as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        assert_eq!(coolwarm(-1.0), Rgba([59, 76, 192, 255]));
        assert_eq!(coolwarm(0.0), Rgba([221, 221, 221, 255]));
        assert_eq!(coolwarm(1.0), Rgba([180, 4, 38, 255]));
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(coolwarm(-3.0), coolwarm(-1.0));
        assert_eq!(coolwarm(1.0 + 1e-9), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.0));
    }

    #[test]
    fn test_warm_side_drains_blue() {
        let blues: Vec<u8> = (0..=10).map(|k| coolwarm(k as f64 / 10.0).0[2]).collect();
        assert!(blues.windows(2).all(|w| w[0] >= w[1]));
    }
}
