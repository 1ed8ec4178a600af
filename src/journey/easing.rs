/// Ease-in-out quadratic: accelerates through the first half, decelerates through the second
/// Input is clamped to [0, 1]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_is_monotonic() {
        let mut previous = 0.0;
        for i in 1..=100 {
            let value = ease_in_out_quad(i as f32 / 100.0);
            assert!(value >= previous, "Easing should never move backwards");
            previous = value;
        }
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(ease_in_out_quad(-2.0), 0.0);
        assert!((ease_in_out_quad(3.0) - 1.0).abs() < 1e-6);
    }
}
