use bevy::color::Color;
use bevy::math::{Vec3, Vec4};

const EPSILON: f32 = 1e-5;

/// Fast start, slow finish; a freshly visited edge lights up immediately
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// RGB(A) to (hue, saturation, value), all in [0, 1]; alpha is dropped
pub fn rgb_to_hsv(rgba: Vec4) -> Vec3 {
    let rgb = rgba.truncate();
    let value = rgb.max_element();
    let chroma = value - rgb.min_element();

    if chroma < EPSILON {
        return Vec3::new(0.0, 0.0, value);
    }

    let sector = if value - rgb.x < EPSILON {
        (rgb.y - rgb.z) / chroma
    } else if value - rgb.y < EPSILON {
        2.0 + (rgb.z - rgb.x) / chroma
    } else {
        4.0 + (rgb.x - rgb.y) / chroma
    };

    Vec3::new((sector / 6.0).rem_euclid(1.0), chroma / value, value)
}

/// (hue, saturation, value) back to opaque RGBA
pub fn hsv_to_rgb(hsv: Vec3) -> Vec4 {
    let sector = hsv.x.rem_euclid(1.0) * 6.0;
    let chroma = hsv.z * hsv.y;
    let second = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());

    let rgb = match sector as u32 {
        0 => Vec3::new(chroma, second, 0.0),
        1 => Vec3::new(second, chroma, 0.0),
        2 => Vec3::new(0.0, chroma, second),
        3 => Vec3::new(0.0, second, chroma),
        4 => Vec3::new(second, 0.0, chroma),
        _ => Vec3::new(chroma, 0.0, second),
    };

    (rgb + Vec3::splat(hsv.z - chroma)).extend(1.0)
}

/// Blend two colors through HSV along the shorter way round the hue circle.
/// Alpha is blended linearly.
pub fn lerp_hsv(from: Vec4, to: Vec4, t: f32) -> Vec4 {
    let a = rgb_to_hsv(from);
    let b = rgb_to_hsv(to);

    let mut hue_step = b.x - a.x;
    if hue_step > 0.5 {
        hue_step -= 1.0;
    } else if hue_step < -0.5 {
        hue_step += 1.0;
    }

    let mixed = Vec3::new(a.x + hue_step * t, mix(a.y, b.y, t), mix(a.z, b.z, t));
    hsv_to_rgb(mixed).truncate().extend(mix(from.w, to.w, t))
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// sRGB components of a Bevy color
pub fn color_to_vec4(color: Color) -> Vec4 {
    let srgba = color.to_srgba();
    Vec4::new(srgba.red, srgba.green, srgba.blue, srgba.alpha)
}

pub fn vec4_to_color(v: Vec4) -> Color {
    Color::srgba(v.x, v.y, v.z, v.w)
}
