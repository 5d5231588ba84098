//! CIEDE2000 color difference.
//!
//! Implements the formula as published by the CIE (CIE 142-2001) with the
//! implementation notes of Sharma, Wu and Dalal (2005), parametric factors
//! kL = kC = kH = 1.
//!
//! ΔE2000 is not a metric (the triangle inequality does not hold), but it is
//! symmetric and zero exactly for identical inputs.

use std::cmp::Ordering;

use crate::color::Lab;

/// 25^7, used by the chroma compensation and rotation terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Perceptual distance between two LAB colors (ΔE2000, >= 0).
///
/// `ciede2000(a, b) == ciede2000(b, a)` holds bit-for-bit: the inputs are put
/// in a canonical order before evaluation.
///
/// # Example
///
/// ```
/// use palette_match::{ciede2000, Lab};
///
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((ciede2000(a, b) - 2.0425).abs() < 1e-4);
/// ```
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let (lab1, lab2) = match canonical_order(&lab1, &lab2) {
        Ordering::Greater => (lab2, lab1),
        _ => (lab1, lab2),
    };

    // a* correction for the chroma of the pair
    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let c_bar7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_angle(a1p, lab1.b);
    let h2p = hue_angle(a2p, lab2.b);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let dh = h2p - h1p;
        if dh > 180.0 {
            dh - 360.0
        } else if dh < -180.0 {
            dh + 360.0
        } else {
            dh
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let l_bar_p = (lab1.l + lab2.l) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();

    let l_offset = (l_bar_p - 50.0) * (l_bar_p - 50.0);
    let s_l = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;

    let delta_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let r_c = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let l_term = delta_lp / s_l;
    let c_term = delta_cp / s_c;
    let h_term = delta_big_hp / s_h;

    // The rotation term can push the radicand a hair below zero for
    // near-identical colors
    (l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees (0.0..360.0); 0.0 on the neutral axis.
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

fn canonical_order(x: &Lab, y: &Lab) -> Ordering {
    x.l.total_cmp(&y.l)
        .then(x.a.total_cmp(&y.a))
        .then(x.b.total_cmp(&y.b))
}
