//! Tests for color values and hue rotations.

use isle_css::{Color, Rgb};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_spin_wraps_forward_and_backward() {
    let base = Color::hsl(350.0, 0.5, 0.5);
    assert!(approx(base.spin(20.0).hue(), 10.0));
    assert!(approx(base.spin(-360.0).hue(), 350.0));
    assert!(approx(Color::hsl(10.0, 0.5, 0.5).spin(-20.0).hue(), 350.0));
}

#[test]
fn test_spin_does_not_mutate() {
    let base = Color::hsl(200.0, 0.8, 0.6);
    let _spun = base.spin(90.0);
    assert!(approx(base.hue(), 200.0));
}

#[test]
fn test_spin_keeps_saturation_and_lightness() {
    let base = Color::hsl(200.0, 0.8, 0.6);
    let spun = base.spin(45.0);
    assert!(approx(spun.saturation(), 0.8));
    assert!(approx(spun.lightness(), 0.6));
}

#[test]
fn test_triad_hues() {
    let hues: Vec<f64> = Color::hsl(30.0, 1.0, 0.5).triad().iter().map(Color::hue).collect();
    assert!(approx(hues[0], 30.0));
    assert!(approx(hues[1], 150.0));
    assert!(approx(hues[2], 270.0));
}

#[test]
fn test_split_complement_hues() {
    let hues: Vec<f64> = Color::hsl(30.0, 1.0, 0.5)
        .split_complement()
        .iter()
        .map(Color::hue)
        .collect();
    assert!(approx(hues[0], 180.0));
    assert!(approx(hues[1], 240.0));
}

#[test]
fn test_tetrad_hues() {
    let hues: Vec<f64> = Color::hsl(300.0, 1.0, 0.5).tetrad().iter().map(Color::hue).collect();
    assert!(approx(hues[0], 300.0));
    assert!(approx(hues[1], 30.0));
    assert!(approx(hues[2], 120.0));
    assert!(approx(hues[3], 210.0));
}

#[test]
fn test_triad_of_red_in_rgb() {
    let [red, green, blue] = Color::from_hex("#ff0000").unwrap().triad();
    assert_eq!(red.to_rgb(), Rgb { r: 255, g: 0, b: 0 });
    assert_eq!(green.to_rgb(), Rgb { r: 0, g: 255, b: 0 });
    assert_eq!(blue.to_rgb(), Rgb { r: 0, g: 0, b: 255 });
}

#[test]
fn test_components_are_clamped() {
    let color = Color::hsl(f64::NAN, 2.0, -1.0);
    assert!(approx(color.hue(), 0.0));
    assert!(approx(color.saturation(), 1.0));
    assert!(approx(color.lightness(), 0.0));
    assert_eq!(color.to_hex_string(), "#000000");
}
