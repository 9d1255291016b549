//! Logo icon repainting.
//!
//! Two passes over the logo asset: the white blade gets a diagonal
//! light-blue to warm-blue gradient and every other opaque pixel becomes the
//! dark theme background, then a cleanup pass snaps the leftover
//! antialiasing pixels on the borders to one side or the other.

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use crate::color::Rgb;
use crate::config::BuildPaths;

const WARM_BLUE: Rgb = Rgb { r: 0x5b, g: 0x9f, b: 0xd4 };
const LIGHT_BLUE: Rgb = Rgb { r: 0x7b, g: 0xb8, b: 0xe8 };
const DARK_BG: Rgb = Rgb { r: 0x1a, g: 0x1a, b: 0x1a };

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Rgb { r: mix(a.r, b.r), g: mix(a.g, b.g), b: mix(a.b, b.b) }
}

fn is_white(px: Rgba<u8>) -> bool {
    let [r, g, b, a] = px.0;
    a > 200 && r > 200 && g > 200 && b > 200
}

/// Repaint the logo: gradient over the white blade, dark background
/// elsewhere. Returns (gradient pixels, background pixels).
pub fn apply_gradient(img: &mut RgbaImage) -> (usize, usize) {
    let (width, height) = img.dimensions();

    // Bounding box of the white blade drives the gradient direction.
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in img.enumerate_pixels() {
        if is_white(*px) {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    let mut blue_changes = 0;
    let mut dark_changes = 0;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let a = px.0[3];
        if a < 10 {
            continue;
        }

        if is_white(*px) {
            // Diagonal gradient across the blade, top-left to bottom-right.
            let t = if max_x > min_x && max_y > min_y {
                ((x - min_x) as f32 / (max_x - min_x) as f32
                    + (y - min_y) as f32 / (max_y - min_y) as f32)
                    / 2.0
            } else {
                0.5
            };
            let c = lerp(LIGHT_BLUE, WARM_BLUE, t);
            *px = Rgba([c.r, c.g, c.b, a]);
            blue_changes += 1;
        } else if a > 200 {
            *px = Rgba([DARK_BG.r, DARK_BG.g, DARK_BG.b, a]);
            dark_changes += 1;
        }
    }

    (blue_changes, dark_changes)
}

/// Snap leftover aliasing pixels to light blue or the dark background by
/// brightness. Returns the number of pixels fixed.
pub fn fix_aliasing(img: &mut RgbaImage) -> usize {
    let mut fixed = 0;

    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        if a < 10 {
            continue;
        }

        let brightness = (r as u32 + g as u32 + b as u32) / 3;

        let is_mixed = if a < 200 {
            // Semi-transparent border pixels.
            a > 50
        } else {
            // Opaque pixels that are neither dark background nor gradient blue.
            let is_dark_bg = r < 40 && g < 40 && b < 40;
            let is_blue = (80..140).contains(&r) && (140..200).contains(&g) && (180..240).contains(&b);
            !is_dark_bg && !is_blue
        };

        if is_mixed {
            *px = if brightness > 60 {
                Rgba([LIGHT_BLUE.r, LIGHT_BLUE.g, LIGHT_BLUE.b, 255])
            } else {
                Rgba([DARK_BG.r, DARK_BG.g, DARK_BG.b, 255])
            };
            fixed += 1;
        }
    }

    fixed
}

/// Pipeline step: repaint the logo asset in place. The logo is optional;
/// a missing file is a warning, not a failure.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let logo_path = paths.logo_file();
    if !logo_path.exists() {
        println!("  warning: logo not found: {}", logo_path.display());
        return Ok(());
    }

    let mut img = image::open(&logo_path)
        .with_context(|| format!("decoding {}", logo_path.display()))?
        .to_rgba8();

    let (blue, dark) = apply_gradient(&mut img);
    let fixed = fix_aliasing(&mut img);

    img.save(&logo_path)
        .with_context(|| format!("writing {}", logo_path.display()))?;

    println!("Customized logo icon");
    println!("  Blade: {} pixels with gradient (light blue -> warm blue)", blue);
    println!("  Background: {} pixels -> dark grey", dark);
    println!("  Aliasing: {} border pixels snapped", fixed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_repaints_blade_and_background() {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255])); // blade
        img.put_pixel(1, 0, Rgba([100, 60, 20, 255])); // colored -> dark bg
        img.put_pixel(2, 0, Rgba([0, 0, 0, 5])); // transparent, untouched
        img.put_pixel(3, 0, Rgba([255, 255, 255, 255])); // blade

        let (blue, dark) = apply_gradient(&mut img);
        assert_eq!((blue, dark), (2, 1));

        // Degenerate 1px-high blade: gradient midpoint everywhere.
        let mid = lerp(LIGHT_BLUE, WARM_BLUE, 0.5);
        assert_eq!(*img.get_pixel(0, 0), Rgba([mid.r, mid.g, mid.b, 255]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([0x1a, 0x1a, 0x1a, 255]));
        assert_eq!(*img.get_pixel(2, 0), Rgba([0, 0, 0, 5]));
    }

    #[test]
    fn test_aliasing_snaps_by_brightness() {
        let mut img = RgbaImage::new(4, 1);
        img.put_pixel(0, 0, Rgba([150, 170, 200, 120])); // bright semi-transparent
        img.put_pixel(1, 0, Rgba([30, 30, 40, 150])); // dark semi-transparent
        img.put_pixel(2, 0, Rgba([0x1a, 0x1a, 0x1a, 255])); // dark bg, untouched
        img.put_pixel(3, 0, Rgba([120, 170, 210, 255])); // gradient blue, untouched

        let fixed = fix_aliasing(&mut img);
        assert_eq!(fixed, 2);
        assert_eq!(*img.get_pixel(0, 0), Rgba([0x7b, 0xb8, 0xe8, 255]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([0x1a, 0x1a, 0x1a, 255]));
        assert_eq!(*img.get_pixel(2, 0), Rgba([0x1a, 0x1a, 0x1a, 255]));
        assert_eq!(*img.get_pixel(3, 0), Rgba([120, 170, 210, 255]));
    }
}
