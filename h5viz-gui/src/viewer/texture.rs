//! Texture generation for the image view.

use egui::ColorImage;
use h5viz_core::{Colormap, ImageStack, RoiSelector};
use image::RgbaImage;

/// Wrap an RGBA raster as an egui image.
#[must_use]
pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Render the current frame of `stack`, with ROI outlines when a selector is
/// given.
#[must_use]
pub fn render_view(
    stack: &ImageStack,
    cmap: &Colormap,
    selector: Option<&RoiSelector>,
) -> ColorImage {
    let frame = stack.render(cmap);
    match selector {
        Some(selector) => to_color_image(&selector.overlay(&frame)),
        None => to_color_image(&frame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h5viz_core::Preset;
    use ndarray::Array2;

    #[test]
    fn test_to_color_image_keeps_layout() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        let color = to_color_image(&image);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[5], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_render_view_draws_overlay() {
        let frames = vec![Array2::<f64>::zeros((20, 20))];
        let stack = ImageStack::new(frames, None).unwrap();
        let cmap = Preset::Grayscale.colormap();
        let plain = render_view(&stack, &cmap, None);

        let mut selector = RoiSelector::new(20, 20).unwrap();
        for (x, y) in [(2.0, 2.0), (15.0, 2.0), (15.0, 15.0)] {
            selector.click(x, y);
        }
        let outlined = render_view(&stack, &cmap, Some(&selector));
        assert_eq!(plain.size, outlined.size);
        assert_ne!(plain.pixels, outlined.pixels);
    }
}
