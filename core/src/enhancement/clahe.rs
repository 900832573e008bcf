use image::{GrayImage, Luma};
use imageproc::stats::histogram;

const BINS: usize = 256;

/// Contrast-limited adaptive histogram equalization
///
/// The image is split into a `grid` of tiles; each tile gets a clipped,
/// equalized lookup table and every pixel is bilinearly blended from the
/// tables of the four nearest tile centres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clahe {
    /// Histogram clip limit, relative to a uniform distribution
    pub clip_limit: f32,

    /// Tiles along (columns, rows)
    pub grid: (u32, u32),
}

impl Clahe {
    /// Creates a new Clahe
    pub fn new(clip_limit: f32, grid: (u32, u32)) -> Self {
        Self { clip_limit, grid }
    }

    /// Applies the equalization, returning a new image
    pub fn apply(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return image.clone();
        }

        let tiles_x = self.grid.0.clamp(1, width);
        let tiles_y = self.grid.1.clamp(1, height);
        let tile_w = width as f32 / tiles_x as f32;
        let tile_h = height as f32 / tiles_y as f32;

        let luts: Vec<[u8; BINS]> = (0..tiles_y)
            .flat_map(|ty| (0..tiles_x).map(move |tx| (tx, ty)))
            .map(|(tx, ty)| {
                let x0 = (tx as f32 * tile_w) as u32;
                let x1 = (((tx + 1) as f32 * tile_w) as u32).min(width);
                let y0 = (ty as f32 * tile_h) as u32;
                let y1 = (((ty + 1) as f32 * tile_h) as u32).min(height);
                let tile = image::imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0);
                self.tile_lut(&tile.to_image())
            })
            .collect();
        let lut = |tx: u32, ty: u32| &luts[(ty * tiles_x + tx) as usize];

        GrayImage::from_fn(width, height, |x, y| {
            let (tx1, tx2, xa) = neighbours(x, tile_w, tiles_x);
            let (ty1, ty2, ya) = neighbours(y, tile_h, tiles_y);
            let v = image.get_pixel(x, y)[0] as usize;

            let top = lut(tx1, ty1)[v] as f32 * (1.0 - xa) + lut(tx2, ty1)[v] as f32 * xa;
            let bottom = lut(tx1, ty2)[v] as f32 * (1.0 - xa) + lut(tx2, ty2)[v] as f32 * xa;
            let value = top * (1.0 - ya) + bottom * ya;
            Luma([value.round().clamp(0.0, 255.0) as u8])
        })
    }

    fn tile_lut(&self, tile: &GrayImage) -> [u8; BINS] {
        let mut hist = histogram(tile).channels[0];
        let area = tile.width() * tile.height();
        if area == 0 {
            let mut identity = [0u8; BINS];
            for (i, v) in identity.iter_mut().enumerate() {
                *v = i as u8;
            }
            return identity;
        }

        if self.clip_limit > 0.0 {
            let limit = ((self.clip_limit * area as f32 / BINS as f32) as u32).max(1);
            let mut excess = 0u32;
            for bin in hist.iter_mut() {
                if *bin > limit {
                    excess += *bin - limit;
                    *bin = limit;
                }
            }

            let batch = excess / BINS as u32;
            let residual = (excess % BINS as u32) as usize;
            for bin in hist.iter_mut() {
                *bin += batch;
            }
            if residual > 0 {
                let step = (BINS / residual).max(1);
                for bin in hist.iter_mut().step_by(step).take(residual) {
                    *bin += 1;
                }
            }
        }

        let scale = 255.0 / area as f32;
        let mut lut = [0u8; BINS];
        let mut sum = 0u32;
        for (entry, count) in lut.iter_mut().zip(hist.iter()) {
            sum += count;
            *entry = (sum as f32 * scale).round().min(255.0) as u8;
        }
        lut
    }
}

/// Nearest tile indices around `pos` and the blend weight toward the second
fn neighbours(pos: u32, tile_size: f32, tiles: u32) -> (u32, u32, f32) {
    let f = pos as f32 / tile_size - 0.5;
    let lower = f.floor();
    let weight = f - lower;
    let first = lower.max(0.0) as u32;
    let second = ((lower + 1.0).max(0.0) as u32).min(tiles - 1);
    (first.min(tiles - 1), second, weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_stays_uniform() {
        let image = GrayImage::from_pixel(40, 40, Luma([90]));
        let out = Clahe::new(2.0, (10, 10)).apply(&image);
        let first = out.get_pixel(0, 0)[0];
        assert!(out.pixels().all(|p| p[0] == first));
    }

    #[test]
    fn test_black_stays_black() {
        let image = GrayImage::new(30, 20);
        let out = Clahe::new(2.0, (10, 10)).apply(&image);
        // Clipping lifts bin 0, but not past mid-gray
        assert!(out.pixels().all(|p| p[0] < 128));
    }

    #[test]
    fn test_stretches_low_contrast() {
        let image = GrayImage::from_fn(64, 64, |x, _| Luma([100 + (x % 8) as u8]));
        let out = Clahe::new(40.0, (2, 2)).apply(&image);

        let spread = |img: &GrayImage| {
            let min = img.pixels().map(|p| p[0]).min().unwrap();
            let max = img.pixels().map(|p| p[0]).max().unwrap();
            max - min
        };
        assert!(spread(&out) > spread(&image));
    }

    #[test]
    fn test_preserves_ordering_within_tile() {
        let image = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));
        let out = Clahe::new(2.0, (1, 1)).apply(&image);
        assert!(out.get_pixel(0, 0)[0] <= out.get_pixel(15, 15)[0]);
        assert!(out.get_pixel(3, 0)[0] <= out.get_pixel(4, 0)[0]);
    }

    #[test]
    fn test_tiny_and_empty_images() {
        let clahe = Clahe::new(2.0, (10, 10));
        let empty = GrayImage::new(0, 0);
        assert_eq!(clahe.apply(&empty).dimensions(), (0, 0));

        let tiny = GrayImage::from_pixel(3, 2, Luma([10]));
        assert_eq!(clahe.apply(&tiny).dimensions(), (3, 2));
    }

    #[test]
    fn test_neighbours_clamped() {
        assert_eq!(neighbours(0, 10.0, 4), (0, 0, 0.5));
        let (a, b, _) = neighbours(39, 10.0, 4);
        assert_eq!((a, b), (3, 3));
    }
}
