// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture decoding, caching, and bilinear sampling.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const BYTE_TO_FLOAT: f32 = 1.0 / 255.0;

/// Error loading a texture file.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The file does not exist.
    #[error("texture file not found: {0}")]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file could not be decoded as an image.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// The file that failed
        path: PathBuf,
        /// Underlying decode error
        source: image::ImageError,
    },
}

/// A decoded image: row-major normalized RGBA samples.
#[derive(Debug, Clone)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl TextureData {
    /// Wrap decoded pixel data. `pixels` is row-major, `width * height`
    /// entries.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bilinear-filtered lookup with fractional UV wrapping.
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        if self.pixels.is_empty() {
            return [0.5, 0.5, 0.5, 1.0];
        }

        let u = uv[0] - uv[0].floor();
        let v = uv[1] - uv[1].floor();
        let x = u * self.width as f32 - 0.5;
        let y = v * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let xi = x0 as i64;
        let yi = y0 as i64;

        let p00 = self.texel(xi, yi);
        let p10 = self.texel(xi + 1, yi);
        let p01 = self.texel(xi, yi + 1);
        let p11 = self.texel(xi + 1, yi + 1);

        std::array::from_fn(|c| {
            let top = p00[c] + (p10[c] - p00[c]) * fx;
            let bottom = p01[c] + (p11[c] - p01[c]) * fx;
            top + (bottom - top) * fy
        })
    }

    fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

struct CachedTexture {
    modified: SystemTime,
    data: TextureData,
}

/// Cache of decoded textures, keyed by resolved path.
///
/// Entries are invalidated when the file's modification time changes. The
/// cache persists across evaluation passes; each pass only borrows it.
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<PathBuf, CachedTexture>,
}

impl TextureCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached textures.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sample a texture by path, loading or reloading it as needed.
    pub fn sample(&mut self, path: &Path, uv: [f32; 2]) -> Result<[f32; 4], TextureError> {
        Ok(self.fetch(path)?.sample(uv))
    }

    /// Get the decoded data for a path, loading or reloading it as needed.
    pub fn fetch(&mut self, path: &Path) -> Result<&TextureData, TextureError> {
        let resolved = path
            .canonicalize()
            .map_err(|_| TextureError::NotFound(path.to_path_buf()))?;
        let modified = fs::metadata(&resolved)
            .and_then(|m| m.modified())
            .map_err(|source| TextureError::Io {
                path: resolved.clone(),
                source,
            })?;

        let stale = self
            .entries
            .get(&resolved)
            .map_or(true, |entry| entry.modified != modified);
        if stale {
            let data = load_texture(&resolved)?;
            tracing::debug!(
                "loaded texture {} ({}x{})",
                resolved.display(),
                data.width(),
                data.height()
            );
            self.entries
                .insert(resolved.clone(), CachedTexture { modified, data });
        }
        Ok(&self.entries[&resolved].data)
    }
}

fn load_texture(path: &Path) -> Result<TextureData, TextureError> {
    let img = image::open(path).map_err(|err| match err {
        image::ImageError::IoError(source) => TextureError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => TextureError::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            [
                p[0] as f32 * BYTE_TO_FLOAT,
                p[1] as f32 * BYTE_TO_FLOAT,
                p[2] as f32 * BYTE_TO_FLOAT,
                p[3] as f32 * BYTE_TO_FLOAT,
            ]
        })
        .collect();
    Ok(TextureData::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> TextureData {
        // 2x2: black, white / white, black.
        TextureData::new(
            2,
            2,
            vec![
                [0.0, 0.0, 0.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        )
    }

    #[test]
    fn test_sample_texel_centers() {
        let tex = checker();
        // (0.25, 0.25) is the center of the first texel.
        assert_eq!(tex.sample([0.25, 0.25]), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(tex.sample([0.75, 0.25]), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sample_blends_between_texels() {
        let tex = checker();
        // Halfway between a black and a white texel.
        let mid = tex.sample([0.5, 0.25]);
        assert!((mid[0] - 0.5).abs() < 1e-5);
        assert!((mid[3] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sample_wraps_fractionally() {
        let tex = checker();
        let base = tex.sample([0.25, 0.25]);
        assert_eq!(tex.sample([1.25, 0.25]), base);
        assert_eq!(tex.sample([-0.75, 2.25]), base);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let mut cache = TextureCache::new();
        let err = cache
            .sample(Path::new("no/such/texture.png"), [0.5, 0.5])
            .unwrap_err();
        assert!(matches!(err, TextureError::NotFound(_)));
        assert!(cache.is_empty());
    }
}
