use anyhow::{Context, Result};
use eframe::egui;
use image::ImageReader;
use std::path::Path;

/// プレビュー用に画像を読み込み、最大辺 `max_size` に収める
pub fn load_preview(path: &Path, max_size: u32) -> Result<egui::ColorImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("read {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;

    let image = if image.width() > max_size || image.height() > max_size {
        image.thumbnail(max_size, max_size)
    } else {
        image
    };

    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.to_rgba8().into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_preview_shrinks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.png");
        image::RgbaImage::new(64, 32).save(&path).unwrap();

        let preview = load_preview(&path, 16).unwrap();
        assert_eq!(preview.size, [16, 8]);
    }

    #[test]
    fn test_load_preview_keeps_small() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.png");
        image::RgbaImage::new(4, 3).save(&path).unwrap();

        let preview = load_preview(&path, 1024).unwrap();
        assert_eq!(preview.size, [4, 3]);
    }

    #[test]
    fn test_load_preview_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"dummy").unwrap();

        assert!(load_preview(&path, 64).is_err());
    }
}
