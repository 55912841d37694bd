use crate::listing::is_pdf_name;
use anyhow::{anyhow, Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// 1ページ目をラスタライズするときの拡大率
pub const PREVIEW_ZOOM: f32 = 2.0;
/// ポップアップに表示する画像の幅（px）
pub const PREVIEW_WIDTH: u32 = 900;
/// マウス位置からのポップアップのずれ
pub const POPUP_OFFSET: (f64, f64) = (20.0, 10.0);

/// 幅を `width` に合わせ、縦横比を保って拡大縮小する
pub fn scale_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || width == 0 {
        return img.clone();
    }
    let ratio = width as f64 / w as f64;
    let height = ((h as f64 * ratio) as u32).max(1);
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// PDF の1ページ目をプレビュー画像にする。
///
/// pdfium は最初のホバー時にバインドし、以降は使い回す。
/// バインドに失敗した場合はこのセッション中プレビューを出さない。
pub struct PdfPreviewer {
    pdfium: Option<Pdfium>,
    bind_failed: bool,
    zoom: f32,
    width: u32,
}

impl PdfPreviewer {
    pub fn new() -> Self {
        Self {
            pdfium: None,
            bind_failed: false,
            zoom: PREVIEW_ZOOM,
            width: PREVIEW_WIDTH,
        }
    }

    fn pdfium(&mut self) -> Option<&Pdfium> {
        if self.pdfium.is_none() && !self.bind_failed {
            let local = Pdfium::pdfium_platform_library_name_at_path("./");
            match Pdfium::bind_to_library(&local).or_else(|_| Pdfium::bind_to_system_library()) {
                Ok(bindings) => self.pdfium = Some(Pdfium::new(bindings)),
                Err(e) => {
                    debug!(error = ?e, "pdfium is not available, previews disabled");
                    self.bind_failed = true;
                }
            }
        }
        self.pdfium.as_ref()
    }

    /// 失敗した場合（壊れたファイル・PDF 以外・pdfium なし）は `None`
    pub fn render_first_page(&mut self, path: &Path) -> Option<RgbaImage> {
        let is_pdf = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(is_pdf_name)
            .unwrap_or(false);
        if !path.is_file() || !is_pdf {
            return None;
        }

        let zoom = self.zoom;
        let width = self.width;
        let pdfium = self.pdfium()?;
        match rasterize_first_page(pdfium, path, zoom) {
            Ok(page) => Some(scale_to_width(&page, width)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "preview failed");
                None
            }
        }
    }
}

impl Default for PdfPreviewer {
    fn default() -> Self {
        Self::new()
    }
}

fn rasterize_first_page(pdfium: &Pdfium, path: &Path, zoom: f32) -> Result<RgbaImage> {
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| anyhow!("failed to open pdf: {e:?}"))?;
    let page = document
        .pages()
        .first()
        .map_err(|e| anyhow!("pdf has no first page: {e:?}"))?;
    let bitmap = page
        .render_with_config(&PdfRenderConfig::new().scale_page_by_factor(zoom))
        .map_err(|e| anyhow!("failed to render page: {e:?}"))?;

    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
        .context("bitmap size does not match its pixel buffer")
}
