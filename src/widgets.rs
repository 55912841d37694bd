use crate::events::{HoverTarget, PREVIEW_DISMISS, PREVIEW_HOVER};
use crate::state::FileEntry;
use druid::piet::{Color, ImageFormat};
use druid::widget::{Controller, Image, Painter};
use druid::{
    Env, Event, EventCtx, ImageBuf, LifeCycle, LifeCycleCtx, MouseButton, RenderContext, Widget,
    WidgetExt,
};
use image::RgbaImage;
use std::path::PathBuf;

const SELECTED_BG: Color = Color::rgb8(0x99, 0xcc, 0xff);

/// 選択中の行の背景
pub fn row_background() -> Painter<FileEntry> {
    Painter::new(|ctx, data: &FileEntry, _env| {
        if data.selected {
            let rect = ctx.size().to_rect();
            ctx.fill(rect, &SELECTED_BG);
        }
    })
}

/// 行クリックで選択を切り替え、マウス移動でプレビューを要求する
pub struct FileRowController;

impl<W: Widget<FileEntry>> Controller<FileEntry, W> for FileRowController {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut FileEntry,
        env: &Env,
    ) {
        match event {
            Event::MouseDown(mouse) if mouse.button == MouseButton::Left => {
                data.selected = !data.selected;
                ctx.request_paint();
                ctx.set_handled();
                return;
            }
            Event::MouseMove(mouse) => {
                let target = HoverTarget {
                    path: PathBuf::from(&data.path),
                    screen_pos: ctx.to_screen(mouse.pos),
                };
                ctx.submit_command(PREVIEW_HOVER.with(target));
            }
            _ => {}
        }
        child.event(ctx, event, data, env);
    }
}

/// 一覧からマウスが外れたらプレビューを閉じる
pub struct DismissPreviewOnLeave;

impl<T, W: Widget<T>> Controller<T, W> for DismissPreviewOnLeave {
    fn lifecycle(
        &mut self,
        child: &mut W,
        ctx: &mut LifeCycleCtx,
        event: &LifeCycle,
        data: &T,
        env: &Env,
    ) {
        if let LifeCycle::HotChanged(false) = event {
            ctx.submit_command(PREVIEW_DISMISS);
        }
        child.lifecycle(ctx, event, data, env);
    }
}

pub fn to_image_buf(img: RgbaImage) -> ImageBuf {
    let (width, height) = img.dimensions();
    ImageBuf::from_raw(
        img.into_raw(),
        ImageFormat::RgbaSeparate,
        width as usize,
        height as usize,
    )
}

/// ポップアップの中身（白背景・枠線付きの画像）
pub fn preview_popup(buf: ImageBuf) -> impl Widget<()> {
    Image::new(buf)
        .border(Color::BLACK, 2.0)
        .background(Color::WHITE)
}
