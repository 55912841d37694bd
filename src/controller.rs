use crate::error::{RenameError, Severity, UndoError};
use crate::events::{
    HoverTarget, DESELECT_ALL, PREVIEW_DISMISS, PREVIEW_HOVER, RENAME_REQUEST, SELECT_ALL,
    UNDO_REQUEST,
};
use crate::listing::list_pdfs;
use crate::preview::{PdfPreviewer, POPUP_OFFSET};
use crate::rename::{rename_batch, NamingTemplate, RenameHistory, RenameRequest};
use crate::selection::SelectionTracker;
use crate::state::{AppState, StatusKind};
use crate::undo::undo_last_batch;
use crate::widgets::{preview_popup, to_image_buf};
use druid::commands::CLOSE_WINDOW;
use druid::widget::Controller;
use druid::{
    Data, Env, Event, EventCtx, Point, UpdateCtx, Widget, WindowConfig, WindowId, WindowLevel,
};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 選択順とリネーム履歴。プロセスを終了すると消える
#[derive(Debug, Default)]
pub struct Session {
    pub selection: SelectionTracker,
    pub history: RenameHistory,
}

/// 表示中のプレビュー。`path` は最後にホバーしたファイル（表示できなかった場合も含む）
#[derive(Default)]
struct PreviewPopup {
    window: Option<WindowId>,
    path: Option<PathBuf>,
}

/// 通知ダイアログ（イベントループを止めないよう別スレッドで表示）
pub fn show_notice(severity: Severity, title: &str, message: &str) {
    let level = match severity {
        Severity::Info => MessageLevel::Info,
        Severity::Warning => MessageLevel::Warning,
        Severity::Error => MessageLevel::Error,
    };
    let title = title.to_string();
    let message = message.to_string();
    std::thread::spawn(move || {
        MessageDialog::new()
            .set_title(&title)
            .set_description(&message)
            .set_buttons(MessageButtons::Ok)
            .set_level(level)
            .show();
    });
}

/// フォルダの PDF 一覧を読み直す。フォルダが無ければ一覧を空にする
pub fn reload_listing(data: &mut AppState) {
    match list_pdfs(Path::new(&data.folder)) {
        Some(names) => data.set_listing(names),
        None => data.clear_listing(),
    }
}

pub struct AppController {
    session: Session,
    previewer: PdfPreviewer,
    popup: PreviewPopup,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            session: Session::default(),
            previewer: PdfPreviewer::new(),
            popup: PreviewPopup::default(),
        }
    }

    fn select_all(&mut self, data: &mut AppState) {
        self.session.selection.select_all(data.files.len());
        data.set_all_selected(true);
    }

    fn deselect_all(&mut self, data: &mut AppState) {
        self.session.selection.deselect_all();
        data.set_all_selected(false);
    }

    fn rename(&mut self, data: &mut AppState) {
        let template = NamingTemplate::new(&data.part1, &data.part3, &data.part4);
        let order = self
            .session
            .selection
            .effective_order(&data.selected_indices());
        debug!(
            ?order,
            select_all = self.session.selection.is_select_all(),
            "rename requested"
        );
        let mut listing = data.listing();
        let folder = PathBuf::from(&data.folder);
        let request = RenameRequest {
            folder: &folder,
            template: &template,
            start_number: &data.start_number,
            order: &order,
        };

        let result = rename_batch(&request, &mut listing, &mut self.session.history);
        // 衝突で止まった場合も、変更済みの行は新しい名前にする
        data.apply_listing(&listing);

        match result {
            Ok(report) => {
                data.start_number = report.next_start.to_string();
                self.session.selection.finish_batch();
                data.set_all_selected(false);
                data.set_status(
                    StatusKind::Renamed,
                    format!("※ {} 個のPDFファイルの名前を変更しました！", report.renamed),
                );
            }
            Err(e) => {
                show_notice(e.severity(), e.title(), &e.to_string());
                if !matches!(e, RenameError::EmptySelection) {
                    data.set_status(StatusKind::Failed, e.to_string());
                }
            }
        }
    }

    fn undo(&mut self, data: &mut AppState) {
        let result = undo_last_batch(&mut self.session.history);
        if let Err(e @ UndoError::NothingToUndo) = &result {
            show_notice(e.severity(), e.title(), &e.to_string());
            return;
        }

        reload_listing(data);
        match result {
            Ok(report) => show_notice(
                Severity::Info,
                "完了",
                &format!("前回の変更を元に戻しました。（{} 件）", report.restored),
            ),
            Err(e) => show_notice(e.severity(), e.title(), &e.to_string()),
        }
        data.set_status(StatusKind::Undone, "※ 前回の名前変更を元に戻しました。");
    }

    fn show_preview(&mut self, ctx: &mut EventCtx, target: &HoverTarget, env: &Env) {
        if self.popup.path.as_deref() == Some(target.path.as_path()) {
            return;
        }
        self.hide_preview(ctx);
        self.popup.path = Some(target.path.clone());

        let Some(img) = self.previewer.render_first_page(&target.path) else {
            return;
        };
        let (width, height) = img.dimensions();
        let position = Point::new(
            target.screen_pos.x + POPUP_OFFSET.0,
            target.screen_pos.y + POPUP_OFFSET.1,
        );
        let config = WindowConfig::default()
            .show_titlebar(false)
            .resizable(false)
            .window_size((width as f64 + 4.0, height as f64 + 4.0))
            .set_position(position)
            .set_level(WindowLevel::Tooltip(ctx.window().clone()));
        let window = ctx.new_sub_window(config, preview_popup(to_image_buf(img)), (), env.clone());
        debug!(path = %target.path.display(), "preview shown");
        self.popup.window = Some(window);
    }

    fn hide_preview(&mut self, ctx: &mut EventCtx) {
        if let Some(window) = self.popup.window.take() {
            ctx.submit_command(CLOSE_WINDOW.to(window));
        }
        self.popup.path = None;
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Widget<AppState>> Controller<AppState, W> for AppController {
    fn event(
        &mut self,
        child: &mut W,
        ctx: &mut EventCtx,
        event: &Event,
        data: &mut AppState,
        env: &Env,
    ) {
        match event {
            Event::Command(cmd) if cmd.is(SELECT_ALL) => {
                self.select_all(data);
                ctx.set_handled();
                return;
            }
            Event::Command(cmd) if cmd.is(DESELECT_ALL) => {
                self.deselect_all(data);
                ctx.set_handled();
                return;
            }
            Event::Command(cmd) if cmd.is(RENAME_REQUEST) => {
                self.hide_preview(ctx);
                self.rename(data);
                ctx.set_handled();
                return;
            }
            Event::Command(cmd) if cmd.is(UNDO_REQUEST) => {
                self.hide_preview(ctx);
                self.undo(data);
                ctx.set_handled();
                return;
            }
            Event::Command(cmd) if cmd.is(PREVIEW_DISMISS) => {
                self.hide_preview(ctx);
                ctx.set_handled();
                return;
            }
            Event::Command(cmd) => {
                if let Some(target) = cmd.get(PREVIEW_HOVER) {
                    self.show_preview(ctx, target, env);
                    ctx.set_handled();
                    return;
                }
            }
            Event::WindowCloseRequested => self.hide_preview(ctx),
            _ => {}
        }
        child.event(ctx, event, data, env);
    }

    fn update(
        &mut self,
        child: &mut W,
        ctx: &mut UpdateCtx,
        old_data: &AppState,
        data: &AppState,
        env: &Env,
    ) {
        if !old_data.files.same(&data.files) {
            let old_selected = old_data.selected_indices();
            let selected = data.selected_indices();
            if old_selected != selected {
                self.session.selection.on_selection_changed(&selected);
            }
        }
        child.update(ctx, old_data, data, env);
    }
}
