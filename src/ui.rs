use crate::controller::{reload_listing, AppController};
use crate::events::{DESELECT_ALL, RENAME_REQUEST, SELECT_ALL, UNDO_REQUEST};
use crate::state::{AppState, FileEntry, StatusKind};
use crate::widgets::{row_background, DismissPreviewOnLeave, FileRowController};
use druid::piet::Color;
use druid::widget::{Button, CrossAxisAlignment, Flex, Label, List, Scroll, TextBox};
use druid::{Env, FontDescriptor, FontFamily, FontWeight, Widget, WidgetExt};

const BACKGROUND: Color = Color::rgb8(0xcc, 0xe6, 0xff);
const LIST_BACKGROUND: Color = Color::rgb8(0xe6, 0xf2, 0xff);
const TEXT: Color = Color::rgb8(0x10, 0x10, 0x10);

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Neutral => TEXT,
        StatusKind::Renamed => Color::rgb8(0x15, 0x65, 0xc0),
        StatusKind::Undone => Color::rgb8(0x00, 0x79, 0x6b),
        StatusKind::Failed => Color::rgb8(0xd3, 0x2f, 0x2f),
    }
}

fn bold(size: f64) -> FontDescriptor {
    FontDescriptor::new(FontFamily::SYSTEM_UI)
        .with_size(size)
        .with_weight(FontWeight::BOLD)
}

fn template_row(
    label: &str,
    lens: impl druid::Lens<AppState, String> + 'static,
) -> impl Widget<AppState> {
    Flex::column()
        .with_child(Label::new(label).with_text_color(TEXT))
        .with_spacer(2.0)
        .with_child(TextBox::new().lens(lens).expand_width().fix_height(28.0))
        .cross_axis_alignment(CrossAxisAlignment::Start)
}

pub fn build_ui() -> impl Widget<AppState> {
    // フォルダ選択
    let folder_row = Flex::row()
        .with_flex_child(TextBox::new().lens(AppState::folder).expand_width().fix_height(30.0), 1.0)
        .with_spacer(5.0)
        .with_child(Button::new("※ 選択...").on_click(|_ctx, data: &mut AppState, _env| {
            if let Some(path) = rfd::FileDialog::new()
                .set_title("※ PDFフォルダを選択してください")
                .pick_folder()
            {
                data.folder = path.to_string_lossy().to_string();
                reload_listing(data);
            }
        }))
        .with_spacer(5.0)
        .with_child(Button::new("再読込").on_click(|_ctx, data: &mut AppState, _env| {
            reload_listing(data);
        }));

    let select_row = Flex::row()
        .with_flex_child(
            Button::new("※ すべて選択")
                .on_click(|ctx, _data: &mut AppState, _env| ctx.submit_command(SELECT_ALL))
                .expand_width(),
            1.0,
        )
        .with_spacer(10.0)
        .with_flex_child(
            Button::new("※ 選択解除")
                .on_click(|ctx, _data: &mut AppState, _env| ctx.submit_command(DESELECT_ALL))
                .expand_width(),
            1.0,
        );

    let file_list = List::new(|| {
        Label::new(|item: &FileEntry, _env: &Env| item.name.clone())
            .with_text_color(TEXT)
            .padding((6.0, 2.0))
            .expand_width()
            .background(row_background())
            .controller(FileRowController)
    })
    .lens(AppState::files);

    let list_panel = Scroll::new(file_list)
        .vertical()
        .background(LIST_BACKGROUND)
        .fix_height(240.0)
        .controller(DismissPreviewOnLeave);

    let count_row = Flex::row()
        .with_child(Label::new("※ 選択中のファイル数: ").with_font(bold(13.0)).with_text_color(TEXT))
        .with_child(
            Label::new(|data: &AppState, _env: &Env| data.selected_count().to_string())
                .with_font(bold(20.0))
                .with_text_color(Color::rgb8(0xd3, 0x2f, 0x2f)),
        );

    let hint = Label::new("💡 個別に選択した場合、選択順が名前変更の順番になります。")
        .with_text_color(Color::rgb8(0x00, 0x4d, 0x99));

    let template_panel = Flex::column()
        .with_child(Label::new("※ 名前フォーマット設定").with_font(bold(13.0)).with_text_color(TEXT))
        .with_spacer(6.0)
        .with_child(template_row("※ パート1（例: 3301）:", AppState::part1))
        .with_spacer(4.0)
        .with_child(template_row("※ 開始番号（例: 100011）:", AppState::start_number))
        .with_spacer(4.0)
        .with_child(template_row("※ パート3（例: A0）:", AppState::part3))
        .with_spacer(4.0)
        .with_child(template_row("※ パート4（例: N0）:", AppState::part4))
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .padding(10.0)
        .border(Color::grey(0.6), 1.0);

    let action_row = Flex::row()
        .with_flex_child(
            Button::new("※ 選択したPDFのみ名前を変更")
                .on_click(|ctx, _data: &mut AppState, _env| ctx.submit_command(RENAME_REQUEST))
                .expand_width()
                .fix_height(40.0),
            1.0,
        )
        .with_spacer(10.0)
        .with_flex_child(
            Button::new("※ 元に戻す (Undo)")
                .on_click(|ctx, _data: &mut AppState, _env| ctx.submit_command(UNDO_REQUEST))
                .expand_width()
                .fix_height(40.0),
            1.0,
        );

    let status = Label::new(|data: &AppState, _env: &Env| data.status_message.clone())
        .with_font(bold(14.0))
        .env_scope(|env, data: &AppState| {
            env.set(druid::theme::TEXT_COLOR, status_color(data.status_kind))
        });

    Flex::column()
        .with_child(Label::new("※ PDFフォルダを選択:").with_font(bold(13.0)).with_text_color(TEXT))
        .with_spacer(4.0)
        .with_child(folder_row)
        .with_spacer(8.0)
        .with_child(select_row)
        .with_spacer(10.0)
        .with_child(Label::new("※ PDFファイル一覧（複数選択可）:").with_font(bold(13.0)).with_text_color(TEXT))
        .with_spacer(4.0)
        .with_child(list_panel)
        .with_spacer(6.0)
        .with_child(count_row)
        .with_child(hint)
        .with_spacer(8.0)
        .with_child(template_panel)
        .with_spacer(10.0)
        .with_child(action_row)
        .with_spacer(10.0)
        .with_child(status)
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .padding(10.0)
        .background(BACKGROUND)
        .expand()
        .controller(AppController::new())
}
