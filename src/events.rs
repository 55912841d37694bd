use druid::{Point, Selector};
use std::path::PathBuf;

// ボタン・一覧からコントローラへのコマンド
pub const SELECT_ALL: Selector<()> = Selector::new("select_all");
pub const DESELECT_ALL: Selector<()> = Selector::new("deselect_all");
pub const RENAME_REQUEST: Selector<()> = Selector::new("rename_request");
pub const UNDO_REQUEST: Selector<()> = Selector::new("undo_request");
pub const PREVIEW_HOVER: Selector<HoverTarget> = Selector::new("preview_hover");
pub const PREVIEW_DISMISS: Selector<()> = Selector::new("preview_dismiss");

/// マウスが乗っているファイルと、スクリーン座標でのマウス位置
#[derive(Debug, Clone)]
pub struct HoverTarget {
    pub path: PathBuf,
    pub screen_pos: Point,
}
