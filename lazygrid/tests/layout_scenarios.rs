//! End-to-end layout passes against a fake host.
//!
//! The host measures text at 10px per character and 30px tall; anything
//! starting with `deco:` is a decoration with a configurable height.

use lazygrid::{
    DataTable, DragEvent, GridConfig, GridError, IntPoint, IntSize, ItemSlot, LayoutConstraints,
    Measurer, Point, ScrollSnapshot, TableBuilder, TableContent, VisibleWindow,
};

type Table = DataTable<String, String, String, String>;
type Content = TableContent<String, String, String, String>;

struct FakeHost {
    decoration_height: i32,
    ready: bool,
    calls: usize,
}

impl FakeHost {
    fn new() -> Self {
        Self {
            decoration_height: 200,
            ready: true,
            calls: 0,
        }
    }
}

impl Measurer<String> for FakeHost {
    fn measure(&mut self, node: &String, constraints: LayoutConstraints) -> Option<IntSize> {
        self.calls += 1;
        if !self.ready {
            return None;
        }
        let height = if node.starts_with("deco:") {
            self.decoration_height
        } else {
            30
        };
        Some(constraints.constrain_int(IntSize::new(node.chars().count() as i32 * 10, height)))
    }
}

fn render(v: &String) -> String {
    v.clone()
}

/// `columns` grid columns (row-header column included) and `rows` data rows.
fn sized_content(rows: usize, columns: usize) -> Content {
    TableBuilder::new()
        .column_headers((0..columns).map(|c| format!("c{c}")).collect(), render)
        .row_headers((0..rows).map(|r| format!("r{r}")).collect(), render)
        .cells(
            (0..rows)
                .map(|r| (0..columns).map(|c| format!("{r}.{c}")).collect())
                .collect(),
            render,
        )
        .build()
        .expect("valid content")
}

/// Column widths 50, 70, 80 (cumulative 0, 50, 120, 200).
fn stepped_content() -> Content {
    TableBuilder::new()
        .column_headers(
            vec!["aaaaa".into(), "bbbbbbb".into(), "cccccccc".into()],
            render,
        )
        .row_headers(vec!["r0".into(), "r1".into()], render)
        .cells(
            vec![
                vec!["1".into(), "2".into(), "3".into()],
                vec!["4".into(), "5".into(), "6".into()],
            ],
            render,
        )
        .build()
        .expect("valid content")
}

fn new_table(content: Content) -> Table {
    Table::new(GridConfig::default())
        .expect("valid config")
        .with_content(content)
}

fn viewport(width: f32, height: f32) -> LayoutConstraints {
    LayoutConstraints::loose(width, height)
}

fn drag(table: &mut Table, from: Point, delta: Point) {
    table.handle_drag(DragEvent::Start {
        position: from,
        time_ms: 0,
    });
    table.handle_drag(DragEvent::Move {
        position: from + delta,
        delta,
        time_ms: 16,
    });
}

#[test]
fn tall_table_at_rest_shows_five_rows() {
    let mut table = new_table(sized_content(40, 21));
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");

    let window = frame.window.expect("window");
    assert_eq!((window.first_row, window.last_row), (0, 4));
    assert_eq!(window.first_col, 0);
    assert_eq!(frame.items.len(), window.item_count());
    assert_eq!(frame.extent.height, 41.0 * 150.0);
    assert_eq!(frame.max_offset.y, 41.0 * 150.0 - 600.0);

    // Header row on top, then row r0.
    let header = frame.find(ItemSlot::ColumnHeader { col: 0 }).expect("header");
    assert_eq!(header.position, IntPoint::new(0, 0));
    assert_eq!(header.node, "c0");
    let row_header = frame.find(ItemSlot::RowHeader { row: 0 }).expect("row header");
    assert_eq!(row_header.position.y, 150);
    assert_eq!(row_header.size.height, 150);
}

#[test]
fn horizontal_window_follows_cumulative_widths() {
    let mut table = new_table(stepped_content());
    let mut host = FakeHost::new();
    let vp = viewport(100.0, 600.0);
    table.layout(vp, &mut host).expect("first layout");
    assert_eq!(table.column_widths().widths(), Some(&[50, 70, 80][..]));

    drag(&mut table, Point::new(50.0, 100.0), Point::new(-80.0, 0.0));
    let frame = table.layout(vp, &mut host).expect("layout");

    assert_eq!(frame.scroll.x, 80.0);
    let window = frame.window.expect("window");
    assert_eq!((window.first_col, window.last_col), (1, 2));

    let cell = frame.find(ItemSlot::Cell { row: 0, col: 0 }).expect("cell");
    assert_eq!(cell.position, IntPoint::new(50 - 80, 150));
    assert_eq!(cell.size, IntSize::new(70, 150));
    assert!(frame.find(ItemSlot::RowHeader { row: 0 }).is_none());
}

#[test]
fn placement_rounds_halves_up() {
    let mut table = new_table(stepped_content());
    let mut host = FakeHost::new();
    table.restore_scroll(ScrollSnapshot {
        horizontal: 80.5,
        vertical: 0.0,
    });
    let frame = table.layout(viewport(100.0, 600.0), &mut host).expect("layout");

    let first = frame.find(ItemSlot::ColumnHeader { col: 1 }).expect("col 1");
    assert_eq!(first.position.x, -30);
    let second = frame.find(ItemSlot::ColumnHeader { col: 2 }).expect("col 2");
    assert_eq!(second.position.x, 40);
}

#[test]
fn decorations_bracket_the_table() {
    let content = TableBuilder::new()
        .column_headers(vec!["h0".into(), "h1".into()], render)
        .row_headers(vec!["r0".into(), "r1".into()], render)
        .cells(
            vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
            render,
        )
        .top_content(|| "deco:top".to_string())
        .bottom_content(|| "deco:bottom".to_string())
        .build()
        .expect("valid content");
    let mut table = new_table(content);
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");

    let first = frame.items.first().expect("items");
    let last = frame.items.last().expect("items");
    assert_eq!(first.slot, ItemSlot::TopContent);
    assert_eq!(first.position, IntPoint::new(0, 0));
    assert_eq!(first.size.height, 200);
    assert_eq!(last.slot, ItemSlot::BottomContent);
    // 200 top + 3 grid rows of 150
    assert_eq!(last.position, IntPoint::new(0, 650));

    let header = frame.find(ItemSlot::ColumnHeader { col: 0 }).expect("header");
    assert_eq!(header.position.y, 200);
    assert_eq!(frame.extent.height, 200.0 + 450.0 + 200.0);
    assert_eq!(frame.max_offset.y, 250.0);

    // Scrolling 100px moves everything up by 100.
    drag(&mut table, Point::new(10.0, 300.0), Point::new(0.0, -100.0));
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    assert_eq!(frame.items[0].position.y, -100);
    let header = frame.find(ItemSlot::ColumnHeader { col: 0 }).expect("header");
    assert_eq!(header.position.y, 100);
}

#[test]
fn decoration_width_is_bounded_by_viewport() {
    let content = TableBuilder::new()
        .column_headers(vec!["h".into()], render)
        .row_headers(Vec::new(), render)
        .cells(Vec::new(), render)
        .top_content(|| format!("deco:{}", "x".repeat(100)))
        .build()
        .expect("valid content");
    let mut table = new_table(content);
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(300.0, 600.0), &mut host).expect("layout");
    let top = frame.find(ItemSlot::TopContent).expect("top");
    assert_eq!(top.size.width, 300);
}

#[test]
fn decoration_keeps_the_viewport_min_width() {
    let content = TableBuilder::new()
        .column_headers(vec!["h".into()], render)
        .row_headers(Vec::new(), render)
        .cells(Vec::new(), render)
        .top_content(|| "deco:x".to_string())
        .build()
        .expect("valid content");
    let mut table = new_table(content);
    let mut host = FakeHost::new();
    let tight_width = LayoutConstraints {
        min_width: 400.0,
        max_width: 400.0,
        min_height: 100.0,
        max_height: 600.0,
    };
    let frame = table.layout(tight_width, &mut host).expect("layout");
    let top = frame.find(ItemSlot::TopContent).expect("top");
    // 60px of text stretched to the required width; height stays natural.
    assert_eq!(top.size, IntSize::new(400, 200));
}

#[test]
fn zero_rows_places_only_the_header_row() {
    let mut table = new_table(sized_content(0, 3));
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");

    assert_eq!(
        frame.window,
        Some(VisibleWindow {
            first_row: 0,
            last_row: 0,
            first_col: 0,
            last_col: 2,
        })
    );
    assert_eq!(frame.items.len(), 3);
    assert!(
        frame
            .items
            .iter()
            .all(|item| matches!(item.slot, ItemSlot::ColumnHeader { .. }))
    );
}

#[test]
fn zero_columns_still_places_decorations() {
    let content = TableBuilder::new()
        .column_headers(Vec::new(), render)
        .row_headers(vec!["r0".into(), "r1".into()], render)
        .cells(vec![Vec::new(), Vec::new()], render)
        .top_content(|| "deco:top".to_string())
        .bottom_content(|| "deco:bottom".to_string())
        .build()
        .expect("valid content");
    let mut table = new_table(content);
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");

    assert_eq!(frame.window, None);
    let slots: Vec<_> = frame.items.iter().map(|item| item.slot).collect();
    assert_eq!(slots, vec![ItemSlot::TopContent, ItemSlot::BottomContent]);
}

#[test]
fn empty_row_headers_single_column_measures_zero() {
    let content = TableBuilder::new()
        .column_headers(vec![String::new()], render)
        .row_headers(Vec::new(), render)
        .cells(Vec::new(), render)
        .build()
        .expect("valid content");
    let representatives = content.longest_content_per_column();
    assert_eq!(representatives.len(), 1);

    let mut table = new_table(content);
    let mut host = FakeHost::new();
    table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    assert_eq!(table.column_widths().widths(), Some(&[0][..]));
}

#[test]
fn host_not_ready_renders_nothing_then_recovers() {
    let mut table = new_table(sized_content(5, 3));
    let mut host = FakeHost::new();
    host.ready = false;
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("no error");
    assert!(frame.is_empty());
    assert_eq!(frame.window, None);

    host.ready = true;
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    assert!(!frame.is_empty());
}

#[test]
fn widths_are_measured_once_per_content() {
    let mut table = new_table(sized_content(5, 3));
    let mut host = FakeHost::new();
    table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    let widths = table.column_widths().widths().map(<[i32]>::to_vec);
    let after_first = host.calls;

    table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    // Second pass only measures the placed items (5 grid rows x 3 columns),
    // not the columns again.
    let frame_items = 5 * 3;
    assert_eq!(host.calls - after_first, frame_items);
    assert_eq!(table.column_widths().widths().map(<[i32]>::to_vec), widths);
}

#[test]
fn layout_before_content_is_an_error() {
    let mut table = Table::new(GridConfig::default()).expect("valid config");
    let mut host = FakeHost::new();
    let err = table.layout(viewport(400.0, 600.0), &mut host).unwrap_err();
    assert!(matches!(err, GridError::Uninitialized(_)));
}

#[test]
fn custom_cell_height_from_config() {
    let config = GridConfig::from_json(r#"{ "cell_height": 100 }"#).expect("config");
    let mut table = Table::new(config)
        .expect("valid config")
        .with_content(sized_content(40, 4));
    let mut host = FakeHost::new();
    let frame = table.layout(viewport(400.0, 600.0), &mut host).expect("layout");
    let window = frame.window.expect("window");
    assert_eq!((window.first_row, window.last_row), (0, 6));
}
