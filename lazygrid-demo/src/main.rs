//! lazygrid demo: a headless host for the data-table layout engine.
//!
//! Builds a 40 × 21 sample table with text decorations above and below,
//! replays a scripted gesture session against it and prints one JSON line
//! per rendered frame.
//!
//! ```text
//! lazygrid-demo [config.json]
//! RUST_LOG=lazygrid=debug lazygrid-demo
//! ```

mod text;

use std::time::Duration;

use anyhow::{Context, Result};
use lazygrid::{
    Axis, AxisPhase, DataTable, DragEvent, GridConfig, GridFrame, IntPoint, ItemSlot,
    LayoutConstraints, Point, TableBuilder, TableContent, VisibleWindow,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::text::{TextBlock, TextMeasurer};

const ROW_COUNT: usize = 40;
const COLUMN_COUNT: usize = 21;
const VIEWPORT_WIDTH: f32 = 412.0;
const VIEWPORT_HEIGHT: f32 = 860.0;
const FRAME: Duration = Duration::from_millis(16);

type Table = DataTable<String, String, String, TextBlock>;

/// One printed frame.
#[derive(Serialize)]
struct FrameSummary<'a> {
    step: &'a str,
    frame: usize,
    scroll: Point,
    max_offset: Point,
    window: Option<VisibleWindow>,
    items: usize,
    top_left: Option<(ItemSlot, IntPoint, &'a str)>,
    vertical: AxisPhase,
    horizontal: AxisPhase,
}

struct Session {
    table: Table,
    host: TextMeasurer,
    viewport: LayoutConstraints,
    frame: usize,
    clock_ms: u64,
}

impl Session {
    fn new(table: Table) -> Self {
        Self {
            table,
            host: TextMeasurer::default(),
            viewport: LayoutConstraints::loose(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            frame: 0,
            clock_ms: 0,
        }
    }

    fn render(&mut self, step: &str) -> Result<()> {
        let frame = self
            .table
            .layout(self.viewport, &mut self.host)
            .context("layout pass failed")?;
        self.print(step, &frame)?;
        self.frame += 1;
        Ok(())
    }

    fn print(&self, step: &str, frame: &GridFrame<TextBlock>) -> Result<()> {
        let top_left = frame
            .items
            .iter()
            .filter(|item| !matches!(item.slot, ItemSlot::TopContent | ItemSlot::BottomContent))
            .min_by_key(|item| (item.position.y, item.position.x))
            .map(|item| (item.slot, item.position, item.node.title()));
        let scroll = self.table.scroll();
        let summary = FrameSummary {
            step,
            frame: self.frame,
            scroll: frame.scroll,
            max_offset: frame.max_offset,
            window: frame.window,
            items: frame.items.len(),
            top_left,
            vertical: scroll.phase(Axis::Vertical),
            horizontal: scroll.phase(Axis::Horizontal),
        };
        println!("{}", serde_json::to_string(&summary)?);
        Ok(())
    }

    /// Press, move in `steps` increments of `delta` one frame apart, then
    /// release (or cancel).
    fn swipe(
        &mut self,
        step: &str,
        from: Point,
        delta: Point,
        steps: usize,
        cancel: bool,
    ) -> Result<()> {
        self.table.handle_drag(DragEvent::Start {
            position: from,
            time_ms: self.clock_ms,
        });
        let mut position = from;
        for _ in 0..steps {
            self.clock_ms += FRAME.as_millis() as u64;
            position = position + delta;
            self.table.handle_drag(DragEvent::Move {
                position,
                delta,
                time_ms: self.clock_ms,
            });
            self.render(step)?;
        }
        let release = if cancel {
            DragEvent::Cancel
        } else {
            DragEvent::End {
                time_ms: self.clock_ms,
            }
        };
        self.table.handle_drag(release);
        Ok(())
    }

    /// Tick animations until everything is at rest.
    fn settle(&mut self, step: &str) -> Result<()> {
        while self.table.tick(FRAME) {
            self.clock_ms += FRAME.as_millis() as u64;
            self.render(step)?;
        }
        Ok(())
    }
}

fn filler_line(i: usize, region: &str) -> String {
    format!("This is a long random line of text #{i} to test {region} content scrolling behavior.")
}

fn sample_content() -> Result<TableContent<String, String, String, TextBlock>> {
    let column_headers = (1..=COLUMN_COUNT).map(|i| format!("column{i}")).collect();
    let row_headers = (1..=ROW_COUNT).map(|i| format!("row{i}")).collect();
    let cells = (1..=ROW_COUNT)
        .map(|r| (1..=COLUMN_COUNT).map(|c| format!("Cell{r}{c}")).collect())
        .collect();

    let content = TableBuilder::new()
        .column_headers(column_headers, |v: &String| TextBlock::label(v.as_str()))
        .row_headers(row_headers, |v: &String| TextBlock::label(v.as_str()))
        .cells(cells, |v: &String| TextBlock::label(v.as_str()))
        .top_content(|| {
            let mut lines = vec!["Top Content Above Data Table".to_string()];
            lines.push((0..20).map(|i| format!("Item #{i}")).collect::<Vec<_>>().join("  "));
            lines.extend((0..10).map(|i| filler_line(i, "top")));
            lines.push("#### DATA TABLE ###".to_string());
            TextBlock::paragraph(lines)
        })
        .bottom_content(|| {
            let mut lines = vec!["Bottom Content Below Data Table".to_string()];
            lines.extend((0..10).map(|i| filler_line(i, "bottom")));
            TextBlock::paragraph(lines)
        })
        .build()?;
    Ok(content)
}

fn load_config() -> Result<GridConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {path}"))?;
            GridConfig::from_json(&json).with_context(|| format!("invalid config {path}"))
        }
        None => Ok(GridConfig::default()),
    }
}

fn main() -> Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    tracing::info!(?config, "starting lazygrid demo");

    let table = Table::new(config)?.with_content(sample_content()?);
    let mut session = Session::new(table);
    session.render("initial")?;

    // Flick up through the top decoration into the table.
    session.swipe("flick-up", Point::new(200.0, 700.0), Point::new(0.0, -90.0), 5, false)?;
    session.settle("fling")?;

    // Scroll columns from inside the table body.
    session.swipe("scroll-columns", Point::new(300.0, 400.0), Point::new(-60.0, 4.0), 4, false)?;
    session.settle("column-fling")?;

    // Back to the top, then pull past it and let go.
    session.table.restore_scroll(lazygrid::ScrollSnapshot {
        horizontal: session.table.scroll_snapshot().horizontal,
        vertical: 0.0,
    });
    session.render("jump-to-top")?;
    session.swipe("pull-down", Point::new(200.0, 100.0), Point::new(0.0, 120.0), 4, false)?;
    session.settle("spring-back")?;

    // A horizontal drag over the top decoration leaves the columns alone.
    session.swipe("decoration-drag", Point::new(300.0, 20.0), Point::new(-80.0, 0.0), 3, true)?;
    session.settle("cancelled")?;

    let snapshot = session.table.scroll_snapshot();
    println!("{}", serde_json::to_string(&snapshot)?);
    tracing::info!(
        frames = session.frame,
        measured = session.host.measured,
        "demo finished"
    );
    Ok(())
}
