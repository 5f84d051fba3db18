//! Column width measurement.
//!
//! Widths come from one off-screen pass over the representative content of
//! every column (see [`TableContent::longest_content_per_column`]). The
//! result is cached against the content's [`ContentId`] and reused by every
//! layout pass until different content shows up or [`ColumnWidths::invalidate`]
//! is called.

use std::fmt::Display;

use crate::constraints::LayoutConstraints;
use crate::content::{ContentId, TableContent};
use crate::primitives::IntSize;

/// The host's measuring primitive.
///
/// Given a render output and constraints, report the natural size of the
/// output. Return `None` when the host cannot measure yet (e.g. its text
/// engine is still loading fonts); the engine will retry on a later pass.
pub trait Measurer<R> {
    fn measure(&mut self, node: &R, constraints: LayoutConstraints) -> Option<IntSize>;
}

impl<R, F> Measurer<R> for F
where
    F: FnMut(&R, LayoutConstraints) -> Option<IntSize>,
{
    fn measure(&mut self, node: &R, constraints: LayoutConstraints) -> Option<IntSize> {
        self(node, constraints)
    }
}

#[derive(Debug, Default)]
enum MeasureState {
    #[default]
    Pending,
    Measured {
        content: ContentId,
        widths: Vec<i32>,
        /// Running sum of `widths`, starting at 0; `widths.len() + 1` entries.
        cumulative: Vec<f32>,
    },
}

/// Cached per-column widths for one piece of content.
#[derive(Debug, Default)]
pub struct ColumnWidths {
    state: MeasureState,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether widths are cached for this content.
    pub fn is_measured_for(&self, content: ContentId) -> bool {
        matches!(&self.state, MeasureState::Measured { content: cached, .. } if *cached == content)
    }

    /// Measured widths, `None` while measurement is pending.
    pub fn widths(&self) -> Option<&[i32]> {
        match &self.state {
            MeasureState::Measured { widths, .. } => Some(widths),
            MeasureState::Pending => None,
        }
    }

    /// Cumulative left edges (`cumulative[i]` = x of column `i`), plus the
    /// final right edge.
    pub fn cumulative(&self) -> Option<&[f32]> {
        match &self.state {
            MeasureState::Measured { cumulative, .. } => Some(cumulative),
            MeasureState::Pending => None,
        }
    }

    /// Total width of all columns.
    pub fn total_width(&self) -> f32 {
        self.cumulative()
            .and_then(|c| c.last().copied())
            .unwrap_or(0.0)
    }

    /// Drop cached widths; the next `ensure_measured` measures again.
    pub fn invalidate(&mut self) {
        self.state = MeasureState::Pending;
    }

    /// Measure the content's columns unless widths for it are already cached.
    ///
    /// Returns `true` when widths are available afterwards.
    pub fn ensure_measured<T, K, S, R, M>(
        &mut self,
        content: &TableContent<T, K, S, R>,
        host: &mut M,
    ) -> bool
    where
        T: Display,
        K: Display,
        S: Display,
        M: Measurer<R> + ?Sized,
    {
        if self.is_measured_for(content.id()) {
            return true;
        }

        let representatives = content.longest_content_per_column();
        let mut widths = Vec::with_capacity(representatives.len());
        for (col, representative) in representatives.iter().enumerate() {
            let node = content.render_representative(representative);
            let Some(size) = host.measure(&node, LayoutConstraints::UNBOUNDED) else {
                tracing::warn!(column = col, "host could not measure column yet");
                self.state = MeasureState::Pending;
                return false;
            };
            widths.push(size.width.max(0));
        }

        let cumulative = cumulative_widths(&widths);
        tracing::debug!(
            content = content.id().raw(),
            columns = widths.len(),
            total_width = cumulative.last().copied().unwrap_or(0.0),
            "measured column widths"
        );
        self.state = MeasureState::Measured {
            content: content.id(),
            widths,
            cumulative,
        };
        true
    }
}

/// Prefix sums of the widths, starting at 0.
pub fn cumulative_widths(widths: &[i32]) -> Vec<f32> {
    let mut cumulative = Vec::with_capacity(widths.len() + 1);
    let mut x = 0.0f32;
    cumulative.push(x);
    for &w in widths {
        x += w as f32;
        cumulative.push(x);
    }
    cumulative
}
