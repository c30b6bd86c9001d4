//! Page geometry: the cover's aspect-locked rectangle and where each text
//! block sits inside it.
//!
//! Sizes in style records are CSS pixels on a page [`REFERENCE_PAGE_WIDTH`]
//! wide; everything scales with the actual page width. Blocks are spread
//! like a `justify-between` column: first block against the top padding,
//! last against the bottom padding, the middle one centred in between.

use egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::document::{LayoutOrder, PaperSize};

use super::{Block, CoverProjection};

/// Page width the stored pixel sizes are designed against
pub const REFERENCE_PAGE_WIDTH: f32 = 672.0;

/// Inner page padding in reference pixels
pub const PAGE_PADDING: f32 = 48.0;

pub const LINE_HEIGHT: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    StudentInfo,
    SchoolName,
}

/// Vertical order of the three blocks. The heading is always first.
pub fn block_order(order: LayoutOrder) -> [BlockKind; 3] {
    match order {
        LayoutOrder::Default => [BlockKind::Heading, BlockKind::StudentInfo, BlockKind::SchoolName],
        LayoutOrder::SchoolNameFirst => [BlockKind::Heading, BlockKind::SchoolName, BlockKind::StudentInfo],
    }
}

/// Largest rectangle with the paper's aspect ratio centred inside `available`
pub fn fit_page(available: Rect, paper: PaperSize) -> Rect {
    let aspect = paper.aspect_ratio();
    let mut size = vec2(available.width(), available.width() / aspect);
    if size.y > available.height() {
        size = vec2(available.height() * aspect, available.height());
    }
    Rect::from_center_size(available.center(), size.max(Vec2::ZERO))
}

/// A block with its position on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub rect: Rect,
}

/// Scale factor from reference pixels to page pixels
pub fn page_scale(page: Rect) -> f32 {
    page.width() / REFERENCE_PAGE_WIDTH
}

/// Width and height of a block in reference pixels
fn block_size(block: &Block) -> Vec2 {
    let line = |px: u32| px as f32 * LINE_HEIGHT;
    let inner = REFERENCE_PAGE_WIDTH - 2.0 * PAGE_PADDING;
    match block {
        Block::Heading { title, subject } => {
            let mut height = 2.0 * 16.0 + line(title.font_size_px);
            if let Some(subject) = subject {
                height += 8.0 + line(subject.font_size_px);
            }
            vec2(inner, height)
        }
        Block::StudentInfo {
            name,
            class_name,
            school_year,
        } => {
            let caption = line(20);
            let row = line(18) + line(class_name.font_size_px.max(school_year.font_size_px));
            let height = 2.0 * 24.0 + caption + line(name.font_size_px) + 16.0 + row;
            vec2(448.0f32.min(inner), height)
        }
        Block::SchoolName { school_name } => vec2(inner, 2.0 * 8.0 + line(school_name.font_size_px)),
    }
}

/// Place the projection's blocks on `page`.
pub fn arrange(projection: &CoverProjection, page: Rect) -> Vec<PlacedBlock> {
    let scale = page_scale(page);
    let padding = PAGE_PADDING * scale;
    let top = page.top() + padding;
    let bottom = page.bottom() - padding;

    let sizes: Vec<Vec2> = projection.blocks.iter().map(|b| block_size(b) * scale).collect();
    let total: f32 = sizes.iter().map(|s| s.y).sum();

    let mut tops = Vec::with_capacity(sizes.len());
    if total >= bottom - top || sizes.len() < 2 {
        // not enough room to spread out: stack from the top
        let mut y = top;
        for size in &sizes {
            tops.push(y);
            y += size.y;
        }
    } else {
        let gap = (bottom - top - total) / (sizes.len() - 1) as f32;
        let mut y = top;
        for size in &sizes {
            tops.push(y);
            y += size.y + gap;
        }
    }

    projection
        .blocks
        .iter()
        .zip(sizes)
        .zip(tops)
        .map(|((block, size), y)| PlacedBlock {
            kind: block.kind(),
            rect: Rect::from_min_size(pos2(page.center().x - size.x / 2.0, y), size),
        })
        .collect()
}

/// Anchor for a line of text centred horizontally in `rect` at `y`
pub fn centered_line(rect: Rect, y: f32) -> Pos2 {
    pos2(rect.center().x, y)
}
