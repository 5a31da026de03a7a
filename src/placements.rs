//! Builtin placement table and alignment rules.
//!
//! A placement names a pair of anchor points: the point on the popup that is
//! pinned to a point on the target. Offsets are applied afterwards. The
//! table mirrors the classic dropdown placements: popups open 4px away from
//! the trigger, above or below it, flush left, centered or flush right.

use std::fmt;

use popdown_ui::{Bounds, Point, Size};
use serde::{Deserialize, Serialize};

/// Gap between trigger and popup for the builtin placements.
const PLACEMENT_GAP: f32 = 4.0;

/// Named placement identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    TopLeft,
    TopCenter,
    TopRight,
    #[default]
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Position along one axis of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    Center,
    End,
}

impl Edge {
    fn resolve(self, start: f32, extent: f32) -> f32 {
        match self {
            Edge::Start => start,
            Edge::Center => start + extent / 2.0,
            Edge::End => start + extent,
        }
    }

    fn flipped(self) -> Edge {
        match self {
            Edge::Start => Edge::End,
            Edge::Center => Edge::Center,
            Edge::End => Edge::Start,
        }
    }
}

/// A point on a box, written as two letters: vertical (`t`/`c`/`b`) then
/// horizontal (`l`/`c`/`r`), e.g. `"tl"` for the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnchorPoint {
    pub vertical: Edge,
    pub horizontal: Edge,
}

impl AnchorPoint {
    pub const fn new(vertical: Edge, horizontal: Edge) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Location of this point on `bounds`.
    pub fn on(&self, bounds: Bounds) -> Point {
        Point::new(
            self.horizontal.resolve(bounds.x, bounds.width),
            self.vertical.resolve(bounds.y, bounds.height),
        )
    }

    fn flipped_vertical(self) -> Self {
        Self::new(self.vertical.flipped(), self.horizontal)
    }

    fn flipped_horizontal(self) -> Self {
        Self::new(self.vertical, self.horizontal.flipped())
    }
}

impl TryFrom<String> for AnchorPoint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let (Some(v), Some(h), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("anchor point must be two letters, got '{value}'"));
        };
        let vertical = match v {
            't' => Edge::Start,
            'c' => Edge::Center,
            'b' => Edge::End,
            _ => return Err(format!("invalid vertical anchor '{v}' in '{value}'")),
        };
        let horizontal = match h {
            'l' => Edge::Start,
            'c' => Edge::Center,
            'r' => Edge::End,
            _ => return Err(format!("invalid horizontal anchor '{h}' in '{value}'")),
        };
        Ok(Self::new(vertical, horizontal))
    }
}

impl From<AnchorPoint> for String {
    fn from(point: AnchorPoint) -> Self {
        point.to_string()
    }
}

impl fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            Edge::Start => 't',
            Edge::Center => 'c',
            Edge::End => 'b',
        };
        let h = match self.horizontal {
            Edge::Start => 'l',
            Edge::Center => 'c',
            Edge::End => 'r',
        };
        write!(f, "{v}{h}")
    }
}

/// Whether the engine may flip a popup that would leave the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overflow {
    pub adjust_x: bool,
    pub adjust_y: bool,
}

impl Overflow {
    pub const AUTO_ADJUST: Overflow = Overflow {
        adjust_x: true,
        adjust_y: true,
    };
}

/// Fine-grained alignment override. Set fields replace the placement's.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Align {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<[AnchorPoint; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<(f32, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_offset: Option<(f32, f32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
}

/// Fully resolved alignment rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignSpec {
    /// `[popup point, target point]`
    pub points: [AnchorPoint; 2],
    pub offset: (f32, f32),
    pub target_offset: (f32, f32),
    pub overflow: Overflow,
}

impl AlignSpec {
    const fn builtin(popup: AnchorPoint, target: AnchorPoint, offset_y: f32) -> Self {
        Self {
            points: [popup, target],
            offset: (0.0, offset_y),
            target_offset: (0.0, 0.0),
            overflow: Overflow::AUTO_ADJUST,
        }
    }

    /// This rule with `align` layered on top.
    pub fn merged(&self, align: &Align) -> AlignSpec {
        AlignSpec {
            points: align.points.unwrap_or(self.points),
            offset: align.offset.unwrap_or(self.offset),
            target_offset: align.target_offset.unwrap_or(self.target_offset),
            overflow: align.overflow.unwrap_or(self.overflow),
        }
    }

    /// Top-left corner of a popup of `popup` size aligned to `target`.
    pub fn position(&self, target: Bounds, popup: Size) -> Point {
        let [popup_point, target_point] = self.points;
        let anchor = target_point.on(target);
        let local = popup_point.on(Bounds::new(0.0, 0.0, popup.width, popup.height));
        Point::new(
            anchor.x - local.x + self.offset.0 - self.target_offset.0,
            anchor.y - local.y + self.offset.1 - self.target_offset.1,
        )
    }

    /// Like [`position`](Self::position), but flips the rule along an axis
    /// when the popup would leave `viewport` and the flipped rule fits.
    pub fn position_within(&self, target: Bounds, popup: Size, viewport: Size) -> Point {
        let mut spec = *self;
        let mut at = spec.position(target, popup);

        if spec.overflow.adjust_y && overflows_y(at, popup, viewport) {
            let flipped = spec.flipped_vertical();
            let flipped_at = flipped.position(target, popup);
            if !overflows_y(flipped_at, popup, viewport) {
                log::trace!("flipping popup vertically to stay in viewport");
                spec = flipped;
                at = flipped_at;
            }
        }
        if spec.overflow.adjust_x && overflows_x(at, popup, viewport) {
            let flipped = spec.flipped_horizontal();
            let flipped_at = flipped.position(target, popup);
            if !overflows_x(flipped_at, popup, viewport) {
                log::trace!("flipping popup horizontally to stay in viewport");
                at = flipped_at;
            }
        }
        at
    }

    fn flipped_vertical(&self) -> AlignSpec {
        AlignSpec {
            points: self.points.map(AnchorPoint::flipped_vertical),
            offset: (self.offset.0, -self.offset.1),
            target_offset: (self.target_offset.0, -self.target_offset.1),
            overflow: self.overflow,
        }
    }

    fn flipped_horizontal(&self) -> AlignSpec {
        AlignSpec {
            points: self.points.map(AnchorPoint::flipped_horizontal),
            offset: (-self.offset.0, self.offset.1),
            target_offset: (-self.target_offset.0, self.target_offset.1),
            overflow: self.overflow,
        }
    }
}

fn overflows_y(at: Point, popup: Size, viewport: Size) -> bool {
    at.y < 0.0 || at.y + popup.height > viewport.height
}

fn overflows_x(at: Point, popup: Size, viewport: Size) -> bool {
    at.x < 0.0 || at.x + popup.width > viewport.width
}

/// Placement table handed to the positioning engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Placements {
    entries: Vec<(Placement, AlignSpec)>,
}

impl Placements {
    /// The dropdown's builtin table.
    pub fn builtin() -> Self {
        use Edge::{Center, End, Start};
        let top = |h| AnchorPoint::new(Start, h);
        let bottom = |h| AnchorPoint::new(End, h);

        Self {
            entries: vec![
                (
                    Placement::TopLeft,
                    AlignSpec::builtin(bottom(Start), top(Start), -PLACEMENT_GAP),
                ),
                (
                    Placement::TopCenter,
                    AlignSpec::builtin(bottom(Center), top(Center), -PLACEMENT_GAP),
                ),
                (
                    Placement::TopRight,
                    AlignSpec::builtin(bottom(End), top(End), -PLACEMENT_GAP),
                ),
                (
                    Placement::BottomLeft,
                    AlignSpec::builtin(top(Start), bottom(Start), PLACEMENT_GAP),
                ),
                (
                    Placement::BottomCenter,
                    AlignSpec::builtin(top(Center), bottom(Center), PLACEMENT_GAP),
                ),
                (
                    Placement::BottomRight,
                    AlignSpec::builtin(top(End), bottom(End), PLACEMENT_GAP),
                ),
            ],
        }
    }

    pub fn get(&self, placement: Placement) -> Option<&AlignSpec> {
        self.entries
            .iter()
            .find(|(p, _)| *p == placement)
            .map(|(_, spec)| spec)
    }

    /// Rule for `placement` with the caller's `align` override applied.
    ///
    /// Placements missing from the table fall back to a bare `align`, or to
    /// top-left on bottom-left with no offset.
    pub fn resolve(&self, placement: Placement, align: Option<&Align>) -> AlignSpec {
        let base = self.get(placement).copied().unwrap_or(AlignSpec {
            points: [
                AnchorPoint::new(Edge::Start, Edge::Start),
                AnchorPoint::new(Edge::End, Edge::Start),
            ],
            offset: (0.0, 0.0),
            target_offset: (0.0, 0.0),
            overflow: Overflow::default(),
        });
        match align {
            Some(align) => base.merged(align),
            None => base,
        }
    }
}

impl Default for Placements {
    fn default() -> Self {
        Self::builtin()
    }
}
