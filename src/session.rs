use crate::composite;
use crate::history::History;
use crate::model::{Point, Rgb, Stroke, Tool};
use crate::settings::{MAX_WIDTH, MIN_WIDTH};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Identity of one input stream: a mouse, one touch contact, or a pen tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSource {
    pub kind: PointerKind,
    pub id: u64,
}

impl PointerSource {
    pub const fn new(kind: PointerKind, id: u64) -> Self {
        Self { kind, id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPhase {
    Down(Point),
    Moved(Point),
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub phase: PointerPhase,
}

/// The live tool selection a stroke starts from. `width` is the logical
/// line width; it is converted to device pixels when the stroke begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSelection {
    pub tool: Tool,
    pub color: Rgb,
    pub width: u32,
    pub opacity: u8,
}

/// One in-progress stroke, created at pointer-down and consumed at release.
/// Owns the accumulated points and a frozen copy of the brush, so later
/// toolbar changes cannot retint a stroke already underway.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSession {
    source: PointerSource,
    points: Vec<Point>,
    tool: Tool,
    color: Rgb,
    line_width: f32,
    opacity: u8,
}

impl StrokeSession {
    fn new(source: PointerSource, brush: BrushSelection, line_width: f32, first: Point) -> Self {
        Self {
            source,
            points: vec![first],
            tool: brush.tool,
            color: brush.color,
            line_width,
            opacity: brush.opacity,
        }
    }

    pub fn source(&self) -> PointerSource {
        self.source
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn last(&self) -> Point {
        *self.points.last().expect("session always holds a point")
    }

    /// Repaints the segments this interaction has already put on the surface,
    /// after a resize wiped the buffer. A one-point interaction has painted
    /// nothing yet; its stamp still lands at release.
    pub fn repaint(&self, surface: &mut Surface) {
        if self.points.len() < 2 {
            return;
        }
        composite::configure(surface, self.tool, self.color, self.opacity);
        for pair in self.points.windows(2) {
            composite::paint_segment(surface, pair[0], pair[1], self.line_width);
        }
    }

    fn into_stroke(self) -> Stroke {
        Stroke {
            points: self.points,
            color: self.color,
            tool: self.tool,
            line_width: self.line_width,
            opacity: self.opacity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event did not belong to the active interaction (or there was none).
    Ignored,
    /// A new stroke began; no pixels changed yet.
    Started,
    /// The active stroke grew and its new segment was painted.
    Painted,
    /// The stroke was committed to history.
    Committed,
}

impl EventOutcome {
    pub fn repainted(self) -> bool {
        matches!(self, EventOutcome::Painted | EventOutcome::Committed)
    }
}

/// Pointer state machine. At most one interaction is active; it is owned by
/// the pointer source that started it, and events from every other source
/// are ignored until that source releases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    session: Option<StrokeSession>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        brush: BrushSelection,
        surface: &mut Surface,
        history: &mut History,
    ) -> EventOutcome {
        match event.phase {
            PointerPhase::Down(point) => self.begin(event.source, point, brush, surface),
            PointerPhase::Moved(point) => self.extend(event.source, point, surface),
            PointerPhase::Up | PointerPhase::Leave => self.finish(event.source, surface, history),
        }
    }

    fn begin(
        &mut self,
        source: PointerSource,
        point: Point,
        brush: BrushSelection,
        surface: &Surface,
    ) -> EventOutcome {
        if self.session.is_some() || !point.is_finite() {
            return EventOutcome::Ignored;
        }
        let line_width =
            brush.width.clamp(MIN_WIDTH, MAX_WIDTH) as f32 * surface.pixel_ratio();
        self.session = Some(StrokeSession::new(source, brush, line_width, point));
        EventOutcome::Started
    }

    fn extend(&mut self, source: PointerSource, point: Point, surface: &mut Surface) -> EventOutcome {
        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        if session.source != source || !point.is_finite() {
            return EventOutcome::Ignored;
        }

        let previous = session.last();
        session.points.push(point);
        // Rebind before each segment: a resize-triggered replay may have
        // left another stroke's state bound.
        composite::configure(surface, session.tool, session.color, session.opacity);
        composite::paint_segment(surface, previous, point, session.line_width);
        EventOutcome::Painted
    }

    fn finish(
        &mut self,
        source: PointerSource,
        surface: &mut Surface,
        history: &mut History,
    ) -> EventOutcome {
        match self.session.take() {
            Some(session) if session.source == source => {
                let stroke = session.into_stroke();
                if stroke.points.is_empty() {
                    return EventOutcome::Ignored;
                }
                // A tap never saw a move, so its lone stamp lands here.
                if stroke.points.len() == 1 {
                    composite::configure(surface, stroke.tool, stroke.color, stroke.opacity);
                    composite::paint_stroke(surface, &stroke);
                }
                tracing::debug!(
                    points = stroke.points.len(),
                    tool = ?stroke.tool,
                    "stroke committed"
                );
                history.append(stroke);
                EventOutcome::Committed
            }
            Some(session) => {
                self.session = Some(session);
                EventOutcome::Ignored
            }
            None => EventOutcome::Ignored,
        }
    }
}
