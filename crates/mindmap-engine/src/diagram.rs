//! # Diagram Instance
//!
//! One rendered outline block: the parsed tree, its current layout and the
//! viewport looking at it.
//!
//! ## Rebuilds
//!
//! The tree is parsed on first display and on [`Diagram::reload`]. Fold
//! toggles, expand/collapse all and strategy switches only re-run the layout,
//! in this order:
//!
//! 1. mutate the tree and the shared fold store
//! 2. recompute the layout
//! 3. put the viewport transform captured before step 1 back
//!
//! Only the first render and [`Diagram::reset_view`] fit the content to the
//! surface; every other rebuild leaves the view where the user put it.

use crate::layout::{Layout, LayoutStrategy, Point, Rect, layout};
use crate::models::{Node, NodeId, SharedFoldState};
use crate::notes::{
    HtmlNotes, NOTE_PANEL_DEFAULT_WIDTH, NotePanel, NoteRenderer, clamp_note_panel_width,
};
use crate::parsing::{IdStrategy, parse_with};
use crate::render::{self, Surface, SvgSurface, TextAnchor};
use crate::viewport::{Transform, Viewport};

/// Scale factor of one zoom button press.
pub const ZOOM_STEP: f64 = 1.2;
/// Scale factor of one wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;
pub const EMPTY_PLACEHOLDER: &str = "No content to render";
const PLACEHOLDER_FONT_SIZE: f64 = 14.0;

/// Host settings read when an instance is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramSettings {
    pub wheel_zoom: bool,
    pub default_layout: LayoutStrategy,
    pub note_panel_width: u32,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            wheel_zoom: true,
            default_layout: LayoutStrategy::default(),
            note_panel_width: NOTE_PANEL_DEFAULT_WIDTH,
        }
    }
}

pub struct Diagram {
    source: String,
    ids: IdStrategy,
    folds: SharedFoldState,
    settings: DiagramSettings,
    strategy: LayoutStrategy,
    root: Option<Node>,
    layout: Option<Layout>,
    viewport: Viewport,
    width: f64,
    height: f64,
    drag: Option<Point>,
    selected: Option<NodeId>,
    note: Option<NotePanel>,
    notes: Box<dyn NoteRenderer>,
}

impl Diagram {
    /// Parses, lays out and fits `source` onto a `width` × `height` surface.
    pub fn new(
        source: impl Into<String>,
        folds: SharedFoldState,
        settings: DiagramSettings,
        width: f64,
        height: f64,
    ) -> Self {
        Self::with_ids(source, IdStrategy::default(), folds, settings, width, height)
    }

    pub fn with_ids(
        source: impl Into<String>,
        ids: IdStrategy,
        folds: SharedFoldState,
        settings: DiagramSettings,
        width: f64,
        height: f64,
    ) -> Self {
        let settings = DiagramSettings {
            note_panel_width: clamp_note_panel_width(settings.note_panel_width),
            ..settings
        };
        let mut diagram = Self {
            source: source.into(),
            ids,
            folds,
            settings,
            strategy: settings.default_layout,
            root: None,
            layout: None,
            viewport: Viewport::new(),
            width,
            height,
            drag: None,
            selected: None,
            note: None,
            notes: Box::new(HtmlNotes),
        };
        diagram.mount();
        diagram
    }

    /// Replaces the note renderer used by [`Diagram::open_note`].
    pub fn with_note_renderer(mut self, notes: impl NoteRenderer + 'static) -> Self {
        self.set_note_renderer(notes);
        self
    }

    pub fn set_note_renderer(&mut self, notes: impl NoteRenderer + 'static) {
        self.notes = Box::new(notes);
    }

    fn mount(&mut self) {
        self.parse();
        self.relayout();
        if let Some(layout) = &self.layout {
            self.viewport
                .fit_to_viewport(&layout.bounds, self.width, self.height);
        }
    }

    fn parse(&mut self) {
        self.root = parse_with(&self.source, self.ids, &self.folds.borrow());
    }

    fn relayout(&mut self) {
        self.layout = self.root.as_ref().map(|root| layout(root, self.strategy));
        if let Some(id) = &self.selected
            && self.layout.as_ref().and_then(|l| l.node(id)).is_none()
        {
            self.selected = None;
        }
    }

    /// Runs `mutate` then relayouts, keeping the current transform.
    fn rebuild(&mut self, mutate: impl FnOnce(&mut Self)) {
        let transform = self.viewport.transform();
        mutate(self);
        self.relayout();
        self.viewport.restore(transform);
    }

    /// Re-parses new source text. Remembered folds are applied to nodes
    /// whose identities survive the edit.
    pub fn reload(&mut self, source: impl Into<String>) {
        let source = source.into();
        self.rebuild(|d| {
            d.source = source;
            d.parse();
        });
        if let Some(panel) = &self.note
            && self.root.as_ref().and_then(|r| r.find(&panel.node)).is_none()
        {
            self.note = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.bounds)
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    pub fn settings(&self) -> DiagramSettings {
        self.settings
    }

    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    pub fn folds(&self) -> &SharedFoldState {
        &self.folds
    }

    /// Flips the fold flag of `id`. Returns false for leaves and unknown ids.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let Some(collapsed) = self
            .root
            .as_ref()
            .and_then(|r| r.find(id))
            .filter(|n| !n.is_leaf())
            .map(|n| !n.collapsed)
        else {
            return false;
        };

        self.rebuild(|d| {
            if let Some(node) = d.root.as_mut().and_then(|r| r.find_mut(id)) {
                node.collapsed = collapsed;
            }
            d.folds.borrow_mut().set(id.clone(), collapsed);
        });
        log::debug!("toggled {id}: collapsed={collapsed}");
        true
    }

    pub fn expand_all(&mut self) {
        self.set_all_collapsed(false);
    }

    pub fn collapse_all(&mut self) {
        self.set_all_collapsed(true);
    }

    fn set_all_collapsed(&mut self, collapsed: bool) {
        self.rebuild(|d| {
            if let Some(root) = d.root.as_mut() {
                let changed = root.set_all_collapsed(collapsed);
                d.folds.borrow_mut().set_many(changed, collapsed);
            }
        });
    }

    pub fn set_strategy(&mut self, strategy: LayoutStrategy) {
        if strategy != self.strategy {
            self.rebuild(|d| d.strategy = strategy);
        }
    }

    pub fn cycle_strategy(&mut self) -> LayoutStrategy {
        self.set_strategy(self.strategy.next());
        self.strategy
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_at(ZOOM_STEP, None);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_at(1.0 / ZOOM_STEP, None);
    }

    /// Zooms one notch around `cursor`: scrolling up (negative delta) zooms
    /// in. Returns false when wheel zoom is disabled or the delta is zero.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) -> bool {
        if !self.settings.wheel_zoom || delta_y == 0.0 {
            return false;
        }
        let factor = if delta_y < 0.0 {
            WHEEL_ZOOM_STEP
        } else {
            1.0 / WHEEL_ZOOM_STEP
        };
        self.viewport.zoom_at(factor, Some(cursor));
        true
    }

    pub fn begin_drag(&mut self, at: Point) {
        self.drag = Some(at);
    }

    pub fn drag_to(&mut self, at: Point) {
        if let Some(last) = self.drag {
            self.viewport.pan_by(at.x - last.x, at.y - last.y);
            self.drag = Some(at);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn reset_view(&mut self) {
        if let Some(layout) = &self.layout {
            self.viewport.reset(&layout.bounds, self.width, self.height);
        }
    }

    /// Changes the surface size. The transform is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Node under a screen point.
    pub fn node_at(&self, screen: Point) -> Option<NodeId> {
        let content = self.viewport.to_content(screen);
        self.layout
            .as_ref()?
            .hit_test(content)
            .map(|n| n.id.clone())
    }

    /// Selects the node under `screen` and toggles its fold.
    pub fn click(&mut self, screen: Point) -> Option<NodeId> {
        let id = self.node_at(screen)?;
        self.selected = Some(id.clone());
        self.toggle(&id);
        Some(id)
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id.filter(|id| self.layout.as_ref().is_some_and(|l| l.node(id).is_some()));
    }

    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, step: isize) {
        let Some(layout) = &self.layout else {
            return;
        };
        let count = layout.nodes.len() as isize;
        let current = self
            .selected
            .as_ref()
            .and_then(|id| layout.nodes.iter().position(|n| &n.id == id));
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(count),
            None if step < 0 => count - 1,
            None => 0,
        };
        self.selected = Some(layout.nodes[next as usize].id.clone());
    }

    /// Renders the note of `id` into the note panel. Nodes without a note
    /// leave the panel untouched and return `None`.
    pub fn open_note(&mut self, id: &NodeId) -> Option<&NotePanel> {
        let node = self.root.as_ref()?.find(id)?;
        let note = node.note.as_deref()?;
        let mut panel = NotePanel::new(id.clone(), node.text.clone(), self.settings.note_panel_width);
        self.notes.render(note, &mut panel);
        self.note = Some(panel);
        self.note.as_ref()
    }

    pub fn close_note(&mut self) {
        self.note = None;
    }

    pub fn note_panel(&self) -> Option<&NotePanel> {
        self.note.as_ref()
    }

    /// Applies a broadcast panel width, re-rendering an open note.
    pub fn apply_note_panel_width(&mut self, width: u32) {
        self.settings.note_panel_width = clamp_note_panel_width(width);
        if let Some(id) = self.note.as_ref().map(|p| p.node.clone()) {
            self.open_note(&id);
        }
    }

    /// Draws the current view, or the placeholder when there is nothing to show.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.layout {
            Some(layout) => render::draw(
                layout,
                &self.viewport.transform(),
                self.selected.as_ref(),
                surface,
            ),
            None => surface.text(
                Point::new(self.width / 2.0, self.height / 2.0),
                EMPTY_PLACEHOLDER,
                PLACEHOLDER_FONT_SIZE,
                false,
                TextAnchor::Middle,
            ),
        }
    }

    /// The current view as a standalone SVG document. An open note is
    /// included as HTML.
    pub fn to_svg(&self) -> Option<String> {
        let layout = self.layout.as_ref()?;
        let mut svg = SvgSurface::new(self.width, self.height);
        render::draw(
            layout,
            &self.viewport.transform(),
            self.selected.as_ref(),
            &mut svg,
        );
        if let Some(panel) = &self.note
            && let Some(note) = self
                .root
                .as_ref()
                .and_then(|r| r.find(&panel.node))
                .and_then(|n| n.note.as_deref())
        {
            let mut html = NotePanel::new(panel.node.clone(), panel.title.clone(), panel.width);
            HtmlNotes.render(note, &mut html);
            svg.note_panel(&html);
        }
        Some(svg.finish())
    }
}
