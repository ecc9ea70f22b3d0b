//! Owner of the state shared by every diagram a host opens.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::diagram::{Diagram, DiagramSettings};
use crate::models::{FoldState, SharedFoldState};
use crate::notes::clamp_note_panel_width;

pub type DiagramRef = Rc<RefCell<Diagram>>;

/// Hands out diagram instances that share one fold store, and broadcasts
/// setting changes to the instances still alive.
pub struct Host {
    folds: SharedFoldState,
    settings: DiagramSettings,
    instances: Vec<Weak<RefCell<Diagram>>>,
}

impl Host {
    pub fn new(settings: DiagramSettings) -> Self {
        Self {
            folds: FoldState::shared(),
            settings,
            instances: Vec::new(),
        }
    }

    /// Renders `source` into a new instance. The host only keeps a weak
    /// reference; dropping the returned handle unmounts the diagram.
    pub fn open(&mut self, source: &str, width: f64, height: f64) -> DiagramRef {
        let diagram = Rc::new(RefCell::new(Diagram::new(
            source,
            self.folds.clone(),
            self.settings,
            width,
            height,
        )));
        self.instances.push(Rc::downgrade(&diagram));
        log::debug!("opened diagram {}", self.instances.len());
        diagram
    }

    pub fn settings(&self) -> DiagramSettings {
        self.settings
    }

    pub fn folds(&self) -> &SharedFoldState {
        &self.folds
    }

    /// Stores the new width and pushes it to every live instance. Returns
    /// how many instances were updated.
    pub fn set_note_panel_width(&mut self, width: u32) -> usize {
        let width = clamp_note_panel_width(width);
        self.settings.note_panel_width = width;
        self.instances.retain(|weak| weak.strong_count() > 0);

        let mut updated = 0;
        for diagram in self.instances.iter().filter_map(Weak::upgrade) {
            diagram.borrow_mut().apply_note_panel_width(width);
            updated += 1;
        }
        log::info!("note panel width set to {width}px on {updated} diagram(s)");
        updated
    }

    pub fn live_instances(&self) -> usize {
        self.instances
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(DiagramSettings::default())
    }
}
