//! Overlay set manager.
//!
//! Owns the currently visible collection of placed boxes and their
//! surfaces. The whole set is swapped atomically each cycle: the new
//! set is materialized first, then the old surfaces are dropped before
//! `replace_all` returns, so a concurrent reader sees either the old
//! full set or the new one.

use std::sync::Mutex;

use screenlate_core::{Block, CaptureGeometry, LayoutConfig, LayoutSolver, PlacedBox};

use crate::surface::{BoxSurface, SurfaceFactory};

struct ActiveBox<S> {
    surface: S,
    placed: PlacedBox,
}

struct Inner<F: SurfaceFactory> {
    factory: F,
    active: Vec<ActiveBox<F::Surface>>,
    visible: bool,
}

/// Exclusive owner of the live overlay set. All mutation goes through
/// one mutex; intended to be driven from the UI-owning thread via
/// [`crate::service::run_apply_loop`].
pub struct OverlaySetManager<F: SurfaceFactory> {
    inner: Mutex<Inner<F>>,
}

impl<F: SurfaceFactory> OverlaySetManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            inner: Mutex::new(Inner {
                factory,
                active: Vec::new(),
                visible: true,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<F>> {
        // A panicked writer leaves no torn state worth preserving.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Logical screen size reported by the presentation backend.
    pub fn screen_size(&self) -> (f32, f32) {
        self.lock().factory.screen_size()
    }

    /// Swap the visible set wholesale. Boxes that fail to materialize
    /// are logged and skipped; the old set's resources are released
    /// before this returns.
    pub fn replace_all(&self, boxes: Vec<PlacedBox>) {
        let mut inner = self.lock();
        let visible = inner.visible;

        let mut fresh = Vec::with_capacity(boxes.len());
        for placed in boxes {
            match inner.factory.create(&placed) {
                Ok(mut surface) => {
                    if visible {
                        surface.show();
                    } else {
                        surface.hide();
                    }
                    fresh.push(ActiveBox { surface, placed });
                }
                Err(error) => {
                    tracing::warn!(%error, text = %placed.text, "skipping overlay box");
                }
            }
        }

        let old = std::mem::replace(&mut inner.active, fresh);
        tracing::debug!(
            new = inner.active.len(),
            released = old.len(),
            "overlay set replaced"
        );
        drop(old);
    }

    /// One full layout-and-replace cycle from pre-translated blocks:
    /// normalize the block geometry, solve the layout against this
    /// screen, and swap the set in. Entry point for hosts that drive
    /// recognition and translation themselves.
    pub fn update_blocks(
        &self,
        mut blocks: Vec<Block>,
        translations: &[String],
        capture: &CaptureGeometry,
        layout: LayoutConfig,
    ) {
        let (screen_width, screen_height) = self.screen_size();
        capture.normalize_blocks(&mut blocks, screen_height);
        let solver = LayoutSolver::new(layout, screen_width, screen_height);
        let placed = solver.place_all(
            blocks
                .iter()
                .zip(translations.iter())
                .map(|(b, t)| (b, t.as_str())),
        );
        self.replace_all(placed);
    }

    /// Blank every box without destroying its resources.
    pub fn hide_all(&self) {
        let mut inner = self.lock();
        inner.visible = false;
        for entry in &mut inner.active {
            entry.surface.hide();
        }
    }

    /// Restore visibility after [`hide_all`](Self::hide_all).
    pub fn show_all(&self) {
        let mut inner = self.lock();
        inner.visible = true;
        for entry in &mut inner.active {
            entry.surface.show();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn len(&self) -> usize {
        self.lock().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().active.is_empty()
    }

    /// Geometry snapshot of the current set, in placement order.
    pub fn boxes(&self) -> Vec<PlacedBox> {
        self.lock()
            .active
            .iter()
            .map(|e| e.placed.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceError;
    use screenlate_core::Rect;
    use std::sync::Arc;

    #[derive(Default)]
    struct EventLog(Mutex<Vec<String>>);

    impl EventLog {
        fn push(&self, event: String) {
            self.0.lock().unwrap().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        fn contains(&self, event: &str) -> bool {
            self.events().iter().any(|e| e == event)
        }
    }

    struct TestSurface {
        log: Arc<EventLog>,
        text: String,
    }

    impl BoxSurface for TestSurface {
        fn show(&mut self) {
            self.log.push(format!("show {}", self.text));
        }

        fn hide(&mut self) {
            self.log.push(format!("hide {}", self.text));
        }
    }

    impl Drop for TestSurface {
        fn drop(&mut self) {
            self.log.push(format!("drop {}", self.text));
        }
    }

    struct TestFactory {
        log: Arc<EventLog>,
        fail_on: Option<&'static str>,
    }

    impl SurfaceFactory for TestFactory {
        type Surface = TestSurface;

        fn screen_size(&self) -> (f32, f32) {
            (1920.0, 1080.0)
        }

        fn create(&mut self, placed: &PlacedBox) -> Result<TestSurface, SurfaceError> {
            if self.fail_on == Some(placed.text.as_str()) {
                return Err(SurfaceError::Creation("scripted failure".to_string()));
            }
            self.log.push(format!("create {}", placed.text));
            Ok(TestSurface {
                log: Arc::clone(&self.log),
                text: placed.text.clone(),
            })
        }
    }

    fn manager(
        fail_on: Option<&'static str>,
    ) -> (OverlaySetManager<TestFactory>, Arc<EventLog>) {
        let log = Arc::new(EventLog::default());
        let factory = TestFactory {
            log: Arc::clone(&log),
            fail_on,
        };
        (OverlaySetManager::new(factory), log)
    }

    fn placed(text: &str, top: f32) -> PlacedBox {
        PlacedBox {
            rect: Rect::new(0.0, top, 100.0, 30.0),
            text: text.to_string(),
            lines: vec![text.to_string()],
            font_size: 16.0,
        }
    }

    #[test]
    fn replace_releases_old_set_before_returning() {
        let (manager, log) = manager(None);
        manager.replace_all(vec![placed("old", 0.0)]);
        manager.replace_all(vec![placed("new", 50.0)]);

        let events = log.events();
        // New surface exists before the old one is torn down.
        let create_new = events.iter().position(|e| e == "create new").unwrap();
        let drop_old = events.iter().position(|e| e == "drop old").unwrap();
        assert!(create_new < drop_old);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn replace_with_same_input_is_idempotent() {
        let (manager, _log) = manager(None);
        let boxes = vec![placed("a", 0.0), placed("b", 100.0)];
        manager.replace_all(boxes.clone());
        let first = manager.boxes();
        manager.replace_all(boxes);
        assert_eq!(manager.boxes(), first);
    }

    #[test]
    fn failed_box_is_skipped_without_aborting_the_rest() {
        let (manager, log) = manager(Some("bad"));
        manager.replace_all(vec![
            placed("a", 0.0),
            placed("bad", 100.0),
            placed("b", 200.0),
        ]);
        assert_eq!(manager.len(), 2);
        let texts: Vec<_> = manager.boxes().into_iter().map(|p| p.text).collect();
        assert_eq!(texts, ["a", "b"]);
        assert!(!log.contains("create bad"));
    }

    #[test]
    fn hide_and_show_toggle_without_destroying() {
        let (manager, log) = manager(None);
        manager.replace_all(vec![placed("a", 0.0)]);
        manager.hide_all();
        assert!(!manager.is_visible());
        manager.show_all();
        assert!(manager.is_visible());

        assert!(log.contains("hide a"));
        assert!(!log.contains("drop a"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn boxes_created_while_hidden_start_hidden() {
        let (manager, log) = manager(None);
        manager.hide_all();
        manager.replace_all(vec![placed("a", 0.0)]);
        assert!(log.contains("hide a"));
        assert!(!log.contains("show a"));
    }

    #[test]
    fn update_blocks_normalizes_lays_out_and_swaps() {
        let (manager, _log) = manager(None);
        let blocks = vec![
            Block {
                text: "source".to_string(),
                bounds: Rect::new(200.0, 100.0, 400.0, 40.0),
            },
            Block {
                text: "later".to_string(),
                bounds: Rect::new(200.0, 600.0, 300.0, 40.0),
            },
        ];
        let translations = vec!["first translation".to_string(), "second".to_string()];
        let capture = CaptureGeometry {
            scale: 0.5,
            ..CaptureGeometry::default()
        };
        manager.update_blocks(blocks, &translations, &capture, LayoutConfig::default());

        let placed = manager.boxes();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].text, "first translation");
        // Source-space left of 200 scaled by 0.5.
        assert_eq!(placed[0].rect.left, 100.0);
        assert!(!placed[0].rect.intersects(&placed[1].rect));
    }

    #[test]
    fn empty_replace_clears_the_overlay() {
        let (manager, log) = manager(None);
        manager.replace_all(vec![placed("a", 0.0)]);
        manager.replace_all(Vec::new());
        assert!(manager.is_empty());
        assert!(log.contains("drop a"));
    }
}
