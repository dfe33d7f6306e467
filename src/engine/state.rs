//! GPU-free half of the engine: sensor feed, scroll offset, viewport
//! class, and the panel group transform they produce.

use crate::error::TiltScrollError;
use crate::options::{LayoutOptions, Options};
use crate::scene::PanelGroup;
use crate::scroll::TiltScroller;
use crate::sensor::{OrientationFeed, OrientationSource};
use crate::viewport::{Viewport, ViewportClass};

/// Everything the per-frame position writer reads and writes.
///
/// The scroll offset only changes while draining the sensor feed (or on an
/// explicit reset); the group transform only changes in
/// [`write_frame`](Self::write_frame).
#[derive(Debug)]
pub struct ScrollState {
    scroller: TiltScroller,
    group: PanelGroup,
    viewport: Viewport,
    layout: LayoutOptions,
    class: ViewportClass,
    feed: Option<OrientationFeed>,
}

impl ScrollState {
    /// State at offset 0 for the given viewport, with no sensor attached.
    #[must_use]
    pub fn new(options: &Options, viewport: Viewport) -> Self {
        let layout = options.layout.clone();
        let class = viewport.class(&layout);
        log::info!(
            "viewport {:.0}px logical -> {:?}",
            viewport.logical_width(),
            class
        );
        let mut state = Self {
            scroller: TiltScroller::new(&options.scroll),
            group: PanelGroup::default(),
            viewport,
            layout,
            class,
            feed: None,
        };
        let _ = state.write_frame();
        state
    }

    /// Subscribe to `source`, replacing (and unsubscribing) any current
    /// feed.
    ///
    /// # Errors
    ///
    /// Propagates the source's subscription failure; the previous feed is
    /// already detached in that case.
    pub fn connect(
        &mut self,
        source: &dyn OrientationSource,
    ) -> Result<(), TiltScrollError> {
        self.disconnect();
        self.feed = Some(OrientationFeed::connect(source)?);
        Ok(())
    }

    /// Unsubscribe from the sensor. Readings still queued are discarded.
    pub fn disconnect(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.disconnect();
        }
    }

    /// Whether a sensor feed is attached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.feed.is_some()
    }

    /// Track a new surface size (physical pixels).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.set_viewport(Viewport::new(width, height, self.viewport.scale_factor));
    }

    /// Track a new host scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.set_viewport(Viewport::new(
            self.viewport.width,
            self.viewport.height,
            scale_factor,
        ));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        // Readings queued so far belong to the old class.
        let _ = self.pump();
        self.viewport = viewport;
        self.reclassify();
    }

    fn reclassify(&mut self) {
        let class = self.viewport.class(&self.layout);
        if class != self.class {
            log::info!(
                "viewport {:.0}px logical: {:?} -> {:?}",
                self.viewport.logical_width(),
                self.class,
                class
            );
            self.class = class;
        }
    }

    /// Apply new scroll and layout constants.
    pub fn set_options(&mut self, options: &Options) {
        let _ = self.pump();
        self.scroller.set_options(&options.scroll);
        self.layout = options.layout.clone();
        self.reclassify();
    }

    /// Return to the first panel.
    pub fn reset(&mut self) {
        self.scroller.reset();
    }

    /// Drain queued readings into the scroller. Returns how many moved the
    /// offset. On desktop viewports readings are consumed but ignored.
    pub fn pump(&mut self) -> usize {
        let Some(feed) = &self.feed else {
            return 0;
        };
        let mut moved = 0;
        for reading in feed.drain() {
            if self.scroller.apply(reading, self.class) {
                moved += 1;
            }
        }
        if moved > 0 {
            log::debug!(
                "{moved} reading(s) applied, offset {:.3}",
                self.scroller.offset()
            );
        }
        moved
    }

    /// Write the current offset and viewport scale into the group.
    pub fn write_frame(&mut self) -> &PanelGroup {
        let scale = self.viewport.panel_scale(&self.layout);
        self.group.write(self.scroller.offset(), scale);
        &self.group
    }

    /// One tick: drain the feed, then write the group transform.
    pub fn update(&mut self) -> &PanelGroup {
        let _ = self.pump();
        self.write_frame()
    }

    /// Current scroll offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.scroller.offset()
    }

    /// Current viewport class.
    #[must_use]
    pub fn class(&self) -> ViewportClass {
        self.class
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Group transform as of the last [`write_frame`](Self::write_frame).
    #[must_use]
    pub fn group(&self) -> &PanelGroup {
        &self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SimulatedSensor;

    fn phone() -> Viewport {
        Viewport::new(1170, 2532, 3.0)
    }

    fn desktop() -> Viewport {
        Viewport::new(1920, 1080, 1.0)
    }

    fn connected(viewport: Viewport) -> (ScrollState, SimulatedSensor) {
        let sensor = SimulatedSensor::new();
        let mut state = ScrollState::new(&Options::default(), viewport);
        state.connect(&sensor).unwrap();
        (state, sensor)
    }

    #[test]
    fn tilt_scrolls_group_on_mobile() {
        let (mut state, sensor) = connected(phone());
        let _ = sensor.tilt(50.0);
        let _ = sensor.tilt(50.0);
        let group = *state.update();
        assert!((group.offset_y() - 2.0).abs() < 1e-5);
        assert_eq!(group.scale(), 0.7);
    }

    #[test]
    fn desktop_stays_static_and_discards_readings() {
        let (mut state, sensor) = connected(desktop());
        for _ in 0..10 {
            let _ = sensor.tilt(90.0);
        }
        let group = *state.update();
        assert_eq!(group.offset_y(), 0.0);
        assert_eq!(group.scale(), 1.0);

        // Queued desktop readings must not replay after a resize to mobile.
        state.resize(700, 1000);
        assert_eq!(state.class(), ViewportClass::Mobile);
        assert_eq!(state.update().offset_y(), 0.0);
    }

    #[test]
    fn desktop_readings_queued_before_resize_do_not_replay() {
        let (mut state, sensor) = connected(desktop());
        for _ in 0..10 {
            let _ = sensor.tilt(90.0);
        }
        // No frame ran between the readings and the resize.
        state.resize(700, 1000);
        assert_eq!(state.class(), ViewportClass::Mobile);
        assert_eq!(state.update().offset_y(), 0.0);
    }

    #[test]
    fn desktop_readings_queued_before_scale_change_do_not_replay() {
        let (mut state, sensor) = connected(Viewport::new(1170, 2532, 1.0));
        let _ = sensor.tilt(90.0);
        state.set_scale_factor(3.0);
        assert_eq!(state.class(), ViewportClass::Mobile);
        assert_eq!(state.update().offset_y(), 0.0);
    }

    #[test]
    fn mobile_readings_queued_before_resize_still_apply() {
        let (mut state, sensor) = connected(phone());
        let _ = sensor.tilt(50.0);
        state.resize(1920, 1080);
        assert_eq!(state.class(), ViewportClass::Desktop);
        assert!((state.offset() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn readings_queued_before_breakpoint_change_use_old_class() {
        let (mut state, sensor) = connected(desktop());
        let _ = sensor.tilt(90.0);
        let mut options = Options::default();
        options.layout.mobile_max_width = 4000.0;
        state.set_options(&options);
        assert_eq!(state.class(), ViewportClass::Mobile);
        assert_eq!(state.update().offset_y(), 0.0);
    }

    #[test]
    fn resize_reclassifies_without_reconnect() {
        let (mut state, sensor) = connected(desktop());
        state.resize(600, 900);
        let _ = sensor.tilt(50.0);
        assert_eq!(state.pump(), 1);
        assert!(state.is_connected());

        state.resize(1600, 900);
        let _ = sensor.tilt(50.0);
        assert_eq!(state.pump(), 0);
        assert!((state.offset() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn scale_factor_change_reclassifies() {
        let (mut state, _sensor) = connected(Viewport::new(1170, 2532, 1.0));
        assert_eq!(state.class(), ViewportClass::Desktop);
        state.set_scale_factor(3.0);
        assert_eq!(state.class(), ViewportClass::Mobile);
        assert_eq!(state.write_frame().scale(), 0.7);
    }

    #[test]
    fn teardown_stops_updates() {
        let (mut state, sensor) = connected(phone());
        let _ = sensor.tilt(50.0);
        let _ = state.update();
        let before = state.offset();

        state.disconnect();
        assert_eq!(sensor.listener_count(), 0);
        assert_eq!(sensor.tilt(50.0), 0);
        assert_eq!(state.update().offset_y(), before);
    }

    #[test]
    fn dropping_state_unsubscribes() {
        let (state, sensor) = connected(phone());
        drop(state);
        assert_eq!(sensor.listener_count(), 0);
    }

    #[test]
    fn reconnect_replaces_listener() {
        let (mut state, sensor) = connected(phone());
        state.connect(&sensor).unwrap();
        assert_eq!(sensor.listener_count(), 1);
    }

    #[test]
    fn reset_returns_to_first_panel() {
        let (mut state, sensor) = connected(phone());
        let _ = sensor.tilt(90.0);
        let _ = state.update();
        state.reset();
        assert_eq!(state.update().offset_y(), 0.0);
    }

    #[test]
    fn layout_options_apply_live() {
        let (mut state, _sensor) = connected(desktop());
        let mut options = Options::default();
        options.layout.mobile_max_width = 4000.0;
        state.set_options(&options);
        assert_eq!(state.class(), ViewportClass::Mobile);
    }
}
