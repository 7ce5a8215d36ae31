use crate::frame::RoiRect;
use crate::gui::views;

/// Turns pointer drags over the displayed image into a rectangle in image
/// pixels. A new drag replaces the previous rectangle.
#[derive(Default)]
pub struct RoiSelector {
    anchor: Option<(u32, u32)>,
}

impl RoiSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Returns the rectangle spanned by the current drag, if one is in
    /// progress this frame.
    pub fn update(&mut self, response: &egui::Response, size: [usize; 2]) -> Option<RoiRect> {
        let pos = response.interact_pointer_pos()?;
        let pixel = views::pointer_to_pixel(response.rect, pos, size);
        self.track(
            response.drag_started(),
            response.dragged() || response.drag_released(),
            pixel,
        )
    }

    /// Anchors on a new drag, or on the first interaction seen, and returns
    /// the rectangle between the anchor and `pixel` while dragging.
    fn track(&mut self, drag_started: bool, dragging: bool, pixel: (u32, u32)) -> Option<RoiRect> {
        if drag_started || self.anchor.is_none() {
            self.anchor = Some(pixel);
        }
        if !dragging {
            return None;
        }
        self.anchor.map(|anchor| RoiRect::from_corners(anchor, pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_down_right() {
        let mut selector = RoiSelector::new();
        assert_eq!(
            selector.track(true, true, (2, 3)),
            Some(RoiRect::new(2, 3, 0, 0))
        );
        assert_eq!(
            selector.track(false, true, (10, 7)),
            Some(RoiRect::new(2, 3, 8, 4))
        );
    }

    #[test]
    fn drag_up_left_gives_same_rect() {
        let mut selector = RoiSelector::new();
        selector.track(true, true, (10, 7));
        assert_eq!(
            selector.track(false, true, (2, 3)),
            Some(RoiRect::new(2, 3, 8, 4))
        );
    }

    #[test]
    fn click_without_drag_reports_nothing() {
        let mut selector = RoiSelector::new();
        assert_eq!(selector.track(false, false, (5, 5)), None);
        assert_eq!(selector.track(true, false, (6, 6)), None);
    }

    #[test]
    fn drag_without_start_anchors_on_first_position() {
        let mut selector = RoiSelector::new();
        assert_eq!(
            selector.track(false, true, (4, 4)),
            Some(RoiRect::new(4, 4, 0, 0))
        );
        assert_eq!(
            selector.track(false, true, (9, 1)),
            Some(RoiRect::new(4, 1, 5, 3))
        );
    }

    #[test]
    fn new_drag_replaces_anchor() {
        let mut selector = RoiSelector::new();
        selector.track(true, true, (0, 0));
        selector.track(false, true, (20, 20));

        selector.track(true, true, (30, 30));
        assert_eq!(
            selector.track(false, true, (35, 40)),
            Some(RoiRect::new(30, 30, 5, 10))
        );

        selector.reset();
        assert_eq!(
            selector.track(false, true, (1, 1)),
            Some(RoiRect::new(1, 1, 0, 0))
        );
    }
}
