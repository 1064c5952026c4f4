use crate::geometry::Point;

/// Maps pointer positions on a scaled element back to the surface's native
/// pixel grid (image natural size, video/webcam frame size).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMapping {
    pub rect_left: f64,
    pub rect_top: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl SurfaceMapping {
    /// Returns `None` while the element has no rendered size.
    pub fn to_surface(&self, client_x: f64, client_y: f64) -> Option<Point> {
        if self.rect_width <= 0.0 || self.rect_height <= 0.0 {
            return None;
        }
        let x = (client_x - self.rect_left) / self.rect_width * self.natural_width as f64;
        let y = (client_y - self.rect_top) / self.rect_height * self.natural_height as f64;
        Some(Point::new(x.floor() as i32, y.floor() as i32))
    }
}
