use glam::{Mat4, Quat, Vec2, Vec3};

/// Orthographic extents before zoom is applied.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Extents {
    /// Centered on the origin, `width` × `height` world units.
    Centered { width: f32, height: f32 },
    /// Explicit bounds, as passed to `set_viewport_off_center`.
    OffCenter { left: f32, right: f32, bottom: f32, top: f32 },
}

/// 2D orthographic camera.
///
/// The view matrix is the inverse of `translate(position) * rotate_z(rotation)`,
/// so `position` is the world point the camera looks at. Zoom scales the
/// visible extents about their center (`zoom = 2` shows half as much).
///
/// Depth range is `[-1, 1]` in view space, mapped to wgpu's `[0, 1]` clip depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    extents: Extents,
    position: Vec2,
    rotation_deg: f32,
    zoom: f32,

    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
}

impl Default for Camera {
    /// Identity camera: clip space is world space.
    fn default() -> Self {
        Self {
            extents: Extents::OffCenter { left: -1.0, right: 1.0, bottom: -1.0, top: 1.0 },
            position: Vec2::ZERO,
            rotation_deg: 0.0,
            zoom: 1.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    /// Camera showing a `width` × `height` region centered on the origin.
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self::default();
        camera.set_viewport(width, height);
        camera
    }

    /// Camera with explicit bounds. `Camera::off_center(0, w, h, 0)` gives a
    /// top-left origin with +Y down, the convention `draw_string_flipped` expects.
    pub fn off_center(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let mut camera = Self::default();
        camera.set_viewport_off_center(left, right, bottom, top);
        camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.extents = Extents::Centered { width, height };
        self.recalculate_projection();
    }

    pub fn set_viewport_off_center(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.extents = Extents::OffCenter { left, right, bottom, top };
        self.recalculate_projection();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.recalculate_view();
    }

    /// Rotation about +Z, in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_deg = degrees;
        self.recalculate_view();
    }

    /// Sets the zoom factor. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !(zoom > 0.0 && zoom.is_finite()) {
            log::debug!("Camera::set_zoom: ignoring invalid zoom {zoom}");
            return;
        }
        self.zoom = zoom;
        self.recalculate_projection();
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation_deg
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    fn recalculate_projection(&mut self) {
        let (left, right, bottom, top) = match self.extents {
            Extents::Centered { width, height } => {
                (-width * 0.5, width * 0.5, -height * 0.5, height * 0.5)
            }
            Extents::OffCenter { left, right, bottom, top } => (left, right, bottom, top),
        };

        let cx = (left + right) * 0.5;
        let cy = (bottom + top) * 0.5;
        let inv = 1.0 / self.zoom;

        self.projection = Mat4::orthographic_rh(
            cx + (left - cx) * inv,
            cx + (right - cx) * inv,
            cy + (bottom - cy) * inv,
            cy + (top - cy) * inv,
            -1.0,
            1.0,
        );
        self.view_projection = self.projection * self.view;
    }

    fn recalculate_view(&mut self) {
        let transform = Mat4::from_rotation_translation(
            Quat::from_rotation_z(self.rotation_deg.to_radians()),
            Vec3::new(self.position.x, self.position.y, 0.0),
        );
        self.view = transform.inverse();
        self.view_projection = self.projection * self.view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn clip(camera: &Camera, x: f32, y: f32) -> Vec2 {
        let p = camera.view_projection() * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(p.x / p.w, p.y / p.w)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn centered_viewport_maps_edges_to_clip_edges() {
        let camera = Camera::new(200.0, 100.0);
        assert!(approx(clip(&camera, 100.0, 50.0), Vec2::new(1.0, 1.0)));
        assert!(approx(clip(&camera, -100.0, -50.0), Vec2::new(-1.0, -1.0)));
        assert!(approx(clip(&camera, 0.0, 0.0), Vec2::ZERO));
    }

    #[test]
    fn off_center_top_left_origin_flips_y() {
        let camera = Camera::off_center(0.0, 800.0, 600.0, 0.0);
        assert!(approx(clip(&camera, 0.0, 0.0), Vec2::new(-1.0, 1.0)));
        assert!(approx(clip(&camera, 800.0, 600.0), Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn position_moves_the_look_at_point_to_center() {
        let mut camera = Camera::new(200.0, 100.0);
        camera.set_position(Vec2::new(30.0, -10.0));
        assert!(approx(clip(&camera, 30.0, -10.0), Vec2::ZERO));
    }

    #[test]
    fn zoom_shrinks_visible_extents() {
        let mut camera = Camera::new(200.0, 100.0);
        camera.set_zoom(2.0);
        assert!(approx(clip(&camera, 50.0, 25.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn zoom_survives_viewport_change() {
        let mut camera = Camera::new(200.0, 100.0);
        camera.set_zoom(2.0);
        camera.set_viewport(400.0, 200.0);
        assert!(approx(clip(&camera, 100.0, 50.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn invalid_zoom_is_ignored() {
        let mut camera = Camera::new(10.0, 10.0);
        camera.set_zoom(0.0);
        camera.set_zoom(f32::NAN);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn rotation_turns_world_around_the_camera() {
        let mut camera = Camera::new(2.0, 2.0);
        camera.set_rotation(90.0);
        // The view applies the inverse rotation, so world +X lands on screen -Y.
        assert!(approx(clip(&camera, 1.0, 0.0), Vec2::new(0.0, -1.0)));
    }
}
