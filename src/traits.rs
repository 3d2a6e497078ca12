use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::Real;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Boolean operations + transformations
pub trait CSGOps: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;
    fn invalidate_bounding_box(&mut self);
    fn inverse(&self) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Translates the object so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        self.translate(0.0, 0.0, -aabb.mins.z)
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin.
    fn center(&self) -> Self {
        let center = self.bounding_box().center();
        self.translate(-center.x, -center.y, -center.z)
    }

    /// Rotates by x_degrees, y_degrees, z_degrees (applied in that order)
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Mirror across the plane `x = 0` (`axis = 0`), `y = 0` (`1`) or `z = 0` (`2`).
    fn mirror_axis(&self, axis: usize) -> Self {
        let mut scale = Vector3::new(1.0, 1.0, 1.0);
        scale[axis.min(2)] = -1.0;
        self.transform(&Matrix4::new_nonuniform_scaling(&scale))
    }
}
