use bevy::math::Ray3d;
use bevy::prelude::*;

/// One ray intersection, `distance` along the ray from its origin.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Cast `ray` against a set of oriented boxes and return every hit,
/// nearest first. Used both for "did the drag start on the proxy" and
/// "which zone is under the pointer at drop".
pub fn hit_test(ray: Ray3d, targets: &[(Entity, &Transform, Vec3)]) -> Vec<RayHit> {
    let origin = ray.origin;
    let direction = ray.direction.as_vec3();

    let mut hits: Vec<RayHit> = targets
        .iter()
        .filter_map(|(entity, transform, size)| {
            ray_hits_box(origin, direction, transform, *size).map(|distance| RayHit {
                entity: *entity,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

// Slab-method intersection in box-local space. `size` is the full
// extent; returns the entry distance, or the exit distance when the
// ray starts inside the box.
fn ray_hits_box(origin: Vec3, direction: Vec3, transform: &Transform, size: Vec3) -> Option<f32> {
    let inv = transform.compute_matrix().inverse();
    let o = inv.transform_point3(origin);
    let d = inv.transform_vector3(direction);
    let half = size * 0.5;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        if d[axis].abs() < f32::EPSILON {
            if o[axis].abs() > half[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (-half[axis] - o[axis]) / d[axis];
        let mut t1 = (half[axis] - o[axis]) / d[axis];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Dir3;

    fn ray(origin: Vec3, toward: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(toward - origin).unwrap())
    }

    #[test]
    fn hits_a_box_straight_ahead() {
        let xf = Transform::from_xyz(0.0, 0.0, -5.0);
        let t = ray_hits_box(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::ONE).unwrap();
        assert!((t - 4.5).abs() < 1e-4);
    }

    #[test]
    fn misses_a_box_off_axis() {
        let xf = Transform::from_xyz(3.0, 0.0, -5.0);
        assert!(ray_hits_box(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::ONE).is_none());
    }

    #[test]
    fn hits_a_rotated_box() {
        let xf = Transform::from_xyz(0.0, 0.0, -5.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));
        assert!(ray_hits_box(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::ONE).is_some());
    }

    #[test]
    fn orders_hits_nearest_first() {
        let near = Transform::from_xyz(0.0, 0.0, -2.0);
        let far = Transform::from_xyz(0.0, 0.0, -6.0);
        let near_entity = Entity::from_raw(1);
        let far_entity = Entity::from_raw(2);
        let targets = [
            (far_entity, &far, Vec3::ONE),
            (near_entity, &near, Vec3::ONE),
        ];
        let hits = hit_test(ray(Vec3::ZERO, Vec3::NEG_Z * 10.0), &targets);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, near_entity);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn ray_starting_inside_reports_the_exit() {
        let xf = Transform::from_xyz(0.0, 0.0, 0.0);
        let t = ray_hits_box(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::splat(2.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-4);
    }
}
