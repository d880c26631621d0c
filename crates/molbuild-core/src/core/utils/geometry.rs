use nalgebra::{Point3, Rotation3};

pub fn euler_rotation(theta: f64, phi: f64, psi: f64) -> Rotation3<f64> {
    // ZYX product: yaw psi about z, pitch theta about y, roll phi about x.
    Rotation3::from_euler_angles(phi, theta, psi)
}

/// Angles that reorient a source fragment so its C2->R2 direction inverts
/// onto the target's R1->C1 direction. Returns (theta, psi); phi is always
/// zero for this alignment.
pub fn alignment_angles(
    r1: &Point3<f64>,
    c1: &Point3<f64>,
    r2: &Point3<f64>,
    c2: &Point3<f64>,
) -> (f64, f64) {
    let radius1 = (c1 - r1).norm();
    let radius2 = (c2 - r2).norm();

    // Cosines clamped against floating-point drift outside [-1, 1].
    let cos1 = ((r1.z - c1.z) / radius1).clamp(-1.0, 1.0);
    let cos2 = ((c2.z - r2.z) / radius2).clamp(-1.0, 1.0);

    let theta = cos1.acos() - cos2.acos();
    let psi = (r1.y - c1.y).atan2(r1.x - c1.x) - (c2.y - r2.y).atan2(c2.x - r2.x);
    (theta, psi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const EPS: f64 = 1e-9;

    #[test]
    fn euler_rotation_with_zero_angles_is_identity() {
        let rot = euler_rotation(0.0, 0.0, 0.0);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!((rot * v - v).norm() < EPS);
    }

    #[test]
    fn euler_rotation_psi_rotates_about_z() {
        let rot = euler_rotation(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let v = rot * Vector3::new(1.0, 0.0, 0.0);
        assert!((v - Vector3::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn euler_rotation_theta_rotates_about_y() {
        let rot = euler_rotation(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        let v = rot * Vector3::new(1.0, 0.0, 0.0);
        assert!((v - Vector3::new(0.0, 0.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn alignment_angles_for_already_aligned_bonds_are_zero() {
        // C1->R1 points along -x and R2->C2 points along -x as well: the
        // source already faces the right way, so no rotation is needed.
        let r1 = Point3::new(0.0, 0.0, 0.0);
        let c1 = Point3::new(1.0, 0.0, 0.0);
        let r2 = Point3::new(1.0, 0.0, 0.0);
        let c2 = Point3::new(0.0, 0.0, 0.0);
        let (theta, psi) = alignment_angles(&r1, &c1, &r2, &c2);
        assert!(theta.abs() < EPS);
        assert!(psi.abs() < EPS);
    }

    #[test]
    fn alignment_angles_detect_azimuthal_offset() {
        let r1 = Point3::new(0.0, 0.0, 0.0);
        let c1 = Point3::new(1.0, 0.0, 0.0);
        // R2->C2 along +y instead of -x: a quarter turn of azimuth short.
        let r2 = Point3::new(0.0, -1.0, 0.0);
        let c2 = Point3::new(0.0, 0.0, 0.0);
        let (theta, psi) = alignment_angles(&r1, &c1, &r2, &c2);
        assert!(theta.abs() < EPS);
        assert!((psi - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }
}
