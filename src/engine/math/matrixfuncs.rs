
// -- Helper functions -- //

/// Identity matrix (4x4) representing 'no transformation'.
pub const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,  // Column 1
    0.0, 1.0, 0.0, 0.0,  // Column 2
    0.0, 0.0, 1.0, 0.0,  // Column 3
    0.0, 0.0, 0.0, 1.0,  // Column 4
];

/// Identity quaternion [x, y, z, w].
pub const IDENTITY_QUAT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Computes the local transformation matrix by combining translation, rotation, and scale matrices.
///
/// # Parameters
/// - `position`: the local position [x, y, z].
/// - `rotation`: the local rotation quaternion [x, y, z, w].
/// - `scale`: the local scale factors [x, y, z].
///
/// # Returns
/// A 4x4 transformation matrix in column-major order: `T * R * S`.
pub fn compute_local_matrix(position: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> [f32; 16] {
    let translation = translation_matrix(position);
    let rotation = rotation_matrix_from_quat(rotation);
    let scale = scale_matrix(scale);

    // Scale is applied first, translation last
    matrix_mul_4x4(&matrix_mul_4x4(&translation, &rotation), &scale)
}

/// Creates a translation matrix from a position vector.
pub fn translation_matrix(pos: [f32; 3]) -> [f32; 16] {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        pos[0], pos[1], pos[2], 1.0,  // translation lives in column 4
    ]
}

/// Creates a scale matrix from per-axis scale factors.
pub fn scale_matrix(scale: [f32; 3]) -> [f32; 16] {
    [
        scale[0], 0.0,      0.0,      0.0,
        0.0,      scale[1], 0.0,      0.0,
        0.0,      0.0,      scale[2], 0.0,
        0.0,      0.0,      0.0,      1.0,
    ]
}

/// Builds a unit quaternion rotating `degrees` around `axis`.
///
/// The axis does not need to be normalized. A zero-length axis has no direction
/// to rotate around and yields the identity quaternion.
pub fn quat_from_axis_angle(axis: [f32; 3], degrees: f32) -> [f32; 4] {
    let len = length(axis);
    if len <= f32::EPSILON {
        return IDENTITY_QUAT;
    }

    let half = degrees.to_radians() * 0.5;
    let s = half.sin() / len;
    [axis[0] * s, axis[1] * s, axis[2] * s, half.cos()]
}

/// Converts a quaternion rotation into a 4x4 rotation matrix.
///
/// The quaternion is given as [x, y, z, w] and is expected to be normalized.
///
/// # Returns
/// A 4x4 rotation matrix in column-major order.
pub fn rotation_matrix_from_quat(q: [f32; 4]) -> [f32; 16] {
    let [x, y, z, w] = q;

    let xx = x * x;
    let yy = y * y;
    let zz = z * z;
    let xy = x * y;
    let xz = x * z;
    let yz = y * z;
    let wx = w * x;
    let wy = w * y;
    let wz = w * z;

    [
        1.0 - 2.0 * (yy + zz),  2.0 * (xy + wz),        2.0 * (xz - wy),        0.0,
        2.0 * (xy - wz),        1.0 - 2.0 * (xx + zz),  2.0 * (yz + wx),        0.0,
        2.0 * (xz + wy),        2.0 * (yz - wx),        1.0 - 2.0 * (xx + yy),  0.0,
        0.0,                    0.0,                    0.0,                    1.0,
    ]
}

/// Multiplies two 4x4 matrices `a` and `b` (both in column-major order).
///
/// The multiplication is `result = a * b`, so `b` is applied to a point first.
pub fn matrix_mul_4x4(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut result = [0.0f32; 16];

    for row in 0..4 {
        for col in 0..4 {
            result[col * 4 + row] = a[row] * b[col * 4]
                + a[4 + row] * b[col * 4 + 1]
                + a[8 + row] * b[col * 4 + 2]
                + a[12 + row] * b[col * 4 + 3];
        }
    }

    result
}

/// OpenGL-style perspective projection. `fovy` is the vertical field of view in radians.
///
/// Maps view-space depth `-near..-far` onto clip-space `-1..1`.
pub fn perspective_matrix(fovy: f32, aspect: f32, near: f32, far: f32) -> [f32; 16] {
    let f = 1.0 / (fovy / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (far + near) * nf, -1.0,
        0.0, 0.0, (2.0 * far * near) * nf, 0.0,
    ]
}

/// Right-handed view matrix placing the camera at `eye`, facing `target`.
///
/// After the transform the camera sits at the origin looking down -Z with `up`
/// projected onto +Y. When `eye == target` there is no viewing direction and the
/// result is a plain translation by `-eye`.
pub fn look_at_matrix(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> [f32; 16] {
    let forward = sub(target, eye);
    if length(forward) <= f32::EPSILON {
        return translation_matrix([-eye[0], -eye[1], -eye[2]]);
    }

    let f = normalize(forward);
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        s[0], u[0], -f[0], 0.0,
        s[1], u[1], -f[1], 0.0,
        s[2], u[2], -f[2], 0.0,
        -dot(s, eye), -dot(u, eye), dot(f, eye), 1.0,
    ]
}

/// Applies `m` to the point `p` (w = 1) and performs the perspective divide.
pub fn transform_point(m: &[f32; 16], p: [f32; 3]) -> [f32; 3] {
    let x = m[0] * p[0] + m[4] * p[1] + m[8] * p[2] + m[12];
    let y = m[1] * p[0] + m[5] * p[1] + m[9] * p[2] + m[13];
    let z = m[2] * p[0] + m[6] * p[1] + m[10] * p[2] + m[14];
    let w = m[3] * p[0] + m[7] * p[1] + m[11] * p[2] + m[15];

    if w.abs() <= f32::EPSILON {
        [x, y, z]
    } else {
        [x / w, y / w, z / w]
    }
}

// -- Vector helpers -- //

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length(v: [f32; 3]) -> f32 {
    dot(v, v).sqrt()
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = length(v);
    if len <= f32::EPSILON {
        v
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn identity_is_neutral_for_mul() {
        let t = compute_local_matrix([1.0, 2.0, 3.0], quat_from_axis_angle([0.0, 1.0, 0.0], 30.0), [2.0, 2.0, 2.0]);
        assert_eq!(matrix_mul_4x4(&IDENTITY_MATRIX, &t), t);
        assert_eq!(matrix_mul_4x4(&t, &IDENTITY_MATRIX), t);
    }

    #[test]
    fn local_matrix_scales_before_translating() {
        let m = compute_local_matrix([0.0, -1.5, 0.0], IDENTITY_QUAT, [1.75, 0.75, 1.0]);
        let p = transform_point(&m, [0.5, 0.5, 0.5]);
        assert!(approx(p, [0.875, -1.125, 0.5]));
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_minus_z() {
        let q = quat_from_axis_angle([0.0, 2.0, 0.0], 90.0);
        let p = transform_point(&rotation_matrix_from_quat(q), [1.0, 0.0, 0.0]);
        assert!(approx(p, [0.0, 0.0, -1.0]));
    }

    #[test]
    fn zero_axis_gives_identity_rotation() {
        assert_eq!(quat_from_axis_angle([0.0, 0.0, 0.0], 45.0), IDENTITY_QUAT);
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_negative_z() {
        let view = look_at_matrix([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(approx(transform_point(&view, [0.0, 0.0, 1.0]), [0.0, 0.0, 0.0]));
        assert!(approx(transform_point(&view, [0.0, 0.0, 0.0]), [0.0, 0.0, -1.0]));
        assert!(approx(transform_point(&view, [0.0, 1.0, 1.0]), [0.0, 1.0, 0.0]));
    }

    #[test]
    fn look_at_sideways_keeps_right_handedness() {
        // Looking down -X, world -Z should end up on the camera's right
        let view = look_at_matrix([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(approx(transform_point(&view, [0.0, 0.0, -1.0]), [1.0, 0.0, 0.0]));
    }

    #[test]
    fn look_at_degenerate_direction_falls_back_to_translation() {
        let view = look_at_matrix([1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 0.0]);
        assert_eq!(view, translation_matrix([-1.0, -2.0, -3.0]));
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_clip_bounds() {
        let p = perspective_matrix(90f32.to_radians(), 1.0, 0.1, 100.0);
        assert!((transform_point(&p, [0.0, 0.0, -0.1])[2] + 1.0).abs() < 1e-4);
        assert!((transform_point(&p, [0.0, 0.0, -100.0])[2] - 1.0).abs() < 1e-3);
        // 90 degree fov: a point at 45 degrees lands on the frustum edge
        assert!((transform_point(&p, [0.0, 1.0, -1.0])[1] - 1.0).abs() < 1e-4);
    }
}
