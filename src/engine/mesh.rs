use std::mem::{offset_of, size_of};

use gl::{self, types::*};

/// Vertex format storing position, color, and uv texture coordinates.
///
/// Color is three unsigned bytes; the attribute is normalized so the shader sees 0.0..1.0.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3], // x, y, z
    pub color: [u8; 3],     // r, g, b
    pub uv: [f32; 2],       // texture coordinates u, v
}

/// Vertices per cube face (two triangles).
pub const FACE_VERTEX_COUNT: usize = 6;

/// Number of faces on the cube mesh.
pub const CUBE_FACE_COUNT: usize = 6;

const WHITE: [u8; 3] = [255, 255, 255];

const fn v(x: f32, y: f32, z: f32, u: f32, t: f32) -> Vertex {
    Vertex { position: [x, y, z], color: WHITE, uv: [u, t] }
}

/// Unit cube as 36 unindexed vertices, faces in order front, back, left, right, top, bottom.
///
/// UVs address a 4x3 cross-shaped atlas: the middle row holds left, front, right
/// and back; top sits above the front cell and bottom below it.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 36] = [
    // Front
    v(-0.5, -0.5,  0.5,  0.25, 0.33),
    v( 0.5, -0.5,  0.5,  0.5,  0.33),
    v( 0.5,  0.5,  0.5,  0.5,  0.67),
    v( 0.5,  0.5,  0.5,  0.5,  0.67),
    v(-0.5,  0.5,  0.5,  0.25, 0.67),
    v(-0.5, -0.5,  0.5,  0.25, 0.33),
    // Back
    v(-0.5, -0.5, -0.5,  1.0,  0.33),
    v( 0.5, -0.5, -0.5,  0.75, 0.33),
    v( 0.5,  0.5, -0.5,  0.75, 0.67),
    v( 0.5,  0.5, -0.5,  0.75, 0.67),
    v(-0.5,  0.5, -0.5,  1.0,  0.67),
    v(-0.5, -0.5, -0.5,  1.0,  0.33),
    // Left
    v(-0.5, -0.5, -0.5,  0.0,  0.33),
    v(-0.5, -0.5,  0.5,  0.25, 0.33),
    v(-0.5,  0.5,  0.5,  0.25, 0.67),
    v(-0.5,  0.5,  0.5,  0.25, 0.67),
    v(-0.5,  0.5, -0.5,  0.0,  0.67),
    v(-0.5, -0.5, -0.5,  0.0,  0.33),
    // Right
    v( 0.5, -0.5,  0.5,  0.5,  0.33),
    v( 0.5, -0.5, -0.5,  0.75, 0.33),
    v( 0.5,  0.5, -0.5,  0.75, 0.67),
    v( 0.5,  0.5, -0.5,  0.75, 0.67),
    v( 0.5,  0.5,  0.5,  0.5,  0.67),
    v( 0.5, -0.5,  0.5,  0.5,  0.33),
    // Top
    v(-0.5,  0.5,  0.5,  0.25, 0.67),
    v( 0.5,  0.5,  0.5,  0.5,  0.67),
    v( 0.5,  0.5, -0.5,  0.5,  1.0),
    v( 0.5,  0.5, -0.5,  0.5,  1.0),
    v(-0.5,  0.5, -0.5,  0.25, 1.0),
    v(-0.5,  0.5,  0.5,  0.25, 0.67),
    // Bottom
    v(-0.5, -0.5, -0.5,  0.25, 0.0),
    v( 0.5, -0.5, -0.5,  0.5,  0.0),
    v( 0.5, -0.5,  0.5,  0.5,  0.33),
    v( 0.5, -0.5,  0.5,  0.5,  0.33),
    v(-0.5, -0.5,  0.5,  0.25, 0.33),
    v(-0.5, -0.5, -0.5,  0.25, 0.0),
];

/// CPU-side mesh data, drawn as a plain triangle list.
///
/// This struct only holds vertices. Upload it with [`GLMesh::upload`] once a GL
/// context is current.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Triangle list; every three vertices form one triangle.
    pub vertices: Vec<Vertex>,
}

impl Geometry {
    /// The 36-vertex textured cube.
    pub fn cube() -> Self {
        Self { vertices: CUBE_VERTICES.to_vec() }
    }

    /// Vertices belonging to face `index`, or `None` past the last face.
    pub fn face(&self, index: usize) -> Option<&[Vertex]> {
        let start = index.checked_mul(FACE_VERTEX_COUNT)?;
        self.vertices.get(start..start.checked_add(FACE_VERTEX_COUNT)?)
    }
}

/// OpenGL mesh: a VBO holding the vertices and a VAO describing their layout.
///
/// Attribute 0 is position, 1 is color, 2 is uv.
#[derive(Debug)]
pub struct GLMesh {
    pub vao: GLuint,
    pub vbo: GLuint,
    pub vertex_count: usize,
}

impl GLMesh {
    /// Uploads `geometry` into a static vertex buffer and records the attribute layout.
    ///
    /// Requires a current GL context with loaded function pointers.
    pub fn upload(geometry: &Geometry) -> Self {
        let stride = size_of::<Vertex>() as GLsizei;
        let mut vbo = 0;
        let mut vao = 0;

        unsafe {
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (geometry.vertices.len() * size_of::<Vertex>()) as GLsizeiptr,
                geometry.vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Vertex, position) as *const _,
            );

            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                3,
                gl::UNSIGNED_BYTE,
                gl::TRUE,
                stride,
                offset_of!(Vertex, color) as *const _,
            );

            gl::EnableVertexAttribArray(2);
            gl::VertexAttribPointer(
                2,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Vertex, uv) as *const _,
            );

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Self {
            vao,
            vbo,
            vertex_count: geometry.vertices.len(),
        }
    }

    /// Draws the whole vertex buffer as triangles.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for GLMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces_of_two_triangles() {
        let cube = Geometry::cube();
        assert_eq!(cube.vertices.len(), CUBE_FACE_COUNT * FACE_VERTEX_COUNT);
    }

    #[test]
    fn corners_sit_on_half_unit_and_are_white() {
        for vertex in Geometry::cube().vertices {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
            assert_eq!(vertex.color, WHITE);
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn each_face_is_flat_on_its_axis() {
        // (axis, value) per face: front, back, left, right, top, bottom
        let expected = [(2, 0.5), (2, -0.5), (0, -0.5), (0, 0.5), (1, 0.5), (1, -0.5)];
        let cube = Geometry::cube();
        for (index, (axis, value)) in expected.into_iter().enumerate() {
            let face = cube.face(index).unwrap();
            assert!(
                face.iter().all(|v| v.position[axis] == value),
                "face {index} is not flat on axis {axis}"
            );
        }
    }

    #[test]
    fn each_face_samples_its_atlas_cell() {
        // (u range, v range) per face: front, back, left, right, top, bottom
        let cells = [
            ((0.25, 0.5), (0.33, 0.67)),
            ((0.75, 1.0), (0.33, 0.67)),
            ((0.0, 0.25), (0.33, 0.67)),
            ((0.5, 0.75), (0.33, 0.67)),
            ((0.25, 0.5), (0.67, 1.0)),
            ((0.25, 0.5), (0.0, 0.33)),
        ];
        let cube = Geometry::cube();
        for (index, ((u0, u1), (v0, v1))) in cells.into_iter().enumerate() {
            let face = cube.face(index).unwrap();
            for vertex in face {
                let [u, v] = vertex.uv;
                assert!((u0..=u1).contains(&u), "face {index} u {u} outside {u0}..{u1}");
                assert!((v0..=v1).contains(&v), "face {index} v {v} outside {v0}..{v1}");
            }
            // The face covers its whole cell, not a sliver of it
            let us = face.iter().map(|v| v.uv[0]);
            let vs = face.iter().map(|v| v.uv[1]);
            assert_eq!(us.clone().fold(f32::MAX, f32::min), u0, "face {index}");
            assert_eq!(us.fold(f32::MIN, f32::max), u1, "face {index}");
            assert_eq!(vs.clone().fold(f32::MAX, f32::min), v0, "face {index}");
            assert_eq!(vs.fold(f32::MIN, f32::max), v1, "face {index}");
        }
    }

    #[test]
    fn face_index_past_the_cube_is_none() {
        let cube = Geometry::cube();
        assert!(cube.face(CUBE_FACE_COUNT - 1).is_some());
        assert!(cube.face(CUBE_FACE_COUNT).is_none());
        assert!(cube.face(usize::MAX).is_none());
    }

    #[test]
    fn vertex_layout_matches_attribute_pointers() {
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, color), 12);
        assert_eq!(offset_of!(Vertex, uv), 16);
        assert_eq!(size_of::<Vertex>(), 24);
    }
}
