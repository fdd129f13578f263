use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::CString;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use gl::types::{GLchar, GLenum, GLint, GLuint};

pub fn read_shader_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("unable to open shader file {}", path.display()))
}

pub fn compile_shader(src: &str, kind: GLenum) -> Result<GLuint> {
    let len = GLint::try_from(src.len()).context("shader source too large")?;

    unsafe {
        let shader = gl::CreateShader(kind);
        let ptr = src.as_ptr() as *const GLchar;
        gl::ShaderSource(shader, 1, &ptr, &len);
        gl::CompileShader(shader);

        let mut status = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        if status == 0 {
            let log = shader_info_log(shader);
            gl::DeleteShader(shader);
            bail!("{} shader compile error: {}", stage_name(kind), log);
        }

        Ok(shader)
    }
}

fn stage_name(kind: GLenum) -> &'static str {
    match kind {
        gl::VERTEX_SHADER => "vertex",
        gl::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe { gl::GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar) };
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe { gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar) };
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

pub fn create_shader_program(vs_src: &str, fs_src: &str) -> Result<GLuint> {
    let vs = compile_shader(vs_src, gl::VERTEX_SHADER)?;
    let fs = match compile_shader(fs_src, gl::FRAGMENT_SHADER) {
        Ok(fs) => fs,
        Err(e) => {
            unsafe { gl::DeleteShader(vs) };
            return Err(e);
        }
    };

    unsafe {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vs);
        gl::AttachShader(program, fs);
        gl::LinkProgram(program);

        // The program keeps its own copy of the binaries
        gl::DetachShader(program, vs);
        gl::DeleteShader(vs);
        gl::DetachShader(program, fs);
        gl::DeleteShader(fs);

        let mut status = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        if status == 0 {
            let log = program_info_log(program);
            gl::DeleteProgram(program);
            return Err(anyhow!("shader program link error: {log}"));
        }

        Ok(program)
    }
}

/// A linked vertex + fragment program with a per-name uniform location cache.
#[derive(Debug)]
pub struct GLShaderProgram {
    pub id: GLuint,
    locations: RefCell<HashMap<String, GLint>>,
}

impl GLShaderProgram {
    pub fn from_sources(vs_src: &str, fs_src: &str) -> Result<Self> {
        let id = create_shader_program(vs_src, fs_src)?;
        log::info!("linked shader program {id}");
        Ok(Self {
            id,
            locations: RefCell::new(HashMap::new()),
        })
    }

    pub fn from_files(vs_path: &Path, fs_path: &Path) -> Result<Self> {
        let vs_src = read_shader_source(vs_path)?;
        let fs_src = read_shader_source(fs_path)?;
        Self::from_sources(&vs_src, &fs_src).with_context(|| {
            format!("building program from {} and {}", vs_path.display(), fs_path.display())
        })
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    /// Looks up (and caches) a uniform location. `-1` means the driver has no such
    /// active uniform, which GL treats as a silent no-op on upload.
    fn location(&self, name: &str) -> GLint {
        if let Some(&loc) = self.locations.borrow().get(name) {
            return loc;
        }

        let loc = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };
        if loc < 0 {
            log::debug!("uniform {name:?} is not active in program {}", self.id);
        }
        self.locations.borrow_mut().insert(name.to_owned(), loc);
        loc
    }

    pub fn set_uniform_matrix4(&self, name: &str, matrix: &[f32; 16]) {
        let loc = self.location(name);
        if loc >= 0 {
            unsafe { gl::UniformMatrix4fv(loc, 1, gl::FALSE, matrix.as_ptr()) };
        }
    }

    pub fn set_uniform_i32(&self, name: &str, value: i32) {
        let loc = self.location(name);
        if loc >= 0 {
            unsafe { gl::Uniform1i(loc, value) };
        }
    }
}

impl Drop for GLShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}
