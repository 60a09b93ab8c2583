//! Folio runtime: directory layout, the fixed-timestep frame loop and the
//! built-in demo level.

pub mod app_dirs;
pub mod demo;
pub mod frame_loop;
