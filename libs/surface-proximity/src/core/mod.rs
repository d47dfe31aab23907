//! Core vector types shared by the proximity modules.

pub mod vec3;
