//! Helpers shared by the volume, directory and file layers

pub mod sector;
pub mod string;
