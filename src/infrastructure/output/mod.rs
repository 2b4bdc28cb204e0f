pub mod clip_writer;

pub use clip_writer::ClipWriter;
