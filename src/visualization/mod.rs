pub mod frame_png;
