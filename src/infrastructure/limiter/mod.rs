pub mod fixed_window;
