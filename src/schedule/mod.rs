pub mod reveal;
