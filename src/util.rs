//! Small helpers that don't belong to the virtual machine itself.

pub mod bit_splitter;
