//! Debayering module for converting Bayer pattern RAW mosaics to RGB

pub mod cpu_debayer;

pub use cpu_debayer::CpuDebayer;
