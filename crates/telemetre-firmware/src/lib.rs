//! Hardware-specific support code for the telemetre-rs firmware.

#![no_std]

pub mod ft6336u;
