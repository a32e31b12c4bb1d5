//! Test Helper Utilities
//!
//! Shared utilities for testing boptone-qc

#![allow(dead_code, unused_imports)]

pub mod audio_generator;
pub mod ports;

pub use audio_generator::{generate_wav_bytes, WavConfig};
pub use ports::{
    flac_props, mp3_props, validator_with, CannedSource, ScriptedMeasurer,
};
