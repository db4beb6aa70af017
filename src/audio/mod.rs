// Audio playback module
// Plays clip files and synthesized speech buffers through rodio

pub mod player;

pub use player::{PlaybackSource, Player};
