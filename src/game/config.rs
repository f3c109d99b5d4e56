//! Tunables for the platformer level scene.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub background_layer: String,
    pub ground_layer: String,
    pub foreground_layer: String,
    pub platform_layer: String,
    pub object_layer: String,
    pub spawn_object: String,
    /// Foreground sits above every other layer and the player.
    pub foreground_depth: i32,
    /// Tile placed where the pointer is held down.
    pub painted_tile: u32,
    pub death_shake_duration: Duration,
    pub death_shake_intensity: f32,
    pub death_fade_duration: Duration,
    pub death_fade_color: [u8; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_layer: "Background".to_string(),
            ground_layer: "Ground".to_string(),
            foreground_layer: "Foreground".to_string(),
            platform_layer: "Platform".to_string(),
            object_layer: "Objects".to_string(),
            spawn_object: "Spawn Point".to_string(),
            foreground_depth: 10,
            painted_tile: 6,
            death_shake_duration: Duration::from_millis(100),
            death_shake_intensity: 0.05,
            death_fade_duration: Duration::from_millis(250),
            death_fade_color: [0, 0, 0],
        }
    }
}

impl SceneConfig {
    pub fn set_painted_tile(&mut self, index: u32) {
        self.painted_tile = index;
    }

    pub fn set_death_fade(&mut self, duration: Duration, color: [u8; 3]) {
        self.death_fade_duration = duration;
        self.death_fade_color = color;
    }

    pub fn set_death_shake(&mut self, duration: Duration, intensity: f32) {
        self.death_shake_duration = duration;
        self.death_shake_intensity = intensity;
    }
}
