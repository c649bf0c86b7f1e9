//! Backdrop selection and texture-derived grid-dot color
//!
//! Backdrops are cosmetic and load asynchronously on the host side, so this
//! module is deliberately decoupled from the frame loop: the host fetches a
//! backdrop list and samples the active texture whenever it likes, and a
//! [`RequestGuard`] token tells it whether the result is still the newest
//! request by the time it lands.

use serde::{Deserialize, Serialize};

/// One tileable backdrop option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub id: String,
    pub name: String,
    /// Host-resolved texture reference; empty means plain dots on no texture
    #[serde(default)]
    pub url: String,
}

/// The built-in backdrop list used whenever a fetched list is unusable
pub fn fallback_backgrounds() -> Vec<Background> {
    let entry = |id: &str, name: &str, url: &str| Background {
        id: id.into(),
        name: name.into(),
        url: url.into(),
    };
    vec![
        entry("dirt", "Dirt", "backgrounds/dirt-tile.png"),
        entry("grass", "Grass", "backgrounds/grass-tile.png"),
        entry("gravel", "Gravel", "backgrounds/gravel-tile.png"),
        entry("sand", "Sand", "backgrounds/sand-tile.png"),
        entry("tile", "Tile", "backgrounds/tile-tile.png"),
    ]
}

/// Parse a fetched backdrop list, substituting the built-ins when the payload
/// is not a non-empty JSON array of records
pub fn parse_background_list(json: &str) -> Vec<Background> {
    match serde_json::from_str::<Vec<Background>>(json) {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => {
            log::warn!("backdrop list is empty, using built-ins");
            fallback_backgrounds()
        }
        Err(err) => {
            log::warn!("backdrop list unreadable ({err}), using built-ins");
            fallback_backgrounds()
        }
    }
}

/// Resolve the active backdrop: the matching id, else the first listed, else
/// the first built-in
pub fn active_background(list: &[Background], id: &str) -> Background {
    list.iter()
        .find(|b| b.id == id)
        .or_else(|| list.first())
        .cloned()
        .unwrap_or_else(|| fallback_backgrounds().remove(0))
}

/// Grid-dot color classification over the active backdrop texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotColor {
    /// Light dots for dark textures
    Light,
    /// Dark dots for bright textures
    Dark,
    /// Used when no texture is set or sampling failed
    Neutral,
}

impl DotColor {
    /// CSS color the host paints the grid dots with
    pub fn css(self) -> &'static str {
        match self {
            DotColor::Light => "rgba(241, 245, 249, 0.8)",
            DotColor::Dark => "rgba(30, 41, 59, 0.7)",
            DotColor::Neutral => "rgba(148, 163, 184, 0.9)",
        }
    }
}

/// Mean Rec. 709 luminance of tightly packed RGBA pixel data, in [0, 1].
/// Alpha is ignored; trailing partial pixels are ignored.
pub fn average_luminance(rgba: &[u8]) -> f32 {
    let mut total = 0.0f32;
    let mut count = 0u32;
    for px in rgba.chunks_exact(4) {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;
        total += (0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0;
        count += 1;
    }
    total / count.max(1) as f32
}

/// Pick the dot color for a sampled texture. `None` means the texture could
/// not be sampled.
pub fn dot_color_for_luminance(average: Option<f32>) -> DotColor {
    match average {
        Some(luminance) if luminance > 0.6 => DotColor::Dark,
        Some(_) => DotColor::Light,
        None => DotColor::Neutral,
    }
}

/// Monotonic request tokens for asynchronous backdrop work.
///
/// This is cancellation by versioning, not true cancellation: every new
/// request bumps the token, and a completed result is applied only if its
/// token is still current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGuard {
    current: u64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating all outstanding ones
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Whether a completed request's result should still be applied
    pub fn is_current(&self, token: u64) -> bool {
        token == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_list() {
        let list = parse_background_list(
            r#"[{"id":"moss","name":"Moss","url":"backgrounds/moss.png"}]"#,
        );
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "moss");
    }

    #[test]
    fn test_parse_falls_back_on_garbage_and_empty() {
        assert_eq!(parse_background_list("not json"), fallback_backgrounds());
        assert_eq!(parse_background_list("[]"), fallback_backgrounds());
        assert_eq!(parse_background_list("{\"id\":1}"), fallback_backgrounds());
    }

    #[test]
    fn test_active_background_resolution_chain() {
        let list = fallback_backgrounds();
        assert_eq!(active_background(&list, "sand").id, "sand");
        assert_eq!(active_background(&list, "no-such").id, "dirt");
        assert_eq!(active_background(&[], "anything").id, "dirt");
    }

    #[test]
    fn test_luminance_extremes() {
        let white = [255u8, 255, 255, 255];
        let black = [0u8, 0, 0, 255];
        assert!((average_luminance(&white) - 1.0).abs() < 1e-3);
        assert!(average_luminance(&black) < 1e-6);

        let mixed: Vec<u8> = white.iter().chain(black.iter()).copied().collect();
        assert!((average_luminance(&mixed) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_luminance_of_empty_data_is_zero() {
        assert_eq!(average_luminance(&[]), 0.0);
        // Partial trailing pixel ignored
        assert_eq!(average_luminance(&[255, 255]), 0.0);
    }

    #[test]
    fn test_dot_color_thresholds() {
        assert_eq!(dot_color_for_luminance(Some(0.8)), DotColor::Dark);
        assert_eq!(dot_color_for_luminance(Some(0.6)), DotColor::Light);
        assert_eq!(dot_color_for_luminance(Some(0.2)), DotColor::Light);
        assert_eq!(dot_color_for_luminance(None), DotColor::Neutral);
    }

    #[test]
    fn test_stale_request_is_discarded() {
        let mut guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
