#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::{Config, DisplayConfig, GravityConfig, TimingConfig};
    use ratatui::style::Color;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.gravity.interval_ms, 1000);
        assert_eq!(config.gravity.interval(), Duration::from_secs(1));
        assert_eq!(config.timing.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.timing.update_interval(), Duration::from_millis(50));
        assert!(config.display.show_grid_lines);
        assert_eq!(config.display.fill_color, None);
    }

    #[test]
    fn test_fill_color_parsing() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.fill_color(), None);

        display.fill_color = Some("blue".to_string());
        assert_eq!(display.fill_color(), Some(Color::Blue));

        display.fill_color = Some("#ff0000".to_string());
        assert_eq!(display.fill_color(), Some(Color::Rgb(255, 0, 0)));

        display.fill_color = Some("not a color".to_string());
        assert_eq!(display.fill_color(), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.gravity.interval_ms = 400;
        config.timing.update_interval_ms = 20;
        config.display.fill_color = Some("green".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.gravity, config.gravity);
        assert_eq!(parsed.timing, config.timing);
        assert_eq!(parsed.display, config.display);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str(
            r"
            [gravity]
            interval_ms = 250
            ",
        )
        .unwrap();

        assert_eq!(parsed.gravity, GravityConfig { interval_ms: 250 });
        assert_eq!(parsed.timing, TimingConfig::default());
        assert_eq!(parsed.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.gravity, GravityConfig::default());
        assert_eq!(parsed.display, DisplayConfig::default());
    }
}
