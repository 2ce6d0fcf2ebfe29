//! Display configuration.
//!
//! Defaults work without any file. With the `config` feature enabled, settings can be
//! loaded from TOML, either from an explicit path or from
//! `<config_dir>/pilot-view/config.toml`:
//!
//! ```toml
//! strategy = "animated"
//! fade-ms = 150
//! tick-ms = 16
//! enable-logging = false
//! theme = "high-contrast"
//! ```

use crate::display::{
    AnimatedDisplayStrategy, DirectDisplayStrategy, DisplayContext, DisplayStrategy,
};
use crate::error::{DisplayError, Result};
use crate::render::ui::ColorTheme;
use std::str::FromStr;
use std::time::Duration;

/// Which built-in display strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    Direct,
    #[default]
    Animated,
}

impl FromStr for StrategyKind {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "direct" => Ok(Self::Direct),
            "animated" => Ok(Self::Animated),
            other => Err(DisplayError::config(format!(
                "unknown strategy '{other}', expected 'direct' or 'animated'"
            ))),
        }
    }
}

/// Named color palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl FromStr for ThemeName {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "monochrome" => Ok(Self::Monochrome),
            "high-contrast" => Ok(Self::HighContrast),
            other => Err(DisplayError::config(format!("unknown theme '{other}'"))),
        }
    }
}

impl From<ThemeName> for ColorTheme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => ColorTheme::default(),
            ThemeName::Monochrome => ColorTheme::monochrome(),
            ThemeName::HighContrast => ColorTheme::high_contrast(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, rename_all = "kebab-case"))]
pub struct DisplayConfig {
    pub strategy: StrategyKind,
    /// Fade length in milliseconds for the animated strategy.
    pub fade_ms: u64,
    /// Frame interval in milliseconds for advancing transitions.
    pub tick_ms: u64,
    /// Log every render decision at info level.
    pub enable_logging: bool,
    pub theme: ThemeName,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Animated,
            fade_ms: 150,
            tick_ms: 16,
            enable_logging: false,
            theme: ThemeName::Default,
        }
    }
}

impl DisplayConfig {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn color_theme(&self) -> ColorTheme {
        self.theme.into()
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(DisplayError::config("tick-ms must be greater than zero"));
        }
        if self.fade_ms > 10_000 {
            return Err(DisplayError::config(format!(
                "fade-ms of {} is longer than the 10s limit",
                self.fade_ms
            )));
        }
        Ok(())
    }

    /// Build the configured strategy.
    pub fn build_strategy<T, V>(
        &self,
        context: DisplayContext,
    ) -> Box<dyn DisplayStrategy<T, V> + Send>
    where
        T: Send + Sync + 'static,
        V: Send + 'static,
    {
        match self.strategy {
            StrategyKind::Direct => Box::new(DirectDisplayStrategy::new(context)),
            StrategyKind::Animated => {
                Box::new(AnimatedDisplayStrategy::with_fade(context, self.fade()))
            }
        }
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "config")]
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| DisplayError::config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config")]
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            DisplayError::io(format!("Failed to read config: {}", path.display()), e)
        })?;
        Self::from_toml(&source)
    }

    /// Load the user config file, falling back to defaults when there is none.
    #[cfg(feature = "config")]
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    #[cfg(feature = "config")]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pilot-view").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DisplayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy, StrategyKind::Animated);
        assert_eq!(config.fade(), Duration::from_millis(150));
        assert_eq!(config.tick(), Duration::from_millis(16));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let config = DisplayConfig {
            tick_ms: 0,
            ..DisplayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DisplayError::ConfigError { .. })
        ));
    }

    #[test]
    fn names_parse() {
        assert_eq!("direct".parse::<StrategyKind>().unwrap(), StrategyKind::Direct);
        assert_eq!(
            "high-contrast".parse::<ThemeName>().unwrap(),
            ThemeName::HighContrast
        );
        assert!("sideways".parse::<StrategyKind>().is_err());
        assert!("neon".parse::<ThemeName>().is_err());
    }

    #[test]
    fn build_strategy_matches_kind() {
        let direct = DisplayConfig {
            strategy: StrategyKind::Direct,
            ..DisplayConfig::default()
        };
        let mut strategy = direct.build_strategy::<(), ()>(DisplayContext::default());
        strategy.show(crate::element::VisualElement::bind(
            std::sync::Arc::new(()),
            crate::element::ViewKind::new("unit"),
            (),
        ));
        assert!(strategy.is_settled());
        assert_eq!(strategy.current().map(|e| e.opacity()), Some(1.0));

        let animated = DisplayConfig::default();
        let mut strategy = animated.build_strategy::<(), ()>(DisplayContext::default());
        strategy.show(crate::element::VisualElement::bind(
            std::sync::Arc::new(()),
            crate::element::ViewKind::new("unit"),
            (),
        ));
        assert!(!strategy.is_settled());
        assert_eq!(strategy.current().map(|e| e.opacity()), Some(0.0));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_overrides_defaults() {
        let config = DisplayConfig::from_toml(
            r#"
            strategy = "direct"
            fade-ms = 80
            theme = "monochrome"
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, StrategyKind::Direct);
        assert_eq!(config.fade_ms, 80);
        assert_eq!(config.theme, ThemeName::Monochrome);
        assert_eq!(config.tick_ms, 16);
    }

    #[cfg(feature = "config")]
    #[test]
    fn load_from_reports_invalid_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "tick-ms = 0\n").unwrap();

        let err = DisplayConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, DisplayError::ConfigError { .. }));
    }

    #[cfg(feature = "config")]
    #[test]
    fn load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DisplayError::IoError { .. }));
    }
}
