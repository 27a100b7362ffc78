#[cfg(test)]
mod tests {
    use crate::*;
    use isodur_common::{error::ConfigError, IsodurError};

    fn config_with_aliases(toml_str: &str) -> Config {
        toml::from_str(toml_str).expect("Config should parse")
    }

    #[test]
    fn test_resolve_alias() {
        let config = config_with_aliases(r#"
            [aliases]
            retention = "P1W"
        "#);

        let duration = config.resolve("retention").unwrap();
        assert_eq!(duration.to_string(), "P1W");

        let duration = config.resolve("  retention ").unwrap();
        assert_eq!(duration.weeks, 1);
    }

    #[test]
    fn test_resolve_literal() {
        let config = Config::default();

        let duration = config.resolve("PT1H2M3S").unwrap();
        assert_eq!(duration.hours, 1);
        assert_eq!(duration.minutes, 2);
        assert_eq!(duration.seconds, 3);
    }

    #[test]
    fn test_resolve_unknown_alias() {
        let config = Config::default();

        match config.resolve("nightly") {
            Err(IsodurError::Config(ConfigError::UnknownAlias { name })) => {
                assert_eq!(name, "nightly");
            }
            other => panic!("Expected UnknownAlias, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_shadowing_literal_fails_validation() {
        let config = config_with_aliases(r#"
            [aliases]
            PT1H = "PT2H"
        "#);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_alias_with_whitespace_fails_validation() {
        let config = config_with_aliases(r#"
            [aliases]
            "two words" = "P1D"
        "#);

        match config.validate() {
            Err(IsodurError::Config(ConfigError::Validation { message })) => {
                assert!(message.contains("two words"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_alias_fails_validation() {
        let config = config_with_aliases(r#"
            [aliases]
            "" = "P1D"
        "#);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_aliases_pass_validation() {
        let config = config_with_aliases(r#"
            [aliases]
            retention = "P1W"
            backup = "P1DT12H"
            heartbeat = "PT30S"
        "#);

        config.validate().expect("Config should validate");
    }
}
