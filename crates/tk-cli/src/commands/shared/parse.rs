use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use tk_core::enums::{EntityKind, Release};

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let release: Release = parse_enum("release", "release").expect("release should parse");
        assert_eq!(release, Release::Release);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let kind: EntityKind = parse_enum("publish-type", "kind").expect("kind should parse");
        assert_eq!(kind, EntityKind::PublishType);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Release>("final", "release").expect_err("should fail");
        assert!(err.to_string().contains("invalid release 'final'"));
    }
}
