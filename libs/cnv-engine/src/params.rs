// ---------------------------------------------------------------------------
// Param parsing & validation (format-independent)
// ---------------------------------------------------------------------------

use cnv_api::config::{Adjust, Notation, Param, ParamKind, ParamType};
use cnv_api::error::ConfigError;

use crate::backend::Backend;
use crate::error::EngineError;

/// Parse a strategy `config` table into typed params for `backend`.
///
/// `config` is a format-independent `serde_json::Value` (already
/// deserialized from TOML or built from command-line assignments).
///
/// - Rejects keys that name no parameter at all.
/// - Rejects parameters the backend does not recognize.
/// - Checks each value against the declared `ParamType`.
///
/// Params are returned in key order. Domain checks (base, precision bound,
/// backend restrictions) happen when the params are applied.
pub fn parse_params(
    config: Option<&serde_json::Value>,
    backend: Backend,
) -> Result<Vec<Param>, EngineError> {
    let obj = match config {
        Some(serde_json::Value::Object(map)) => map,
        Some(_) => {
            return Err(EngineError::Config(
                "strategy config must be a table/object".into(),
            ))
        }
        None => return Ok(Vec::new()),
    };

    let mut params = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        let kind = ParamKind::from_name(key)?;
        if !backend.params().contains(&kind) {
            return Err(ConfigError::Unrecognized {
                strategy: backend.name(),
                param: kind.name(),
            }
            .into());
        }
        params.push(value_to_param(value, kind)?);
    }

    Ok(params)
}

/// Convert a single value to a `Param` according to its declared type.
fn value_to_param(val: &serde_json::Value, kind: ParamKind) -> Result<Param, ConfigError> {
    let param = kind.name();
    let wrong_type = |expected| ConfigError::WrongType { param, expected };

    match kind.param_type() {
        ParamType::Bool => {
            let b = val.as_bool().ok_or_else(|| wrong_type("bool"))?;
            Ok(match kind {
                ParamKind::SkipWs => Param::SkipWs(b),
                _ => Param::Uppercase(b),
            })
        }
        ParamType::U64 => {
            let u = val
                .as_u64()
                .ok_or_else(|| wrong_type("non-negative integer"))?;
            let too_large = || ConfigError::out_of_domain(param, format!("{u} is too large"));
            match kind {
                ParamKind::Base => Param::base(u8::try_from(u).map_err(|_| too_large())?),
                ParamKind::Precision => Ok(Param::Precision(
                    u32::try_from(u).map_err(|_| too_large())?,
                )),
                _ => Ok(Param::Width(usize::try_from(u).map_err(|_| too_large())?)),
            }
        }
        ParamType::Char => {
            let s = val.as_str().ok_or_else(|| wrong_type("single character"))?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Param::Fill(c)),
                _ => Err(wrong_type("single character")),
            }
        }
        ParamType::Word => {
            if !val.is_string() {
                return Err(wrong_type("string"));
            }
            let word = |e: serde_json::Error| ConfigError::out_of_domain(param, e.to_string());
            match kind {
                ParamKind::Adjust => serde_json::from_value::<Adjust>(val.clone())
                    .map(Param::Adjust)
                    .map_err(word),
                _ => serde_json::from_value::<Notation>(val.clone())
                    .map(Param::Notation)
                    .map_err(word),
            }
        }
    }
}

/// Build a config object from `key=value` assignments.
///
/// Values are typed by the parameter they name, so `fill_char=0` is the
/// character `'0'` while `field_width=0` is a number. Keys are stored under
/// their canonical names, so aliases resolve to the same entry.
pub fn parse_assignments<'a>(
    pairs: impl IntoIterator<Item = &'a str>,
) -> Result<serde_json::Value, EngineError> {
    let mut obj = serde_json::Map::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            EngineError::Config(format!("expected key=value, got '{pair}'"))
        })?;
        let kind = ParamKind::from_name(key)?;
        let value = match kind.param_type() {
            ParamType::Bool => raw
                .parse::<bool>()
                .map(serde_json::Value::Bool)
                .map_err(|_| ConfigError::WrongType {
                    param: kind.name(),
                    expected: "bool",
                })?,
            ParamType::U64 => raw
                .parse::<u64>()
                .map(serde_json::Value::from)
                .map_err(|_| ConfigError::WrongType {
                    param: kind.name(),
                    expected: "non-negative integer",
                })?,
            ParamType::Char | ParamType::Word => serde_json::Value::String(raw.to_string()),
        };
        obj.insert(kind.name().to_string(), value);
    }
    Ok(serde_json::Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use cnv_api::config::Base;
    use serde_json::json;

    use super::*;

    #[test]
    fn typed_params_in_key_order() {
        let config = json!({ "base": 16, "fill": "0", "uppercase": true, "width": 4 });
        let params = parse_params(Some(&config), Backend::Strtol).unwrap();
        assert_eq!(
            params,
            vec![
                Param::Base(Base::Hex),
                Param::Fill('0'),
                Param::Uppercase(true),
                Param::Width(4),
            ]
        );
        assert!(parse_params(None, Backend::Strtol).unwrap().is_empty());
    }

    #[test]
    fn generic_option_names_are_accepted() {
        let config = json!({ "field_width": 6, "fill_char": "0" });
        let params = parse_params(Some(&config), Backend::Printf).unwrap();
        assert_eq!(params, vec![Param::Width(6), Param::Fill('0')]);

        let err = parse_params(Some(&json!({ "field_width": 2 })), Backend::Lexical).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter error: lexical: unrecognized parameter 'field_width'"
        );
    }

    #[test]
    fn rejects_unknown_and_unrecognized_keys() {
        let err = parse_params(Some(&json!({ "radix": 16 })), Backend::Strtol).unwrap_err();
        assert_eq!(err.to_string(), "parameter error: unknown parameter 'radix'");

        let err = parse_params(Some(&json!({ "skipws": true })), Backend::Strtol).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Param(ConfigError::Unrecognized {
                strategy: "strtol",
                param: "skipws"
            })
        ));
    }

    #[test]
    fn rejects_wrong_types() {
        for config in [
            json!({ "base": "16" }),
            json!({ "width": -1 }),
            json!({ "fill": "ab" }),
            json!({ "fill": 0 }),
            json!({ "uppercase": 1 }),
            json!({ "adjust": 1 }),
        ] {
            let err = parse_params(Some(&config), Backend::Strtol).unwrap_err();
            assert!(
                matches!(err, EngineError::Param(ConfigError::WrongType { .. })),
                "{config}: {err}"
            );
        }
        assert!(matches!(
            parse_params(Some(&json!([1, 2])), Backend::Strtol),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn words_and_radixes_are_checked() {
        let err = parse_params(Some(&json!({ "adjust": "middle" })), Backend::Strtol).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Param(ConfigError::OutOfDomain { param: "adjust", .. })
        ));
        let err = parse_params(Some(&json!({ "base": 3 })), Backend::Spirit).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Param(ConfigError::OutOfDomain { param: "base", .. })
        ));
        let params = parse_params(Some(&json!({ "notation": "scientific" })), Backend::Spirit);
        assert_eq!(params.unwrap(), vec![Param::Notation(Notation::Scientific)]);
    }

    #[test]
    fn assignments_are_typed_by_param() {
        let value =
            parse_assignments(["fill_char=0", "field_width=0", "skipws=false", "adjust=left"])
                .unwrap();
        assert_eq!(
            value,
            json!({ "fill_char": "0", "field_width": 0, "skipws": false, "adjust": "left" })
        );
        let aliased = parse_assignments(["fill=0", "width=0", "skipws=false", "adjust=left"]);
        assert_eq!(aliased.unwrap(), value);
        assert!(parse_assignments(["field_width"]).is_err());
        assert!(parse_assignments(["width=wide"]).is_err());
        assert!(parse_assignments(["colour=red"]).is_err());
    }
}
