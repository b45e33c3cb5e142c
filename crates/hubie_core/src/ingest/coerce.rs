use serde_json::Value;

use crate::error::{ErrorContext, MatchError, Result};

/// Coerce a feed identifier to an integer.
///
/// Accepts integers, integral floats (`200448.0`) and numeric strings.
/// `null`, `""` and `0` mean "absent" (the feed zero-fills empty columns).
pub(crate) fn coerce_id(value: &Value, field: &str, context: ErrorContext) -> Result<Option<u32>> {
    let number = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(v)
            } else if let Some(f) = n.as_f64() {
                integral(f)
            } else {
                None
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };

    let Some(number) = number else {
        return Err(MatchError::parse(
            context,
            format!("field '{field}' is not an integer identifier: {value}"),
        ));
    };

    if number == 0 {
        return Ok(None);
    }
    u32::try_from(number).map(Some).map_err(|_| {
        MatchError::parse(context, format!("field '{field}' is out of range: {number}"))
    })
}

fn integral(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}
