//! Typed, range-constrained effect parameters.

use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    #[error("parameter '{name}' expects {expected:?}, got {got:?}")]
    KindMismatch {
        name: String,
        expected: ParamKind,
        got: ParamKind,
    },
    #[error("invalid color literal '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

/// The value shape of a parameter, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Color,
    Count,
}

/// A single parameter value as supplied by the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Color([f32; 3]),
    Count(i32),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Color(_) => ParamKind::Color,
            ParamValue::Count(_) => ParamKind::Count,
        }
    }
}

/// Declares one parameter of an effect: its kind, declared range, UI step,
/// default, and the optional damping rate used when a new value is synced
/// (per-second exponential approach; `None` snaps immediately).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub smoothing: Option<f32>,
}

impl ParamSpec {
    pub fn scalar(name: &'static str, default: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            name,
            kind: ParamKind::Scalar,
            default: ParamValue::Scalar(default),
            min,
            max,
            step,
            smoothing: None,
        }
    }

    pub fn smoothed(mut self, rate: f32) -> Self {
        self.smoothing = Some(rate);
        self
    }

    pub fn count(name: &'static str, default: i32, min: i32, max: i32) -> Self {
        Self {
            name,
            kind: ParamKind::Count,
            default: ParamValue::Count(default),
            min: min as f32,
            max: max as f32,
            step: 1.0,
            smoothing: None,
        }
    }

    pub fn color(name: &'static str, default: [f32; 3]) -> Self {
        Self {
            name,
            kind: ParamKind::Color,
            default: ParamValue::Color(default),
            min: 0.0,
            max: 1.0,
            step: 0.0,
            smoothing: None,
        }
    }

    /// Clamps a value of this spec's kind into the declared range.
    pub fn clamp(&self, value: ParamValue) -> ParamValue {
        match value {
            ParamValue::Scalar(v) => ParamValue::Scalar(v.clamp(self.min, self.max)),
            ParamValue::Color(c) => {
                ParamValue::Color(c.map(|ch| ch.clamp(self.min, self.max)))
            }
            ParamValue::Count(v) => {
                ParamValue::Count(v.clamp(self.min as i32, self.max as i32))
            }
        }
    }
}

/// A snapshot of named parameter values for one effect.
///
/// The control surface owns the set and may rewrite values between any two
/// ticks; the renderer only reads it. Keys are fixed when the set is built
/// from the effect's specs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn from_specs(specs: &[ParamSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default))
            .collect();
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    /// Replaces a value; the key must exist and keep its kind.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))?;
        if slot.kind() != value.kind() {
            return Err(ParamError::KindMismatch {
                name: name.to_string(),
                expected: slot.kind(),
                got: value.kind(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Removes a key; the renderer must keep the slot's last value alive.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Parses `#rrggbb` (leading `#` optional) into normalized RGB.
///
/// Hex conversion is a control-surface concern; kernels only ever see the
/// normalized triple.
pub fn parse_hex_color(input: &str) -> Result<[f32; 3], ParamError> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParamError::InvalidColor(input.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ParamError::InvalidColor(input.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_seeds_defaults_from_specs() {
        let specs = [
            ParamSpec::scalar("speed", 2.0, 0.1, 10.0, 0.1),
            ParamSpec::color("tint", [1.0, 0.5, 0.0]),
            ParamSpec::count("layers", 3, 1, 5),
        ];
        let set = ParameterSet::from_specs(&specs);
        assert_eq!(set.get("speed"), Some(ParamValue::Scalar(2.0)));
        assert_eq!(set.get("tint"), Some(ParamValue::Color([1.0, 0.5, 0.0])));
        assert_eq!(set.get("layers"), Some(ParamValue::Count(3)));
    }

    #[test]
    fn set_rejects_unknown_names_and_kind_changes() {
        let specs = [ParamSpec::scalar("speed", 2.0, 0.1, 10.0, 0.1)];
        let mut set = ParameterSet::from_specs(&specs);
        assert!(matches!(
            set.set("nope", ParamValue::Scalar(1.0)),
            Err(ParamError::Unknown(_))
        ));
        assert!(matches!(
            set.set("speed", ParamValue::Count(3)),
            Err(ParamError::KindMismatch { .. })
        ));
        assert!(set.set("speed", ParamValue::Scalar(5.0)).is_ok());
    }

    #[test]
    fn clamp_respects_declared_ranges() {
        let spec = ParamSpec::scalar("v", 0.5, 0.0, 1.0, 0.01);
        assert_eq!(spec.clamp(ParamValue::Scalar(7.0)), ParamValue::Scalar(1.0));
        assert_eq!(
            spec.clamp(ParamValue::Scalar(-3.0)),
            ParamValue::Scalar(0.0)
        );
        let count = ParamSpec::count("n", 2, 1, 10);
        assert_eq!(count.clamp(ParamValue::Count(99)), ParamValue::Count(10));
    }

    #[test]
    fn hex_colors_parse_with_and_without_hash() {
        assert_eq!(parse_hex_color("#ff8800").unwrap(), [1.0, 136.0 / 255.0, 0.0]);
        assert_eq!(parse_hex_color("ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert!(parse_hex_color("#ff88").is_err());
        assert!(parse_hex_color("#gg8800").is_err());
    }
}
