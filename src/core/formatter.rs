use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Converts raw samples into chart values and chart values into display text.
///
/// Implementations must be stateless: one instance is shared by every series
/// plotted against the same axis.
pub trait ValueFormatter: Send + Sync {
    fn transform(&self, raw: f64) -> f64;
    fn format(&self, value: f64) -> String;
    fn unit_label(&self) -> Option<&str>;
}

/// Formatters used by the GC space/summary charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinFormatter {
    Seconds,
    MillisFromSeconds,
    Bytes,
    KilobytesFromBytes,
    MegabytesFromBytes,
    Count,
    Bool,
    Committed,
}

impl ValueFormatter for BuiltinFormatter {
    fn transform(&self, raw: f64) -> f64 {
        match self {
            Self::MillisFromSeconds => raw * 1000.0,
            Self::KilobytesFromBytes => raw / KB,
            Self::MegabytesFromBytes => raw / MB,
            Self::Seconds | Self::Bytes | Self::Count | Self::Bool | Self::Committed => raw,
        }
    }

    fn format(&self, value: f64) -> String {
        match self {
            Self::Seconds | Self::MillisFromSeconds => format_fixed(value, 4),
            Self::KilobytesFromBytes | Self::MegabytesFromBytes => format_fixed(value, 2),
            Self::Bytes | Self::Count => format_plain(value),
            Self::Bool => (if value != 0.0 { "True" } else { "False" }).to_owned(),
            Self::Committed => (if value != 0.0 {
                "Committed"
            } else {
                "Not Committed"
            })
            .to_owned(),
        }
    }

    fn unit_label(&self) -> Option<&str> {
        match self {
            Self::Seconds => Some("sec"),
            Self::MillisFromSeconds => Some("ms"),
            Self::Bytes => Some("bytes"),
            Self::KilobytesFromBytes => Some("KB"),
            Self::MegabytesFromBytes => Some("MB"),
            Self::Count => Some("count"),
            Self::Bool | Self::Committed => None,
        }
    }
}

/// Shared formatter handle stored in axis configuration.
///
/// Built-in kinds round-trip through serde; custom formatters only live in
/// memory and fail to serialize.
#[derive(Clone)]
pub enum Formatter {
    Builtin(BuiltinFormatter),
    Custom(Arc<dyn ValueFormatter>),
}

impl Formatter {
    #[must_use]
    pub fn custom(formatter: impl ValueFormatter + 'static) -> Self {
        Self::Custom(Arc::new(formatter))
    }

    fn as_dyn(&self) -> &dyn ValueFormatter {
        match self {
            Self::Builtin(builtin) => builtin,
            Self::Custom(custom) => custom.as_ref(),
        }
    }
}

impl From<BuiltinFormatter> for Formatter {
    fn from(value: BuiltinFormatter) -> Self {
        Self::Builtin(value)
    }
}

impl ValueFormatter for Formatter {
    fn transform(&self, raw: f64) -> f64 {
        self.as_dyn().transform(raw)
    }

    fn format(&self, value: f64) -> String {
        self.as_dyn().format(value)
    }

    fn unit_label(&self) -> Option<&str> {
        self.as_dyn().unit_label()
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Self::Custom(custom) => f
                .debug_struct("Custom")
                .field("unit_label", &custom.unit_label())
                .finish_non_exhaustive(),
        }
    }
}

impl PartialEq for Formatter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Builtin(lhs), Self::Builtin(rhs)) => lhs == rhs,
            (Self::Custom(lhs), Self::Custom(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl Serialize for Formatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Builtin(builtin) => builtin.serialize(serializer),
            Self::Custom(_) => Err(serde::ser::Error::custom(
                "custom formatters cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Formatter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BuiltinFormatter::deserialize(deserializer).map(Self::Builtin)
    }
}

/// Applies an optional formatter's transform, passing raw values through otherwise.
#[must_use]
pub fn transform_value(raw: f64, formatter: Option<&Formatter>) -> f64 {
    formatter.map_or(raw, |formatter| formatter.transform(raw))
}

/// Formats a chart value with an optional formatter.
#[must_use]
pub fn format_value(value: f64, formatter: Option<&Formatter>) -> String {
    formatter.map_or_else(|| format_plain(value), |formatter| formatter.format(value))
}

/// Shortest round-trip decimal text; whole numbers print without a fraction.
#[must_use]
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        // Folds -0.0 into "0".
        return "0".to_owned();
    }
    format!("{value}")
}

/// Fixed-point text with exact ties rounded away from zero.
#[must_use]
pub fn format_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let scaled = value * scale;
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    };
    format!("{rounded:.digits$}")
}

#[cfg(test)]
mod tests {
    use super::{
        BuiltinFormatter, Formatter, ValueFormatter, format_fixed, format_plain, format_value,
    };

    #[test]
    fn fixed_format_rounds_ties_away_from_zero() {
        assert_eq!(format_fixed(0.25, 1), "0.3");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(-0.125, 2), "-0.13");
        assert_eq!(format_fixed(0.24, 1), "0.2");
        assert_eq!(BuiltinFormatter::KilobytesFromBytes.format(0.125), "0.13");
    }

    #[test]
    fn megabytes_transform_and_format() {
        let mb = BuiltinFormatter::MegabytesFromBytes;
        let value = mb.transform(3.0 * 1024.0 * 1024.0);
        assert_eq!(value, 3.0);
        assert_eq!(mb.format(value), "3.00");
        assert_eq!(mb.unit_label(), Some("MB"));
    }

    #[test]
    fn millis_from_seconds_keeps_four_decimals() {
        let ms = BuiltinFormatter::MillisFromSeconds;
        assert_eq!(ms.format(ms.transform(0.0125)), "12.5000");
    }

    #[test]
    fn plain_format_drops_integral_fraction() {
        assert_eq!(format_plain(1000.0), "1000");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_value(4.0, None), "4");
    }

    #[test]
    fn committed_formatter_has_no_unit() {
        let committed = Formatter::from(BuiltinFormatter::Committed);
        assert_eq!(committed.format(1.0), "Committed");
        assert_eq!(committed.format(0.0), "Not Committed");
        assert_eq!(committed.unit_label(), None);
    }

    #[test]
    fn builtin_formatter_round_trips_through_json() {
        let formatter = Formatter::from(BuiltinFormatter::KilobytesFromBytes);
        let json = serde_json::to_string(&formatter).expect("serialize");
        assert_eq!(json, "\"KilobytesFromBytes\"");
        let parsed: Formatter = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, formatter);
    }
}
