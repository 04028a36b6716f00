//! Outbound metric sink used by decode routines.
//!
//! The engine is agnostic to how decoded values are stored or published.
//! Decode routines push each field through [`MetricSink::set_metric`]; the
//! embedding application supplies the sink.

use std::collections::BTreeMap;

use derive_more::{Display, From};

/// Physical unit attached to a published value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
pub enum Unit {
    /// Dimensionless value or flag.
    #[default]
    #[display("")]
    Native,
    /// Degrees Celsius.
    #[display("°C")]
    Celsius,
    /// Volts.
    #[display("V")]
    Volts,
    /// Amperes.
    #[display("A")]
    Amps,
    /// Watts.
    #[display("W")]
    Watts,
    /// Watt-hours.
    #[display("Wh")]
    WattHours,
    /// Ampere-hours.
    #[display("Ah")]
    AmpHours,
    /// Kilometres.
    #[display("km")]
    Kilometers,
    /// Miles.
    #[display("mi")]
    Miles,
    /// Kilometres per hour.
    #[display("km/h")]
    Kph,
    /// Percent.
    #[display("%")]
    Percentage,
    /// Pounds per square inch.
    #[display("psi")]
    Psi,
    /// Hours.
    #[display("h")]
    Hours,
}

impl Unit {
    /// Stable label used as a metric dimension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Celsius => "celsius",
            Self::Volts => "volts",
            Self::Amps => "amps",
            Self::Watts => "watts",
            Self::WattHours => "watt_hours",
            Self::AmpHours => "amp_hours",
            Self::Kilometers => "kilometers",
            Self::Miles => "miles",
            Self::Kph => "kph",
            Self::Percentage => "percentage",
            Self::Psi => "psi",
            Self::Hours => "hours",
        }
    }
}

/// A decoded field value.
#[derive(Clone, Debug, PartialEq, Display, From)]
pub enum MetricValue {
    /// Boolean flag such as a door or relay state.
    #[display("{_0}")]
    Bool(bool),
    /// Integral value.
    #[display("{_0}")]
    Int(i64),
    /// Scaled physical value.
    #[display("{_0}")]
    Float(f64),
    /// Text such as a VIN.
    #[display("{_0}")]
    Text(String),
}

impl MetricValue {
    /// Numeric view of the value, if it has one. Flags map to `0.0` / `1.0`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            #[expect(
                clippy::cast_precision_loss,
                reason = "Gauge values are f64; integral readings stay well below 2^52."
            )]
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self { Self::Text(value.to_owned()) }
}

/// Destination for decoded values.
pub trait MetricSink {
    /// Publish `value` under `name`.
    fn set_metric(&mut self, name: &str, value: MetricValue, unit: Unit);

    /// Mark `name` as having no current value.
    fn clear_metric(&mut self, name: &str);
}

/// A value held by [`MetricStore`], together with its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// Last published value.
    pub value: MetricValue,
    /// Unit supplied with the value.
    pub unit: Unit,
}

/// In-memory sink keeping the latest value per metric name.
///
/// # Examples
///
/// ```
/// use pollframe::sink::{MetricSink, MetricStore, MetricValue, Unit};
///
/// let mut store = MetricStore::default();
/// store.set_metric("v.b.soc", MetricValue::Float(81.5), Unit::Percentage);
/// assert_eq!(store.value("v.b.soc"), Some(&MetricValue::Float(81.5)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MetricStore {
    readings: BTreeMap<String, Reading>,
}

impl MetricStore {
    /// Return the reading stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Reading> { self.readings.get(name) }

    /// Return the value stored under `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&MetricValue> {
        self.readings.get(name).map(|reading| &reading.value)
    }

    /// Number of metrics holding a value.
    #[must_use]
    pub fn len(&self) -> usize { self.readings.len() }

    /// Whether no metric holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.readings.is_empty() }

    /// Iterate over readings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Reading)> {
        self.readings
            .iter()
            .map(|(name, reading)| (name.as_str(), reading))
    }
}

impl MetricSink for MetricStore {
    fn set_metric(&mut self, name: &str, value: MetricValue, unit: Unit) {
        self.readings
            .insert(name.to_owned(), Reading { value, unit });
    }

    fn clear_metric(&mut self, name: &str) { self.readings.remove(name); }
}

/// Sink forwarding numeric values to gauges of the `metrics` facade.
///
/// Gauges are labelled with the value's unit. Text values have no gauge
/// representation and are skipped.
#[cfg(feature = "metrics")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RecorderSink;

#[cfg(feature = "metrics")]
impl MetricSink for RecorderSink {
    fn set_metric(&mut self, name: &str, value: MetricValue, unit: Unit) {
        let Some(number) = value.as_f64() else {
            log::debug!("skipping non-numeric metric for recorder: name={name}");
            return;
        };
        metrics::gauge!(name.to_owned(), "unit" => unit.as_str()).set(number);
    }

    fn clear_metric(&mut self, name: &str) {
        metrics::gauge!(name.to_owned(), "unit" => Unit::Native.as_str()).set(f64::NAN);
    }
}

/// Fan-out sink publishing every value to two sinks.
impl<A: MetricSink, B: MetricSink> MetricSink for (A, B) {
    fn set_metric(&mut self, name: &str, value: MetricValue, unit: Unit) {
        self.0.set_metric(name, value.clone(), unit);
        self.1.set_metric(name, value, unit);
    }

    fn clear_metric(&mut self, name: &str) {
        self.0.clear_metric(name);
        self.1.clear_metric(name);
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricSink, MetricStore, MetricValue, Unit};

    #[test]
    fn store_keeps_latest_value_and_unit() {
        let mut store = MetricStore::default();
        store.set_metric("v.p.odometer", MetricValue::Int(1200), Unit::Miles);
        store.set_metric("v.p.odometer", MetricValue::Int(1201), Unit::Kilometers);

        let reading = store.get("v.p.odometer").expect("reading stored");
        assert_eq!(reading.value, MetricValue::Int(1201));
        assert_eq!(reading.unit, Unit::Kilometers);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clearing_removes_the_reading() {
        let mut store = MetricStore::default();
        store.set_metric("v.c.power", MetricValue::Float(3.2), Unit::Watts);
        store.clear_metric("v.c.power");
        assert!(store.is_empty());
    }

    #[test]
    fn pair_sink_publishes_to_both() {
        let mut pair = (MetricStore::default(), MetricStore::default());
        pair.set_metric("v.e.on", true.into(), Unit::Native);
        assert_eq!(pair.0.value("v.e.on"), Some(&MetricValue::Bool(true)));
        assert_eq!(pair.1.value("v.e.on"), Some(&MetricValue::Bool(true)));
    }

    #[test]
    fn values_expose_numeric_view() {
        assert_eq!(MetricValue::Bool(true).as_f64(), Some(1.0));
        assert_eq!(MetricValue::Int(-3).as_f64(), Some(-3.0));
        assert_eq!(MetricValue::from("KNA").as_f64(), None);
        assert_eq!(MetricValue::Float(2.5).to_string(), "2.5");
    }
}
