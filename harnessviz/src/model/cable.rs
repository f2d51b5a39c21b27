//! Cables and wire-level connections.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::colors::ColorCode;
use crate::core::HarnessError;

/// Construction arguments for a [`Cable`].
///
/// Description files reach this through their own cable entries so that an
/// unknown color code surfaces as [`HarnessError::UnknownColorCode`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CableSpec {
    pub name: String,
    pub mm2: Option<f64>,
    pub awg: Option<u32>,
    pub show_equiv: bool,
    pub length: f64,
    pub show_name: bool,
    pub show_pinout: bool,
    pub num_wires: Option<usize>,
    pub colors: Option<Vec<String>>,
    pub color_code: Option<ColorCode>,
    pub shield: bool,
}

impl CableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_mm2(mut self, mm2: f64) -> Self {
        self.mm2 = Some(mm2);
        self
    }

    pub fn with_awg(mut self, awg: u32) -> Self {
        self.awg = Some(awg);
        self
    }

    pub fn with_show_equiv(mut self, show_equiv: bool) -> Self {
        self.show_equiv = show_equiv;
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_show_name(mut self, show_name: bool) -> Self {
        self.show_name = show_name;
        self
    }

    pub fn with_show_pinout(mut self, show_pinout: bool) -> Self {
        self.show_pinout = show_pinout;
        self
    }

    pub fn with_wires(mut self, num_wires: usize) -> Self {
        self.num_wires = Some(num_wires);
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_color_code(mut self, code: ColorCode) -> Self {
        self.color_code = Some(code);
        self
    }

    pub fn with_shield(mut self, shield: bool) -> Self {
        self.shield = shield;
        self
    }
}

/// The conductor a connection runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WireRef {
    /// 1-based wire index.
    Wire(usize),
    Shield,
}

impl fmt::Display for WireRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireRef::Wire(n) => write!(f, "{}", n),
            WireRef::Shield => f.write_str("s"),
        }
    }
}

impl<'de> Deserialize<'de> for WireRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(usize),
            Keyword(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(n) => Ok(WireRef::Wire(n)),
            Repr::Keyword(k) if k == "s" || k == "shield" => Ok(WireRef::Shield),
            Repr::Keyword(k) => Err(D::Error::custom(format!(
                "expected a wire number or \"s\", got {:?}",
                k
            ))),
        }
    }
}

/// Positions on one side of a connection: either listed explicitly or
/// `Auto`, which stands for `1..=wire count` of the cable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinSelection<T> {
    Auto,
    Explicit(Vec<T>),
}

impl<T> PinSelection<T> {
    pub fn resolve(self, wire_count: usize, auto: impl Fn(usize) -> T) -> Vec<T> {
        match self {
            PinSelection::Auto => (1..=wire_count).map(auto).collect(),
            PinSelection::Explicit(items) => items,
        }
    }
}

impl PinSelection<Option<usize>> {
    /// Explicit list of connector pins.
    pub fn pins(pins: impl IntoIterator<Item = usize>) -> Self {
        PinSelection::Explicit(pins.into_iter().map(Some).collect())
    }
}

impl PinSelection<WireRef> {
    /// Explicit list of wires.
    pub fn wires(wires: impl IntoIterator<Item = usize>) -> Self {
        PinSelection::Explicit(wires.into_iter().map(WireRef::Wire).collect())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PinSelection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Keyword(String),
            Explicit(Vec<T>),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Keyword(k) if k == "auto" => Ok(PinSelection::Auto),
            Repr::Keyword(k) => Err(D::Error::custom(format!(
                "expected \"auto\" or a list, got {:?}",
                k
            ))),
            Repr::Explicit(items) => Ok(PinSelection::Explicit(items)),
        }
    }
}

/// One resolved "connector pin, wire, connector pin" record.
///
/// A missing pin leaves that end of the wire unterminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub from_node: String,
    pub from_pin: Option<usize>,
    pub via: WireRef,
    pub to_node: String,
    pub to_pin: Option<usize>,
}

/// A bundle of wires with an optional shield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cable {
    pub name: String,
    pub mm2: Option<f64>,
    pub awg: Option<u32>,
    pub show_equiv: bool,
    pub length: f64,
    pub show_name: bool,
    pub show_pinout: bool,
    pub shield: bool,
    colors: Vec<String>,
    connections: Vec<Connection>,
}

impl Cable {
    /// Build a cable, resolving its per-wire colors.
    ///
    /// Priority: custom colors, then a named color code, then blank wires.
    /// Palettes shorter than the wire count repeat cyclically.
    pub fn new(spec: CableSpec) -> Result<Self, HarnessError> {
        if spec.mm2.is_some() && spec.awg.is_some() {
            return Err(HarnessError::ConflictingSpec(spec.name));
        }

        let colors = match (&spec.colors, spec.color_code) {
            (Some(custom), _) => {
                let count = spec.num_wires.unwrap_or(custom.len());
                repeat_palette(custom, count)
                    .ok_or_else(|| HarnessError::MissingPinout(spec.name.clone()))?
            }
            (None, Some(code)) => {
                let count = spec
                    .num_wires
                    .ok_or_else(|| HarnessError::MissingPinout(spec.name.clone()))?;
                repeat_palette(code.palette(), count)
                    .ok_or_else(|| HarnessError::MissingPinout(spec.name.clone()))?
            }
            (None, None) => {
                let count = spec
                    .num_wires
                    .ok_or_else(|| HarnessError::MissingPinout(spec.name.clone()))?;
                vec![String::new(); count]
            }
        };

        Ok(Self {
            name: spec.name,
            mm2: spec.mm2,
            awg: spec.awg,
            show_equiv: spec.show_equiv,
            length: spec.length,
            show_name: spec.show_name,
            show_pinout: spec.show_pinout,
            shield: spec.shield,
            colors,
            connections: Vec::new(),
        })
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn wire_count(&self) -> usize {
        self.colors.len()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Color code of a conductor; `None` for the shield.
    pub fn color_of(&self, via: WireRef) -> Option<&str> {
        match via {
            WireRef::Wire(n) => n
                .checked_sub(1)
                .and_then(|i| self.colors.get(i))
                .map(String::as_str),
            WireRef::Shield => None,
        }
    }

    fn check_wire(&self, via: WireRef) -> Result<(), HarnessError> {
        match via {
            WireRef::Wire(n) if n == 0 || n > self.wire_count() => {
                Err(HarnessError::WireOutOfRange {
                    cable: self.name.clone(),
                    wire: n,
                    count: self.wire_count(),
                })
            }
            WireRef::Shield if !self.shield => Err(HarnessError::NoShield(self.name.clone())),
            _ => Ok(()),
        }
    }

    /// Expand `Auto` selections and zip them into connection records.
    ///
    /// Does not touch the cable; see [`Cable::add_connections`].
    pub fn resolve_connections(
        &self,
        from_node: &str,
        from_pin: PinSelection<Option<usize>>,
        via: PinSelection<WireRef>,
        to_node: &str,
        to_pin: PinSelection<Option<usize>>,
    ) -> Result<Vec<Connection>, HarnessError> {
        let count = self.wire_count();
        let from_pin = from_pin.resolve(count, Some);
        let via = via.resolve(count, WireRef::Wire);
        let to_pin = to_pin.resolve(count, Some);

        if from_pin.len() != to_pin.len() || via.len() != from_pin.len() {
            return Err(HarnessError::MismatchedPinCount {
                from: from_pin.len(),
                via: via.len(),
                to: to_pin.len(),
            });
        }

        from_pin
            .into_iter()
            .zip(via)
            .zip(to_pin)
            .map(|((from_pin, via), to_pin)| {
                self.check_wire(via)?;
                Ok(Connection {
                    from_node: from_node.to_string(),
                    from_pin,
                    via,
                    to_node: to_node.to_string(),
                    to_pin,
                })
            })
            .collect()
    }

    pub fn add_connections(&mut self, connections: Vec<Connection>) {
        self.connections.extend(connections);
    }
}

/// Repeat `palette` cyclically up to exactly `count` entries.
///
/// `None` when a non-empty result is requested from an empty palette.
fn repeat_palette<S: AsRef<str>>(palette: &[S], count: usize) -> Option<Vec<String>> {
    if palette.is_empty() && count > 0 {
        return None;
    }
    Some(
        palette
            .iter()
            .cycle()
            .take(count)
            .map(|c| c.as_ref().to_string())
            .collect(),
    )
}
