//! Connectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::HarnessError;

/// Side of a connector on which numbered port anchors are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w", alias = "left")]
    Left,
    #[serde(rename = "e", alias = "right")]
    Right,
}

impl Side {
    /// Graphviz compass point for this side.
    pub fn compass(&self) -> &'static str {
        match self {
            Side::Left => "w",
            Side::Right => "e",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compass())
    }
}

/// Construction arguments for a [`Node`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default = "default_true")]
    pub show_name: bool,
    #[serde(default)]
    pub num_pins: Option<usize>,
    #[serde(default)]
    pub pinout: Option<Vec<String>>,
    #[serde(default)]
    pub ports_left: bool,
    #[serde(default)]
    pub ports_right: bool,
}

fn default_true() -> bool {
    true
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            gender: None,
            show_name: true,
            num_pins: None,
            pinout: None,
            ports_left: false,
            ports_right: false,
        }
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_show_name(mut self, show_name: bool) -> Self {
        self.show_name = show_name;
        self
    }

    pub fn with_pins(mut self, num_pins: usize) -> Self {
        self.num_pins = Some(num_pins);
        self
    }

    pub fn with_pinout<I, S>(mut self, pinout: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinout = Some(pinout.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ports(mut self, left: bool, right: bool) -> Self {
        self.ports_left = left;
        self.ports_right = right;
        self
    }
}

/// A loop between two pins of the same connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    pub from_pin: usize,
    pub to_pin: usize,
    pub side: Side,
}

/// A connector with a fixed, ordered set of pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: Option<String>,
    pub gender: Option<String>,
    pub show_name: bool,
    pub ports_left: bool,
    pub ports_right: bool,
    pinout: Vec<String>,
    loops: Vec<Loop>,
}

impl Node {
    /// Build a connector, deriving the pinout from `pinout` or `num_pins`.
    ///
    /// An explicit pinout takes precedence over the pin count.
    pub fn new(spec: NodeSpec) -> Result<Self, HarnessError> {
        let pinout = match (spec.pinout, spec.num_pins) {
            (Some(pinout), num_pins) => {
                if let Some(n) = num_pins.filter(|n| *n != pinout.len()) {
                    tracing::warn!(
                        "Node {} declares {} pins but a pinout of {}; using the pinout",
                        spec.name,
                        n,
                        pinout.len()
                    );
                }
                pinout
            }
            (None, Some(n)) => vec![String::new(); n],
            (None, None) => return Err(HarnessError::MissingPinout(spec.name)),
        };

        Ok(Self {
            name: spec.name,
            kind: spec.kind,
            gender: spec.gender,
            show_name: spec.show_name,
            ports_left: spec.ports_left,
            ports_right: spec.ports_right,
            pinout,
            loops: Vec::new(),
        })
    }

    pub fn pinout(&self) -> &[String] {
        &self.pinout
    }

    pub fn pin_count(&self) -> usize {
        self.pinout.len()
    }

    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Check that a 1-based pin number exists on this connector.
    pub fn check_pin(&self, pin: usize) -> Result<(), HarnessError> {
        if pin == 0 || pin > self.pin_count() {
            return Err(HarnessError::PinOutOfRange {
                node: self.name.clone(),
                pin,
                count: self.pin_count(),
            });
        }
        Ok(())
    }

    /// Record a loop between two pins.
    ///
    /// With ports on a single side the loop goes on that side and `side` is
    /// ignored; with ports on both sides `side` is required.
    pub fn add_loop(
        &mut self,
        from_pin: usize,
        to_pin: usize,
        side: Option<Side>,
    ) -> Result<(), HarnessError> {
        let side = match (self.ports_left, self.ports_right, side) {
            (true, false, _) => Side::Left,
            (false, true, _) => Side::Right,
            (true, true, Some(side)) => side,
            (true, true, None) => return Err(HarnessError::AmbiguousLoopSide(self.name.clone())),
            (false, false, _) => return Err(HarnessError::LoopWithoutPorts(self.name.clone())),
        };
        self.check_pin(from_pin)?;
        self.check_pin(to_pin)?;

        tracing::debug!("Loop on {}: {} -> {} ({})", self.name, from_pin, to_pin, side);
        self.loops.push(Loop {
            from_pin,
            to_pin,
            side,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_count_synthesizes_blank_pinout() {
        let node = Node::new(NodeSpec::new("X1").with_pins(4)).unwrap();
        assert_eq!(node.pin_count(), 4);
        assert!(node.pinout().iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_explicit_pinout_wins() {
        let node = Node::new(
            NodeSpec::new("X1")
                .with_pins(2)
                .with_pinout(["GND", "VCC", "RX", "TX"]),
        )
        .unwrap();
        assert_eq!(node.pin_count(), 4);
        assert_eq!(node.pinout()[2], "RX");
    }

    #[test]
    fn test_missing_pinout() {
        let err = Node::new(NodeSpec::new("X1")).unwrap_err();
        assert!(matches!(err, HarnessError::MissingPinout(name) if name == "X1"));
    }

    #[test]
    fn test_loop_side_from_single_port_side() {
        let mut node = Node::new(NodeSpec::new("X1").with_pins(3).with_ports(false, true)).unwrap();
        node.add_loop(1, 2, None).unwrap();
        node.add_loop(2, 3, Some(Side::Left)).unwrap();
        assert_eq!(node.loops()[0].side, Side::Right);
        assert_eq!(node.loops()[1].side, Side::Right);
    }

    #[test]
    fn test_ambiguous_loop_side() {
        let mut node = Node::new(NodeSpec::new("X1").with_pins(3).with_ports(true, true)).unwrap();
        assert!(matches!(
            node.add_loop(1, 2, None),
            Err(HarnessError::AmbiguousLoopSide(_))
        ));
        assert!(node.loops().is_empty());

        node.add_loop(1, 2, Some(Side::Left)).unwrap();
        assert_eq!(node.loops()[0].side, Side::Left);
    }

    #[test]
    fn test_loop_without_ports() {
        let mut node = Node::new(NodeSpec::new("X1").with_pins(2)).unwrap();
        assert!(matches!(
            node.add_loop(1, 2, Some(Side::Left)),
            Err(HarnessError::LoopWithoutPorts(_))
        ));
    }

    #[test]
    fn test_loop_pin_range() {
        let mut node = Node::new(NodeSpec::new("X1").with_pins(2).with_ports(true, false)).unwrap();
        assert!(matches!(
            node.add_loop(1, 3, None),
            Err(HarnessError::PinOutOfRange { pin: 3, count: 2, .. })
        ));
    }

    #[test]
    fn test_side_deserialize() {
        let side: Side = serde_json::from_str("\"w\"").unwrap();
        assert_eq!(side, Side::Left);
        let side: Side = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(side, Side::Right);
    }
}
