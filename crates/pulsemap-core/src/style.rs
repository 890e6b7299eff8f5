// Map style configuration
//
// The original client kept icon configs and palettes as module-level
// mutable globals; here they are one immutable value built at startup and
// threaded into the render step.

use std::collections::HashMap;

use pulsemap_contracts::AlertKind;

/// Icon shown for a session whose alert kind has a configured icon.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertIcon {
    /// Glyph name understood by the drawing layer.
    pub symbol: &'static str,
    /// CSS color of the marker.
    pub color: &'static str,
    /// Human label used in popups.
    pub label: &'static str,
}

/// Heatmap contribution per session class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatWeights {
    pub real: f64,
    pub dummy: f64,
}

/// Immutable style maps injected at startup.
#[derive(Debug, Clone)]
pub struct MapStyle {
    icons: HashMap<AlertKind, AlertIcon>,
    pub heat: HeatWeights,
    /// Fill color of the plain weighted circle markers.
    pub circle_color: &'static str,
    /// Base radius in pixels of a real session's circle marker.
    pub circle_radius: f64,
}

impl MapStyle {
    pub fn new(
        icons: HashMap<AlertKind, AlertIcon>,
        heat: HeatWeights,
        circle_color: &'static str,
        circle_radius: f64,
    ) -> Self {
        Self {
            icons,
            heat,
            circle_color,
            circle_radius,
        }
    }

    /// Icon configured for an alert kind, if any. A kind without an icon
    /// falls back to the weighted circle marker.
    pub fn icon(&self, kind: AlertKind) -> Option<&AlertIcon> {
        self.icons.get(&kind)
    }

    pub fn weight_for(&self, is_dummy: bool) -> f64 {
        if is_dummy {
            self.heat.dummy
        } else {
            self.heat.real
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        let icons = HashMap::from([
            (
                AlertKind::Water,
                AlertIcon {
                    symbol: "droplet",
                    color: "#2196f3",
                    label: "needs water",
                },
            ),
            (
                AlertKind::Medical,
                AlertIcon {
                    symbol: "cross",
                    color: "#f44336",
                    label: "medical help",
                },
            ),
            (
                AlertKind::Arrest,
                AlertIcon {
                    symbol: "handcuffs",
                    color: "#ff9800",
                    label: "arrest risk",
                },
            ),
            (
                AlertKind::Stayaway,
                AlertIcon {
                    symbol: "warning",
                    color: "#9c27b0",
                    label: "stay away",
                },
            ),
        ]);

        Self {
            icons,
            heat: HeatWeights {
                real: 1.0,
                dummy: 0.3,
            },
            circle_color: "#3388ff",
            circle_radius: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_has_an_icon_for_every_kind() {
        let style = MapStyle::default();
        for kind in AlertKind::ALL {
            assert!(style.icon(kind).is_some(), "missing icon for {kind}");
        }
    }

    #[test]
    fn dummy_sessions_weigh_less() {
        let style = MapStyle::default();
        assert!(style.weight_for(true) < style.weight_for(false));
    }
}
