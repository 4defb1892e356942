//! Line classification by layer name and color index.

use serde::{Deserialize, Serialize};

use crate::types::LineRole;

/// Rules that decide which drawing lines are bends and which are contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    /// Substring that marks a bend layer (compared upper-cased)
    pub bend_layer_marker: String,
    /// Layers whose lines are cut contour (compared upper-cased)
    pub cut_layers: Vec<String>,
    /// Color index that marks a contour line regardless of layer
    pub contour_color: Option<u8>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            bend_layer_marker: "DOBRA".to_string(),
            cut_layers: vec!["0".to_string(), "CORTE_S_COMP".to_string()],
            contour_color: Some(7),
        }
    }
}

impl ClassificationRules {
    /// Role of a line on `layer` drawn with `color_index` (`None` for
    /// BYLAYER/BYBLOCK or true colors).
    pub fn classify(&self, layer: &str, color_index: Option<u8>) -> Option<LineRole> {
        let layer = layer.to_uppercase();

        if !self.bend_layer_marker.is_empty()
            && layer.contains(&self.bend_layer_marker.to_uppercase())
        {
            return Some(LineRole::Bend);
        }

        let on_cut_layer = self
            .cut_layers
            .iter()
            .any(|cut| cut.to_uppercase() == layer);
        let contour_colored = matches!(
            (self.contour_color, color_index),
            (Some(expected), Some(actual)) if expected == actual
        );

        if on_cut_layer || contour_colored {
            Some(LineRole::Contour)
        } else {
            None
        }
    }

    pub fn is_bend(&self, layer: &str) -> bool {
        self.classify(layer, None) == Some(LineRole::Bend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bend_layers() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify("DOBRA", None), Some(LineRole::Bend));
        assert_eq!(rules.classify("dobra_90", Some(7)), Some(LineRole::Bend));
        assert_eq!(rules.classify("LINHA DOBRA CIMA", None), Some(LineRole::Bend));
        assert!(rules.is_bend("Dobra"));
    }

    #[test]
    fn test_contour_layers_and_color() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify("0", None), Some(LineRole::Contour));
        assert_eq!(rules.classify("corte_s_comp", None), Some(LineRole::Contour));
        assert_eq!(rules.classify("COTAS", Some(7)), Some(LineRole::Contour));
    }

    #[test]
    fn test_unclassified() {
        let rules = ClassificationRules::default();
        assert_eq!(rules.classify("COTAS", None), None);
        assert_eq!(rules.classify("COTAS", Some(1)), None);
        assert_eq!(rules.classify("CORTE", None), None);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ClassificationRules {
            bend_layer_marker: "BEND".to_string(),
            cut_layers: vec!["Outline".to_string()],
            contour_color: None,
        };
        assert_eq!(rules.classify("bend-up", None), Some(LineRole::Bend));
        assert_eq!(rules.classify("OUTLINE", None), Some(LineRole::Contour));
        assert_eq!(rules.classify("0", Some(7)), None);
    }
}
