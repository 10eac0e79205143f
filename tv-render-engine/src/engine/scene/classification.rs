use constants::scene::{
    ANIMATION_DRIVER_NAME, CUBE_PREFIXES, CURVE_PREFIXES, CYLINDER_PREFIXES, ENVIRONMENT_PREFIXES,
    EXTRA_ENVIRONMENT_PREFIXES, GUITAR_STRAP_PARTS, LIGHT_BAR_PREFIXES, PIPE_PREFIXES,
    PLANE_PREFIXES,
};

use crate::engine::store::layers::EnvironmentLayer;

/// Where a named scene node belongs for visibility purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Layer(EnvironmentLayer),
    /// Environment not covered by a layer; follows the master flag.
    ExtraEnvironment,
}

#[derive(Debug, Clone, Copy)]
enum Matcher {
    AnyPrefix(&'static [&'static str]),
    AllParts(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::AnyPrefix(prefixes) => prefixes.iter().any(|p| name.starts_with(p)),
            Self::AllParts(parts) => parts.iter().all(|p| name.contains(p)),
        }
    }
}

/// Ordered node-name rules. The first matching rule wins, so the light
/// bar rule shadows the broader `Bottom light` environment prefix.
#[derive(Debug, Clone)]
pub struct LayerClassifier {
    rules: Vec<(Matcher, NodeClass)>,
}

impl Default for LayerClassifier {
    fn default() -> Self {
        use EnvironmentLayer::*;
        let rule = |matcher, layer| (matcher, NodeClass::Layer(layer));
        Self {
            rules: vec![
                rule(Matcher::AnyPrefix(LIGHT_BAR_PREFIXES), LightBars),
                rule(Matcher::AnyPrefix(PIPE_PREFIXES), Pipes),
                rule(Matcher::AnyPrefix(CYLINDER_PREFIXES), Cylinders),
                rule(Matcher::AnyPrefix(CUBE_PREFIXES), Cubes),
                rule(Matcher::AnyPrefix(PLANE_PREFIXES), Planes),
                rule(Matcher::AllParts(GUITAR_STRAP_PARTS), GuitarStrap),
                rule(Matcher::AnyPrefix(CURVE_PREFIXES), Curves),
                (
                    Matcher::AnyPrefix(EXTRA_ENVIRONMENT_PREFIXES),
                    NodeClass::ExtraEnvironment,
                ),
            ],
        }
    }
}

impl LayerClassifier {
    pub fn classify(&self, name: &str) -> Option<NodeClass> {
        self.rules
            .iter()
            .find(|(matcher, _)| matcher.matches(name))
            .map(|(_, class)| *class)
    }
}

/// Root nodes that take part in the setup slide: everything except the
/// animation driver and the environment.
pub fn is_setup_node(name: &str) -> bool {
    name != ANIMATION_DRIVER_NAME && !ENVIRONMENT_PREFIXES.iter().any(|p| name.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_prefixes() {
        let classifier = LayerClassifier::default();
        let cases = [
            ("pipe.004", EnvironmentLayer::Pipes),
            ("Cylinder.012", EnvironmentLayer::Cylinders),
            ("Cube", EnvironmentLayer::Cubes),
            ("Plane.001", EnvironmentLayer::Planes),
            ("BezierCurve.002", EnvironmentLayer::Curves),
            ("Bottom_light_bars.001", EnvironmentLayer::LightBars),
            ("Bottom light bars", EnvironmentLayer::LightBars),
        ];
        for (name, layer) in cases {
            assert_eq!(classifier.classify(name), Some(NodeClass::Layer(layer)), "{name}");
        }
    }

    #[test]
    fn light_bars_win_over_bottom_light() {
        let classifier = LayerClassifier::default();
        assert_eq!(
            classifier.classify("Bottom_light_bars"),
            Some(NodeClass::Layer(EnvironmentLayer::LightBars))
        );
        assert_eq!(classifier.classify("Bottom_light.003"), Some(NodeClass::ExtraEnvironment));
        assert_eq!(classifier.classify("Bottom light"), Some(NodeClass::ExtraEnvironment));
    }

    #[test]
    fn guitar_strap_needs_both_words() {
        let classifier = LayerClassifier::default();
        assert_eq!(
            classifier.classify("Fender Guitar strap.002"),
            Some(NodeClass::Layer(EnvironmentLayer::GuitarStrap))
        );
        assert_eq!(classifier.classify("Guitar body"), None);
    }

    #[test]
    fn extra_environment_and_unclassified() {
        let classifier = LayerClassifier::default();
        assert_eq!(classifier.classify("dc36a9"), Some(NodeClass::ExtraEnvironment));
        assert_eq!(classifier.classify("Empty.001"), Some(NodeClass::ExtraEnvironment));
        assert_eq!(classifier.classify("tv"), None);
        assert_eq!(classifier.classify("MODEL__EMPTY"), None);
    }

    #[test]
    fn setup_nodes_exclude_driver_and_environment() {
        assert!(is_setup_node("tv"));
        assert!(is_setup_node("Speaker"));
        assert!(!is_setup_node("MODEL__EMPTY"));
        assert!(!is_setup_node("Cube.001"));
        assert!(!is_setup_node("Bottom light"));
    }
}
