//! Layer composition for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::GateConfig;

/// Pushes `value` onto the composer as the named layer kind.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Merges `layers` over the built-in [`GateConfig::default`] values.
///
/// The built-in values always form the lowest layer, as they do when the
/// gate loads its configuration for real.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> GateConfig {
    let mut composer = MergeComposer::new();
    let built_in =
        serde_json::to_value(GateConfig::default()).expect("default config should serialise");
    composer.push_defaults(built_in);

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    GateConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
