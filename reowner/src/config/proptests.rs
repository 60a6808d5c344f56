//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use proptest::prelude::*;
use std::path::PathBuf;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![Just(OutputFormat::Human), Just(OutputFormat::Json)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("/[a-z]{1,12}"),
        prop::option::of("[a-z]{1,12}"),
        prop::option::of("[a-z]{1,12}"),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
    )
        .prop_map(|(root, to, from, dry_run, output_format)| Config {
            root: root.map(PathBuf::from),
            to,
            from,
            dry_run,
            output_format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Higher-precedence Some values always win; None never clears.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.root, high.root.or(low.root));
        prop_assert_eq!(merged.to, high.to.or(low.to));
        prop_assert_eq!(merged.from, high.from.or(low.from));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    // dry_run is the logical OR of every layer that sets it.
    #[test]
    fn config_merge_dry_run_is_or(layers in prop::collection::vec(config_strategy(), 0..6)) {
        let merged = ConfigMerger::merge(&layers);
        let any_set = layers.iter().any(|c| c.dry_run.is_some());
        let any_true = layers.iter().any(|c| c.dry_run == Some(true));

        if any_set {
            prop_assert_eq!(merged.dry_run, Some(any_true));
        } else {
            prop_assert_eq!(merged.dry_run, None);
        }
    }

    // Merging a config into the default yields the config itself.
    #[test]
    fn config_merge_into_default_is_identity(config in config_strategy()) {
        let mut merged = Config::default();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }
}
