mod common;

use std::env;

use common::container_with;
use serial_test::serial;
use wiring::config::{ENV_DETECT_CYCLES, ENV_MAX_DEPTH, ENV_PHASE_ORDER, ENV_VALIDATE_INTERFACES};
use wiring::{ContainerConfig, ContainerError, PhaseOrder};

const VARS: [&str; 4] = [ENV_MAX_DEPTH, ENV_DETECT_CYCLES, ENV_PHASE_ORDER, ENV_VALIDATE_INTERFACES];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(ContainerConfig::from_env().unwrap(), ContainerConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var(ENV_MAX_DEPTH, "32");
    env::set_var(ENV_DETECT_CYCLES, "off");
    env::set_var(ENV_PHASE_ORDER, "hooks_first");
    env::set_var(ENV_VALIDATE_INTERFACES, "no");

    let config = ContainerConfig::from_env();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.max_depth, 32);
    assert!(!config.detect_cycles);
    assert_eq!(config.phase_order, PhaseOrder::HooksFirst);
    assert!(!config.validate_interface_bindings);
}

#[test]
#[serial]
fn test_from_env_ignores_blank_values() {
    clear_env();
    env::set_var(ENV_MAX_DEPTH, "  ");

    let config = ContainerConfig::from_env();
    clear_env();

    assert_eq!(config.unwrap().max_depth, ContainerConfig::default().max_depth);
}

#[test]
#[serial]
fn test_from_env_rejects_malformed_values() {
    for (var, raw) in [
        (ENV_MAX_DEPTH, "deep"),
        (ENV_MAX_DEPTH, "0"),
        (ENV_DETECT_CYCLES, "maybe"),
        (ENV_PHASE_ORDER, "sideways"),
    ] {
        clear_env();
        env::set_var(var, raw);
        let result = ContainerConfig::from_env();
        clear_env();

        assert!(
            matches!(result, Err(ContainerError::Config(ref message)) if !message.is_empty()),
            "{var}={raw} should be rejected"
        );
    }
}

#[test]
fn test_interface_validation_can_be_disabled() {
    let container = container_with(ContainerConfig::default().with_interface_validation(false));
    container.bind("Store", "Item").unwrap();
    assert_eq!(common::type_of(&container.make("Store").unwrap()), "Item");
}

#[cfg(feature = "config")]
#[test]
fn test_from_json_keeps_defaults_for_missing_fields() {
    let config = ContainerConfig::from_json(r#"{ "max_depth": 8, "phase_order": "hooks-first" }"#).unwrap();
    assert_eq!(config.max_depth, 8);
    assert_eq!(config.phase_order, PhaseOrder::HooksFirst);
    assert!(config.detect_cycles);

    assert!(matches!(
        ContainerConfig::from_json(r#"{ "max_depth": 0 }"#),
        Err(ContainerError::Config(_))
    ));
    assert!(ContainerConfig::from_json("not json").is_err());
}
