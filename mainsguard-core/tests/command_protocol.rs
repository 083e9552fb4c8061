//! Protocol conformance tests for the command interface
//!
//! Walks the whole reply table: every recognized command, every error
//! class, the zero-argument `GET_CONFIG` policy and the lenient numeric
//! parsing rule.

use mainsguard_core::command::execute;
use mainsguard_core::serial::{LineBuffer, ScriptedLink};
use mainsguard_core::MeterConfig;

#[test]
fn test_set_voltage_round_trip() {
    let mut config = MeterConfig::default();
    let reply = execute(">SET_V,230.5", &mut config);

    assert_eq!(reply.as_str(), ">OK,SET_V,230.5");
    assert_eq!(config.nominal_voltage(), 230.5);
}

#[test]
fn test_set_power_factor_round_trip() {
    let mut config = MeterConfig::default();
    let reply = execute(">SET_PF,0.85", &mut config);

    assert_eq!(reply.as_str(), ">OK,SET_PF,0.85");
    assert_eq!(config.power_factor(), 0.85);
}

#[test]
fn test_set_sensitivity_updates_derived_value() {
    let mut config = MeterConfig::default();
    let reply = execute(">SET_SENS,0.185", &mut config);

    assert_eq!(reply.as_str(), ">OK,SET_SENS,0.185");
    assert_eq!(config.sensor_sensitivity(), 0.185);
    assert!((config.effective_sensitivity() - 0.185 * (3.3 / 5.0)).abs() < 1e-7);
}

#[test]
fn test_get_config_without_comma_reports_config() {
    // Zero-argument command policy: GET_CONFIG is exempt from the comma
    // gate instead of dying with NO_DATA.
    let mut config = MeterConfig::default();
    let reply = execute(">GET_CONFIG", &mut config);

    assert_eq!(reply.as_str(), ">CONFIG,V=220.0,PF=0.90,SENS=0.100");
}

#[test]
fn test_get_config_reflects_prior_sets() {
    let mut config = MeterConfig::default();
    execute(">SET_V,230.5", &mut config);
    execute(">SET_PF,0.95", &mut config);
    execute(">SET_SENS,0.185", &mut config);

    let reply = execute(">GET_CONFIG", &mut config);
    assert_eq!(reply.as_str(), ">CONFIG,V=230.5,PF=0.95,SENS=0.185");
}

#[test]
fn test_unknown_command_replies_invalid_cmd() {
    let mut config = MeterConfig::default();
    assert_eq!(execute(">BOGUS,1", &mut config).as_str(), ">ERROR,INVALID_CMD");
}

#[test]
fn test_missing_marker_replies_bad_start() {
    let mut config = MeterConfig::default();
    assert_eq!(execute("nope", &mut config).as_str(), ">ERROR,BAD_START");
    assert_eq!(execute("", &mut config).as_str(), ">ERROR,BAD_START");
}

#[test]
fn test_marker_without_comma_replies_no_data() {
    let mut config = MeterConfig::default();
    assert_eq!(execute(">SET_V", &mut config).as_str(), ">ERROR,NO_DATA");
    assert_eq!(execute(">", &mut config).as_str(), ">ERROR,NO_DATA");
}

#[test]
fn test_malformed_values_parse_to_zero() {
    let mut config = MeterConfig::default();

    let reply = execute(">SET_V,twelve", &mut config);
    assert_eq!(reply.as_str(), ">OK,SET_V,0.0");
    assert_eq!(config.nominal_voltage(), 0.0);

    let reply = execute(">SET_PF,", &mut config);
    assert_eq!(reply.as_str(), ">OK,SET_PF,0.00");
    assert_eq!(config.power_factor(), 0.0);
}

#[test]
fn test_failed_commands_leave_config_untouched() {
    let mut config = MeterConfig::default();
    execute(">BOGUS,9000", &mut config);
    execute("SET_V,9000", &mut config);
    execute(">SET_V", &mut config);

    assert_eq!(config, MeterConfig::default());
}

#[test]
fn test_byte_stream_session() {
    // The same flow a host serial port produces: raw bytes in, one
    // reply per completed line.
    let mut link = ScriptedLink::<128>::new();
    link.feed(b">SET_SENS,0.185\r\n>GET_CONFIG\nnoise\n");

    let mut lines = LineBuffer::<64>::new();
    let mut config = MeterConfig::default();
    let mut replies = Vec::new();

    while let Some(line) = lines.poll_line(&mut link) {
        replies.push(execute(&line, &mut config).as_str().to_owned());
    }

    assert_eq!(
        replies,
        [
            ">OK,SET_SENS,0.185",
            ">CONFIG,V=220.0,PF=0.90,SENS=0.185",
            ">ERROR,BAD_START",
        ]
    );
}
