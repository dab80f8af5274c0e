use crate::tests::{EnvGuard, setup_config_dir};
use crate::{BusConfig, Config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

#[test]
fn given_default_bus_config_when_validate_then_ok() {
    assert_that!(BusConfig::default().validate(), ok(anything()));
}

#[test]
#[serial]
fn given_blank_channel_name_when_validate_then_error() {
    // Given
    let _dir = setup_config_dir();
    let _name = EnvGuard::set("SE_BUS_CHANNEL_NAME", "   ");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("channel_name"));
}

#[test]
fn given_channel_name_over_limit_when_validate_then_error() {
    // Given
    let config = BusConfig {
        channel_name: "x".repeat(se_bus::MAX_CHANNEL_NAME_LENGTH + 1),
        ..BusConfig::default()
    };

    // When
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
fn given_channel_name_at_limit_when_validate_then_ok() {
    let config = BusConfig {
        channel_name: "x".repeat(se_bus::MAX_CHANNEL_NAME_LENGTH),
        ..BusConfig::default()
    };

    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_zero_capacity_when_validate_then_error() {
    // Given
    let _dir = setup_config_dir();
    let _capacity = EnvGuard::set("SE_BUS_CHANNEL_CAPACITY", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
fn given_capacity_over_limit_when_validate_then_error() {
    let config = BusConfig {
        channel_capacity: crate::MAX_CHANNEL_CAPACITY + 1,
        ..BusConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_listeners_per_channel_when_validate_then_error() {
    // Given
    let config = BusConfig {
        max_handles_per_channel: 0,
        ..BusConfig::default()
    };

    // When
    let error = config.validate().unwrap_err();

    // Then
    assert_that!(error.category(), eq(Some("Bus")));
}

#[test]
fn given_zero_channels_when_validate_then_error() {
    let config = BusConfig {
        max_channels: 0,
        ..BusConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_limits_at_minimum_when_validate_then_ok() {
    let config = BusConfig {
        channel_capacity: crate::MIN_CHANNEL_CAPACITY,
        max_handles_per_channel: crate::MIN_MAX_HANDLES_PER_CHANNEL,
        max_channels: crate::MIN_MAX_CHANNELS,
        ..BusConfig::default()
    };

    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_bus_config_when_building_hub_config_then_limits_carried_over() {
    // Given
    let config = BusConfig {
        channel_capacity: 32,
        max_handles_per_channel: 7,
        max_channels: 3,
        ..BusConfig::default()
    };

    // When
    let hub = config.hub_config();

    // Then
    assert_that!(hub.channel_capacity, eq(32));
    assert_that!(hub.max_handles_per_channel, eq(7));
    assert_that!(hub.max_channels, eq(3));
}

#[test]
fn given_default_channel_name_when_resolved_then_matches_bus_default() {
    let channel = BusConfig::default().channel().unwrap();

    assert_that!(channel.as_str(), eq(se_bus::DEFAULT_CHANNEL_NAME));
}
