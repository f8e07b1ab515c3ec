//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("missing pending invoice account");

    match &error {
        CoreError::Configuration(msg) => assert_eq!(msg, "missing pending invoice account"),
    }
    assert!(error.to_string().contains("Configuration error"));
}

#[test]
fn test_port_error_not_found_display() {
    let error = PortError::not_found("Work", "WRK-1");

    assert!(error.is_not_found());
    assert_eq!(error.to_string(), "Not found: Work with id WRK-1");
}
