use alloy::primitives::U256;
use pretty_assertions::assert_eq;
use rstest::rstest;
use token_factory::entities::{
    CreateTokenInput,
    DEFAULT_TOKEN_DECIMALS,
    TokenCreationRequest,
    ValidationError,
};

#[test]
fn test_supply_is_scaled_by_decimals() {
    let request = CreateTokenInput::new("Test Token", "TST", "1000")
        .validate(DEFAULT_TOKEN_DECIMALS)
        .unwrap();

    assert_eq!(
        TokenCreationRequest {
            name: "Test Token".to_string(),
            symbol: "TST".to_string(),
            raw_supply: U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64)),
        },
        request
    );
}

#[test]
fn test_fractional_supply_and_surrounding_whitespace() {
    let request = CreateTokenInput::new("  Test Token ", " TST", " 1.5 ")
        .validate(2)
        .unwrap();

    assert_eq!(
        TokenCreationRequest {
            name: "Test Token".to_string(),
            symbol: "TST".to_string(),
            raw_supply: U256::from(150u64),
        },
        request
    );
}

#[rstest]
#[case::empty_name("", "TST", "100", ValidationError::MissingName)]
#[case::blank_name("   ", "TST", "100", ValidationError::MissingName)]
#[case::empty_symbol("Test Token", "", "100", ValidationError::MissingSymbol)]
#[case::empty_supply("Test Token", "TST", "", ValidationError::MissingSupply)]
#[case::word_supply(
    "Test Token",
    "TST",
    "lots",
    ValidationError::MalformedSupply("lots".to_string())
)]
#[case::negative_supply(
    "Test Token",
    "TST",
    "-5",
    ValidationError::MalformedSupply("-5".to_string())
)]
#[case::zero_supply("Test Token", "TST", "0", ValidationError::ZeroSupply)]
fn test_invalid_input(
    #[case] name: &str,
    #[case] symbol: &str,
    #[case] supply: &str,
    #[case] expected: ValidationError,
) {
    let e = CreateTokenInput::new(name, symbol, supply)
        .validate(DEFAULT_TOKEN_DECIMALS)
        .unwrap_err();

    assert_eq!(expected, e);
}

#[test]
fn test_missing_fields_are_reported_in_form_order() {
    let e = CreateTokenInput::new("", "", "")
        .validate(DEFAULT_TOKEN_DECIMALS)
        .unwrap_err();

    assert_eq!("Name is required", e.to_string());
}
