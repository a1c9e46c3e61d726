//! Cross-module scenarios from spec.md §8: literal input -> literal
//! output, plus the determinism round-trip invariant.

use vyper_gen::{convert, ContractInput, ConverterConfig};

fn run(json: &str, seed: u64) -> String {
    let input: ContractInput = serde_json::from_str(json).unwrap();
    convert(&input, seed, &ConverterConfig::default()).unwrap()
}

#[test]
fn scenario_1_default_int_is_unsigned_width_8() {
    assert_eq!(run(r#"{"decls":[{}]}"#, 1), "x_INT_0: uint8\n\n");
}

#[test]
fn scenario_2_wide_unsigned_int() {
    assert_eq!(run(r#"{"decls":[{"i":{"n":511,"sign":false}}]}"#, 1), "x_INT_0: uint256\n\n");
}

#[test]
fn scenario_3_wide_signed_int() {
    assert_eq!(run(r#"{"decls":[{"i":{"n":511,"sign":true}}]}"#, 1), "x_INT_0: int256\n\n");
}

#[test]
fn scenario_4_default_bytesm() {
    assert_eq!(run(r#"{"decls":[{"bM":{}}]}"#, 1), "x_BYTESM_0: bytes1\n\n");
}

#[test]
fn scenario_5_bytesm_wraps_to_32() {
    assert_eq!(run(r#"{"decls":[{"bM":{"m":63}}]}"#, 1), "x_BYTESM_0: bytes32\n\n");
}

#[test]
fn scenario_6_string_max_len() {
    assert_eq!(run(r#"{"decls":[{"s":{"max_len":382}}]}"#, 1), "x_STRING_0: String[382]\n\n");
}

#[test]
fn boundary_empty_contract_is_empty_string() {
    assert_eq!(run(r#"{}"#, 1), "");
}

#[test]
fn determinism_same_input_and_seed_are_byte_identical_across_runs() {
    let json = r#"{"decls":[{"i":{"n":511,"sign":false}},{"bM":{"m":10}}],"functions":[
        {"visibility":"External","declared_mutability":"Pure","reentrancy_key":null,
         "inputs":[],"outputs":[],"body":{"stmts":[],"terminator":null}}
    ]}"#;
    let a = run(json, 7);
    let b = run(json, 7);
    let c = run(json, 7);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn different_seeds_may_diverge_only_in_random_variable_selection() {
    // With no variables registered, there is nothing for the tracker to
    // pick between, so output is still identical across seeds here.
    let json = r#"{"decls":[{}],"functions":[]}"#;
    let a = run(json, 1);
    let b = run(json, 2);
    assert_eq!(a, b);
}
