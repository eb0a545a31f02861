//! Verify parse/generate against JSON test vectors stored in `test-vectors/`.
//!
//! Parse vectors list headers and form fields as ordered pairs so ordering is
//! checked too; bodies are compared as JSON values. Generate vectors compare
//! the snippet byte for byte.

use curlconv_core::{generate, parse, FieldMap, RequestModel};

/// Read an ordered `[[key, value], ...]` list from a test vector.
fn expected_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn pairs(map: &FieldMap) -> Vec<(String, String)> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

#[test]
fn parse_test_vectors() {
    let raw = include_str!("../../test-vectors/parse.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected"];

        let model = parse(case["command"].as_str().unwrap());
        assert_eq!(model.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(model.method.as_str(), expected["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(pairs(&model.headers), expected_pairs(&expected["headers"]), "{name}: headers");
        assert_eq!(
            pairs(&model.form_fields),
            expected_pairs(&expected["form_data"]),
            "{name}: form_data"
        );

        let wire = serde_json::to_value(&model).unwrap();
        assert_eq!(wire["data"], expected["data"], "{name}: data");
    }
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[test]
fn generate_test_vectors() {
    let raw = include_str!("../../test-vectors/generate.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let model: RequestModel = serde_json::from_value(case["model"].clone()).unwrap();

        let code = generate(&model);
        assert_eq!(code, case["expected_code"].as_str().unwrap(), "{name}: code");
        assert_eq!(generate(&model), code, "{name}: deterministic");
    }
}

// ---------------------------------------------------------------------------
// Wire round-trip
// ---------------------------------------------------------------------------

#[test]
fn parsed_models_survive_the_wire() {
    let raw = include_str!("../../test-vectors/parse.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let model = parse(case["command"].as_str().unwrap());

        let wire = serde_json::to_string(&model).unwrap();
        let back: RequestModel = serde_json::from_str(&wire).unwrap();
        assert_eq!(generate(&back), generate(&model), "{name}: generated code");
    }
}
