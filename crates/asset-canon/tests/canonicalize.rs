//! Canonicalization behaviour on whole templates

use asset_canon::ignore_list::IgnoreList;
use asset_canon::template_documents::{LoadError, TemplateDocuments};
use asset_canon::value::Value;
use asset_canon::{canonical_eq, canonicalize, CanonicalizeError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

const HASH_A: &str = "aaaa1111bbbb2222cccc3333dddd4444eeee5555ffff6666aaaa7777bbbb8888";
const HASH_B: &str = "0000999988887777666655554444333322221111000099998888777766665555";

fn value(json: serde_json::Value) -> Value {
    json.into()
}

fn canonical(template: &Value) -> Value {
    canonicalize(template, &IgnoreList::default()).expect("canonicalize")
}

/// Parameters for a hash in the given order of kinds
fn asset_template(hashes: &[(&str, &str, &str)]) -> Value {
    let parameters: serde_json::Map<String, serde_json::Value> = hashes
        .iter()
        .map(|(hash, kind, disambiguator)| {
            (
                format!("AssetParameters{hash}{kind}{disambiguator}"),
                json!({"Type": "String"}),
            )
        })
        .collect();

    value(json!({ "Parameters": parameters }))
}

#[test]
fn example_family_and_hash() {
    let version_key = format!("AssetParameters{HASH_A}S3VersionKeyyyyyyyyy");
    let template = value(json!({
        "Parameters": {
            format!("AssetParameters{HASH_A}S3Bucketxxxxxxxx"): {"Type": "String"},
            format!("AssetParameters{HASH_A}S3VersionKeyyyyyyyyy"): {"Type": "String"},
        },
        "Resources": {
            "Function": {
                "Properties": {
                    "Code": {
                        "S3Bucket": {"Ref": format!("AssetParameters{HASH_A}S3Bucketxxxxxxxx")},
                        "S3Key": {"Fn::Join": ["", [
                            {"Fn::Select": [0, {"Ref": version_key}]},
                            "||"
                        ]]}
                    },
                    "Description": format!("built from {HASH_A} and {HASH_A}")
                }
            }
        }
    }));

    let expected = value(json!({
        "Parameters": {
            "Asset1S3Bucket": {"Type": "String"},
            "Asset1S3VersionKey": {"Type": "String"},
        },
        "Resources": {
            "Function": {
                "Properties": {
                    "Code": {
                        "S3Bucket": {"Ref": "Asset1S3Bucket"},
                        "S3Key": {"Fn::Join": ["", [
                            {"Fn::Select": [0, {"Ref": "Asset1S3VersionKey"}]},
                            "||"
                        ]]}
                    },
                    "Description": "built from Asset1Hash and Asset1Hash"
                }
            }
        }
    }));

    assert_eq!(canonical(&template), expected);
}

#[test]
fn snapshot_of_two_assets() {
    let template = value(json!({
        "Parameters": {
            format!("AssetParameters{HASH_B}ArtifactHash00000001"): {"Type": "String"},
            format!("AssetParameters{HASH_A}S3Bucket00000002"): {"Type": "String"},
            "Stage": {"Type": "String"}
        },
        "Outputs": {
            "Hashes": {"Value": [HASH_A, HASH_B, 7, true, null]}
        }
    }));

    insta::assert_json_snapshot!(canonical(&template), @r###"
    {
      "Parameters": {
        "Asset1ArtifactHash": {
          "Type": "String"
        },
        "Asset2S3Bucket": {
          "Type": "String"
        },
        "Stage": {
          "Type": "String"
        }
      },
      "Outputs": {
        "Hashes": {
          "Value": [
            "Asset2Hash",
            "Asset1Hash",
            7,
            true,
            null
          ]
        }
      }
    }
    "###);
}

#[test]
fn idempotent() {
    let template = value(json!({
        "Parameters": {
            format!("AssetParameters{HASH_A}S3Bucket12345678"): {"Type": "String"},
            format!("AssetParameters{HASH_B}S3VersionKey12345678"): {"Type": "String"},
        },
        "Resources": {
            "SingletonLambdaABC": {"Properties": {"Code": {"S3Key": format!("{HASH_B}.zip")}}},
            "Other": {"Properties": {"Code": {"S3Key": "other.zip"}}}
        }
    }));
    let ignore = IgnoreList::new(["SingletonLambda"]);

    let once = canonicalize(&template, &ignore).unwrap();
    let twice = canonicalize(&once, &ignore).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn family_shares_one_index() {
    let template = asset_template(&[
        (HASH_A, "S3Bucket", "11111111"),
        (HASH_A, "S3VersionKey", "22222222"),
        (HASH_A, "ArtifactHash", "33333333"),
        (HASH_B, "S3Bucket", "44444444"),
    ]);

    let expected = value(json!({
        "Parameters": {
            "Asset1S3Bucket": {"Type": "String"},
            "Asset1S3VersionKey": {"Type": "String"},
            "Asset1ArtifactHash": {"Type": "String"},
            "Asset2S3Bucket": {"Type": "String"},
        }
    }));

    assert_eq!(canonical(&template), expected);
}

#[test]
fn index_follows_first_seen_order() {
    let forward = asset_template(&[
        (HASH_A, "S3Bucket", "11111111"),
        (HASH_B, "S3Bucket", "22222222"),
    ]);
    let backward = asset_template(&[
        (HASH_B, "S3Bucket", "22222222"),
        (HASH_A, "S3Bucket", "11111111"),
    ]);

    let with_hashes = |template: Value| -> Value {
        let Value::Object(mut root) = template else {
            unreachable!()
        };
        root.insert("Outputs".to_string(), value(json!([HASH_A, HASH_B])));
        Value::Object(root)
    };

    let forward = canonical(&with_hashes(forward));
    let backward = canonical(&with_hashes(backward));

    assert_eq!(
        forward.get_path(&["Outputs"]),
        Some(&value(json!(["Asset1Hash", "Asset2Hash"])))
    );
    assert_eq!(
        backward.get_path(&["Outputs"]),
        Some(&value(json!(["Asset2Hash", "Asset1Hash"])))
    );
}

#[test]
fn deterministic_output() {
    let template = asset_template(&[
        (HASH_A, "S3Bucket", "11111111"),
        (HASH_B, "S3Bucket", "22222222"),
    ]);

    let first = serde_json::to_string(&canonical(&template)).unwrap();
    let second = serde_json::to_string(&canonical(&template)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn non_asset_names_pass_through() {
    let unregistered = "f".repeat(64);
    let template = value(json!({
        "Parameters": {
            "BucketName": {"Type": "String"},
            format!("Param{unregistered}"): {"Type": "String"},
            // too long for the convention
            format!("AssetParameters{HASH_A}S3Bucket123456789"): {"Type": "String"},
        },
        "Resources": {
            "Thing": {"Properties": {"Value": unregistered}}
        }
    }));

    assert_eq!(canonical(&template), template);
}

#[test]
fn input_is_left_alone() {
    let template = asset_template(&[(HASH_A, "S3Bucket", "11111111")]);
    let copy = template.clone();

    let _ = canonical(&template);

    assert_eq!(template, copy);
}

#[test]
fn ignore_mask_only_hits_matching_resources() {
    let template = value(json!({
        "Resources": {
            "SingletonLambda1234": {"Properties": {"Code": {"S3Key": "5f2e.zip"}}},
            "MyFunction": {"Properties": {"Code": {"S3Key": "9a1c.zip"}}},
            "Policy": {"Properties": {"Document": "references 5f2e.zip and 9a1c.zip"}}
        }
    }));

    let canonical = canonicalize(&template, &IgnoreList::new(["SingletonLambda"])).unwrap();

    let expected = value(json!({
        "Resources": {
            "SingletonLambda1234": {"Properties": {"Code": {"S3Key": "SomeHash.zip"}}},
            "MyFunction": {"Properties": {"Code": {"S3Key": "9a1c.zip"}}},
            "Policy": {"Properties": {"Document": "references SomeHash.zip and 9a1c.zip"}}
        }
    }));
    assert_eq!(canonical, expected);
}

#[test]
fn ignore_mask_without_code_location_fails() {
    let template = value(json!({
        "Resources": {
            "SingletonLambda1234": {
                "Type": "AWS::Lambda::Function",
                "Properties": {"Code": {"ZipFile": "..."}}
            }
        }
    }));

    let error = canonicalize(&template, &IgnoreList::new(["SingletonLambda"])).unwrap_err();
    assert!(matches!(
        error,
        CanonicalizeError::MissingCodeLocation { ref resource } if resource == "SingletonLambda1234"
    ));
}

#[test]
fn batch_is_distributive() {
    let ignore = IgnoreList::new(["Masked"]);
    let first = asset_template(&[(HASH_A, "S3Bucket", "11111111")]);
    let second = value(json!({
        "Parameters": {format!("AssetParameters{HASH_B}S3Bucket22222222"): {}},
        "Resources": {"MaskedFn": {"Properties": {"Code": {"S3Key": HASH_A}}}}
    }));

    let batch = Value::Array(vec![first.clone(), second.clone()]);
    let expected = Value::Array(vec![
        canonicalize(&first, &ignore).unwrap(),
        canonicalize(&second, &ignore).unwrap(),
    ]);

    assert_eq!(canonicalize(&batch, &ignore).unwrap(), expected);

    // each element gets its own numbering
    assert_eq!(
        canonicalize(&second, &ignore).unwrap().get_path(&["Parameters"]),
        Some(&value(json!({"Asset1S3Bucket": {}})))
    );
}

#[test]
fn batch_fails_as_a_whole() {
    let broken = value(json!({"Resources": {"MaskedFn": {}}}));
    let batch = Value::Array(vec![asset_template(&[]), broken]);

    assert!(canonicalize(&batch, &IgnoreList::new(["Masked"])).is_err());
}

#[test]
fn fixtures_from_directory() {
    let mut documents = TemplateDocuments::default();
    documents
        .load_directory(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/synth"))
        .expect("fixtures load");
    assert_eq!(documents.source_count(), 2);

    let Value::Array(templates) = documents.into_value() else {
        panic!("two documents load as a batch");
    };
    let ignore = IgnoreList::default();
    assert!(canonical_eq(&templates[0], &templates[1], &ignore).unwrap());

    let masked = IgnoreList::new(["Handler"]);
    let canonical = canonicalize(&templates[1], &masked).unwrap();
    assert_eq!(
        canonical.get_path(&["Resources", "Handler", "Properties", "Code"]),
        Some(&value(json!({
            "S3Bucket": {"Ref": "Asset1S3Bucket"},
            "S3Key": "SomeHash.zip"
        })))
    );
}

#[test]
fn empty_directory_is_an_error() {
    let mut documents = TemplateDocuments::default();
    let error = documents
        .load_directory(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"))
        .expect_err("no templates in there");
    assert!(matches!(error, LoadError::NoFilesFound));
}
