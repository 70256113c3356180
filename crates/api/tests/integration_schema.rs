mod common;

use anyhow::Context as _;
use common::spawn_fixture;
use serde_json::{Value, json};

fn contains_null_union(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(alternatives)) = map.get("anyOf") {
                if alternatives.iter().any(|f| f == &json!({ "type": "null" })) {
                    return true;
                }
            }
            map.values().any(contains_null_union)
        }
        Value::Array(items) => items.iter().any(contains_null_union),
        _ => false,
    }
}

#[tokio::test]
async fn schema_document_is_downgraded_and_stable_across_requests() -> anyhow::Result<()> {
    let server = spawn_fixture().await?;
    let client = reqwest::Client::new();

    let first = client
        .get(server.url("/openapi.json"))
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let second = client
        .get(server.url("/openapi.json"))
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    assert_eq!(first, second, "two schema requests must be byte-identical");

    let doc: Value = serde_json::from_slice(&first).context("parse served document")?;
    assert_eq!(doc.get("openapi"), Some(&json!("3.0.3")));
    assert!(
        !contains_null_union(&doc),
        "no anyOf with a null type may survive the downgrade"
    );

    // The nullable union on Pet.tag collapsed into the 3.0.3 flag.
    assert_eq!(
        doc.pointer("/components/schemas/Pet/properties/tag"),
        Some(&json!({ "type": "string", "nullable": true }))
    );

    // Both accepted credential forms are advertised.
    assert_eq!(
        doc.pointer("/components/securitySchemes/apiKeyAuth/name"),
        Some(&json!("X-Api-Key"))
    );
    assert_eq!(
        doc.pointer("/components/securitySchemes/bearerAuth/scheme"),
        Some(&json!("bearer"))
    );

    Ok(())
}
