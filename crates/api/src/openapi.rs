//! `OpenAPI` document for the fixture API.
//!
//! The base document is assembled in-memory in the 3.1 nullable-union
//! convention (optional values as `anyOf` with `{"type": "null"}`), the way
//! schema generators emit it. Clients under test only understand 3.0.3, so
//! the served document is the downgraded tree with its version field
//! rewritten. Assembly is deterministic: no I/O, no types-to-schema
//! generation.

use petfix_schema_tools::downgrade::downgrade_schema;
use serde_json::{Value, json};

/// Version advertised after the downgrade.
const SERVED_OPENAPI_VERSION: &str = "3.0.3";

/// The document handed to clients: downgraded to 3.0.3 conventions.
///
/// Callers cache the result for the process lifetime; the base document
/// cannot change at runtime.
#[must_use]
pub fn downgraded_document() -> Value {
    let mut doc = downgrade_schema(&base_document());
    if let Value::Object(map) = &mut doc {
        map.insert(
            "openapi".to_string(),
            Value::String(SERVED_OPENAPI_VERSION.to_string()),
        );
    }
    doc
}

/// The generated 3.1-style document describing the fixture routes.
fn base_document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Petfix Test API",
            "version": "1.0.0",
            "description": "E2E pet-store fixture for client integration tests"
        },
        "paths": {
            "/health": {
                "get": {
                    "operationId": "health",
                    "tags": ["admin"],
                    "summary": "Liveness probe",
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Status" }
                        } } }
                    }
                }
            },
            "/reset": {
                "post": {
                    "operationId": "resetData",
                    "tags": ["admin"],
                    "summary": "Restore the seed data",
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Status" }
                        } } }
                    }
                }
            },
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "tags": ["pets"],
                    "summary": "List pets",
                    "parameters": [
                        {
                            "name": "limit",
                            "in": "query",
                            "required": false,
                            "schema": { "anyOf": [{ "type": "integer" }, { "type": "null" }] }
                        },
                        {
                            "name": "status",
                            "in": "query",
                            "required": false,
                            "schema": {
                                "anyOf": [
                                    { "$ref": "#/components/schemas/PetStatus" },
                                    { "type": "null" }
                                ]
                            }
                        }
                    ],
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/PetList" }
                        } } }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "tags": ["pets"],
                    "summary": "Create a pet",
                    "security": [{ "bearerAuth": [] }, { "apiKeyAuth": [] }],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/PetCreate" }
                        } }
                    },
                    "responses": {
                        "201": { "description": "Created", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Pet" }
                        } } },
                        "401": { "description": "Unauthorized" }
                    }
                }
            },
            "/pets/{petId}": {
                "get": {
                    "operationId": "getPet",
                    "tags": ["pets"],
                    "summary": "Fetch one pet",
                    "parameters": [{
                        "name": "petId",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Pet" }
                        } } },
                        "404": { "description": "Pet not found" }
                    }
                },
                "put": {
                    "operationId": "updatePet",
                    "tags": ["pets"],
                    "summary": "Partially update a pet",
                    "security": [{ "bearerAuth": [] }, { "apiKeyAuth": [] }],
                    "parameters": [{
                        "name": "petId",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/PetUpdate" }
                        } }
                    },
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Pet" }
                        } } },
                        "401": { "description": "Unauthorized" },
                        "404": { "description": "Pet not found" }
                    }
                },
                "delete": {
                    "operationId": "deletePet",
                    "tags": ["pets"],
                    "summary": "Delete a pet",
                    "security": [{ "bearerAuth": [] }, { "apiKeyAuth": [] }],
                    "parameters": [{
                        "name": "petId",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "responses": {
                        "200": { "description": "Deleted", "content": { "application/json": {
                            "schema": { "$ref": "#/components/schemas/Status" }
                        } } },
                        "401": { "description": "Unauthorized" },
                        "404": { "description": "Pet not found" }
                    }
                }
            },
            "/owners": {
                "get": {
                    "operationId": "listOwners",
                    "tags": ["owners"],
                    "summary": "List owners",
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Owner" } }
                        } } }
                    }
                }
            },
            "/owners/{ownerId}/pets": {
                "get": {
                    "operationId": "listOwnerPets",
                    "tags": ["owners"],
                    "summary": "List one owner's pets",
                    "parameters": [{
                        "name": "ownerId",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": {
                            "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
                        } } },
                        "404": { "description": "Owner not found" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "PetStatus": {
                    "type": "string",
                    "enum": ["available", "pending", "sold"]
                },
                "Pet": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" },
                        "status": { "$ref": "#/components/schemas/PetStatus" },
                        "ownerId": { "type": "integer" },
                        "tag": { "anyOf": [{ "type": "string" }, { "type": "null" }] }
                    },
                    "required": ["id", "name", "status", "ownerId"]
                },
                "PetCreate": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "status": {
                            "$ref": "#/components/schemas/PetStatus",
                            "default": "available"
                        },
                        "ownerId": { "type": "integer" },
                        "tag": { "anyOf": [{ "type": "string" }, { "type": "null" }] }
                    },
                    "required": ["name", "ownerId"]
                },
                "PetUpdate": {
                    "type": "object",
                    "properties": {
                        "name": { "anyOf": [{ "type": "string" }, { "type": "null" }] },
                        "status": {
                            "anyOf": [
                                { "$ref": "#/components/schemas/PetStatus" },
                                { "type": "null" }
                            ]
                        },
                        "ownerId": { "anyOf": [{ "type": "integer" }, { "type": "null" }] },
                        "tag": { "anyOf": [{ "type": "string" }, { "type": "null" }] }
                    }
                },
                "PetList": {
                    "type": "object",
                    "properties": {
                        "items": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } },
                        "total": { "type": "integer" }
                    },
                    "required": ["items", "total"]
                },
                "Owner": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "name": { "type": "string" }
                    },
                    "required": ["id", "name"]
                },
                "Status": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string" }
                    },
                    "required": ["status"]
                }
            },
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer" },
                "apiKeyAuth": { "type": "apiKey", "in": "header", "name": "X-Api-Key" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// True if any mapping in the tree still holds an `anyOf` with the null
    /// type.
    fn contains_null_union(value: &Value) -> bool {
        match value {
            Value::Object(map) => {
                if let Some(Value::Array(alternatives)) = map.get("anyOf")
                    && alternatives
                        .iter()
                        .any(|f| f == &json!({ "type": "null" }))
                {
                    return true;
                }
                map.values().any(contains_null_union)
            }
            Value::Array(items) => items.iter().any(contains_null_union),
            _ => false,
        }
    }

    #[test]
    fn served_document_advertises_3_0_3() {
        let doc = downgraded_document();
        assert_eq!(doc.get("openapi"), Some(&json!(SERVED_OPENAPI_VERSION)));
    }

    #[test]
    fn base_document_carries_null_unions_and_the_served_one_does_not() {
        assert!(contains_null_union(&base_document()));
        assert!(!contains_null_union(&downgraded_document()));
    }

    #[test]
    fn tag_property_becomes_a_nullable_string() {
        let doc = downgraded_document();
        assert_eq!(
            doc.pointer("/components/schemas/Pet/properties/tag"),
            Some(&json!({ "type": "string", "nullable": true }))
        );
    }

    #[test]
    fn limit_parameter_schema_becomes_a_nullable_integer() {
        let doc = downgraded_document();
        assert_eq!(
            doc.pointer("/paths/~1pets/get/parameters/0/schema"),
            Some(&json!({ "type": "integer", "nullable": true }))
        );
    }

    #[test]
    fn assembly_is_deterministic() {
        let a = serde_json::to_string(&downgraded_document()).unwrap();
        let b = serde_json::to_string(&downgraded_document()).unwrap();
        assert_eq!(a, b);
    }
}
