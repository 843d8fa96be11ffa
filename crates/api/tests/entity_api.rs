//! HTTP-level integration tests for the entity resources.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, count_rows, delete, get, header, patch_json, post_json, put_json,
    MERGE_PATCH,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(common::build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn create_client(pool: &PgPool, reference: &str) -> i64 {
    let json = create(
        pool,
        "/api/clients",
        json!({"refClient": reference, "nom": "Durand", "prenom": "Alice"}),
    )
    .await;
    json["id"].as_i64().unwrap()
}

async fn create_ressource(pool: &PgPool, nom: &str) -> String {
    let json = create(pool, "/api/ressources", json!({"nom": nom, "prenom": "Bob"})).await;
    json["id"].as_str().unwrap().to_string()
}

async fn create_maintenance(pool: &PgPool, ressource_id: &str) -> String {
    let json = create(
        pool,
        "/api/maintenances",
        json!({
            "description": "A",
            "dateDebut": "2024-03-01",
            "duree": 1.0,
            "etat": "Planifier",
            "ressource": {"id": ressource_id},
        }),
    )
    .await;
    json["id"].as_str().unwrap().to_string()
}

/// Ids of a client, projet, livrable and activite chain, for estimations.
struct Chain {
    projet: i64,
    livrable: i64,
    activite: i64,
}

async fn create_chain(pool: &PgPool) -> Chain {
    let client = create_client(pool, "CL-1").await;
    let projet = create(pool, "/api/projets", projet_payload("PRJ-1", client)).await["id"]
        .as_i64()
        .unwrap();
    let livrable = create(
        pool,
        "/api/livrables",
        json!({
            "refLivrable": "LIV-1",
            "dateDebut": "2024-02-01",
            "description": "Lot 1",
            "projet": {"id": projet},
        }),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    let activite = create(
        pool,
        "/api/activites",
        json!({
            "refAct": "ACT-1",
            "description": "Analyse",
            "dateDebut": "2024-02-05",
            "livrable": {"id": livrable},
        }),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    Chain {
        projet,
        livrable,
        activite,
    }
}

fn estimation_payload(chain: &Chain, valeur_jour: f64) -> serde_json::Value {
    json!({
        "date": "2024-02-10",
        "valeurJour": valeur_jour,
        "priseEnCharge": true,
        "type": "Activite",
        "activite": {"id": chain.activite},
        "projet": {"id": chain.projet},
        "livrable": {"id": chain.livrable},
    })
}

fn projet_payload(reference: &str, client_id: i64) -> serde_json::Value {
    json!({
        "refProjet": reference,
        "type": "Interne",
        "description": "Refonte",
        "datedebut": "2024-01-01",
        "client": {"id": client_id},
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_client_returns_201_with_location_and_alert(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/clients",
        json!({"refClient": "CL-1", "nom": "Durand", "prenom": "Alice"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = header(&response, "location").unwrap().to_string();
    assert_eq!(
        header(&response, "x-easytaskapp-alert"),
        Some("easyTaskApp.client.created")
    );

    let json = body_json(response).await;
    let id = json["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/clients/{id}"));
    assert_eq!(json["refClient"], "CL-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_identity_is_idexists(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/ressources",
        json!({"id": "7a4c2e9e-30a4-4e1b-9d1a-111111111111", "nom": "Dupont", "prenom": "Bob"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-easytaskapp-error"), Some("error.idexists"));
    assert_eq!(header(&response, "x-easytaskapp-params"), Some("ressource"));

    let json = body_json(response).await;
    assert_eq!(json["errorKey"], "idexists");
    assert_eq!(json["entityName"], "ressource");
    assert_eq!(json["message"], "error.idexists");
    assert_eq!(count_rows(&pool, "ressource").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_missing_required_field_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/ressources", json!({"nom": "Dupont"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(count_rows(&pool, "ressource").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_error_names_fields_as_sent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/clients", json!({"nom": "Durand", "prenom": "Alice"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "refClient: required");
}

// ---------------------------------------------------------------------------
// Projet scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projet_round_trip_and_duplicate_reference(pool: PgPool) {
    let client_id = create_client(&pool, "CL-1").await;

    let created = create(&pool, "/api/projets", projet_payload("PRJ-001", client_id)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/projets/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["refProjet"], "PRJ-001");
    assert_eq!(json["type"], "Interne");
    assert_eq!(json["datedebut"], "2024-01-01");
    assert_eq!(json["client"]["id"], client_id);
    assert_eq!(json["client"]["nom"], "Durand");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/projets", projet_payload("PRJ-001", client_id)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert_eq!(json["error"], "Constraint violation: ux_projet__ref_projet");
    assert_eq!(count_rows(&pool, "projet").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projet_reference_longer_than_twenty_is_400(pool: PgPool) {
    let client_id = create_client(&pool, "CL-1").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/projets",
        projet_payload("PRJ-0123456789-ABCDEF", client_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(count_rows(&pool, "projet").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projet_without_client_is_constraint_violation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/projets",
        json!({
            "refProjet": "PRJ-001",
            "type": "Externe",
            "description": "Orphan",
            "datedebut": "2024-01-01",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert_eq!(count_rows(&pool, "projet").await, 0);
}

// ---------------------------------------------------------------------------
// Full update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_client(pool: PgPool) {
    let id = create_client(&pool, "CL-1").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/clients/{id}"),
        json!({"id": id, "refClient": "CL-1", "nom": "Martin", "prenom": "Alice"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "x-easytaskapp-alert"),
        Some("easyTaskApp.client.updated")
    );
    assert_eq!(header(&response, "x-easytaskapp-params"), Some(id.to_string().as_str()));
    let json = body_json(response).await;
    assert_eq!(json["nom"], "Martin");
    assert!(json["contact"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_identity_violations(pool: PgPool) {
    let id = create_client(&pool, "CL-1").await;
    let payload = |body_id: Option<i64>| {
        json!({"id": body_id, "refClient": "CL-1", "nom": "Martin", "prenom": "Alice"})
    };

    let cases = [
        (format!("/api/clients/{id}"), payload(None), "idnull"),
        (format!("/api/clients/{id}"), payload(Some(id + 1)), "idinvalid"),
        ("/api/clients/999999".to_string(), payload(Some(999_999)), "idnotfound"),
    ];

    for (uri, body, key) in cases {
        let app = common::build_test_app(pool.clone());
        let response = put_json(app, &uri, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{key}");
        let json = body_json(response).await;
        assert_eq!(json["errorKey"], key);
    }

    // None of the rejected updates reached the store.
    assert_eq!(count_rows(&pool, "client").await, 1);
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/clients/{id}")).await).await;
    assert_eq!(json["nom"], "Durand");
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_leaves_unspecified_fields_unchanged(pool: PgPool) {
    let ressource_id = create_ressource(&pool, "Dupont").await;
    let id = create_maintenance(&pool, &ressource_id).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/maintenances/{id}"),
        MERGE_PATCH,
        json!({"id": id, "description": "B", "etat": null, "solution": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["description"], "B");
    assert_eq!(json["duree"], 1.0);
    assert_eq!(json["etat"], "Planifier");
    assert_eq!(json["ressource"]["id"], ressource_id.as_str());

    // The merge is persisted, not just echoed.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/maintenances/{id}")).await).await;
    assert_eq!(json["description"], "B");
    assert_eq!(json["duree"], 1.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_accepts_plain_json(pool: PgPool) {
    let client_id = create_client(&pool, "CL-1").await;
    let created = create(&pool, "/api/projets", projet_payload("PRJ-001", client_id)).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/projets/{id}"),
        "application/json",
        json!({"id": id, "etat": "EnCours"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["etat"], "EnCours");
    assert_eq!(json["refProjet"], "PRJ-001");
    assert_eq!(json["client"]["id"], client_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_mismatched_identity_is_idinvalid(pool: PgPool) {
    let ressource_id = create_ressource(&pool, "Dupont").await;
    let id = create_maintenance(&pool, &ressource_id).await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/maintenances/{id}"),
        MERGE_PATCH,
        json!({"id": ressource_id, "description": "B"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-easytaskapp-error"), Some("error.idinvalid"));

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/maintenances/{id}")).await).await;
    assert_eq!(json["description"], "A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_unknown_identity_is_idnotfound(pool: PgPool) {
    let id = "0b7f5a52-0000-4000-8000-000000000000";

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/charge-journalieres/{id}"),
        MERGE_PATCH,
        json!({"id": id, "duree": 2.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errorKey"], "idnotfound");
    assert_eq!(json["entityName"], "chargeJournaliere");
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_resolves_reference_inline(pool: PgPool) {
    let ressource_id = create_ressource(&pool, "Dupont").await;
    let id = create_maintenance(&pool, &ressource_id).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/maintenances/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ressource"]["id"], ressource_id.as_str());
    assert_eq!(json["ressource"]["nom"], "Dupont");
    assert_eq!(json["ressource"]["prenom"], "Bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_returns_404_with_empty_body(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/clients/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_lazy_and_eager(pool: PgPool) {
    let ressource_id = create_ressource(&pool, "Dupont").await;
    create_maintenance(&pool, &ressource_id).await;
    create_maintenance(&pool, &ressource_id).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/maintenances").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "x-total-count").is_none());
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["ressource"]["id"], ressource_id.as_str());
    assert!(items[0]["ressource"]["nom"].is_null());

    let app = common::build_test_app(pool);
    let response = get(app, "/api/maintenances?eagerload=true").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["ressource"]["nom"], "Dupont");
    assert_eq!(json[1]["ressource"]["nom"], "Dupont");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paged_sets_total_count(pool: PgPool) {
    for i in 0..3 {
        create_client(&pool, &format!("CL-{i}")).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/clients?limit=2&offset=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count"), Some("3"));
    let json = body_json(response).await;
    let refs: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["refClient"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(refs, ["CL-1", "CL-2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_estimation_create_then_get_resolves_all_references(pool: PgPool) {
    let chain = create_chain(&pool).await;
    let created = create(&pool, "/api/estimations", estimation_payload(&chain, 2.5)).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["type"], "Activite");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/estimations/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["valeurJour"], 2.5);
    assert_eq!(json["priseEnCharge"], true);
    assert_eq!(json["activite"]["refAct"], "ACT-1");
    assert_eq!(json["livrable"]["refLivrable"], "LIV-1");
    assert_eq!(json["projet"]["refProjet"], "PRJ-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_estimation_list_eager_paged(pool: PgPool) {
    let chain = create_chain(&pool).await;
    create(&pool, "/api/estimations", estimation_payload(&chain, 1.0)).await;
    create(&pool, "/api/estimations", estimation_payload(&chain, 2.0)).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/estimations?eagerload=true&limit=1&offset=1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count"), Some("2"));
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["activite"]["refAct"], "ACT-1");
    assert_eq!(items[0]["livrable"]["refLivrable"], "LIV-1");
    assert_eq!(items[0]["projet"]["refProjet"], "PRJ-1");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_204_then_404(pool: PgPool) {
    let id = create_ressource(&pool, "Dupont").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/ressources/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        header(&response, "x-easytaskapp-alert"),
        Some("easyTaskApp.ressource.deleted")
    );
    assert_eq!(header(&response, "x-easytaskapp-params"), Some(id.as_str()));

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/ressources/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_is_idempotent(pool: PgPool) {
    create_client(&pool, "CL-1").await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = delete(app, "/api/clients/999999").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    assert_eq!(count_rows(&pool, "client").await, 1);
}
