//! Requests and response handling of the API client against a local mock.

mod common;

use std::sync::Arc;

use common::MockServer;
use exw_auth::{AuthError, AuthProvider, AuthUser, LegacyTokenProvider, Session, SessionStore, TokenStore};
use exw_client::{ApiClient, ApiError};
use exw_config::ApiConfig;
use exw_core::assessment::{AnswerValue, Question, SaveResponseRequest};
use exw_core::profile::ProfileSection;
use exw_core::quiz::{QuizResponses, QuizSubmission};
use exw_core::wealth_gap::WealthGap;
use exw_store::{MemoryStore, Repository, keys};
use pretty_assertions::assert_eq;
use serde_json::json;

const TOKEN: &str = "test-token";

fn client(server: &MockServer, signed_in: bool) -> (Arc<MemoryStore>, ApiClient) {
    let repo = Arc::new(MemoryStore::new());
    let sessions = SessionStore::new(TokenStore::repository_only(repo.clone()), repo.clone());
    if signed_in {
        sessions
            .save(&Session::new(TOKEN.into(), AuthUser::default()))
            .unwrap();
    }
    let config = ApiConfig {
        base_url: format!("{}/api/", server.base),
        timeout_secs: 5,
    };
    let provider = LegacyTokenProvider::new(config.base(), config.timeout(), sessions).unwrap();
    let auth: Arc<dyn AuthProvider> = Arc::new(provider);
    (repo, ApiClient::new(&config, auth).unwrap())
}

#[tokio::test]
async fn industries_are_fetched_with_bearer_token() {
    let server = MockServer::start(vec![(
        200,
        json!({"industries": [{
            "id": 4,
            "industry_name": "Software (System & Application)",
            "ev_ebitda": {"low": 12.0, "median": 20.0, "high": 30.0}
        }]})
        .to_string(),
    )]);
    let (_, client) = client(&server, true);

    let industries = client.industries().await.unwrap();
    assert_eq!(industries.len(), 1);
    assert_eq!(industries[0].ev_ebitda.median, Some(20.0));

    let requests = server.finish();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/api/valuation/industries");
    assert_eq!(requests[0].header("Authorization"), Some("Bearer test-token"));
}

#[tokio::test]
async fn unauthorized_clears_the_session() {
    let server = MockServer::start(vec![(401, json!({"error": "Token has expired"}).to_string())]);
    let (repo, client) = client(&server, true);

    let err = client.valuation_history().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(repo.load_value(keys::TOKEN).unwrap().is_none());
    assert!(matches!(client.auth().token(), Err(AuthError::NotAuthenticated)));
    server.finish();
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start(Vec::new());
    let (_, client) = client(&server, false);

    let err = client.industries().await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthError::NotAuthenticated)));
    assert!(server.finish().is_empty());
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start(vec![(
        400,
        json!({"success": false, "error": "Business name is required"}).to_string(),
    )]);
    let (_, client) = client(&server, true);

    let err = client
        .save_business_profile(&exw_core::profile::BusinessProfile::default())
        .await
        .unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Business name is required");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.finish();
}

#[tokio::test]
async fn missing_profile_is_none() {
    let server = MockServer::start(vec![(
        404,
        json!({"success": false, "error": "No business profile found"}).to_string(),
    )]);
    let (_, client) = client(&server, true);

    assert_eq!(client.business_profile().await.unwrap(), None);
    server.finish();
}

#[tokio::test]
async fn profile_section_is_merged_into_full_profile() {
    let existing = json!({"success": true, "profile": {"business_name": "Acme Tools", "industry": "Manufacturing"}});
    let saved = json!({"success": true, "message": "Profile saved", "profile": {
        "business_name": "Acme Tools", "industry": "Manufacturing", "client_first_name": "Pat"
    }});
    let server = MockServer::start(vec![(200, existing.to_string()), (200, saved.to_string())]);
    let (_, client) = client(&server, true);

    let profile = client
        .save_profile_section(ProfileSection::Client, &json!({"client_first_name": "Pat"}))
        .await
        .unwrap();
    assert_eq!(profile.client_first_name.as_deref(), Some("Pat"));

    let requests = server.finish();
    assert_eq!(requests[1].method, "POST");
    assert_eq!(requests[1].url, "/api/business/profile");
    let body = requests[1].json();
    assert_eq!(body["business_name"], "Acme Tools");
    assert_eq!(body["client_first_name"], "Pat");
}

#[tokio::test]
async fn save_response_posts_labelled_answer() {
    let server = MockServer::start(vec![(
        200,
        json!({
            "message": "Response saved successfully",
            "response": {"id": 1, "question_id": "FP-01", "answer_value": 5, "score": 83.3},
            "assessment": {"overall_score": 83.3, "attractiveness_score": 80.0, "answered_questions": 1}
        })
        .to_string(),
    )]);
    let (_, client) = client(&server, true);
    let question: Question = serde_json::from_value(json!({
        "question_id": "FP-01",
        "question_text": "How predictable is your cash flow?",
        "category": "financial_performance",
        "subject": "Cash Flow"
    }))
    .unwrap();

    let request = SaveResponseRequest::new(Some(9), &question, AnswerValue::new(5).unwrap(), None);
    let saved = client.save_response(&request).await.unwrap();
    assert_eq!(saved.assessment.answered_questions, 1);

    let requests = server.finish();
    assert_eq!(requests[0].url, "/api/assessment/response");
    let body = requests[0].json();
    assert_eq!(body["question_id"], "FP-01");
    assert_eq!(body["answer_value"], 5);
    assert_eq!(body["assessment_id"], 9);
}

#[tokio::test]
async fn task_status_is_updated_with_put() {
    let server = MockServer::start(vec![(
        200,
        json!({"message": "Task status updated", "task": {"id": 3, "status": "completed", "title": "Document SOPs"}})
            .to_string(),
    )]);
    let (_, client) = client(&server, true);

    let task = client.update_task_status(3, "completed").await.unwrap();
    assert_eq!(task.status, "completed");

    let requests = server.finish();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].url, "/api/assessment/task/3/status");
    assert_eq!(requests[0].json(), json!({"status": "completed"}));
}

#[tokio::test]
async fn wealth_gap_net_worth_is_derived_before_sending() {
    let server = MockServer::start(vec![(
        200,
        json!({"wealth_goal": 2_000_000.0, "wealth_gap": 1_700_000.0, "current_net_worth": 300_000.0}).to_string(),
    )]);
    let (_, client) = client(&server, true);
    let inputs = WealthGap {
        wealth_goal_amount: 2_000_000.0,
        liquid_assets: Some(350_000.0),
        total_liabilities: Some(50_000.0),
        ..WealthGap::default()
    };

    let calc = client.calculate_wealth_gap(&inputs).await.unwrap();
    assert_eq!(calc.wealth_gap, 1_700_000.0);

    let requests = server.finish();
    assert_eq!(requests[0].url, "/api/wealth-gap/calculate");
    assert_eq!(requests[0].json()["current_net_worth"], 300_000.0);
}

#[tokio::test]
async fn quiz_submit_and_missing_results() {
    let server = MockServer::start(vec![
        (
            200,
            json!({
                "success": true,
                "recommendations": [{"rank": 1, "key": "esop", "name": "ESOP", "category": "Internal", "score": 12}],
                "all_scores": {"esop": 12}
            })
            .to_string(),
        ),
        (404, json!({"success": false, "message": "No quiz results found"}).to_string()),
    ]);
    let (_, client) = client(&server, true);
    let mut responses = QuizResponses::new();
    responses.insert("Q1".into(), "preserve_legacy".into());

    let result = client.submit_quiz(&QuizSubmission { responses }).await.unwrap();
    assert_eq!(result.top().unwrap().key, "esop");
    assert_eq!(client.quiz_results().await.unwrap(), None);

    let requests = server.finish();
    assert_eq!(requests[0].url, "/api/exit-quiz/submit");
    assert_eq!(requests[0].json(), json!({"responses": {"Q1": "preserve_legacy"}}));
    assert_eq!(requests[1].url, "/api/exit-quiz/results");
}

#[tokio::test]
async fn archive_returns_acknowledgement() {
    let server = MockServer::start(vec![(200, json!({"message": "Valuation archived"}).to_string())]);
    let (_, client) = client(&server, true);

    assert_eq!(client.archive_valuation(12).await.unwrap(), "Valuation archived");
    let requests = server.finish();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].url, "/api/valuation/12");
}
