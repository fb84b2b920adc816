// tests/feedback_tests.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use immune_quest::{
    config::{Config, FeedbackConfig},
    routes,
    services::feedback::{FeedbackError, FeedbackService, TextGenerator},
    state::AppState,
};
use serde_json::{Value, json};

/// Answers every prompt with canned text and remembers what it was asked.
#[derive(Default)]
struct Scripted {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(&self, prompt: &str) -> Result<String, FeedbackError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Strong rationale. Consider infection risk.".to_string())
    }
}

struct Broken;

#[async_trait]
impl TextGenerator for Broken {
    async fn generate(&self, _prompt: &str) -> Result<String, FeedbackError> {
        Err(FeedbackError::EmptyResponse)
    }
}

async fn spawn_app(generator: Arc<dyn TextGenerator>) -> String {
    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
        allowed_origins: vec![],
        session_ttl_seconds: 600,
        feedback: FeedbackConfig::default(),
    };

    let state = AppState::with_feedback(config, FeedbackService::new(generator));
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

async fn start_session(client: &reqwest::Client, address: &str) -> String {
    let body: Value = client
        .post(format!("{}/api/sessions", address))
        .send()
        .await
        .expect("Failed to create session")
        .json()
        .await
        .unwrap();
    body["session_id"].as_str().unwrap().to_string()
}

fn psoriasis_design() -> Value {
    json!({
        "name": "Plaquestop",
        "disease": "psoriasis",
        "target": "TYK2",
        "drug_type": "small_molecule_inhibitor",
        "mechanism": "Occupies the ATP pocket of TYK2",
        "delivery": "oral",
        "efficacy_priority": "balanced",
        "side_effects": ["headache", "increased_infection_risk"],
        "cost": "from10k_to50k",
        "dosing": "daily",
        "rationale": "A pill is easier than injections."
    })
}

#[tokio::test]
async fn design_feedback_requires_a_design() {
    // Arrange
    let address = spawn_app(Arc::new(Scripted::default())).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;

    // Act
    let response = client
        .post(format!("{}/api/sessions/{}/design/feedback", address, session))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn design_submission_is_validated_against_disease() {
    let address = spawn_app(Arc::new(Scripted::default())).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;
    let url = format!("{}/api/sessions/{}/design", address, session);

    let mut design = psoriasis_design();
    design["target"] = json!("S1P receptor");
    let wrong_target = client.post(&url).json(&design).send().await.unwrap();
    assert_eq!(wrong_target.status().as_u16(), 400);

    let mut design = psoriasis_design();
    design["drug_type"] = json!("magic_potion");
    let unknown_type = client.post(&url).json(&design).send().await.unwrap();
    assert!(unknown_type.status().is_client_error());
}

#[tokio::test]
async fn design_submission_earns_researcher_once() {
    let address = spawn_app(Arc::new(Scripted::default())).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;
    let url = format!("{}/api/sessions/{}/design", address, session);

    let first: Value = client
        .post(&url)
        .json(&psoriasis_design())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["newly_awarded"], true);
    assert_eq!(first["xp_awarded"], 50);
    assert_eq!(first["unlocked"], json!(["Biotech Researcher"]));
    assert_eq!(first["summary"]["target"], "TYK2");
    assert_eq!(first["summary"]["drug_type"], "Small Molecule Inhibitor");

    let second: Value = client
        .post(&url)
        .json(&psoriasis_design())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["newly_awarded"], false);
    assert_eq!(second["xp_awarded"], 0);
    assert_eq!(second["progress"]["xp"], 50);
}

#[tokio::test]
async fn generated_design_feedback_sees_the_design() {
    let generator = Arc::new(Scripted::default());
    let address = spawn_app(generator.clone()).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;

    client
        .post(format!("{}/api/sessions/{}/design", address, session))
        .json(&psoriasis_design())
        .send()
        .await
        .unwrap();

    let body: Value = client
        .post(format!("{}/api/sessions/{}/design/feedback", address, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["source"], "generated");
    assert_eq!(body["text"], "Strong rationale. Consider infection risk.");
    assert_eq!(body["xp_awarded"], 15);
    assert_eq!(body["progress"]["xp"], 65);

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("TYK2"));
    assert!(prompts[0].contains("Plaquestop"));
}

#[tokio::test]
async fn failed_collaborator_falls_back_and_still_credits_once() {
    // Arrange
    let address = spawn_app(Arc::new(Broken)).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;
    let feedback_url = format!("{}/api/sessions/{}/design/feedback", address, session);

    client
        .post(format!("{}/api/sessions/{}/design", address, session))
        .json(&psoriasis_design())
        .send()
        .await
        .unwrap();

    // Act
    let first: Value = client
        .post(&feedback_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = client
        .post(&feedback_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(first["source"], "fallback");
    assert!(first["text"].as_str().unwrap().contains("TYK2"));
    assert_eq!(first["xp_awarded"], 15);

    assert_eq!(second["source"], "fallback");
    assert_eq!(second["xp_awarded"], 0);
    assert_eq!(second["progress"]["xp"], 65);
}

#[tokio::test]
async fn quiz_feedback_needs_short_answers() {
    let address = spawn_app(Arc::new(Scripted::default())).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;
    let feedback_url = format!("{}/api/sessions/{}/quiz/feedback", address, session);

    let before_quiz = client.post(&feedback_url).send().await.unwrap();
    assert_eq!(before_quiz.status().as_u16(), 409);

    client
        .post(format!("{}/api/sessions/{}/quiz", address, session))
        .json(&json!({ "answers": [{ "question_id": "q1", "choice": "B" }], "q7": "   " }))
        .send()
        .await
        .unwrap();

    let blank_answers = client.post(&feedback_url).send().await.unwrap();
    assert_eq!(blank_answers.status().as_u16(), 409);
}

#[tokio::test]
async fn quiz_feedback_uses_score_and_answers() {
    let generator = Arc::new(Scripted::default());
    let address = spawn_app(generator.clone()).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;

    client
        .post(format!("{}/api/sessions/{}/quiz", address, session))
        .json(&json!({
            "answers": [
                { "question_id": "q1", "choice": "B" },
                { "question_id": "q2", "choice": "B" }
            ],
            "q7": "The drug fits the <b>active site</b> of TYK2.",
            "q8": "Phase 3 is the last hurdle."
        }))
        .send()
        .await
        .unwrap();

    let body: Value = client
        .post(format!("{}/api/sessions/{}/quiz/feedback", address, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["source"], "generated");
    assert_eq!(body["xp_awarded"], 15);
    // 2 correct: 2 * 10 + 25 for the quiz, then 15 for feedback
    assert_eq!(body["progress"]["xp"], 60);

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("2/6"));
    assert!(prompts[0].contains("active site"));
    assert!(prompts[0].contains("last hurdle"));
}

#[tokio::test]
async fn student_text_reaches_prompt_as_typed() {
    // Arrange
    let generator = Arc::new(Scripted::default());
    let address = spawn_app(generator.clone()).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;

    let mut design = psoriasis_design();
    design["name"] = json!("Plaque & Go");
    design["mechanism"] = json!("Keeps IL-17 < TNF & JAK signals low");
    design["rationale"] = json!("<script>alert(1)</script>Oral <b>beats</b> injections");

    // Act
    let submitted: Value = client
        .post(format!("{}/api/sessions/{}/design", address, session))
        .json(&design)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    client
        .post(format!("{}/api/sessions/{}/design/feedback", address, session))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(submitted["summary"]["name"], "Plaque & Go");

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("**Treatment Name:** Plaque & Go"));
    assert!(prompts[0].contains("Keeps IL-17 < TNF & JAK signals low"));
    assert!(prompts[0].contains("**Scientific Rationale:** Oral beats injections"));
    assert!(!prompts[0].contains("&amp;"));
    assert!(!prompts[0].contains("<script"));
    assert!(!prompts[0].contains("alert(1)"));
}

#[tokio::test]
async fn quiz_feedback_reads_latest_attempt() {
    let generator = Arc::new(Scripted::default());
    let address = spawn_app(generator.clone()).await;
    let client = reqwest::Client::new();
    let session = start_session(&client, &address).await;
    let quiz_url = format!("{}/api/sessions/{}/quiz", address, session);

    // First attempt scores but leaves the short answers blank
    client
        .post(&quiz_url)
        .json(&json!({ "answers": [{ "question_id": "q1", "choice": "B" }] }))
        .send()
        .await
        .unwrap();
    let retake: Value = client
        .post(&quiz_url)
        .json(&json!({
            "answers": [
                { "question_id": "q1", "choice": "B" },
                { "question_id": "q2", "choice": "B" },
                { "question_id": "q3", "choice": "B" }
            ],
            "q8": "Phase 3 success lowers the risk for investors."
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(retake["scored"], false);

    let feedback = client
        .post(format!("{}/api/sessions/{}/quiz/feedback", address, session))
        .send()
        .await
        .unwrap();
    assert_eq!(feedback.status().as_u16(), 200);
    let body: Value = feedback.json().await.unwrap();

    // 1 correct on the scoring attempt: 10 + 25, then 15 for feedback
    assert_eq!(body["progress"]["xp"], 50);

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("scored 3/6"));
    assert!(prompts[0].contains("lowers the risk for investors"));
}
