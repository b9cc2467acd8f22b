//! Integration tests for the HTTP API.
//!
//! Each test drives the full router with in-memory repositories and mock
//! external services.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use slide_study::adapters::ai::MockAIProvider;
use slide_study::adapters::download::StaticDownloader;
use slide_study::adapters::http::{app_router, AppState, Repositories, Services};
use slide_study::adapters::pdf::StaticRasterizer;
use slide_study::adapters::speech::MockSpeechSynthesizer;
use slide_study::adapters::storage::InMemoryObjectStorage;
use slide_study::application::handlers::GenerationSettings;
use slide_study::config::ServerConfig;
use slide_study::domain::catalog::{Slide, SlideImage};
use slide_study::domain::foundation::SlideId;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    repositories: Repositories,
    ai: MockAIProvider,
    speech: MockSpeechSynthesizer,
    storage: InMemoryObjectStorage,
}

impl TestApp {
    fn new() -> Self {
        Self::with_pages(3)
    }

    fn with_pages(page_count: usize) -> Self {
        let repositories = Repositories::in_memory();
        let ai = MockAIProvider::new();
        let speech = MockSpeechSynthesizer::new();
        let storage = InMemoryObjectStorage::with_bucket("lectures");
        let services = Services {
            ai: Arc::new(ai.clone()),
            speech: Arc::new(speech.clone()),
            storage: Arc::new(storage.clone()),
            rasterizer: Arc::new(StaticRasterizer::new(page_count)),
            downloader: Arc::new(StaticDownloader::new(b"%PDF-1.7".to_vec())),
        };
        let state = AppState::new(
            repositories.clone(),
            services,
            GenerationSettings::default(),
        );
        Self {
            router: app_router(state, &ServerConfig::default()),
            repositories,
            ai,
            speech,
            storage,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    /// Reads a server-sent event stream to completion and returns the
    /// `data:` payloads in order.
    async fn events(&self, uri: &str) -> Vec<String> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/event-stream"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec())
            .unwrap()
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .map(str::to_string)
            .collect()
    }

    /// Stores a slide with one page per entry of `texts`.
    async fn seed_deck(&self, texts: &[&str]) -> (Slide, Vec<SlideImage>) {
        let slide = Slide::new("Cell Biology", "https://lectures.s3.amazonaws.com/deck.pdf", None)
            .unwrap();
        self.repositories.slides.save(&slide).await.unwrap();

        let mut images = Vec::new();
        for (order, text) in texts.iter().enumerate() {
            let mut image = SlideImage::new(
                slide.id,
                format!("https://lectures.s3.amazonaws.com/slides/{}/{}.png", slide.id, order),
                order as i32,
            );
            image.set_generated_text(*text);
            self.repositories.images.save(&image).await.unwrap();
            images.push(image);
        }
        (slide, images)
    }
}

fn parse(event: &str) -> Value {
    serde_json::from_str(event).unwrap()
}

// =============================================================================
// Health and errors
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn malformed_path_id_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app.get("/slide/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["error"], "Invalid slide ID format");
}

#[tokio::test]
async fn unknown_slide_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get(&format!("/slide/{}", SlideId::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Slide not found");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn space_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app.post("/space", json!({"name": "Biology 101"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "success");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (_, renamed) = app
        .request(
            Method::PUT,
            &format!("/space/{}", id),
            Some(json!({"name": "Biology 102"})),
        )
        .await;
    assert_eq!(renamed["data"]["name"], "Biology 102");

    let (_, listed) = app.get("/spaces").await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .request(Method::DELETE, &format!("/space/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/space/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn space_without_name_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app.post("/space", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slides_are_listed_by_space() {
    let app = TestApp::new();
    let (_, space) = app.post("/space", json!({"name": "Chemistry"})).await;
    let space_id = space["data"]["id"].as_str().unwrap().to_string();

    app.post(
        "/slide",
        json!({"name": "Bonds", "pdf_url": "https://x/bonds.pdf", "space_id": space_id}),
    )
    .await;
    app.post(
        "/slide",
        json!({"name": "Unfiled", "pdf_url": "https://x/other.pdf"}),
    )
    .await;

    let (status, body) = app.get(&format!("/space-slides/{}", space_id)).await;
    assert_eq!(status, StatusCode::OK);
    let slides = body["data"].as_array().unwrap();
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0]["name"], "Bonds");
}

#[tokio::test]
async fn multipart_upload_stores_pdf_under_slide_prefix() {
    let app = TestApp::new();
    let boundary = "slide-study-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nGenetics\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"deck.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n%PDF-1.7 body\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/slide/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    let slide_id = created["data"]["id"].as_str().unwrap();

    let keys = app.storage.keys().await;
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with(&format!("slides/{}/", slide_id)));
    assert!(keys[0].ends_with(".pdf"));
    let stored = app.storage.get(&keys[0]).await.unwrap();
    assert_eq!(stored.bytes, b"%PDF-1.7 body".to_vec());
    assert_eq!(stored.content_type, "application/pdf");
}

#[tokio::test]
async fn deleting_slide_cascades_to_pages() {
    let app = TestApp::new();
    let (slide, _) = app.seed_deck(&["a", "b"]).await;

    let (status, body) = app
        .request(Method::DELETE, &format!("/slide/{}", slide.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Slide deleted successfully", "status_code": 200})
    );

    let (_, images) = app.get(&format!("/slide/images/{}", slide.id)).await;
    assert_eq!(images["data"], json!([]));
}

// =============================================================================
// PDF conversion
// =============================================================================

#[tokio::test]
async fn convert_pdf_creates_ordered_pages() {
    let app = TestApp::with_pages(3);
    let (slide, _) = app.seed_deck(&[]).await;

    let (status, body) = app
        .post(&format!("/convert-pdf-to-images/{}", slide.id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "PDF converted to images", "status_code": 200})
    );

    let (_, images) = app.get(&format!("/slide/images/{}", slide.id)).await;
    let orders: Vec<i64> = images["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn convert_pdf_stream_reports_each_upload() {
    let app = TestApp::with_pages(2);
    let (slide, _) = app.seed_deck(&[]).await;

    let events = app
        .events(&format!("/convert-pdf-to-images/{}", slide.id))
        .await;

    assert_eq!(events[0], "Downloading PDF");
    assert_eq!(events[1], "Converting PDF to images");
    assert_eq!(parse(&events[2]), json!({"totalImages": 2}));
    assert_eq!(events[3], "Uploaded image 1 of 2");
    assert_eq!(events[4], "Uploaded image 2 of 2");
    let last = parse(&events[5]);
    assert_eq!(last["status"], "success");
    assert_eq!(last["data"].as_array().unwrap().len(), 2);
    assert_eq!(events.len(), 6);
}

#[tokio::test]
async fn converting_a_converted_slide_is_rejected() {
    let app = TestApp::with_pages(2);
    let (slide, _) = app.seed_deck(&[]).await;
    let uri = format!("/convert-pdf-to-images/{}", slide.id);

    let (status, _) = app.post(&uri, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.post(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slide already converted");

    let (_, images) = app.get(&format!("/slide/images/{}", slide.id)).await;
    assert_eq!(images["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn convert_pdf_stream_reports_missing_slide_in_band() {
    let app = TestApp::new();
    let events = app
        .events(&format!("/convert-pdf-to-images/{}", SlideId::new()))
        .await;
    assert_eq!(
        events.iter().map(|e| parse(e)).collect::<Vec<_>>(),
        vec![json!({"status": "error", "error": "Slide not found"})]
    );
}

// =============================================================================
// Narration, notes and audio
// =============================================================================

#[tokio::test]
async fn image_text_stream_narrates_and_persists() {
    let app = TestApp::new();
    let (_, images) = app.seed_deck(&["Intro to cells", ""]).await;
    app.ai.push_response("Mitochondria produce ATP.");

    let events = app
        .events(&format!("/generate-image-text/{}", images[1].id))
        .await;

    assert_eq!(
        events[..2],
        [
            "Processing image to generate text".to_string(),
            "Updating generated text in the database".to_string()
        ]
    );
    let last = parse(&events[2]);
    assert_eq!(last["status"], "success");
    assert_eq!(last["data"], "Mitochondria produce ATP.");

    let stored = app
        .repositories
        .images
        .find_by_id(&images[1].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.generated_text, "Mitochondria produce ATP.");
}

#[tokio::test]
async fn image_text_stream_returns_existing_text_without_calling_model() {
    let app = TestApp::new();
    let (_, images) = app.seed_deck(&["Already narrated"]).await;

    let events = app
        .events(&format!("/generate-image-text/{}", images[0].id))
        .await;

    assert_eq!(events.len(), 1);
    assert_eq!(parse(&events[0])["data"], "Already narrated");
    assert_eq!(app.ai.call_count(), 0);
}

#[tokio::test]
async fn all_image_text_stream_ends_with_done() {
    let app = TestApp::new();
    let (slide, _) = app.seed_deck(&["first", "", ""]).await;
    app.ai.push_response("second narration");
    app.ai.push_response("third narration");

    let events = app
        .events(&format!("/generate-all-image-text/{}", slide.id))
        .await;

    assert_eq!(parse(&events[0]), json!({"totalImages": 3}));
    assert_eq!(parse(&events[1]), json!({"processedImage": 0}));
    assert_eq!(events[2], "Processing image for slide order 1");
    assert_eq!(parse(&events[3]), json!({"processedImage": 1}));
    assert_eq!(events[4], "Processing image for slide order 2");
    assert_eq!(parse(&events[5]), json!({"processedImage": 2}));
    assert_eq!(parse(&events[6])["status"], "success");
    assert_eq!(events[7], "[DONE]");
    assert_eq!(app.ai.call_count(), 2);
}

#[tokio::test]
async fn notes_require_every_page_to_have_text() {
    let app = TestApp::new();
    let (slide, _) = app.seed_deck(&["one", ""]).await;

    let (status, _) = app
        .post(&format!("/generate-notes/{}", slide.id), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_are_compiled_in_page_order() {
    let app = TestApp::new();
    let (slide, _) = app.seed_deck(&["one", "two"]).await;

    let (status, body) = app
        .post(&format!("/generate-notes/{}", slide.id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["one", "two"]));

    let (_, stored) = app.get(&format!("/slide/{}", slide.id)).await;
    assert_eq!(stored["data"]["generated_notes"], json!(["one", "two"]));
}

#[tokio::test]
async fn audio_is_generated_once_unless_update_requested() {
    let app = TestApp::new();
    let (slide, images) = app.seed_deck(&["Narration to voice"]).await;
    let body = json!({"slide_image_id": images[0].id.to_string()});

    let (status, first) = app.post("/generate-audio", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let url = first["data"].as_str().unwrap().to_string();
    assert!(url.contains(&format!("slides/{}/audio/", slide.id)));

    let (_, second) = app.post("/generate-audio", body).await;
    assert_eq!(second["data"], url);
    assert_eq!(app.speech.call_count(), 1);
    assert_eq!(app.speech.texts(), vec!["Narration to voice".to_string()]);
}

#[tokio::test]
async fn audio_stream_reports_each_step() {
    let app = TestApp::new();
    let (_, images) = app.seed_deck(&["Narration"]).await;

    let events = app
        .events(&format!("/generate-audio/{}", images[0].id))
        .await;

    assert_eq!(
        events[..4],
        [
            "Generating audio file".to_string(),
            "Audio file generated".to_string(),
            "Audio uploaded to storage".to_string(),
            "Slide image updated with audio URL".to_string(),
        ]
    );
    let last = parse(&events[4]);
    assert_eq!(last["status"], "success");
    assert_eq!(last["status_code"], 200);
}

#[tokio::test]
async fn batch_audio_voices_every_page() {
    let app = TestApp::new();
    let (slide, _) = app.seed_deck(&["one", "two"]).await;

    let (status, body) = app
        .post(&format!("/generate-all-audio/{}", slide.id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "message": "Audio generated for all slide images"})
    );
    assert_eq!(app.speech.call_count(), 2);
}

// =============================================================================
// Quiz, flashcards and search
// =============================================================================

#[tokio::test]
async fn batch_quiz_is_stored_and_listed() {
    let app = TestApp::new();
    let (slide, images) = app.seed_deck(&["Cells divide", "DNA replicates"]).await;
    app.ai.push_response(
        json!({"quiz_questions": [{
            "question": "What replicates before division?",
            "answer_choices": ["DNA", "RNA", "Protein", "Lipid"],
            "answer": "DNA",
            "rationale": "Replication precedes mitosis."
        }]})
        .to_string(),
    );

    let (status, generated) = app
        .post(&format!("/generate-quiz/{}", slide.id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let questions = generated["data"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["slide_image_id"], images[1].id.to_string());

    let (_, listed) = app.get(&format!("/quiz-questions/{}", slide.id)).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (_, slides) = app.get("/slides-with-quiz-questions").await;
    assert_eq!(slides["data"][0]["id"], slide.id.to_string());

    let quiz_id = questions[0]["id"].as_str().unwrap();
    let (status, _) = app
        .request(Method::DELETE, &format!("/quiz-question/{}", quiz_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = app.get(&format!("/quiz-questions/{}", slide.id)).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn page_flashcards_are_listed_per_image() {
    let app = TestApp::new();
    let (slide, images) = app.seed_deck(&["Osmosis", "Diffusion"]).await;
    app.ai.push_response(
        "```json\n{\"flashcards\": [{\"question\": \"Osmosis?\", \"answer\": \"Water movement\"}]}\n```",
    );

    let (status, _) = app
        .get(&format!("/generate-flashcards/{}/{}", slide.id, images[0].id))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, page) = app
        .get(&format!("/flashcards/{}/{}", slide.id, images[0].id))
        .await;
    assert_eq!(page["data"][0]["answer"], "Water movement");

    let (_, other) = app
        .get(&format!("/flashcards/{}/{}", slide.id, images[1].id))
        .await;
    assert_eq!(other["data"], json!([]));
}

#[tokio::test]
async fn search_requires_a_question() {
    let app = TestApp::new();
    let (status, body) = app.post("/search", json!({"question": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
}

#[tokio::test]
async fn search_returns_the_answer() {
    let app = TestApp::new();
    app.ai.push_response("ATP is the energy currency of the cell.");

    let (status, body) = app
        .post("/search", json!({"question": "What is ATP?", "context": "Lecture 3"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "ATP is the energy currency of the cell.");
}

// =============================================================================
// Users, credits and access codes
// =============================================================================

#[tokio::test]
async fn credits_are_adjusted_and_guarded() {
    let app = TestApp::new();
    app.post("/user", json!({"user_id": "auth0-42", "first_name": "Ada"}))
        .await;

    let (_, balance) = app.get("/credits/auth0-42").await;
    assert_eq!(balance, json!({"credits": 100, "status_code": 200}));

    let (_, added) = app.post("/credits/auth0-42/add/5", json!({})).await;
    assert_eq!(added["message"], "Credits added successfully");
    assert_eq!(added["credits"], 105);

    let (status, refused) = app.post("/credits/auth0-42/remove/500", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(refused["error"], "Insufficient credits");
    assert_eq!(refused["credits"], 105);

    let (status, invalid) = app.post("/credits/auth0-42/add/-3", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid["error"], "Invalid amount");
}

#[tokio::test]
async fn duplicate_user_is_rejected() {
    let app = TestApp::new();
    app.post("/user", json!({"user_id": "auth0-7"})).await;
    let (status, body) = app.post("/user", json!({"user_id": "auth0-7"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn user_spaces_have_set_semantics() {
    let app = TestApp::new();
    app.post("/user", json!({"user_id": "auth0-9"})).await;
    let (_, space) = app.post("/space", json!({"name": "Physics"})).await;
    let space_id = space["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/user/auth0-9/space/{}", space_id);

    let (_, first) = app.request(Method::PUT, &uri, None).await;
    assert_eq!(first["data"]["space_ids"], json!([space_id]));

    let (status, second) = app.request(Method::PUT, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Space already added to user");

    let (_, spaces) = app.get("/user/auth0-9/space").await;
    assert_eq!(spaces["data"][0]["name"], "Physics");

    let (_, removed) = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(removed["data"]["space_ids"], json!([]));
}

#[tokio::test]
async fn access_code_is_created_and_verified() {
    let app = TestApp::new();
    app.post("/user", json!({"user_id": "auth0-3"})).await;

    let (status, created) = app.post("/access-code", json!({"code": "WELCOME"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status_code"], 201);
    assert_eq!(created["data"]["used"], false);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, verified) = app
        .post(
            "/verify-access-code",
            json!({"code": "WELCOME", "user_id": "auth0-3"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["data"]["used"], false);

    let (_, stored) = app.get(&format!("/access-code/{}", id)).await;
    assert_eq!(stored["data"]["used"], true);

    let (_, user) = app.get("/user/auth0-3").await;
    assert_eq!(user["data"]["access_code"], "WELCOME");
}

#[tokio::test]
async fn unknown_access_code_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/verify-access-code", json!({"code": "NOPE"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Access code not found");
}
