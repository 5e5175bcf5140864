//! GeminiClient のHTTP往復テスト
//!
//! ローカルに立てた簡易HTTPサーバに向けて、成功・非成功ステータス・不正応答を確認

use serde_json::json;
use std::time::Duration;
use texture_scan::{AnalysisError, GeminiClient, MaterialAnalyzer};
use texture_scan_common::parse_material_analysis;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const WOOL_TWILL_JSON: &str = include_str!("fixtures/wool_twill.json");
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G'];

/// 1リクエストだけ応答するスタブ。受信したリクエスト本文を返す
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut received = Vec::new();
        let mut buf = [0u8; 8192];
        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            received.extend_from_slice(&buf[..n]);
            if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&received[..header_end]).to_string();
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while received.len() < header_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let request_line = headers.lines().next().unwrap_or_default().to_string();
        let request_body = String::from_utf8_lossy(&received[header_end..]).to_string();
        format!("{}\n{}", request_line, request_body)
    });

    (base_url, handle)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-2.0-flash", base_url, 0.1, Duration::from_secs(5))
        .expect("client")
}

fn generate_response(text: &str) -> String {
    json!({
        "candidates": [
            {
                "content": { "parts": [ { "text": text } ], "role": "model" },
                "finishReason": "STOP"
            }
        ]
    })
    .to_string()
}

/// 成功応答はそのまま MaterialAnalysis になる
#[tokio::test]
async fn test_analyze_success() {
    let (base_url, server) = serve_once("200 OK", generate_response(WOOL_TWILL_JSON)).await;

    let analysis = client(&base_url)
        .analyze(PNG_BYTES, "image/png", Some("wool coat"))
        .await
        .expect("analyze");

    assert_eq!(analysis, parse_material_analysis(WOOL_TWILL_JSON).unwrap());
    assert_eq!(analysis.material_type, "Wool Twill");

    let received = server.await.unwrap();
    let (request_line, body) = received.split_once('\n').unwrap();
    assert!(request_line.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent?key=test-key"));

    let request: serde_json::Value = serde_json::from_str(body).unwrap();
    let parts = &request["contents"][0]["parts"];
    assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[0]["inline_data"]["data"], "iVBORw==");
    assert!(parts[1]["text"].as_str().unwrap().contains("\"wool coat\""));
    assert_eq!(request["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(request["generationConfig"]["responseSchema"]["type"], "OBJECT");
}

/// コードフェンス付きの応答テキストも受け付ける
#[tokio::test]
async fn test_analyze_fenced_text() {
    let fenced = format!("```json\n{}\n```", WOOL_TWILL_JSON);
    let (base_url, _server) = serve_once("200 OK", generate_response(&fenced)).await;

    let analysis = client(&base_url).analyze(PNG_BYTES, "image/png", None).await.unwrap();
    assert_eq!(analysis.material_type, "Wool Twill");
}

/// 非成功ステータスは TransportFailure
#[tokio::test]
async fn test_analyze_server_error() {
    let body = json!({ "error": { "code": 500, "message": "internal" } }).to_string();
    let (base_url, _server) = serve_once("500 Internal Server Error", body).await;

    let err = client(&base_url).analyze(PNG_BYTES, "image/png", None).await.unwrap_err();

    match err {
        AnalysisError::TransportFailure(message) => {
            assert!(message.contains("500"));
            assert!(!message.contains("test-key"), "APIキーが漏れている: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// JSONでない応答テキストは MalformedResponse
#[tokio::test]
async fn test_analyze_non_json_text() {
    let (base_url, _server) =
        serve_once("200 OK", generate_response("I cannot analyze this image.")).await;

    let err = client(&base_url).analyze(PNG_BYTES, "image/png", None).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

/// 必須フィールド欠落も MalformedResponse
#[tokio::test]
async fn test_analyze_missing_field() {
    let mut value: serde_json::Value = serde_json::from_str(WOOL_TWILL_JSON).unwrap();
    value.as_object_mut().unwrap().remove("color_analysis");
    let (base_url, _server) = serve_once("200 OK", generate_response(&value.to_string())).await;

    let err = client(&base_url).analyze(PNG_BYTES, "image/png", None).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

/// 接続できない場合は TransportFailure
#[tokio::test]
async fn test_analyze_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base_url).analyze(PNG_BYTES, "image/png", None).await.unwrap_err();
    assert!(matches!(err, AnalysisError::TransportFailure(_)));
}

/// 応答が返らない場合はクライアント側のタイムアウトで TransportFailure
#[tokio::test]
async fn test_analyze_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let client = GeminiClient::new(
        "test-key",
        "gemini-2.0-flash",
        base_url.as_str(),
        0.1,
        Duration::from_millis(200),
    )
    .unwrap();

    let err = client.analyze(PNG_BYTES, "image/png", None).await.unwrap_err();

    match err {
        AnalysisError::TransportFailure(message) => {
            assert!(message.starts_with("timeout"), "{}", message);
            assert!(!message.contains("test-key"), "APIキーが漏れている: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
