use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use suggestion_service::config::{HeuristConfig, OpenAiConfig, SuggestionConfig};
use suggestion_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the service on a random port, pointing both upstream clients
    /// at the given base URLs.
    pub async fn spawn(trend_api_url: &str, completion_api_url: &str) -> Self {
        let config = SuggestionConfig {
            common: CoreConfig { port: 0 },
            heurist: HeuristConfig {
                api_url: trend_api_url.to_string(),
            },
            openai: OpenAiConfig {
                api_key: Secret::new("test-key".to_string()),
                api_base_url: completion_api_url.to_string(),
                model: "gpt-4".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept requests by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    /// POST a niche to the suggestion endpoint.
    pub async fn post_chatbot(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/chatbot/", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
