use std::error::Error;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

const WRITER_MODEL: &str = "gpt-4-turbo";
const WRITER_ROLE: &str = "You are a professional travel blogger.";

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

impl Default for OpenaiClient {
    fn default() -> Self {
        OpenaiClient {
            client: Client::new(),
        }
    }
}

impl OpenaiClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenaiClient {
            client: Client::with_config(config),
        }
    }

    /// One request, one response. The prompt is the operator's template, the
    /// brief is the hotel's ledger row rendered as plain text.
    pub async fn generate_post_markdown(
        &self,
        prompt: &str,
        hotel_brief: &str,
    ) -> Result<String, Box<dyn Error>> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(WRITER_MODEL)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(WRITER_ROLE)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(format!("{}\n\n{}", prompt, hotel_brief))
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .ok_or("No choices in Openai response")?
            .message
            .content
            .clone()
            .ok_or("No content")?;

        Ok(content)
    }
}
