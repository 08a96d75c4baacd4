use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::{json, Value};

const CREATE_DRAFT_MUTATION: &str = r#"
mutation CreateDraft($input: CreateDraftInput!) {
    createDraft(input: $input) {
        draft {
            id
        }
    }
}
"#;

const PUBLISH_DRAFT_MUTATION: &str = r#"
mutation PublishDraft($input: PublishDraftInput!) {
    publishDraft(input: $input) {
        post {
            id
            title
            url
        }
    }
}
"#;

/// Blog platform client. Publishing is two chained mutations: create a draft,
/// then publish it by the returned draft id.
pub struct HashnodeClient {
    client: Client,
    api_key: String,
    publication_id: String,
    url: String,
}

impl HashnodeClient {
    pub fn new(api_key: String, publication_id: String) -> Self {
        HashnodeClient {
            client: Client::new(),
            api_key,
            publication_id,
            url: "https://gql.hashnode.com".to_string(),
        }
    }

    /// A response body carrying an `errors` key is a failure regardless of
    /// the HTTP status.
    async fn mutate(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });
        let response: Value = self
            .client
            .post(&self.url)
            .header("Authorization", &self.api_key)
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        match response.get("errors") {
            Some(errors) => Err(anyhow!("mutation returned errors: {}", errors)),
            None => Ok(response),
        }
    }

    pub async fn create_draft(&self, title: &str, content_markdown: &str) -> Result<String> {
        let variables = json!({
            "input": {
                "publicationId": self.publication_id,
                "title": title,
                "contentMarkdown": content_markdown,
            }
        });
        let response = self.mutate(CREATE_DRAFT_MUTATION, variables).await?;

        let draft_id = response
            .pointer("/data/createDraft/draft/id")
            .and_then(Value::as_str)
            .context("draft id missing from createDraft response")?;
        Ok(draft_id.to_string())
    }

    pub async fn publish_draft(&self, draft_id: &str) -> Result<String> {
        let variables = json!({ "input": { "draftId": draft_id } });
        let response = self.mutate(PUBLISH_DRAFT_MUTATION, variables).await?;

        let post_url = response
            .pointer("/data/publishDraft/post/url")
            .and_then(Value::as_str)
            .context("post url missing from publishDraft response")?;
        Ok(post_url.to_string())
    }

    pub async fn publish(&self, title: &str, content_markdown: &str) -> Result<String> {
        let draft_id = self.create_draft(title, content_markdown).await?;
        log::info!("Created draft {}", draft_id);
        self.publish_draft(&draft_id).await
    }
}
