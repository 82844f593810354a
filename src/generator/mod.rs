//! Content generation boundary
//!
//! The rest of the application treats generation as an opaque async
//! capability with unspecified latency. The default implementation is
//! a simulated generator: it sleeps, fills a platform-appropriate
//! template, and fabricates a score. Swapping in a real model backend
//! means implementing `ContentGenerator` and changing nothing else.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use crate::data::ContentBody;

/// Generation request: a topic (free-form or a trend title) plus
/// target platform and content type.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub platform: String,
    pub content_type: String,
    pub topic: String,
}

/// What a generator returns on success.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub content: ContentBody,
    /// 0-100
    pub viral_score: u8,
    pub estimated_reach: String,
    pub engagement_prediction: String,
}

/// Generator failure, surfaced to users as one retryable notification.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GeneratorError(pub String);

/// Opaque content generation capability
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
    -> Result<GenerationOutcome, GeneratorError>;
}

/// Timer-delayed template generator
pub struct SimulatedGenerator {
    latency: std::time::Duration,
}

impl SimulatedGenerator {
    pub fn new(latency: std::time::Duration) -> Self {
        Self { latency }
    }

    fn build_content(request: &GenerationRequest) -> ContentBody {
        let topic = &request.topic;
        match request.platform.as_str() {
            "Blog" | "Newsletter" => ContentBody {
                title: Some(format!("{}: The Complete Guide for Content Creators", topic)),
                body: Some(format!(
                    "The landscape around {} is shifting fast. This guide breaks down \
                     what is driving the trend, who is winning with it, and how to \
                     position your own content before the moment passes.",
                    topic
                )),
                outline: Some(format!(
                    "H1: {topic}\nH2: Why it is trending now\nH2: What top creators are doing\nH2: How to participate\nH2: What to watch next"
                )),
                ..ContentBody::default()
            },
            "LinkedIn" => ContentBody {
                hook: Some(format!("Most professionals are sleeping on {}.", topic)),
                body: Some(format!(
                    "Here is what I learned watching {} take off this week, and what \
                     it means for anyone building an audience in this space.",
                    topic
                )),
                cta: Some("What's your take? Share it in the comments.".to_string()),
                ..ContentBody::default()
            },
            _ => ContentBody {
                hook: Some(format!("🔥 {} is everywhere right now — here's why", topic)),
                caption: Some(format!(
                    "Everyone is talking about {topic} and for good reason. \
                     Here's the quick breakdown you actually need. ✨"
                )),
                hashtags: Some(hashtags_for(topic)),
                cta: Some("Save this post and share it with a friend!".to_string()),
                ..ContentBody::default()
            },
        }
    }
}

fn hashtags_for(topic: &str) -> String {
    topic
        .split_whitespace()
        .filter(|word| word.chars().all(|c| c.is_alphanumeric()))
        .take(4)
        .map(|word| {
            let mut tag = String::from("#");
            tag.push_str(word);
            tag
        })
        .chain(["#Trending".to_string(), "#ContentCreator".to_string()])
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl ContentGenerator for SimulatedGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GeneratorError> {
        // Simulated model latency
        tokio::time::sleep(self.latency).await;

        let (viral_score, reach_low, reach_high) = {
            let mut rng = rand::thread_rng();
            let score: u8 = rng.gen_range(70..=98);
            let low: u32 = rng.gen_range(5..=20);
            (score, low, low * 2)
        };

        let engagement_prediction = if viral_score >= 85 { "High" } else { "Medium" };

        Ok(GenerationOutcome {
            content: Self::build_content(request),
            viral_score,
            estimated_reach: format!("{}K-{}K impressions", reach_low, reach_high),
            engagement_prediction: engagement_prediction.to_string(),
        })
    }
}
